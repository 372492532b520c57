//! # Response Envelope
//!
//! The booking backend answers either `{ "data": { ... } }` or the bare
//! object. [`Envelope`] captures both shapes and [`Envelope::into_inner`]
//! is the only place the two are reconciled.

use serde::{Deserialize, Serialize};

/// A backend response body in one of its two accepted shapes.
///
/// `Wrapped` is tried first, so a body carrying a `data` object is always
/// read from `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    /// `{ "data": T }`
    Wrapped { data: T },
    /// `T` at the top level
    Bare(T),
}

impl<T> Envelope<T> {
    /// Normalize to the payload regardless of shape
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }

    /// Borrow the payload regardless of shape
    pub fn inner(&self) -> &T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }

    pub fn is_wrapped(&self) -> bool {
        matches!(self, Envelope::Wrapped { .. })
    }
}

impl<T> From<T> for Envelope<T> {
    fn from(inner: T) -> Self {
        Envelope::Bare(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct UrlBody {
        #[serde(default)]
        url: Option<String>,
    }

    #[test]
    fn test_wrapped_shape() {
        let env: Envelope<UrlBody> =
            serde_json::from_value(json!({ "data": { "url": "https://pay.example/s1" } }))
                .unwrap();
        assert!(env.is_wrapped());
        assert_eq!(env.into_inner().url.as_deref(), Some("https://pay.example/s1"));
    }

    #[test]
    fn test_bare_shape() {
        let env: Envelope<UrlBody> =
            serde_json::from_value(json!({ "url": "https://pay.example/s2", "id": "cs_2" }))
                .unwrap();
        assert!(!env.is_wrapped());
        assert_eq!(env.inner().url.as_deref(), Some("https://pay.example/s2"));
    }

    #[test]
    fn test_empty_data_is_still_wrapped() {
        let env: Envelope<UrlBody> = serde_json::from_value(json!({ "data": {} })).unwrap();
        assert!(env.is_wrapped());
        assert_eq!(env.into_inner().url, None);
    }

    #[test]
    fn test_null_data_falls_back_to_bare() {
        let env: Envelope<UrlBody> = serde_json::from_value(json!({ "data": null })).unwrap();
        assert!(!env.is_wrapped());
        assert_eq!(env.into_inner().url, None);
    }
}
