//! # Return Path
//!
//! Where the payment provider sends the browser back to, and how the
//! `session_id` it appends is read out again.

use url::Url;

/// Query parameter the provider appends on return
pub const SESSION_ID_PARAM: &str = "session_id";

/// Provider-side placeholder substituted with the real session id
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Application URLs involved in the payment hand-off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnPaths {
    /// Public base URL of the application (e.g. "https://trips.example")
    pub base_url: String,
    /// Return path after a completed payment
    pub success_path: String,
    /// Return path after the user backs out of payment
    pub cancel_path: String,
    /// Payment history page, the call-to-action on terminal states
    pub history_path: String,
}

impl ReturnPaths {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            success_path: "/payment/success".to_string(),
            cancel_path: "/payment/cancel".to_string(),
            history_path: "/dashboard/payments".to_string(),
        }
    }

    pub fn success_url(&self) -> String {
        format!("{}{}", self.base_url, self.success_path)
    }

    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.base_url, self.cancel_path)
    }

    pub fn history_url(&self) -> String {
        format!("{}{}", self.base_url, self.history_path)
    }

    /// Success URL carrying the provider's session-id placeholder
    pub fn success_url_with_session(&self) -> String {
        let success = self.success_url();
        let separator = if success.contains('?') { '&' } else { '?' };
        format!(
            "{}{}{}={}",
            success, separator, SESSION_ID_PARAM, SESSION_ID_PLACEHOLDER
        )
    }
}

impl Default for ReturnPaths {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

/// Pull `session_id` out of a return URL.
///
/// Accepts an absolute URL, a path with a query string, or a bare query
/// string (with or without the leading `?`). An empty value counts as absent.
pub fn session_id_from_url(input: &str) -> Option<String> {
    let input = input.trim();

    let parsed = match Url::parse(input) {
        Ok(url) => url,
        Err(_) => {
            // Everything after the first `?`, or the whole input when it is a bare query
            let query = input.split_once('?').map_or(input, |(_, query)| query);
            Url::parse("http://localhost/")
                .and_then(|base| base.join(&format!("?{}", query)))
                .ok()?
        }
    };

    parsed
        .query_pairs()
        .find(|(key, _)| key == SESSION_ID_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_urls() {
        let paths = ReturnPaths::new("https://trips.example/");

        assert_eq!(paths.success_url(), "https://trips.example/payment/success");
        assert_eq!(paths.cancel_url(), "https://trips.example/payment/cancel");
        assert_eq!(
            paths.success_url_with_session(),
            "https://trips.example/payment/success?session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn test_placeholder_appends_to_existing_query() {
        let mut paths = ReturnPaths::new("https://trips.example");
        paths.success_path = "/payment/success?ref=checkout".to_string();

        assert_eq!(
            paths.success_url_with_session(),
            "https://trips.example/payment/success?ref=checkout&session_id={CHECKOUT_SESSION_ID}"
        );
    }

    #[test]
    fn test_session_id_extraction() {
        assert_eq!(
            session_id_from_url("https://trips.example/payment/success?session_id=cs_test_1"),
            Some("cs_test_1".to_string())
        );
        assert_eq!(
            session_id_from_url("/payment/success?foo=bar&session_id=cs_2"),
            Some("cs_2".to_string())
        );
        assert_eq!(session_id_from_url("?session_id=cs_3"), Some("cs_3".to_string()));
        assert_eq!(session_id_from_url("session_id=cs_4"), Some("cs_4".to_string()));
        assert_eq!(
            session_id_from_url("payment/success?session_id=cs_5"),
            Some("cs_5".to_string())
        );
        assert_eq!(
            session_id_from_url("/payment/success?session_id=cs_6#receipt"),
            Some("cs_6".to_string())
        );
    }

    #[test]
    fn test_session_id_absent() {
        assert_eq!(session_id_from_url("https://trips.example/payment/success"), None);
        assert_eq!(session_id_from_url("/payment/success?session_id="), None);
        assert_eq!(session_id_from_url(""), None);
        assert_eq!(session_id_from_url("/payment/success?sessionid=cs_1"), None);
    }
}
