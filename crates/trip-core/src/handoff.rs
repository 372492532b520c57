//! # Redirect Hand-off
//!
//! Transfers the browsing context to the payment provider's hosted page.
//! Once `redirect` is called the application has no further say until the
//! provider sends the browser back to the return path with a `session_id`.

use std::sync::Mutex;

/// Full navigation to an external URL. Irreversible; nothing is returned.
pub trait RedirectHandoff: Send + Sync {
    fn redirect(&self, url: &str);
}

/// Hand-off that records the target instead of navigating.
///
/// The gateway turns the recorded URL into a `303 See Other`; tests use it to
/// count hand-offs.
#[derive(Debug, Default)]
pub struct CapturedRedirect {
    urls: Mutex<Vec<String>>,
}

impl CapturedRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every URL handed off so far, oldest first
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().map(|urls| urls.clone()).unwrap_or_default()
    }

    /// Most recent target, if any
    pub fn last(&self) -> Option<String> {
        self.urls().pop()
    }

    pub fn count(&self) -> usize {
        self.urls.lock().map(|urls| urls.len()).unwrap_or(0)
    }
}

impl RedirectHandoff for CapturedRedirect {
    fn redirect(&self, url: &str) {
        tracing::info!(target_url = %url, "Handing off to payment provider");
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(url.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_redirect() {
        let handoff = CapturedRedirect::new();
        assert_eq!(handoff.count(), 0);
        assert_eq!(handoff.last(), None);

        handoff.redirect("https://pay.example/s1");

        assert_eq!(handoff.count(), 1);
        assert_eq!(handoff.last().as_deref(), Some("https://pay.example/s1"));
    }
}
