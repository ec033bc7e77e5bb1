//! Session context
//!
//! The bearer token and the commerce the requests act on. Passed
//! explicitly into the client instead of being looked up from storage.

use serde::{Deserialize, Serialize};

/// Header carrying the commerce slug on every request
pub const COMMERCE_HEADER: &str = "x-commerce";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token issued by the backend at login
    pub token: Option<String>,
    /// Commerce slug (subdomain); `None` for superuser sessions
    pub commerce: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_commerce(mut self, commerce: impl Into<String>) -> Self {
        self.commerce = Some(commerce.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub(crate) fn auth_header(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {}", t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_header() {
        assert_eq!(Session::anonymous().auth_header(), None);
        assert!(!Session::anonymous().with_token("").is_authenticated());

        let s = Session::anonymous().with_token("abc").with_commerce("pizzeria");
        assert!(s.is_authenticated());
        assert_eq!(s.auth_header().as_deref(), Some("Bearer abc"));
        assert_eq!(s.commerce.as_deref(), Some("pizzeria"));
    }
}
