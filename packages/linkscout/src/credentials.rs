//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate so API credentials never leak into logs,
//! debug output or error messages. Missing credentials fail fast here,
//! before any network call is made.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::CredentialsError;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g. building a client).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The credential set the pipeline requires.
#[derive(Clone)]
pub struct Credentials {
    /// DataForSEO account login.
    pub dataforseo_login: SecretString,

    /// DataForSEO account password.
    pub dataforseo_password: SecretString,

    /// Gemini API key.
    pub gemini_api_key: SecretString,
}

impl Credentials {
    /// Load all required credentials from the environment.
    ///
    /// Required variables: `DATAFORSEO_LOGIN`, `DATAFORSEO_PASSWORD`,
    /// `GEMINI_API_KEY`. The first absent or empty one fails the load.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Ok(Self {
            dataforseo_login: require("DATAFORSEO_LOGIN")?,
            dataforseo_password: require("DATAFORSEO_PASSWORD")?,
            gemini_api_key: require("GEMINI_API_KEY")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("dataforseo_login", &"[REDACTED]")
            .field("dataforseo_password", &"[REDACTED]")
            .field("gemini_api_key", &"[REDACTED]")
            .finish()
    }
}

fn require(var: &str) -> Result<SecretString, CredentialsError> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Ok(SecretString::new(value)),
        _ => Err(CredentialsError::Missing {
            var: var.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug_or_display() {
        let secret = SecretString::new("super-secret-password");
        assert!(!format!("{:?}", secret).contains("super-secret"));
        assert!(!format!("{}", secret).contains("super-secret"));
        assert!(format!("{:?}", secret).contains("[REDACTED]"));
    }

    #[test]
    fn test_expose_works() {
        let secret = SecretString::new("super-secret-password");
        assert_eq!(secret.expose(), "super-secret-password");
    }

    #[test]
    fn test_credentials_debug_redacts_everything() {
        let credentials = Credentials {
            dataforseo_login: "sk-login-value".into(),
            dataforseo_password: "sk-password-value".into(),
            gemini_api_key: "sk-gemini-value".into(),
        };
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("sk-login-value"));
        assert!(!debug.contains("sk-password-value"));
        assert!(!debug.contains("sk-gemini-value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_require_rejects_empty() {
        std::env::set_var("LINKSCOUT_TEST_EMPTY_VAR", "");
        assert!(matches!(
            require("LINKSCOUT_TEST_EMPTY_VAR"),
            Err(CredentialsError::Missing { .. })
        ));
        assert!(matches!(
            require("LINKSCOUT_TEST_ABSENT_VAR"),
            Err(CredentialsError::Missing { .. })
        ));
    }
}
