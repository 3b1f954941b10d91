//! Credential provision for the assistant service.
//!
//! Token acquisition (OAuth dances, key exchange, cookie refresh) is the
//! host's business. The widget only asks for a bearer token when it opens
//! a session, through the [`CredentialProvider`] trait.

use async_trait::async_trait;

use crate::Result;

/// Supplies a bearer credential on demand.
///
/// Implementations may fail; failures surface to the user as a session
/// initialization error and are retried on the next explicit open.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Fetch a bearer token for the assistant service.
    async fn get_token(&self) -> Result<String>;
}

/// Provider wrapping a token the host already holds.
pub struct StaticToken {
    token: String,
}

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticToken {
    async fn get_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// Fake provider for testing. Pops scripted outcomes, then falls back to
/// a fixed token.
#[cfg(test)]
pub struct FakeProvider {
    outcomes: std::sync::Mutex<std::collections::VecDeque<Result<String>>>,
}

#[cfg(test)]
impl FakeProvider {
    pub fn new() -> Self {
        Self {
            outcomes: std::sync::Mutex::new(std::collections::VecDeque::new()),
        }
    }

    /// Queue a successful token fetch.
    pub fn push_ok(self, token: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(token.to_string()));
        self
    }

    /// Queue a failing token fetch.
    pub fn push_err(self, message: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(crate::Error::Credential(message.to_string())));
        self
    }
}

#[cfg(test)]
#[async_trait]
impl CredentialProvider for FakeProvider {
    async fn get_token(&self) -> Result<String> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("fake-token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_token() {
        let provider = StaticToken::new("tok_123");
        let token = tokio_test::block_on(provider.get_token()).unwrap();
        assert_eq!(token, "tok_123");
    }

    #[tokio::test]
    async fn test_fake_provider_scripted_then_fallback() {
        let provider = FakeProvider::new().push_err("expired").push_ok("tok_2");

        assert!(provider.get_token().await.is_err());
        assert_eq!(provider.get_token().await.unwrap(), "tok_2");
        assert_eq!(provider.get_token().await.unwrap(), "fake-token");
    }
}
