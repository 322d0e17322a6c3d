//! Mock secret source for testing.
//!
//! Provides an in-memory [`SecretSource`] with error injection so code built
//! on the factory can be tested without a vault.

use crate::{Result, SecretSource, VaultwireError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Mock secret source for testing.
///
/// Stores secrets in memory and counts lookups, with support for error
/// injection to simulate vault failures.
///
/// # Example
///
/// ```
/// use vaultwire::sources::mock::MockSecretSource;
/// use vaultwire::{SecretSource, VaultwireError};
///
/// #[tokio::main]
/// async fn main() -> vaultwire::Result<()> {
///     let mut source = MockSecretSource::new();
///     source.set_secret("api-key", "sk-secret123").await;
///
///     let value = source.get_secret("api-key").await?;
///     assert_eq!(value, "sk-secret123");
///
///     // Simulate a vault outage
///     source.get_error = Some(VaultwireError::invalid_argument("simulated"));
///     assert!(source.get_secret("api-key").await.is_err());
///
///     Ok(())
/// }
/// ```
pub struct MockSecretSource {
    secrets: RwLock<HashMap<String, String>>,
    lookups: AtomicUsize,

    /// Error to return from `get_secret()` instead of a value
    pub get_error: Option<VaultwireError>,
}

impl MockSecretSource {
    /// Creates a new mock source with no secrets.
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
            lookups: AtomicUsize::new(0),
            get_error: None,
        }
    }

    /// Pre-populates the source with a secret.
    ///
    /// Useful for setting up test fixtures.
    pub async fn set_secret(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut secrets = self.secrets.write().await;
        secrets.insert(name.into(), value.into());
    }

    /// Number of `get_secret` calls this source has served.
    ///
    /// Lets tests assert that argument validation rejected a call before any
    /// lookup happened.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl Default for MockSecretSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretSource for MockSecretSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn get_secret(&self, name: &str) -> Result<String> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        if let Some(ref err) = self.get_error {
            return Err(VaultwireError::Other(anyhow::anyhow!("{}", err)));
        }

        let secrets = self.secrets.read().await;
        secrets
            .get(name)
            .cloned()
            .ok_or_else(|| VaultwireError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let source = MockSecretSource::new();
        source.set_secret("test-key", "test-value").await;

        let value = source.get_secret("test-key").await.unwrap();
        assert_eq!(value, "test-value");
    }

    #[tokio::test]
    async fn test_missing_secret() {
        let source = MockSecretSource::new();

        let result = source.get_secret("absent").await;
        assert!(matches!(result, Err(VaultwireError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_error_injection() {
        let mut source = MockSecretSource::new();
        source.set_secret("test-key", "test-value").await;
        source.get_error = Some(VaultwireError::invalid_argument("simulated outage"));

        let result = source.get_secret("test-key").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_lookup_count() {
        let source = MockSecretSource::new();
        source.set_secret("test-key", "test-value").await;
        assert_eq!(source.lookup_count(), 0);

        source.get_secret("test-key").await.unwrap();
        source.get_secret("absent").await.ok();
        assert_eq!(source.lookup_count(), 2);
    }
}
