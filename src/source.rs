//! Secret source trait definition.
//!
//! This module defines the [`SecretSource`] trait, the seam between the
//! client factory and whatever store actually holds the connection strings.
//! Production code talks to Azure Key Vault; tests talk to an in-memory mock.

use crate::Result;
use async_trait::async_trait;

/// A store that resolves named secrets to their current values.
///
/// All implementations must be `Send + Sync` to support concurrent access
/// across async tasks. Lookups take `&self`; implementations that need
/// mutable state use interior mutability.
///
/// Implementations must not log or otherwise expose secret values.
///
/// # Implementations
///
/// - [`AzureKeyVaultSource`](crate::sources::azure::AzureKeyVaultSource)
///   (feature `azure`): SDK-backed Key Vault lookups
/// - [`MockSecretSource`](crate::sources::mock::MockSecretSource)
///   (feature `mock`): in-memory map with error injection
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Returns the source name (e.g. "azurekeyvault", "mock").
    fn name(&self) -> &str;

    /// Fetches the current value of the named secret.
    ///
    /// Each call is a fresh lookup; sources do not cache values. No retry is
    /// performed at this layer — transient throttling is left to the SDK
    /// transport or the embedding application.
    ///
    /// # Errors
    ///
    /// - [`VaultwireError::NotFound`](crate::VaultwireError::NotFound):
    ///   the secret does not exist
    /// - [`VaultwireError::Other`](crate::VaultwireError::Other):
    ///   transport or authentication failure
    async fn get_secret(&self, name: &str) -> Result<String>;
}
