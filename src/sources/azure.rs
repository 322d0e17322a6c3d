//! Azure Key Vault secret source.

use crate::validation::validate_secret_name;
use crate::{Result, SecretSource, VaultwireError};
use async_trait::async_trait;
use azure_core::auth::TokenCredential;
use azure_identity::DefaultAzureCredential;
use azure_security_keyvault::SecretClient;
use std::sync::Arc;

/// Azure Key Vault secret source.
///
/// Wraps the official SDK's [`SecretClient`]. Credential refresh, transport
/// retries, and connection pooling are all owned by the SDK; this type only
/// issues lookups and maps errors.
pub struct AzureKeyVaultSource {
    client: SecretClient,
    vault_url: String,
}

impl AzureKeyVaultSource {
    /// Creates a source for the given vault using an explicit credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the SDK rejects the vault URL.
    pub fn new(vault_url: impl Into<String>, credential: Arc<dyn TokenCredential>) -> Result<Self> {
        let vault_url = vault_url.into();

        let client = SecretClient::new(&vault_url, credential).map_err(|e| {
            VaultwireError::Other(anyhow::anyhow!("failed to create secret client: {}", e))
        })?;

        Ok(Self { client, vault_url })
    }

    /// Creates a source authenticated with `DefaultAzureCredential`.
    ///
    /// This picks up the ambient identity — environment variables, managed
    /// identity, or the Azure CLI login.
    ///
    /// # Errors
    ///
    /// Returns an error if no ambient credential can be constructed.
    pub fn with_default_credential(vault_url: impl Into<String>) -> Result<Self> {
        let credential = Arc::new(DefaultAzureCredential::create(Default::default()).map_err(
            |e| VaultwireError::Other(anyhow::anyhow!("failed to create Azure credentials: {}", e)),
        )?);

        Self::new(vault_url, credential)
    }

    /// The vault URL this source talks to.
    pub fn vault_url(&self) -> &str {
        &self.vault_url
    }
}

#[async_trait]
impl SecretSource for AzureKeyVaultSource {
    fn name(&self) -> &str {
        "azurekeyvault"
    }

    async fn get_secret(&self, name: &str) -> Result<String> {
        validate_secret_name(name)?;

        let secret = self.client.get(name).into_future().await.map_err(|e| {
            if e.to_string().contains("SecretNotFound") || e.to_string().contains("404") {
                VaultwireError::NotFound(name.to_string())
            } else {
                VaultwireError::Other(anyhow::anyhow!("Azure error: {}", e))
            }
        })?;

        Ok(secret.value)
    }
}
