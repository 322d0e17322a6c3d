//! The client factory: resolve a secret, hand back a configured client.
//!
//! [`ClientFactory`] is constructed once at process start — from a vault URL
//! and credential in production, or from a mock source in tests — and passed
//! by reference to every consumer. Each operation derives a secret name,
//! fetches the connection string fresh from the vault, and builds a client
//! recipe from it. Nothing is cached here.

use std::sync::Arc;

use crate::clients::blob::BlobContainerConfig;
use crate::clients::cosmos::{CosmosClientConfig, CosmosOptions};
use crate::connstr::{CosmosConnectionString, StorageConnectionString};
use crate::naming::{secret_name, SecretSuffix};
use crate::validation::require_non_blank;
use crate::{Result, SecretSource, VaultwireError};

#[cfg(feature = "azure")]
use crate::sources::azure::AzureKeyVaultSource;
#[cfg(feature = "azure")]
use azure_core::auth::TokenCredential;

#[cfg(feature = "cosmos")]
use crate::clients::cosmos::CosmosHandle;
#[cfg(feature = "blob")]
use azure_storage_blobs::prelude::ContainerClient;

/// Resolves connection secrets and constructs pre-configured clients.
///
/// The factory is `Send + Sync`; concurrent lookups are safe. It holds no
/// mutable state — the only shared resource is the secret source, and every
/// call fetches its secret fresh.
///
/// # Example
///
/// ```
/// use vaultwire::sources::mock::MockSecretSource;
/// use vaultwire::{ClientFactory, CosmosOptions};
///
/// #[tokio::main]
/// async fn main() -> vaultwire::Result<()> {
///     let source = MockSecretSource::new();
///     source
///         .set_secret(
///             "acct-CosmosDB-ConnectionString",
///             "AccountEndpoint=https://acct.documents.azure.com:443/;AccountKey=bm90IGEgcmVhbCBrZXk=;",
///         )
///         .await;
///
///     let factory = ClientFactory::new(source, "https://vault.example.net")?;
///     let config = factory.cosmos_config("acct", CosmosOptions::new()).await?;
///
///     assert_eq!(config.account_name(), "acct");
///     Ok(())
/// }
/// ```
pub struct ClientFactory {
    source: Arc<dyn SecretSource>,
    vault_url: String,
}

impl ClientFactory {
    /// Creates a factory over an arbitrary secret source.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::InvalidArgument`] if `vault_url` is blank.
    pub fn new(source: impl SecretSource + 'static, vault_url: &str) -> Result<Self> {
        Self::with_shared_source(Arc::new(source), vault_url)
    }

    /// Creates a factory over an already-shared secret source.
    ///
    /// Useful when the caller wants to keep its own handle on the source, as
    /// tests do with the mock.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::InvalidArgument`] if `vault_url` is blank.
    pub fn with_shared_source(source: Arc<dyn SecretSource>, vault_url: &str) -> Result<Self> {
        let vault_url = require_non_blank(vault_url, "vault_url")?;

        Ok(Self {
            source,
            vault_url: vault_url.to_string(),
        })
    }

    /// Creates a factory over Azure Key Vault with an explicit credential.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::InvalidArgument`] if `vault_url` is blank, or
    /// an SDK error if the client cannot be constructed.
    #[cfg(feature = "azure")]
    pub fn azure(vault_url: &str, credential: Arc<dyn TokenCredential>) -> Result<Self> {
        let vault_url = require_non_blank(vault_url, "vault_url")?;
        Self::new(AzureKeyVaultSource::new(vault_url, credential)?, vault_url)
    }

    /// Creates a factory over Azure Key Vault using the ambient credential.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::InvalidArgument`] if `vault_url` is blank, or
    /// an SDK error if no ambient credential can be constructed.
    #[cfg(feature = "azure")]
    pub fn azure_with_default_credential(vault_url: &str) -> Result<Self> {
        let vault_url = require_non_blank(vault_url, "vault_url")?;
        Self::new(
            AzureKeyVaultSource::with_default_credential(vault_url)?,
            vault_url,
        )
    }

    /// The vault URL this factory resolves secrets from.
    pub fn vault_url(&self) -> &str {
        &self.vault_url
    }

    /// Name of the underlying secret source.
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Fetches the current value of the named secret.
    ///
    /// On lookup failure, one error event carrying the secret name and vault
    /// URL is logged before the error propagates. The secret value itself is
    /// never logged. No retry happens here.
    ///
    /// # Errors
    ///
    /// - [`VaultwireError::InvalidArgument`]: `name` is blank
    /// - [`VaultwireError::SecretLookup`]: the vault call failed; the
    ///   underlying error rides along as `source()`
    pub async fn get_secret(&self, name: &str) -> Result<String> {
        let name = require_non_blank(name, "secret name")?;

        match self.source.get_secret(name).await {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(
                    secret = %name,
                    vault = %self.vault_url,
                    error = %err,
                    "cannot retrieve secret from vault"
                );
                Err(VaultwireError::secret_lookup(name, &self.vault_url, err))
            }
        }
    }

    /// Derives the secret name for `account_name` + `suffix`, fetches the
    /// connection string, and runs `build` on it.
    ///
    /// Both client paths share this shape; the `*_config` methods are thin
    /// wrappers over it. The builder receives the raw connection string and
    /// is responsible for parsing it.
    ///
    /// # Errors
    ///
    /// Propagates name-derivation, lookup, and builder errors unchanged.
    pub async fn resolve_and_build<T, F>(
        &self,
        account_name: &str,
        suffix: SecretSuffix,
        build: F,
    ) -> Result<T>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        let name = secret_name(account_name, suffix)?;
        let connection_string = self.get_secret(&name).await?;
        build(&connection_string)
    }

    /// Resolves the Cosmos DB connection string for `account_name` and
    /// applies `options` to it.
    ///
    /// Call [`CosmosClientConfig::build`] on the result (feature `cosmos`) to
    /// construct the SDK client, or use
    /// [`create_cosmos_client`](Self::create_cosmos_client) directly.
    ///
    /// # Errors
    ///
    /// - [`VaultwireError::InvalidArgument`]: `account_name` is blank
    /// - [`VaultwireError::SecretLookup`]: the vault call failed
    /// - [`VaultwireError::ConnectionString`]: the secret is not a usable
    ///   Cosmos connection string
    pub async fn cosmos_config(
        &self,
        account_name: &str,
        options: CosmosOptions,
    ) -> Result<CosmosClientConfig> {
        self.resolve_and_build(account_name, SecretSuffix::CosmosConnectionString, |raw| {
            CosmosClientConfig::new(CosmosConnectionString::parse(raw)?, options)
        })
        .await
    }

    /// Resolves the Blob Storage connection string for `account_name`,
    /// scoped to `container_name`.
    ///
    /// # Errors
    ///
    /// - [`VaultwireError::InvalidArgument`]: `account_name` or
    ///   `container_name` is blank (checked before any vault call)
    /// - [`VaultwireError::SecretLookup`]: the vault call failed
    /// - [`VaultwireError::ConnectionString`]: the secret is not a usable
    ///   storage connection string
    pub async fn blob_config(
        &self,
        account_name: &str,
        container_name: &str,
    ) -> Result<BlobContainerConfig> {
        let container_name = require_non_blank(container_name, "container_name")?.to_string();

        self.resolve_and_build(
            account_name,
            SecretSuffix::BlobStorageConnectionString,
            |raw| BlobContainerConfig::new(StorageConnectionString::parse(raw)?, &container_name),
        )
        .await
    }

    /// Resolves and constructs a Cosmos DB client in one step.
    ///
    /// # Errors
    ///
    /// See [`cosmos_config`](Self::cosmos_config) and
    /// [`CosmosClientConfig::build`].
    #[cfg(feature = "cosmos")]
    pub async fn create_cosmos_client(
        &self,
        account_name: &str,
        options: CosmosOptions,
    ) -> Result<CosmosHandle> {
        self.cosmos_config(account_name, options).await?.build()
    }

    /// Resolves and constructs a blob container client in one step.
    ///
    /// # Errors
    ///
    /// See [`blob_config`](Self::blob_config).
    #[cfg(feature = "blob")]
    pub async fn create_blob_container_client(
        &self,
        account_name: &str,
        container_name: &str,
    ) -> Result<ContainerClient> {
        self.blob_config(account_name, container_name).await?.build()
    }
}
