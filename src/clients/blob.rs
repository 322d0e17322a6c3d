//! Blob Storage container client configuration and construction.

use crate::connstr::StorageConnectionString;
use crate::validation::require_non_blank;
use crate::Result;

#[cfg(feature = "blob")]
use azure_storage::StorageCredentials;
#[cfg(feature = "blob")]
use azure_storage_blobs::prelude::{ClientBuilder, ContainerClient};

/// A fully resolved blob container client recipe.
///
/// Produced by [`ClientFactory::blob_config`](crate::ClientFactory::blob_config)
/// after the connection string secret has been fetched and parsed.
#[derive(Debug, Clone)]
pub struct BlobContainerConfig {
    connection: StorageConnectionString,
    container_name: String,
}

impl BlobContainerConfig {
    /// Combines a parsed connection string with the target container name.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::InvalidArgument`](crate::VaultwireError::InvalidArgument)
    /// if `container_name` is blank.
    pub fn new(connection: StorageConnectionString, container_name: &str) -> Result<Self> {
        let container_name = require_non_blank(container_name, "container_name")?;

        Ok(Self {
            connection,
            container_name: container_name.to_string(),
        })
    }

    /// Storage account name from the connection string.
    pub fn account_name(&self) -> &str {
        &self.connection.account_name
    }

    /// Target container name.
    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    /// Constructs a client scoped to the named container.
    #[cfg(feature = "blob")]
    pub fn build(self) -> Result<ContainerClient> {
        let credentials = StorageCredentials::access_key(
            self.connection.account_name.clone(),
            self.connection.account_key.clone(),
        );

        let client = ClientBuilder::new(self.connection.account_name, credentials)
            .container_client(self.container_name);

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAKE_KEY: &str = "bm90IGEgcmVhbCBrZXk=";

    fn connection() -> StorageConnectionString {
        StorageConnectionString::parse(&format!(
            "DefaultEndpointsProtocol=https;AccountName=mystorage;AccountKey={};EndpointSuffix=core.windows.net",
            FAKE_KEY
        ))
        .unwrap()
    }

    #[test]
    fn test_config_scopes_container() {
        let config = BlobContainerConfig::new(connection(), "media").unwrap();
        assert_eq!(config.account_name(), "mystorage");
        assert_eq!(config.container_name(), "media");
    }

    #[test]
    fn test_blank_container_rejected() {
        let result = BlobContainerConfig::new(connection(), "  ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("container_name"));
    }

    #[cfg(feature = "blob")]
    #[test]
    fn test_build_constructs_client() {
        let config = BlobContainerConfig::new(connection(), "media").unwrap();
        assert!(config.build().is_ok());
    }
}
