//! Vaultwire - vault-backed bootstrap for Azure data-plane clients.
//!
//! Vaultwire resolves connection secrets from Azure Key Vault and hands back
//! pre-configured clients for Cosmos DB and Blob Storage. Initialize a
//! [`ClientFactory`] once with a vault endpoint and credential; on demand it
//! derives a secret name from a logical account name, fetches the connection
//! string, and constructs a client owned entirely by the caller.
//!
//! # Features
//!
//! - **One lookup shape**: both client paths share a single
//!   derive-name/fetch/build operation
//! - **Async/Await**: built on tokio for non-blocking I/O
//! - **Explicit initialization**: the factory is an ordinary value passed by
//!   reference; an opt-in process-wide slot exists for embedding applications
//! - **Error Context**: lookup failures carry the secret name and vault URL,
//!   and are logged before they propagate
//! - **Feature Flags**: cloud SDKs compile only when enabled
//!
//! # Quick Start
//!
//! ```no_run
//! use vaultwire::{ClientFactory, CosmosOptions};
//!
//! #[tokio::main]
//! async fn main() -> vaultwire::Result<()> {
//!     // Authenticate against the vault with the ambient Azure credential
//!     # #[cfg(feature = "full")]
//!     let factory =
//!         ClientFactory::azure_with_default_credential("https://myvault.vault.azure.net")?;
//!     # #[cfg(not(feature = "full"))]
//!     # let factory = ClientFactory::new(
//!     #     vaultwire::sources::mock::MockSecretSource::new(),
//!     #     "https://myvault.vault.azure.net",
//!     # )?;
//!
//!     // Resolve `orders-CosmosDB-ConnectionString` and build a client
//!     # #[cfg(feature = "full")]
//!     let cosmos = factory
//!         .create_cosmos_client(
//!             "orders",
//!             CosmosOptions::new()
//!                 .with_user_agent_prefix("migrator")
//!                 .with_bulk_execution(true),
//!         )
//!         .await?;
//!
//!     // Resolve `orders-BlobStorage-ConnectionString`, scoped to a container
//!     # #[cfg(feature = "full")]
//!     let container = factory
//!         .create_blob_container_client("orders", "deadletter")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Secret naming
//!
//! Secrets are addressed as `<account><suffix>`:
//!
//! | Suffix | Service |
//! |--------|---------|
//! | `-CosmosDB-ConnectionString` | Cosmos DB |
//! | `-BlobStorage-ConnectionString` | Blob Storage |
//!
//! # Feature Flags
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `mock` | yes | In-memory secret source for testing |
//! | `azure` | no | Key Vault secret source |
//! | `cosmos` | no | Cosmos DB client construction (implies `azure`) |
//! | `blob` | no | Blob container client construction (implies `azure`) |
//! | `full` | no | All of the above |

pub mod clients;
pub mod connstr;
pub mod error;
pub mod factory;
pub mod naming;
pub mod source;
pub mod sources;
pub mod validation;

pub use clients::blob::BlobContainerConfig;
pub use clients::cosmos::{CosmosClientConfig, CosmosOptions, ThrottleRetry};
pub use connstr::{CosmosConnectionString, StorageConnectionString};
pub use error::{Result, VaultwireError};
pub use factory::ClientFactory;
pub use naming::{secret_name, SecretSuffix};
pub use source::SecretSource;

#[cfg(feature = "cosmos")]
pub use clients::cosmos::CosmosHandle;

use std::sync::OnceLock;

static GLOBAL_FACTORY: OnceLock<ClientFactory> = OnceLock::new();

/// Installs a factory into the process-wide slot.
///
/// Embedding applications that cannot thread the factory through their call
/// graph may install it once at startup and retrieve it with [`global`].
/// Installation happens-before every successful [`global`] call.
///
/// # Errors
///
/// Returns [`VaultwireError::AlreadyInitialized`] if a factory was already
/// installed; the slot is write-once for the life of the process.
pub fn install(factory: ClientFactory) -> Result<()> {
    GLOBAL_FACTORY
        .set(factory)
        .map_err(|_| VaultwireError::AlreadyInitialized)
}

/// Returns the process-wide factory.
///
/// # Errors
///
/// Returns [`VaultwireError::NotInitialized`] if [`install`] has not been
/// called.
pub fn global() -> Result<&'static ClientFactory> {
    GLOBAL_FACTORY.get().ok_or(VaultwireError::NotInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::mock::MockSecretSource;

    // The slot is process-wide, so ordering between these assertions matters;
    // they live in one test body.
    #[test]
    fn test_global_slot_lifecycle() {
        assert!(matches!(global(), Err(VaultwireError::NotInitialized)));

        let factory =
            ClientFactory::new(MockSecretSource::new(), "https://vault.example.net").unwrap();
        install(factory).unwrap();

        assert_eq!(global().unwrap().vault_url(), "https://vault.example.net");

        let second =
            ClientFactory::new(MockSecretSource::new(), "https://other.example.net").unwrap();
        assert!(matches!(
            install(second),
            Err(VaultwireError::AlreadyInitialized)
        ));

        // First install wins; the slot is unchanged.
        assert_eq!(global().unwrap().vault_url(), "https://vault.example.net");
    }
}
