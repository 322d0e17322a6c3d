//! Bootstrap against a real Azure Key Vault.
//!
//! Requires an ambient Azure credential (environment variables, managed
//! identity, or `az login`) with get-secret access to the vault.
//!
//! Run with:
//!   VAULTWIRE_VAULT_URL=https://myvault.vault.azure.net \
//!   VAULTWIRE_ACCOUNT=orders \
//!   cargo run --example azure_bootstrap --features full

use vaultwire::{ClientFactory, CosmosOptions};

#[tokio::main]
async fn main() -> vaultwire::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let vault_url = std::env::var("VAULTWIRE_VAULT_URL")
        .unwrap_or_else(|_| "https://myvault.vault.azure.net".to_string());
    let account = std::env::var("VAULTWIRE_ACCOUNT").unwrap_or_else(|_| "orders".to_string());

    println!("Connecting to vault {}", vault_url);
    let factory = ClientFactory::azure_with_default_credential(&vault_url)?;

    let cosmos = factory
        .create_cosmos_client(
            &account,
            CosmosOptions::new()
                .with_user_agent_prefix("vaultwire-demo")
                .with_throttle_retry_forever(true),
        )
        .await?;
    println!(
        "Cosmos client ready (bulk: {}, encryption key store: {})",
        cosmos.options().allow_bulk_execution,
        cosmos.key_store_credential().is_some(),
    );

    let container = factory
        .create_blob_container_client(&account, "deadletter")
        .await?;
    println!("Blob container client ready: {:?}", container.container_name());

    Ok(())
}
