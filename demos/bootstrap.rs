//! Bootstrap walkthrough against the mock secret source.
//!
//! Demonstrates the full resolve-then-build flow without touching Azure.
//!
//! Run with: cargo run --example bootstrap

use vaultwire::sources::mock::MockSecretSource;
use vaultwire::{ClientFactory, CosmosOptions, SecretSuffix, VaultwireError};

// Base64 of "not a real key".
const FAKE_KEY: &str = "bm90IGEgcmVhbCBrZXk=";

#[tokio::main]
async fn main() -> vaultwire::Result<()> {
    println!("=== Vaultwire Bootstrap Example ===\n");

    // Seed the mock vault the way a real vault would be provisioned: one
    // connection string secret per account and service.
    let source = MockSecretSource::new();
    source
        .set_secret(
            "orders-CosmosDB-ConnectionString",
            format!(
                "AccountEndpoint=https://orders.documents.azure.com:443/;AccountKey={};",
                FAKE_KEY
            ),
        )
        .await;
    source
        .set_secret(
            "orders-BlobStorage-ConnectionString",
            format!(
                "DefaultEndpointsProtocol=https;AccountName=orders;AccountKey={};EndpointSuffix=core.windows.net",
                FAKE_KEY
            ),
        )
        .await;

    let factory = ClientFactory::new(source, "https://myvault.vault.azure.net")?;

    // 1. Secret names derive deterministically from the account name
    println!("1. Secret name derivation:");
    let name = vaultwire::secret_name("orders", SecretSuffix::CosmosConnectionString)?;
    println!("   orders -> {}", name);

    // 2. Resolve a Cosmos client recipe with per-client options
    println!("\n2. Cosmos DB config:");
    let cosmos = factory
        .cosmos_config(
            "orders",
            CosmosOptions::new()
                .with_user_agent_prefix("migrator")
                .with_bulk_execution(true)
                .with_throttle_retry_forever(true),
        )
        .await?;
    println!("   account:    {}", cosmos.account_name());
    println!("   endpoint:   {}", cosmos.endpoint());
    println!("   user agent: {:?}", cosmos.user_agent_prefix());
    println!("   bulk:       {}", cosmos.allow_bulk_execution());
    println!("   429 retry:  {:?}", cosmos.throttle_retry());

    // 3. Resolve a blob container recipe
    println!("\n3. Blob container config:");
    let blob = factory.blob_config("orders", "deadletter").await?;
    println!("   account:   {}", blob.account_name());
    println!("   container: {}", blob.container_name());

    // 4. Failed lookups carry their context
    println!("\n4. Lookup failure handling:");
    match factory.cosmos_config("missing", CosmosOptions::new()).await {
        Ok(_) => println!("   unexpected success"),
        Err(VaultwireError::SecretLookup { name, vault_url, .. }) => {
            println!("   ✓ lookup of '{}' against '{}' failed (expected)", name, vault_url);
        }
        Err(e) => println!("   unexpected error: {}", e),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
