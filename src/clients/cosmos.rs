//! Cosmos DB client configuration and construction.
//!
//! [`CosmosOptions`] captures the per-client knobs, [`CosmosClientConfig`] is
//! the fully resolved recipe (connection string plus applied options), and
//! `build()` — behind the `cosmos` feature — turns the recipe into an SDK
//! client. The split keeps everything up to `build()` testable without a
//! network or the SDK compiled in.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::connstr::CosmosConnectionString;
use crate::Result;

#[cfg(feature = "cosmos")]
use crate::VaultwireError;
#[cfg(feature = "cosmos")]
use azure_core::{ExponentialRetryOptions, RetryOptions};
#[cfg(feature = "cosmos")]
use azure_data_cosmos::prelude::{AuthorizationToken, CloudLocation, CosmosClient};
#[cfg(feature = "cosmos")]
use azure_identity::DefaultAzureCredential;
#[cfg(feature = "cosmos")]
use std::sync::Arc;

/// Per-client options for a Cosmos DB client.
///
/// Use the builder pattern for ergonomic configuration:
///
/// ```
/// use vaultwire::clients::cosmos::CosmosOptions;
///
/// let options = CosmosOptions::new()
///     .with_user_agent_prefix("migrator")
///     .with_bulk_execution(true)
///     .with_throttle_retry_forever(true);
///
/// assert_eq!(options.user_agent_prefix.as_deref(), Some("migrator"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosmosOptions {
    /// Tag prepended to the client's user agent; `None` leaves the SDK default
    pub user_agent_prefix: Option<String>,

    /// Batch point operations for throughput at the cost of latency
    pub allow_bulk_execution: bool,

    /// Keep retrying rate-limited (HTTP 429) requests without an attempt cap
    pub retry_forever_on_throttle: bool,

    /// Attach a field-encryption key store backed by the ambient credential
    pub encryption: bool,
}

impl CosmosOptions {
    /// Creates options with everything off, matching the SDK defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user-agent tag. Blank input leaves the tag unset.
    pub fn with_user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.user_agent_prefix = if prefix.trim().is_empty() {
            None
        } else {
            Some(prefix)
        };
        self
    }

    /// Enables or disables bulk execution.
    pub fn with_bulk_execution(mut self, enabled: bool) -> Self {
        self.allow_bulk_execution = enabled;
        self
    }

    /// Enables or disables unlimited retry on rate-limited requests.
    pub fn with_throttle_retry_forever(mut self, enabled: bool) -> Self {
        self.retry_forever_on_throttle = enabled;
        self
    }

    /// Enables or disables the field-encryption key store.
    pub fn with_encryption(mut self, enabled: bool) -> Self {
        self.encryption = enabled;
        self
    }
}

/// Retry bounds applied to rate-limited requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleRetry {
    /// Maximum retry attempts
    pub max_attempts: u32,
    /// Upper bound on cumulative wait time
    pub max_wait: Duration,
}

impl ThrottleRetry {
    /// Effectively unlimited retry: the attempt cap is lifted and the wait
    /// bound is pushed out to roughly 24 days.
    pub fn unbounded() -> Self {
        Self {
            max_attempts: u32::MAX,
            max_wait: Duration::from_secs((i32::MAX / 1000) as u64),
        }
    }
}

/// A fully resolved Cosmos DB client recipe.
///
/// Produced by [`ClientFactory::cosmos_config`](crate::ClientFactory::cosmos_config)
/// after the connection string secret has been fetched and parsed. Everything
/// the eventual client will be configured with is observable here.
#[derive(Debug, Clone)]
pub struct CosmosClientConfig {
    account_name: String,
    connection: CosmosConnectionString,
    options: CosmosOptions,
    throttle_retry: Option<ThrottleRetry>,
}

impl CosmosClientConfig {
    /// Combines a parsed connection string with per-client options.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::ConnectionString`](crate::VaultwireError::ConnectionString)
    /// if the endpoint yields no account name.
    pub fn new(connection: CosmosConnectionString, options: CosmosOptions) -> Result<Self> {
        let account_name = connection.account_name()?;
        let throttle_retry = options
            .retry_forever_on_throttle
            .then(ThrottleRetry::unbounded);

        Ok(Self {
            account_name,
            connection,
            options,
            throttle_retry,
        })
    }

    /// Account name derived from the endpoint.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Account endpoint URI.
    pub fn endpoint(&self) -> &str {
        &self.connection.endpoint
    }

    /// User-agent tag, if one was configured.
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.options.user_agent_prefix.as_deref()
    }

    /// Whether bulk execution is enabled.
    pub fn allow_bulk_execution(&self) -> bool {
        self.options.allow_bulk_execution
    }

    /// Retry bounds for rate-limited requests; `None` keeps the SDK default.
    pub fn throttle_retry(&self) -> Option<ThrottleRetry> {
        self.throttle_retry
    }

    /// Whether a field-encryption key store was requested.
    pub fn encryption_requested(&self) -> bool {
        self.options.encryption
    }

    /// Constructs the SDK client described by this config.
    ///
    /// When encryption was requested, the returned handle carries a key-store
    /// credential built from `DefaultAzureCredential`.
    ///
    /// # Errors
    ///
    /// Returns an error if the account key is rejected by the SDK or, with
    /// encryption requested, no ambient credential can be constructed.
    #[cfg(feature = "cosmos")]
    pub fn build(self) -> Result<CosmosHandle> {
        let token = AuthorizationToken::primary_key(&self.connection.key).map_err(|e| {
            VaultwireError::Other(anyhow::anyhow!("invalid Cosmos account key: {}", e))
        })?;

        let mut builder = CosmosClient::builder(self.account_name.clone(), token).cloud_location(
            CloudLocation::Custom {
                account: self.account_name.clone(),
                uri: self.connection.endpoint.trim_end_matches('/').to_string(),
            },
        );

        if let Some(retry) = self.throttle_retry {
            builder = builder.retry(RetryOptions::exponential(
                ExponentialRetryOptions::default()
                    .max_retries(retry.max_attempts)
                    .max_delay(retry.max_wait)
                    .max_total_elapsed(retry.max_wait),
            ));
        }

        let key_store_credential = if self.options.encryption {
            let credential = DefaultAzureCredential::create(Default::default()).map_err(|e| {
                VaultwireError::Other(anyhow::anyhow!(
                    "failed to create Azure credentials: {}",
                    e
                ))
            })?;
            Some(Arc::new(credential))
        } else {
            None
        };

        Ok(CosmosHandle {
            client: builder.build(),
            key_store_credential,
            options: self.options,
        })
    }
}

/// A constructed Cosmos DB client plus the configuration that rode along.
///
/// The SDK has no bulk/user-agent knobs of its own yet, so the applied options
/// remain readable here for the embedding application's request pipeline, and
/// the key-store credential is exposed for callers that perform field
/// encryption.
#[cfg(feature = "cosmos")]
pub struct CosmosHandle {
    client: CosmosClient,
    key_store_credential: Option<Arc<DefaultAzureCredential>>,
    options: CosmosOptions,
}

#[cfg(feature = "cosmos")]
impl CosmosHandle {
    /// The SDK client.
    pub fn client(&self) -> &CosmosClient {
        &self.client
    }

    /// Consumes the handle, returning the SDK client.
    pub fn into_client(self) -> CosmosClient {
        self.client
    }

    /// Credential for the field-encryption key store, when requested.
    pub fn key_store_credential(&self) -> Option<&Arc<DefaultAzureCredential>> {
        self.key_store_credential.as_ref()
    }

    /// Options this client was built with.
    pub fn options(&self) -> &CosmosOptions {
        &self.options
    }
}
