//! Error types for vaultwire operations.

use thiserror::Error;

/// Result type alias using [`VaultwireError`].
pub type Result<T> = std::result::Result<T, VaultwireError>;

/// Errors that can occur while resolving secrets or building clients.
///
/// All errors implement `std::error::Error` and can be chained with `source()`.
#[derive(Debug, Error)]
pub enum VaultwireError {
    /// A required argument was blank or otherwise unusable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The process-wide factory was accessed before [`install`](crate::install).
    #[error("vaultwire has not yet been initialized")]
    NotInitialized,

    /// [`install`](crate::install) was called a second time.
    #[error("vaultwire is already initialized")]
    AlreadyInitialized,

    /// Secret was not found in the vault.
    #[error("secret not found: {0}")]
    NotFound(String),

    /// Fetching a secret from the vault failed.
    #[error("cannot retrieve secret '{name}' from vault '{vault_url}': {source}")]
    SecretLookup {
        /// Name of the secret being fetched
        name: String,
        /// Vault the lookup was issued against
        vault_url: String,
        /// Underlying error
        #[source]
        source: Box<VaultwireError>,
    },

    /// A resolved secret is not a usable connection string.
    #[error("malformed connection string: {0}")]
    ConnectionString(String),

    /// Other error (catch-all for SDK and transport failures).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VaultwireError {
    /// Creates an `InvalidArgument` error naming the offending parameter.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a secret lookup error with vault context.
    ///
    /// This wraps an underlying error with the secret name and vault URL that
    /// the failed lookup was issued against.
    ///
    /// # Example
    ///
    /// ```
    /// use vaultwire::VaultwireError;
    ///
    /// let err = VaultwireError::NotFound("acct-CosmosDB-ConnectionString".to_string());
    /// let wrapped = VaultwireError::secret_lookup(
    ///     "acct-CosmosDB-ConnectionString",
    ///     "https://vault.example.net",
    ///     err,
    /// );
    ///
    /// assert!(wrapped.to_string().contains("https://vault.example.net"));
    /// ```
    pub fn secret_lookup(
        name: impl Into<String>,
        vault_url: impl Into<String>,
        err: VaultwireError,
    ) -> Self {
        Self::SecretLookup {
            name: name.into(),
            vault_url: vault_url.into(),
            source: Box::new(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let err = VaultwireError::NotFound("test-secret".to_string());
        assert_eq!(err.to_string(), "secret not found: test-secret");
    }

    #[test]
    fn test_secret_lookup_error() {
        let inner = VaultwireError::NotFound("acct-key".to_string());
        let err = VaultwireError::secret_lookup("acct-key", "https://v.example.net", inner);

        let error_string = err.to_string();
        assert!(error_string.contains("acct-key"));
        assert!(error_string.contains("https://v.example.net"));
    }

    #[test]
    fn test_error_source_chain() {
        let inner = VaultwireError::NotFound("test".to_string());
        let outer = VaultwireError::secret_lookup("test", "https://v.example.net", inner);

        assert!(outer.source().is_some());
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = VaultwireError::invalid_argument("account_name must not be blank");
        assert_eq!(
            err.to_string(),
            "invalid argument: account_name must not be blank"
        );
    }
}
