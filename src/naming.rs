//! Secret name derivation from logical account names.
//!
//! Connection strings live in the vault under `<account><suffix>`, where the
//! suffix identifies which service the secret unlocks. Derivation is a pure
//! string concatenation so the same inputs always address the same secret.

use crate::validation::{require_non_blank, validate_secret_name};
use crate::Result;

/// Fixed suffix appended to an account name to form a secret name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretSuffix {
    /// Cosmos DB connection string secret
    CosmosConnectionString,
    /// Blob Storage connection string secret
    BlobStorageConnectionString,
}

impl SecretSuffix {
    /// Returns the literal suffix appended to the account name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CosmosConnectionString => "-CosmosDB-ConnectionString",
            Self::BlobStorageConnectionString => "-BlobStorage-ConnectionString",
        }
    }
}

impl std::fmt::Display for SecretSuffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives the vault secret name holding an account's connection string.
///
/// # Errors
///
/// Returns [`VaultwireError::InvalidArgument`](crate::VaultwireError::InvalidArgument)
/// if `account_name` is blank or the derived name violates Key Vault naming
/// rules.
///
/// # Example
///
/// ```
/// use vaultwire::naming::{secret_name, SecretSuffix};
///
/// let name = secret_name("foo", SecretSuffix::CosmosConnectionString).unwrap();
/// assert_eq!(name, "foo-CosmosDB-ConnectionString");
/// ```
pub fn secret_name(account_name: &str, suffix: SecretSuffix) -> Result<String> {
    let account_name = require_non_blank(account_name, "account_name")?;

    let name = format!("{}{}", account_name, suffix.as_str());
    validate_secret_name(&name)?;

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_literals() {
        assert_eq!(
            SecretSuffix::CosmosConnectionString.as_str(),
            "-CosmosDB-ConnectionString"
        );
        assert_eq!(
            SecretSuffix::BlobStorageConnectionString.as_str(),
            "-BlobStorage-ConnectionString"
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = secret_name("foo", SecretSuffix::CosmosConnectionString).unwrap();
        let b = secret_name("foo", SecretSuffix::CosmosConnectionString).unwrap();
        assert_eq!(a, "foo-CosmosDB-ConnectionString");
        assert_eq!(a, b);
    }

    #[test]
    fn test_blob_suffix_derivation() {
        let name = secret_name("prod-media", SecretSuffix::BlobStorageConnectionString).unwrap();
        assert_eq!(name, "prod-media-BlobStorage-ConnectionString");
    }

    #[test]
    fn test_blank_account_rejected() {
        assert!(secret_name("", SecretSuffix::CosmosConnectionString).is_err());
        assert!(secret_name("   ", SecretSuffix::BlobStorageConnectionString).is_err());
    }

    #[test]
    fn test_account_with_bad_charset_rejected() {
        assert!(secret_name("prod_media", SecretSuffix::CosmosConnectionString).is_err());
    }
}
