//! Input validation for arguments that end up in secret names and URLs.

use crate::{Result, VaultwireError};

/// Maximum length Key Vault allows for a secret name.
const MAX_SECRET_NAME_LENGTH: usize = 127;

/// Rejects blank (empty or whitespace-only) required arguments.
///
/// Returns the trimmed value on success so callers work with a normalized
/// form.
///
/// # Errors
///
/// Returns [`VaultwireError::InvalidArgument`] naming `what` if the value is
/// blank.
///
/// # Example
///
/// ```
/// use vaultwire::validation::require_non_blank;
///
/// assert_eq!(require_non_blank("  acct ", "account_name").unwrap(), "acct");
/// assert!(require_non_blank("   ", "account_name").is_err());
/// ```
pub fn require_non_blank<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(VaultwireError::invalid_argument(format!(
            "{} must not be blank",
            what
        )));
    }
    Ok(trimmed)
}

/// Validates a derived secret name against Key Vault naming rules.
///
/// Key Vault accepts 1-127 characters drawn from ASCII alphanumerics and
/// dashes. Anything else is rejected here rather than surfacing as an opaque
/// HTTP 400 from the vault.
///
/// # Errors
///
/// Returns [`VaultwireError::InvalidArgument`] if validation fails.
///
/// # Example
///
/// ```
/// use vaultwire::validation::validate_secret_name;
///
/// assert!(validate_secret_name("acct-CosmosDB-ConnectionString").is_ok());
/// assert!(validate_secret_name("acct_with_underscores").is_err());
/// assert!(validate_secret_name("").is_err());
/// ```
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(VaultwireError::invalid_argument(
            "secret name must not be blank",
        ));
    }

    if name.len() > MAX_SECRET_NAME_LENGTH {
        return Err(VaultwireError::invalid_argument(format!(
            "secret name exceeds maximum length of {} characters",
            MAX_SECRET_NAME_LENGTH
        )));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(VaultwireError::invalid_argument(format!(
            "secret name '{}' contains characters outside [0-9a-zA-Z-]",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_blank_trims() {
        assert_eq!(require_non_blank(" acct ", "account_name").unwrap(), "acct");
    }

    #[test]
    fn test_require_non_blank_rejects_empty() {
        let result = require_non_blank("", "account_name");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("account_name"));
    }

    #[test]
    fn test_require_non_blank_rejects_whitespace() {
        assert!(require_non_blank(" \t\n", "container_name").is_err());
    }

    #[test]
    fn test_valid_secret_names() {
        assert!(validate_secret_name("acct-CosmosDB-ConnectionString").is_ok());
        assert!(validate_secret_name("acct-BlobStorage-ConnectionString").is_ok());
        assert!(validate_secret_name("A1-b2-C3").is_ok());
    }

    #[test]
    fn test_too_long_secret_name() {
        let long_name = "a".repeat(128);
        let result = validate_secret_name(&long_name);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("maximum length"));
    }

    #[test]
    fn test_invalid_characters() {
        for name in ["acct_key", "acct.key", "acct key", "acct/key", "acct\0"] {
            let result = validate_secret_name(name);
            assert!(result.is_err(), "expected '{}' to fail validation", name);
        }
    }
}
