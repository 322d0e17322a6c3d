//! Typed parsing of Azure `Key=Value;` connection strings.
//!
//! The secrets this crate resolves are connection strings for Cosmos DB and
//! Blob Storage accounts. The Rust SDKs want the pieces (endpoint, account
//! name, account key) rather than the raw string, so parsing happens here,
//! once, with errors surfaced before any client is constructed.
//!
//! Key material never appears in `Debug` output or error messages.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::{Result, VaultwireError};

/// Splits a connection string into `(key, value)` pairs.
///
/// Keys are matched case-insensitively. Values keep their exact bytes; only
/// the first `=` separates key from value, since account keys are base64 and
/// end in padding.
fn pairs(raw: &str) -> Result<Vec<(String, String)>> {
    let mut out = Vec::new();

    for segment in raw.split(';') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let (key, value) = segment.split_once('=').ok_or_else(|| {
            VaultwireError::ConnectionString(
                "expected ';'-separated 'Key=Value' segments".to_string(),
            )
        })?;

        out.push((key.trim().to_ascii_lowercase(), value.to_string()));
    }

    if out.is_empty() {
        return Err(VaultwireError::ConnectionString(
            "connection string is empty".to_string(),
        ));
    }

    Ok(out)
}

fn required<'a>(pairs: &'a [(String, String)], key: &str) -> Result<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| {
            VaultwireError::ConnectionString(format!("missing required field '{}'", key))
        })
}

fn optional<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn validate_key_material(key: &str, field: &str) -> Result<()> {
    if BASE64.decode(key).is_err() {
        return Err(VaultwireError::ConnectionString(format!(
            "field '{}' is not valid base64",
            field
        )));
    }
    Ok(())
}

/// Parsed Cosmos DB connection string.
///
/// Produced from the `AccountEndpoint=...;AccountKey=...;` form stored in the
/// vault.
#[derive(Clone, PartialEq, Eq)]
pub struct CosmosConnectionString {
    /// Account endpoint URI, e.g. `https://acct.documents.azure.com:443/`
    pub endpoint: String,
    /// Primary key (base64)
    pub key: String,
}

impl CosmosConnectionString {
    /// Parses the `AccountEndpoint`/`AccountKey` form.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::ConnectionString`] if either field is missing
    /// or the key is not base64.
    pub fn parse(raw: &str) -> Result<Self> {
        let pairs = pairs(raw)?;

        let endpoint = required(&pairs, "accountendpoint")?.to_string();
        let key = required(&pairs, "accountkey")?.to_string();
        validate_key_material(&key, "AccountKey")?;

        Ok(Self { endpoint, key })
    }

    /// Derives the account name from the endpoint host.
    ///
    /// `https://my-account.documents.azure.com:443/` yields `my-account`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::ConnectionString`] if the endpoint has no
    /// recognizable host.
    pub fn account_name(&self) -> Result<String> {
        let without_scheme = self
            .endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.endpoint);

        let host = without_scheme
            .split(['/', ':'])
            .next()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                VaultwireError::ConnectionString(
                    "AccountEndpoint has no host component".to_string(),
                )
            })?;

        let label = host.split('.').next().unwrap_or(host);
        if label.is_empty() {
            return Err(VaultwireError::ConnectionString(
                "AccountEndpoint host has no account label".to_string(),
            ));
        }

        Ok(label.to_string())
    }
}

impl std::fmt::Debug for CosmosConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmosConnectionString")
            .field("endpoint", &self.endpoint)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// Parsed storage account connection string.
///
/// Produced from the `DefaultEndpointsProtocol=...;AccountName=...;
/// AccountKey=...;EndpointSuffix=...` form stored in the vault.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageConnectionString {
    /// Storage account name
    pub account_name: String,
    /// Account key (base64)
    pub account_key: String,
    /// Endpoint suffix, e.g. `core.windows.net`
    pub endpoint_suffix: Option<String>,
    /// Default endpoints protocol, e.g. `https`
    pub protocol: Option<String>,
}

impl StorageConnectionString {
    /// Parses the `AccountName`/`AccountKey` form.
    ///
    /// # Errors
    ///
    /// Returns [`VaultwireError::ConnectionString`] if a required field is
    /// missing or the key is not base64.
    pub fn parse(raw: &str) -> Result<Self> {
        let pairs = pairs(raw)?;

        let account_name = required(&pairs, "accountname")?.to_string();
        let account_key = required(&pairs, "accountkey")?.to_string();
        validate_key_material(&account_key, "AccountKey")?;

        Ok(Self {
            account_name,
            account_key,
            endpoint_suffix: optional(&pairs, "endpointsuffix").map(str::to_string),
            protocol: optional(&pairs, "defaultendpointsprotocol").map(str::to_string),
        })
    }
}

impl std::fmt::Debug for StorageConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConnectionString")
            .field("account_name", &self.account_name)
            .field("account_key", &"<redacted>")
            .field("endpoint_suffix", &self.endpoint_suffix)
            .field("protocol", &self.protocol)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Base64 of "not a real key", usable as key material in fixtures.
    const FAKE_KEY: &str = "bm90IGEgcmVhbCBrZXk=";

    fn cosmos_raw() -> String {
        format!(
            "AccountEndpoint=https://my-account.documents.azure.com:443/;AccountKey={};",
            FAKE_KEY
        )
    }

    fn storage_raw() -> String {
        format!(
            "DefaultEndpointsProtocol=https;AccountName=mystorage;AccountKey={};EndpointSuffix=core.windows.net",
            FAKE_KEY
        )
    }

    #[test]
    fn test_cosmos_parse() {
        let parsed = CosmosConnectionString::parse(&cosmos_raw()).unwrap();
        assert_eq!(parsed.endpoint, "https://my-account.documents.azure.com:443/");
        assert_eq!(parsed.key, FAKE_KEY);
    }

    #[test]
    fn test_cosmos_account_name_from_endpoint() {
        let parsed = CosmosConnectionString::parse(&cosmos_raw()).unwrap();
        assert_eq!(parsed.account_name().unwrap(), "my-account");
    }

    #[test]
    fn test_cosmos_account_name_without_port() {
        let parsed = CosmosConnectionString {
            endpoint: "https://emulator.local/".to_string(),
            key: FAKE_KEY.to_string(),
        };
        assert_eq!(parsed.account_name().unwrap(), "emulator");
    }

    #[test]
    fn test_cosmos_missing_key() {
        let result =
            CosmosConnectionString::parse("AccountEndpoint=https://a.documents.azure.com/;");
        assert!(matches!(
            result,
            Err(VaultwireError::ConnectionString(_))
        ));
    }

    #[test]
    fn test_cosmos_key_must_be_base64() {
        let result = CosmosConnectionString::parse(
            "AccountEndpoint=https://a.documents.azure.com/;AccountKey=!!not-base64!!;",
        );
        assert!(matches!(
            result,
            Err(VaultwireError::ConnectionString(_))
        ));
    }

    #[test]
    fn test_storage_parse() {
        let parsed = StorageConnectionString::parse(&storage_raw()).unwrap();
        assert_eq!(parsed.account_name, "mystorage");
        assert_eq!(parsed.account_key, FAKE_KEY);
        assert_eq!(parsed.endpoint_suffix.as_deref(), Some("core.windows.net"));
        assert_eq!(parsed.protocol.as_deref(), Some("https"));
    }

    #[test]
    fn test_storage_missing_account_name() {
        let raw = format!("AccountKey={};", FAKE_KEY);
        let result = StorageConnectionString::parse(&raw);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("accountname"));
    }

    #[test]
    fn test_empty_connection_string() {
        assert!(CosmosConnectionString::parse("").is_err());
        assert!(CosmosConnectionString::parse(";;;").is_err());
    }

    #[test]
    fn test_garbage_segment() {
        let result = StorageConnectionString::parse("AccountName=a;garbage-without-equals");
        assert!(matches!(
            result,
            Err(VaultwireError::ConnectionString(_))
        ));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let cosmos = CosmosConnectionString::parse(&cosmos_raw()).unwrap();
        let storage = StorageConnectionString::parse(&storage_raw()).unwrap();

        let cosmos_debug = format!("{:?}", cosmos);
        let storage_debug = format!("{:?}", storage);

        assert!(!cosmos_debug.contains(FAKE_KEY));
        assert!(!storage_debug.contains(FAKE_KEY));
        assert!(cosmos_debug.contains("<redacted>"));
        assert!(storage_debug.contains("<redacted>"));
    }

    #[test]
    fn test_value_with_embedded_equals() {
        // Base64 padding means values can end in '='; only the first '='
        // separates key from value.
        let raw = "AccountName=a;AccountKey=YWJjZA==";
        let parsed = StorageConnectionString::parse(raw).unwrap();
        assert_eq!(parsed.account_key, "YWJjZA==");
    }
}
