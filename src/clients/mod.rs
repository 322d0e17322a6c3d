//! Pre-configured client construction for the services behind the vault.

pub mod blob;
pub mod cosmos;
