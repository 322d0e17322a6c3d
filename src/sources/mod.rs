//! Secret source implementations.

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "azure")]
pub mod azure;
