//! Token persistence adapters
//!
//! Implementations of the core `TokenStore` port. The keyring store is the
//! production adapter; the in-memory store backs tests and headless
//! environments without an OS keychain.

pub mod keyring_store;
pub mod memory_store;

pub use keyring_store::KeyringTokenStore;
pub use memory_store::MemoryTokenStore;
