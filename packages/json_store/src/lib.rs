//! Backing stores for prefkit.
//!
//! - [`InMemoryStore`]: entries live for the life of the process
//! - [`LocalDiskStore`]: one JSON document per persistence domain
//! - [`StoreConfig`]: where a disk store lives, resolved from the environment

pub mod config;
pub mod in_memory;
pub mod local_disk;

pub use config::{ConfigError, StoreConfig, DOMAIN_ENV, HOME_ENV};
pub use in_memory::InMemoryStore;
pub use local_disk::LocalDiskStore;
