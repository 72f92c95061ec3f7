//! prefkit: typed, strongly-keyed settings over a host preference store.
//!
//! A [`Key<V>`] names an entry and fixes the type stored under it. Values of
//! native types (`String`, `bool`, `i64`, `f32`, `f64`, `DateTime<Utc>`) are
//! handed to the store as scalars; everything else that implements
//! [`Structured`] goes through a [`Codec`] and is stored as bytes.
//!
//! The crates behind this one are layered:
//!
//! - `prefkit-ll-store`: the [`PrefStore`] contract, scalars and bytes
//! - `prefkit-core-store`: keys, type classification, codec contract
//! - `prefkit-serde-store`: the [`Settings`] facade and property accessors
//! - `prefkit-json-store`: in-memory and on-disk stores
//!
//! # Example
//!
//! ```rust
//! use prefkit::{Defaults, InMemoryStore, Key, Settings};
//!
//! const COUNT: Key<i64> = Key::from_static("count");
//!
//! let defaults = Defaults::new(InMemoryStore::default());
//!
//! defaults.set(&123, &COUNT);
//! assert_eq!(defaults.get(&COUNT), Some(123));
//!
//! defaults.clear(&COUNT);
//! assert!(!defaults.has(&COUNT));
//! ```

pub use prefkit_core_store::{
    is_native, representation, Bytes, Codec, Entry, Error, Format, Key, LLError,
    NativelyStorable, PrefStore, Representation, Scalar, ScalarKind, Scope, Storable, Structured,
};
pub use prefkit_json_store::{
    ConfigError, InMemoryStore, LocalDiskStore, StoreConfig, DOMAIN_ENV, HOME_ENV,
};
pub use prefkit_serde_store::{
    auto_properties, raw_representable, AutoProperty, Defaults, JsonCodec, RawRepresentable,
    Settings,
};

/// Failure to open the standard settings store.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open preference store: {0}")]
    Store(#[from] LLError),
}

/// Open settings for `domain` in the platform configuration directory.
///
/// The location can be overridden with `PREFKIT_DOMAIN` and `PREFKIT_HOME`;
/// see [`StoreConfig::from_env`]. Handles opened on the same domain share
/// their entries.
pub fn standard(domain: &str) -> Result<Defaults<LocalDiskStore>, OpenError> {
    let config = StoreConfig::from_env(domain)?;
    open(&config)
}

/// Open settings stored at the location described by `config`.
pub fn open(config: &StoreConfig) -> Result<Defaults<LocalDiskStore>, OpenError> {
    let store = LocalDiskStore::open(config)?;
    Ok(Defaults::new(store))
}
