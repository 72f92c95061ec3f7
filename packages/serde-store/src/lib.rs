//! Serde Integration for prefkit
//!
//! This layer provides typed settings on top of a preference store. It adds:
//! - `Settings`: get/set/has/clear by `Key<V>`, native or codec path chosen
//!   per type at compile time
//! - `Defaults`: The `Settings` implementation over any `PrefStore`
//! - `JsonCodec`: The default codec for structured values
//! - `RawRepresentable`: Enum-like values stored as their raw form
//! - `AutoProperty`: Property accessors with persisted defaults
//!
//! # Example
//!
//! ```rust
//! use prefkit_json_store::InMemoryStore;
//! use prefkit_serde_store::{Defaults, Key, PrefStore, Settings, Structured};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Person {
//!     name: String,
//!     age: i64,
//!     children: Vec<Person>,
//! }
//!
//! impl Structured for Person {}
//!
//! const OWNER: Key<Person> = Key::from_static("owner");
//!
//! fn owner_name(defaults: &Defaults<impl PrefStore>) -> Option<String> {
//!     defaults.get(&OWNER).map(|person| person.name)
//! }
//!
//! let defaults = Defaults::new(InMemoryStore::default());
//! assert_eq!(owner_name(&defaults), None);
//!
//! let owner = Person {
//!     name: "Ada".to_string(),
//!     age: 36,
//!     children: vec![],
//! };
//! defaults.set(&owner, &OWNER);
//! assert_eq!(owner_name(&defaults), Some("Ada".to_string()));
//! ```

pub use bytes::Bytes;

mod auto;
mod codec;
mod raw;
mod settings;

pub use auto::AutoProperty;
pub use codec::JsonCodec;
pub use raw::RawRepresentable;
pub use settings::{Defaults, Settings};

// Re-export core types for convenience
pub use prefkit_core_store::{
    is_native, representation, Codec, Entry, Error, Format, Key, LLError, NativelyStorable,
    PrefStore, Representation, Scalar, Scope, Storable, Structured,
};
