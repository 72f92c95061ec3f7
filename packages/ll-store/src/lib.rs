//! Low-level preference store traits
//!
//! This is the narrow waist of the prefkit stack. A preference store is a
//! string-keyed, heterogeneous, already-persistent map owned by the host
//! environment. Nothing at this level knows about typed keys or codecs: an
//! entry is either one of a closed set of native scalars or an opaque byte
//! buffer.
//!
//! Use this layer for:
//! - Adapting a host preference database (plist domains, registry hives,
//!   config documents) so the typed layers can sit on top of it
//! - Test doubles that record every mutation
//!
//! # Example
//!
//! ```rust
//! use prefkit_ll_store::{Entry, LLError, PrefStore, Scalar};
//! use std::collections::HashMap;
//! use std::sync::Mutex;
//!
//! struct MapStore {
//!     entries: Mutex<HashMap<String, Entry>>,
//! }
//!
//! impl PrefStore for MapStore {
//!     fn read(&self, identity: &str) -> Result<Option<Entry>, LLError> {
//!         Ok(self.entries.lock().unwrap().get(identity).cloned())
//!     }
//!
//!     fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError> {
//!         self.entries.lock().unwrap().insert(identity.to_string(), entry);
//!         Ok(())
//!     }
//!
//!     fn delete(&self, identity: &str) -> Result<(), LLError> {
//!         self.entries.lock().unwrap().remove(identity);
//!         Ok(())
//!     }
//!
//!     fn remove_persistent_domain(&self, _name: &str) -> Result<(), LLError> {
//!         self.entries.lock().unwrap().clear();
//!         Ok(())
//!     }
//! }
//!
//! let store = MapStore { entries: Mutex::new(HashMap::new()) };
//! store.write_scalar("answer", Scalar::Integer(42)).unwrap();
//! assert_eq!(store.read_scalar("answer").unwrap(), Some(Scalar::Integer(42)));
//! ```

pub use bytes::Bytes;

mod entry;
mod error;
mod traits;

pub use entry::{Entry, Scalar, ScalarKind};
pub use error::LLError;
pub use traits::PrefStore;
