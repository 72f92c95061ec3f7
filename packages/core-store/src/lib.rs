//! Core prefkit: the typed layer over a preference store
//!
//! This layer adds meaning to the scalar-or-bytes entries of the LL layer:
//! - `Key<V>`: A string identity tied to the value type stored under it
//! - `Storable`: Compile-time choice between the native and structured paths
//! - `Codec`: The contract for self-describing byte encodings
//! - `Scope`: A persistence domain, the unit of bulk removal
//! - `Error`: Codec and persistence failures
//!
//! # Example
//!
//! ```rust
//! use prefkit_core_store::{is_native, Key};
//!
//! const COUNT: Key<i64> = Key::from_static("count");
//!
//! assert_eq!(COUNT.identity(), "count");
//! assert!(is_native::<i64>());
//! assert!(!is_native::<Vec<i64>>());
//! ```

pub use bytes::Bytes;

mod classify;
mod error;
mod format;
mod key;
mod scope;
mod traits;

pub use classify::{is_native, representation, NativelyStorable, Representation, Storable, Structured};
pub use error::Error;
pub use format::Format;
pub use key::Key;
pub use scope::Scope;
pub use traits::Codec;

// Re-export LL types for convenience
pub use prefkit_ll_store::{Entry, LLError, PrefStore, Scalar, ScalarKind};
