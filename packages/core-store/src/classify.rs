//! Type classification: which values the store keeps natively and which go
//! through a codec.
//!
//! The decision is made per Rust type at compile time. Every storable type
//! carries a single [`Storable::REPRESENTATION`] constant, so the path used
//! to write a type is always the path used to read it back.
//!
//! - [`NativelyStorable`] is implemented for the closed scalar set only:
//!   `String`, `bool`, `i64`, `f32`, `f64` and `DateTime<Utc>`.
//! - [`Structured`] is the opt-in marker for everything else. Any
//!   `Serialize + DeserializeOwned` type can implement it with an empty
//!   impl block; common std containers already do.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use prefkit_ll_store::{Entry, Scalar, ScalarKind};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Codec, Error};

/// How a type is persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Written as a [`Scalar`] through the store's native interface.
    Native,
    /// Encoded by a codec and written as bytes.
    Structured,
}

/// A value type that can be written to and read from a preference store.
///
/// Implemented for the native scalar set and, through a blanket impl, for
/// every [`Structured`] type. Do not implement it directly.
pub trait Storable: Sized {
    /// Which path this type takes. Fixed for the type, never per value.
    const REPRESENTATION: Representation;

    /// Turn the value into a store entry.
    fn encode<C: Codec + ?Sized>(&self, codec: &C) -> Result<Entry, Error>;

    /// Turn a store entry back into a value.
    ///
    /// An entry of the other representation, or a scalar of the wrong kind,
    /// yields `Ok(None)`.
    fn decode<C: Codec + ?Sized>(entry: Entry, codec: &C) -> Result<Option<Self>, Error>;
}

/// The capability of being stored as a host-native scalar.
pub trait NativelyStorable: Sized {
    /// The scalar kind this type maps to.
    const KIND: ScalarKind;

    fn to_scalar(&self) -> Scalar;

    /// Same-kind cast. Any other kind is `None`.
    fn from_scalar(scalar: Scalar) -> Option<Self>;
}

/// Marker for types persisted through a codec.
///
/// ```rust
/// use prefkit_core_store::{is_native, Structured};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Window {
///     width: u32,
///     height: u32,
/// }
///
/// impl Structured for Window {}
///
/// assert!(!is_native::<Window>());
/// ```
pub trait Structured: Serialize + DeserializeOwned {}

/// Which path the store uses for `V`.
pub fn representation<V: Storable>() -> Representation {
    V::REPRESENTATION
}

/// True if `V` belongs to the native scalar set.
pub fn is_native<V: Storable>() -> bool {
    V::REPRESENTATION == Representation::Native
}

macro_rules! native {
    ($ty:ty, $kind:ident, |$v:ident| $to:expr) => {
        impl NativelyStorable for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;

            fn to_scalar(&self) -> Scalar {
                let $v = self;
                Scalar::$kind($to)
            }

            fn from_scalar(scalar: Scalar) -> Option<Self> {
                match scalar {
                    Scalar::$kind(value) => Some(value),
                    _ => None,
                }
            }
        }

        impl Storable for $ty {
            const REPRESENTATION: Representation = Representation::Native;

            fn encode<C: Codec + ?Sized>(&self, _codec: &C) -> Result<Entry, Error> {
                Ok(Entry::Scalar(self.to_scalar()))
            }

            fn decode<C: Codec + ?Sized>(entry: Entry, _codec: &C) -> Result<Option<Self>, Error> {
                Ok(entry.into_scalar().and_then(<$ty>::from_scalar))
            }
        }
    };
}

native!(String, String, |v| v.clone());
native!(bool, Bool, |v| *v);
native!(i64, Integer, |v| *v);
native!(f32, Float, |v| *v);
native!(f64, Double, |v| *v);
native!(DateTime<Utc>, Date, |v| *v);

impl<T: Structured> Storable for T {
    const REPRESENTATION: Representation = Representation::Structured;

    fn encode<C: Codec + ?Sized>(&self, codec: &C) -> Result<Entry, Error> {
        Ok(Entry::Bytes(codec.encode(self)?))
    }

    fn decode<C: Codec + ?Sized>(entry: Entry, codec: &C) -> Result<Option<Self>, Error> {
        match entry.into_bytes() {
            Some(bytes) => codec.decode(&bytes).map(Some),
            None => Ok(None),
        }
    }
}

// Scalars outside the native set still round-trip, through the codec.
macro_rules! structured {
    ($($ty:ty),* $(,)?) => {
        $(impl Structured for $ty {})*
    };
}

structured!(i8, i16, i32, i128, isize, u8, u16, u32, u64, u128, usize, char);

impl<T: Serialize + DeserializeOwned> Structured for Vec<T> {}
impl<T: Serialize + DeserializeOwned> Structured for Option<T> {}
impl<T: Serialize + DeserializeOwned> Structured for Box<T> {}
impl<T: Serialize + DeserializeOwned> Structured for HashMap<String, T> {}
impl<T: Serialize + DeserializeOwned> Structured for BTreeMap<String, T> {}
impl<T: Serialize + DeserializeOwned + Eq + Hash> Structured for HashSet<T> {}
impl<T: Serialize + DeserializeOwned + Ord> Structured for BTreeSet<T> {}

impl<A, B> Structured for (A, B)
where
    A: Serialize + DeserializeOwned,
    B: Serialize + DeserializeOwned,
{
}

impl<A, B, C> Structured for (A, B, C)
where
    A: Serialize + DeserializeOwned,
    B: Serialize + DeserializeOwned,
    C: Serialize + DeserializeOwned,
{
}

impl<A, B, C, D> Structured for (A, B, C, D)
where
    A: Serialize + DeserializeOwned,
    B: Serialize + DeserializeOwned,
    C: Serialize + DeserializeOwned,
    D: Serialize + DeserializeOwned,
{
}
