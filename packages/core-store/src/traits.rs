//! The codec contract.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Format};

/// Converts structured values to and from a self-describing byte encoding.
///
/// The encoding must round-trip nested and recursive aggregates and
/// fieldless enumerations. Codecs never see native scalars: those go to the
/// store directly.
///
/// The methods are generic over the value type, so this trait is used as a
/// type parameter rather than as `dyn Codec`.
///
/// # Implementing Custom Codecs
///
/// ```rust
/// use prefkit_core_store::{Codec, Error, Format};
/// use bytes::Bytes;
/// use serde::{de::DeserializeOwned, Serialize};
///
/// struct PlistCodec;
///
/// impl Codec for PlistCodec {
///     fn format(&self) -> Format {
///         Format::from_static("application/x-plist")
///     }
///
///     fn encode<V: Serialize + ?Sized>(&self, _value: &V) -> Result<Bytes, Error> {
///         Err(Error::encode(self.format(), "not implemented"))
///     }
///
///     fn decode<V: DeserializeOwned>(&self, _bytes: &Bytes) -> Result<V, Error> {
///         Err(Error::decode(self.format(), "not implemented"))
///     }
/// }
/// ```
pub trait Codec: Send + Sync {
    /// The encoding this codec produces.
    fn format(&self) -> Format;

    /// Serialize a value into bytes.
    fn encode<V: Serialize + ?Sized>(&self, value: &V) -> Result<Bytes, Error>;

    /// Deserialize bytes into a value. Never returns a partial value.
    fn decode<V: DeserializeOwned>(&self, bytes: &Bytes) -> Result<V, Error>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn format(&self) -> Format {
        (**self).format()
    }

    fn encode<V: Serialize + ?Sized>(&self, value: &V) -> Result<Bytes, Error> {
        (**self).encode(value)
    }

    fn decode<V: DeserializeOwned>(&self, bytes: &Bytes) -> Result<V, Error> {
        (**self).decode(bytes)
    }
}
