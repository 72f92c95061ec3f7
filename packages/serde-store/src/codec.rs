//! JSON codec implementation.

use std::fmt;

use bytes::Bytes;
use prefkit_core_store::{Codec, Error, Format};
use serde::de::DeserializeOwned;
use serde::ser::{self, Serialize};

/// A codec that stores structured values as JSON.
///
/// This is the default codec. JSON is self-describing, handles nested and
/// recursive aggregates, and stays readable when the host store is inspected
/// by hand.
///
/// JSON has no NaN or infinity. A value containing a non-finite float fails
/// to encode instead of being written as `null`.
///
/// # Example
///
/// ```rust
/// use prefkit_serde_store::JsonCodec;
/// use prefkit_core_store::Codec;
///
/// let codec = JsonCodec;
///
/// let bytes = codec.encode(&vec![1, 2, 3]).unwrap();
/// let decoded: Vec<i32> = codec.decode(&bytes).unwrap();
///
/// assert_eq!(decoded, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::JSON
    }

    fn encode<V: Serialize + ?Sized>(&self, value: &V) -> Result<Bytes, Error> {
        value.serialize(FiniteCheck).map_err(|e| Error::Encode {
            format: Format::JSON,
            message: e.to_string(),
        })?;

        let bytes = serde_json::to_vec(value).map_err(|e| Error::Encode {
            format: Format::JSON,
            message: e.to_string(),
        })?;

        Ok(Bytes::from(bytes))
    }

    fn decode<V: DeserializeOwned>(&self, bytes: &Bytes) -> Result<V, Error> {
        serde_json::from_slice(bytes).map_err(|e| Error::Decode {
            format: Format::JSON,
            message: e.to_string(),
        })
    }
}

/// A serializer that produces nothing and fails on the first NaN or infinity.
struct FiniteCheck;

#[derive(Debug)]
struct NonFinite(String);

impl fmt::Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for NonFinite {}

impl ser::Error for NonFinite {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        NonFinite(msg.to_string())
    }
}

fn finite(value: f64) -> Result<(), NonFinite> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(NonFinite(format!(
            "non-finite float {} cannot be represented",
            value
        )))
    }
}

impl ser::Serializer for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;

    type SerializeSeq = FiniteCheck;
    type SerializeTuple = FiniteCheck;
    type SerializeTupleStruct = FiniteCheck;
    type SerializeTupleVariant = FiniteCheck;
    type SerializeMap = FiniteCheck;
    type SerializeStruct = FiniteCheck;
    type SerializeStructVariant = FiniteCheck;

    fn serialize_bool(self, _v: bool) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), NonFinite> {
        finite(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), NonFinite> {
        finite(v)
    }

    fn serialize_char(self, _v: char) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), NonFinite> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> Result<(), NonFinite> {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), NonFinite> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), NonFinite> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<FiniteCheck, NonFinite> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<FiniteCheck, NonFinite> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<FiniteCheck, NonFinite> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<FiniteCheck, NonFinite> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<FiniteCheck, NonFinite> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<FiniteCheck, NonFinite> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<FiniteCheck, NonFinite> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), NonFinite> {
        key.serialize(FiniteCheck)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = NonFinite;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), NonFinite> {
        value.serialize(FiniteCheck)
    }

    fn end(self) -> Result<(), NonFinite> {
        Ok(())
    }
}
