//! Stored entries: native scalars or opaque bytes.

use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A value the host store persists natively, without an intermediate codec.
///
/// This is a closed set. Adding a kind means changing every store and the
/// classifier in the core layer, so it never grows by configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// UTF-8 text.
    String(String),
    /// Boolean flag.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Single-precision float.
    Float(f32),
    /// Double-precision float.
    Double(f64),
    /// A point in time.
    Date(DateTime<Utc>),
}

/// The kind tag of a [`Scalar`], without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Bool,
    Integer,
    Float,
    Double,
    Date,
}

impl Scalar {
    /// The kind of this scalar.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::String(_) => ScalarKind::String,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Integer(_) => ScalarKind::Integer,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Double(_) => ScalarKind::Double,
            Scalar::Date(_) => ScalarKind::Date,
        }
    }
}

impl ScalarKind {
    /// Stable lowercase name, used in persisted documents and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Bool => "bool",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
            ScalarKind::Date => "date",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload of one store entry.
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    /// A natively persisted scalar.
    Scalar(Scalar),
    /// Codec output, opaque to the store.
    Bytes(Bytes),
}

impl Entry {
    /// Borrow the scalar payload, if this is a scalar entry.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Entry::Scalar(s) => Some(s),
            Entry::Bytes(_) => None,
        }
    }

    /// Borrow the byte payload, if this is a bytes entry.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Entry::Bytes(b) => Some(b),
            Entry::Scalar(_) => None,
        }
    }

    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Entry::Scalar(s) => Some(s),
            Entry::Bytes(_) => None,
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Entry::Bytes(b) => Some(b),
            Entry::Scalar(_) => None,
        }
    }
}

impl From<Scalar> for Entry {
    fn from(s: Scalar) -> Self {
        Entry::Scalar(s)
    }
}

impl From<Bytes> for Entry {
    fn from(b: Bytes) -> Self {
        Entry::Bytes(b)
    }
}
