//! Format names for codec output.

use std::borrow::Cow;
use std::fmt;

/// The name of the byte encoding a codec produces.
///
/// Formats use MIME-type-like strings. They label codec errors and log
/// records so a failing entry can be traced back to the encoding that wrote
/// it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Format(pub Cow<'static, str>);

impl Format {
    /// JSON format (`application/json`)
    pub const JSON: Format = Format(Cow::Borrowed("application/json"));

    /// Create a format from a static string.
    pub const fn from_static(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }

    /// Get the format string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_constant() {
        assert_eq!(Format::JSON.as_str(), "application/json");
        assert_eq!(Format::JSON, Format::from_static("application/json"));
        assert_ne!(Format::JSON, Format::from_static("application/x-plist"));
    }

    #[test]
    fn display_impl() {
        assert_eq!(format!("{}", Format::JSON), "application/json");
        assert_eq!(format!("{}", Format::from_static("text/plain")), "text/plain");
    }
}
