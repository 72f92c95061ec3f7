//! Persistence domains addressed by bulk removal.

/// The owner of a set of persisted entries, such as an application bundle.
///
/// A scope without an identifier cannot be addressed, and removing it does
/// nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    identifier: Option<String>,
}

impl Scope {
    /// A scope owning the named persistence domain.
    pub fn named(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
        }
    }

    /// A scope with no identifiable domain.
    pub fn unnamed() -> Self {
        Self { identifier: None }
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}

impl From<Option<String>> for Scope {
    fn from(identifier: Option<String>) -> Self {
        Self { identifier }
    }
}
