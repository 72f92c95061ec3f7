//! In-memory preference store.

use std::collections::HashMap;

use parking_lot::RwLock;
use prefkit_ll_store::{Entry, LLError, PrefStore};

/// A preference store that keeps every domain in memory.
///
/// Nothing survives the process. Useful for tests and for hosts that manage
/// persistence themselves.
///
/// # Example
///
/// ```rust
/// use prefkit_json_store::InMemoryStore;
/// use prefkit_ll_store::{PrefStore, Scalar};
///
/// let store = InMemoryStore::new("com.example.app");
///
/// store.write_scalar("name", Scalar::String("Alice".to_string())).unwrap();
///
/// assert_eq!(
///     store.read_scalar("name").unwrap(),
///     Some(Scalar::String("Alice".to_string()))
/// );
/// ```
pub struct InMemoryStore {
    domain: String,
    domains: RwLock<HashMap<String, HashMap<String, Entry>>>,
}

impl InMemoryStore {
    /// Create an empty store whose active domain is `domain`.
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            domains: RwLock::new(HashMap::new()),
        }
    }

    /// The active persistence domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Number of entries in the active domain.
    pub fn len(&self) -> usize {
        self.domains
            .read()
            .get(&self.domain)
            .map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new("prefkit")
    }
}

impl PrefStore for InMemoryStore {
    fn read(&self, identity: &str) -> Result<Option<Entry>, LLError> {
        Ok(self
            .domains
            .read()
            .get(&self.domain)
            .and_then(|entries| entries.get(identity))
            .cloned())
    }

    fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError> {
        self.domains
            .write()
            .entry(self.domain.clone())
            .or_default()
            .insert(identity.to_string(), entry);
        Ok(())
    }

    fn delete(&self, identity: &str) -> Result<(), LLError> {
        if let Some(entries) = self.domains.write().get_mut(&self.domain) {
            entries.remove(identity);
        }
        Ok(())
    }

    fn remove_persistent_domain(&self, name: &str) -> Result<(), LLError> {
        self.domains.write().remove(name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use prefkit_ll_store::Scalar;

    #[test]
    fn basic_write_read() {
        let store = InMemoryStore::default();

        store.write_scalar("count", Scalar::Integer(123)).unwrap();

        assert_eq!(store.read_scalar("count").unwrap(), Some(Scalar::Integer(123)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn read_nonexistent_returns_none() {
        let store = InMemoryStore::default();
        assert!(store.read("nonexistent").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn overwrite_replaces_kind() {
        let store = InMemoryStore::default();

        store.write_scalar("value", Scalar::Bool(true)).unwrap();
        store
            .write_bytes("value", Bytes::from_static(b"[1]"))
            .unwrap();

        assert_eq!(store.read_scalar("value").unwrap(), None);
        assert_eq!(
            store.read_bytes("value").unwrap(),
            Some(Bytes::from_static(b"[1]"))
        );
    }

    #[test]
    fn delete_is_idempotent() {
        let store = InMemoryStore::default();
        store.delete("missing").unwrap();

        store.write_scalar("x", Scalar::Double(1.5)).unwrap();
        store.delete("x").unwrap();
        store.delete("x").unwrap();
        assert!(!store.exists("x").unwrap());
    }

    #[test]
    fn removing_another_domain_keeps_entries() {
        let store = InMemoryStore::new("com.example.app");
        store.write_scalar("x", Scalar::Integer(1)).unwrap();

        store.remove_persistent_domain("com.example.other").unwrap();
        assert!(store.exists("x").unwrap());

        store.remove_persistent_domain("com.example.app").unwrap();
        assert!(!store.exists("x").unwrap());
        assert_eq!(store.domain(), "com.example.app");
    }
}
