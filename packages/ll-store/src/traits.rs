//! Core trait for the LL layer.

use std::sync::Arc;

use bytes::Bytes;

use crate::{Entry, LLError, Scalar};

/// A string-keyed, heterogeneous, persistent preference map.
///
/// Each store instance reads and writes one active persistence domain.
/// Methods take `&self`: host preference databases serialize their own
/// writes, and implementations here are expected to do the same internally.
/// Mutating calls must be durable before they return.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn PrefStore>`.
pub trait PrefStore: Send + Sync {
    /// Read the entry stored under `identity`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is stored under this identity (not an error).
    /// * `Ok(Some(entry))` - The stored scalar or bytes.
    /// * `Err(LLError)` - The store itself failed.
    fn read(&self, identity: &str) -> Result<Option<Entry>, LLError>;

    /// Create or overwrite the entry stored under `identity`.
    fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError>;

    /// Delete the entry stored under `identity`. Deleting an absent entry
    /// succeeds.
    fn delete(&self, identity: &str) -> Result<(), LLError>;

    /// Delete every entry of the named persistence domain.
    fn remove_persistent_domain(&self, name: &str) -> Result<(), LLError>;

    /// Read a native scalar. A bytes entry reads as `None`.
    fn read_scalar(&self, identity: &str) -> Result<Option<Scalar>, LLError> {
        Ok(self.read(identity)?.and_then(Entry::into_scalar))
    }

    /// Read an opaque byte buffer. A scalar entry reads as `None`.
    fn read_bytes(&self, identity: &str) -> Result<Option<Bytes>, LLError> {
        Ok(self.read(identity)?.and_then(Entry::into_bytes))
    }

    fn write_scalar(&self, identity: &str, value: Scalar) -> Result<(), LLError> {
        self.write(identity, Entry::Scalar(value))
    }

    fn write_bytes(&self, identity: &str, bytes: Bytes) -> Result<(), LLError> {
        self.write(identity, Entry::Bytes(bytes))
    }

    /// Check whether anything is stored under `identity`, whatever its kind.
    fn exists(&self, identity: &str) -> Result<bool, LLError> {
        Ok(self.read(identity)?.is_some())
    }
}

// Blanket implementations for references, boxes and shared handles

impl<T: PrefStore + ?Sized> PrefStore for &T {
    fn read(&self, identity: &str) -> Result<Option<Entry>, LLError> {
        (**self).read(identity)
    }

    fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError> {
        (**self).write(identity, entry)
    }

    fn delete(&self, identity: &str) -> Result<(), LLError> {
        (**self).delete(identity)
    }

    fn remove_persistent_domain(&self, name: &str) -> Result<(), LLError> {
        (**self).remove_persistent_domain(name)
    }

    fn exists(&self, identity: &str) -> Result<bool, LLError> {
        (**self).exists(identity)
    }
}

impl<T: PrefStore + ?Sized> PrefStore for Box<T> {
    fn read(&self, identity: &str) -> Result<Option<Entry>, LLError> {
        self.as_ref().read(identity)
    }

    fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError> {
        self.as_ref().write(identity, entry)
    }

    fn delete(&self, identity: &str) -> Result<(), LLError> {
        self.as_ref().delete(identity)
    }

    fn remove_persistent_domain(&self, name: &str) -> Result<(), LLError> {
        self.as_ref().remove_persistent_domain(name)
    }

    fn exists(&self, identity: &str) -> Result<bool, LLError> {
        self.as_ref().exists(identity)
    }
}

impl<T: PrefStore + ?Sized> PrefStore for Arc<T> {
    fn read(&self, identity: &str) -> Result<Option<Entry>, LLError> {
        self.as_ref().read(identity)
    }

    fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError> {
        self.as_ref().write(identity, entry)
    }

    fn delete(&self, identity: &str) -> Result<(), LLError> {
        self.as_ref().delete(identity)
    }

    fn remove_persistent_domain(&self, name: &str) -> Result<(), LLError> {
        self.as_ref().remove_persistent_domain(name)
    }

    fn exists(&self, identity: &str) -> Result<bool, LLError> {
        self.as_ref().exists(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// A simple in-memory preference store for testing.
    struct TestPrefStore {
        data: Mutex<HashMap<String, Entry>>,
    }

    impl TestPrefStore {
        fn new() -> Self {
            Self {
                data: Mutex::new(HashMap::new()),
            }
        }
    }

    impl PrefStore for TestPrefStore {
        fn read(&self, identity: &str) -> Result<Option<Entry>, LLError> {
            Ok(self.data.lock().unwrap().get(identity).cloned())
        }

        fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError> {
            self.data
                .lock()
                .unwrap()
                .insert(identity.to_string(), entry);
            Ok(())
        }

        fn delete(&self, identity: &str) -> Result<(), LLError> {
            self.data.lock().unwrap().remove(identity);
            Ok(())
        }

        fn remove_persistent_domain(&self, _name: &str) -> Result<(), LLError> {
            self.data.lock().unwrap().clear();
            Ok(())
        }
    }

    #[test]
    fn scalar_and_bytes_reads_are_disjoint() {
        let store = TestPrefStore::new();

        store.write_scalar("count", Scalar::Integer(3)).unwrap();
        store
            .write_bytes("list", Bytes::from_static(b"[1,2,3]"))
            .unwrap();

        assert_eq!(store.read_scalar("count").unwrap(), Some(Scalar::Integer(3)));
        assert_eq!(store.read_bytes("count").unwrap(), None);
        assert_eq!(
            store.read_bytes("list").unwrap(),
            Some(Bytes::from_static(b"[1,2,3]"))
        );
        assert_eq!(store.read_scalar("list").unwrap(), None);
    }

    #[test]
    fn exists_ignores_entry_kind() {
        let store = TestPrefStore::new();
        assert!(!store.exists("list").unwrap());

        store.write_bytes("list", Bytes::from_static(b"[]")).unwrap();
        assert!(store.exists("list").unwrap());

        store.delete("list").unwrap();
        assert!(!store.exists("list").unwrap());

        // Deleting again is fine
        store.delete("list").unwrap();
    }

    #[test]
    fn object_safety_works() {
        let store = TestPrefStore::new();
        let boxed: Box<dyn PrefStore> = Box::new(store);

        boxed.write_scalar("flag", Scalar::Bool(true)).unwrap();
        assert_eq!(boxed.read_scalar("flag").unwrap(), Some(Scalar::Bool(true)));
    }

    #[test]
    fn shared_handles_see_the_same_entries() {
        let store = Arc::new(TestPrefStore::new());
        let other = Arc::clone(&store);

        store
            .write_scalar("name", Scalar::String("Ada".to_string()))
            .unwrap();
        assert!(other.exists("name").unwrap());

        let by_ref: &TestPrefStore = &store;
        by_ref.remove_persistent_domain("any").unwrap();
        assert!(!other.exists("name").unwrap());
    }
}
