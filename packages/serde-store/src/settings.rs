//! The typed settings facade.

use prefkit_core_store::{Codec, Entry, Error, Key, PrefStore, Representation, Scope, Storable};

use crate::raw::RawRepresentable;
use crate::JsonCodec;

/// Typed access to a preference store.
///
/// Implementors provide the fallible `try_*` operations. The lenient
/// operations built on top of them never fail: codec and store errors are
/// logged and turned into "no effect" for writes and "no value" for reads.
pub trait Settings {
    /// Write `value` under `key`.
    ///
    /// Native types are written as scalars, everything else as codec bytes.
    /// The value is encoded before the store is touched, so an encode error
    /// leaves any previous entry in place.
    fn try_set<V: Storable>(&self, value: &V, key: &Key<V>) -> Result<(), Error>;

    /// Read the value under `key`.
    ///
    /// `Ok(None)` when nothing is stored, or when the stored entry belongs to
    /// another representation or scalar kind.
    fn try_get<V: Storable>(&self, key: &Key<V>) -> Result<Option<V>, Error>;

    /// Check whether anything is stored under `key`'s identity.
    fn try_has<V>(&self, key: &Key<V>) -> Result<bool, Error>;

    /// Delete the entry under `key`'s identity, if any.
    fn try_clear<V>(&self, key: &Key<V>) -> Result<(), Error>;

    /// Delete every entry of the scope's persistence domain.
    fn try_remove_all(&self, scope: &Scope) -> Result<(), Error>;

    fn set<V: Storable>(&self, value: &V, key: &Key<V>) {
        if let Err(error) = self.try_set(value, key) {
            tracing::error!(identity = key.identity(), %error, "failed to write setting");
        }
    }

    fn get<V: Storable>(&self, key: &Key<V>) -> Option<V> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(error) => {
                tracing::error!(identity = key.identity(), %error, "failed to read setting");
                None
            }
        }
    }

    fn has<V>(&self, key: &Key<V>) -> bool {
        match self.try_has(key) {
            Ok(present) => present,
            Err(error) => {
                tracing::error!(identity = key.identity(), %error, "failed to check setting");
                false
            }
        }
    }

    fn clear<V>(&self, key: &Key<V>) {
        if let Err(error) = self.try_clear(key) {
            tracing::error!(identity = key.identity(), %error, "failed to clear setting");
        }
    }

    fn remove_all(&self, scope: &Scope) {
        if let Err(error) = self.try_remove_all(scope) {
            tracing::error!(domain = scope.identifier(), %error, "failed to remove domain");
        }
    }

    /// Read an enum-like value through its raw representation.
    ///
    /// A raw value with no matching `V` reads as `None`.
    fn get_raw<V: RawRepresentable>(&self, key: &Key<V>) -> Option<V> {
        self.get(&key.cast::<V::Raw>()).and_then(V::from_raw)
    }

    /// Write an enum-like value as its raw representation.
    fn set_raw<V: RawRepresentable>(&self, value: &V, key: &Key<V>) {
        self.set(&value.raw_value(), &key.cast::<V::Raw>())
    }
}

/// Strongly typed values stored in a host preference store.
///
/// Appropriate for user preferences and small pieces of application state.
/// It is not a secret store: nothing is encrypted.
///
/// # Example
///
/// ```rust
/// use prefkit_json_store::InMemoryStore;
/// use prefkit_serde_store::{Defaults, Key, Settings};
///
/// const COUNT: Key<i64> = Key::from_static("count");
///
/// let defaults = Defaults::new(InMemoryStore::new("com.example.app"));
/// defaults.set(&123, &COUNT);
/// assert_eq!(defaults.get(&COUNT), Some(123));
/// ```
#[derive(Debug, Clone)]
pub struct Defaults<S, C = JsonCodec> {
    store: S,
    codec: C,
}

impl<S: PrefStore> Defaults<S> {
    /// Typed access to `store`, with structured values encoded as JSON.
    pub fn new(store: S) -> Self {
        Self::with_codec(store, JsonCodec)
    }
}

impl<S: PrefStore, C: Codec> Defaults<S, C> {
    pub fn with_codec(store: S, codec: C) -> Self {
        Self { store, codec }
    }

    /// The underlying preference store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: PrefStore, C: Codec> Settings for Defaults<S, C> {
    fn try_set<V: Storable>(&self, value: &V, key: &Key<V>) -> Result<(), Error> {
        let entry = value.encode(&self.codec)?;
        self.store.write(key.identity(), entry)?;
        Ok(())
    }

    fn try_get<V: Storable>(&self, key: &Key<V>) -> Result<Option<V>, Error> {
        let identity = key.identity();
        let entry = match V::REPRESENTATION {
            Representation::Native => self.store.read_scalar(identity)?.map(Entry::Scalar),
            Representation::Structured => self.store.read_bytes(identity)?.map(Entry::Bytes),
        };

        match entry {
            Some(entry) => V::decode(entry, &self.codec),
            None => Ok(None),
        }
    }

    fn try_has<V>(&self, key: &Key<V>) -> Result<bool, Error> {
        Ok(self.store.exists(key.identity())?)
    }

    fn try_clear<V>(&self, key: &Key<V>) -> Result<(), Error> {
        Ok(self.store.delete(key.identity())?)
    }

    fn try_remove_all(&self, scope: &Scope) -> Result<(), Error> {
        let Some(name) = scope.identifier() else {
            tracing::warn!("scope has no domain identifier; nothing removed");
            return Ok(());
        };

        Ok(self.store.remove_persistent_domain(name)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use prefkit_core_store::{LLError, Scalar, Structured};
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;

    /// In-memory store that records every mutation.
    #[derive(Default)]
    pub(crate) struct RecordingStore {
        pub(crate) entries: Mutex<HashMap<String, Entry>>,
        pub(crate) writes: Mutex<Vec<String>>,
        pub(crate) removed_domains: Mutex<Vec<String>>,
    }

    impl PrefStore for RecordingStore {
        fn read(&self, identity: &str) -> Result<Option<Entry>, LLError> {
            Ok(self.entries.lock().get(identity).cloned())
        }

        fn write(&self, identity: &str, entry: Entry) -> Result<(), LLError> {
            self.writes.lock().push(identity.to_string());
            self.entries.lock().insert(identity.to_string(), entry);
            Ok(())
        }

        fn delete(&self, identity: &str) -> Result<(), LLError> {
            self.entries.lock().remove(identity);
            Ok(())
        }

        fn remove_persistent_domain(&self, name: &str) -> Result<(), LLError> {
            self.removed_domains.lock().push(name.to_string());
            self.entries.lock().clear();
            Ok(())
        }
    }

    /// A store whose every operation fails.
    struct BrokenStore;

    impl PrefStore for BrokenStore {
        fn read(&self, _identity: &str) -> Result<Option<Entry>, LLError> {
            Err(LLError::NotSupported)
        }

        fn write(&self, _identity: &str, _entry: Entry) -> Result<(), LLError> {
            Err(LLError::NotSupported)
        }

        fn delete(&self, _identity: &str) -> Result<(), LLError> {
            Err(LLError::NotSupported)
        }

        fn remove_persistent_domain(&self, _name: &str) -> Result<(), LLError> {
            Err(LLError::NotSupported)
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct PersonMock {
        name: String,
        age: i64,
        children: Vec<PersonMock>,
    }

    impl Structured for PersonMock {}

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pairs(HashMap<(i32, i32), String>);

    impl Structured for Pairs {}

    #[test]
    fn count_example() {
        let defaults = Defaults::new(RecordingStore::default());
        let key: Key<i64> = Key::from_static("count");

        defaults.set(&123, &key);
        assert!(defaults.has(&key));
        assert_eq!(defaults.get(&key), Some(123));

        defaults.clear(&key);
        assert_eq!(defaults.get(&key), None);
        assert!(!defaults.has(&key));
    }

    #[test]
    fn natives_are_stored_as_scalars() {
        let defaults = Defaults::new(RecordingStore::default());
        let when = Utc.with_ymd_and_hms(2017, 8, 15, 9, 30, 0).unwrap();

        defaults.set(&"a string".to_string(), &Key::from_static("string"));
        defaults.set(&true, &Key::from_static("bool"));
        defaults.set(&123.1f32, &Key::from_static("float"));
        defaults.set(&123.1f64, &Key::from_static("double"));
        defaults.set(&when, &Key::from_static("date"));

        let store = defaults.store();
        assert_eq!(
            store.read_scalar("string").unwrap(),
            Some(Scalar::String("a string".to_string()))
        );
        assert_eq!(store.read_scalar("bool").unwrap(), Some(Scalar::Bool(true)));
        assert_eq!(store.read_scalar("float").unwrap(), Some(Scalar::Float(123.1)));
        assert_eq!(store.read_scalar("double").unwrap(), Some(Scalar::Double(123.1)));
        assert_eq!(store.read_scalar("date").unwrap(), Some(Scalar::Date(when)));

        assert_eq!(defaults.get(&Key::<DateTime>::from_static("date")), Some(when));
    }

    type DateTime = chrono::DateTime<Utc>;

    #[test]
    fn structured_values_are_stored_as_bytes() {
        let defaults = Defaults::new(RecordingStore::default());
        let key: Key<Vec<i64>> = Key::from_static("arrayOfIntegers");

        defaults.set(&vec![1, 2, 3, 4], &key);

        assert_eq!(
            defaults.store().read_bytes("arrayOfIntegers").unwrap(),
            Some(Bytes::from_static(b"[1,2,3,4]"))
        );
        assert_eq!(defaults.get(&key), Some(vec![1, 2, 3, 4]));
    }

    #[test]
    fn recursive_struct_roundtrip() {
        let defaults = Defaults::new(RecordingStore::default());
        let key: Key<PersonMock> = Key::from_static("personMock");

        let person = PersonMock {
            name: "Bonnie Greenwell".to_string(),
            age: 80,
            children: vec![PersonMock {
                name: "Anne Greenwell".to_string(),
                age: 30,
                children: vec![],
            }],
        };

        defaults.set(&person, &key);

        let saved = defaults.get(&key).unwrap();
        assert_eq!(saved.name, "Bonnie Greenwell");
        assert_eq!(saved.age, 80);
        assert_eq!(saved.children[0].name, "Anne Greenwell");
        assert_eq!(saved.children[0].age, 30);
        assert_eq!(saved, person);
    }

    #[test]
    fn absent_before_any_set() {
        let defaults = Defaults::new(RecordingStore::default());
        let key: Key<PersonMock> = Key::from_static("nobody");

        assert!(!defaults.has(&key));
        assert_eq!(defaults.get(&key), None);
        assert_eq!(defaults.try_get(&key).unwrap(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let defaults = Defaults::new(RecordingStore::default());
        let key: Key<Vec<i64>> = Key::from_static("never-set");

        defaults.try_clear(&key).unwrap();
        defaults.clear(&key);
        assert!(!defaults.has(&key));
    }

    #[test]
    fn type_mismatch_reads_as_absent() {
        let defaults = Defaults::new(RecordingStore::default());

        defaults.set(&"123".to_string(), &Key::from_static("shared"));

        let as_int: Key<i64> = Key::from_static("shared");
        assert_eq!(defaults.try_get(&as_int).unwrap(), None);
        assert!(defaults.has(&as_int));

        // A native entry is never read through the codec path either
        let as_list: Key<Vec<String>> = Key::from_static("shared");
        assert_eq!(defaults.try_get(&as_list).unwrap(), None);
    }

    #[test]
    fn decode_failure_is_logged_and_absent() {
        let defaults = Defaults::new(RecordingStore::default());
        defaults
            .store()
            .write_bytes("personMock", Bytes::from_static(b"{\"name\":"))
            .unwrap();

        let key: Key<PersonMock> = Key::from_static("personMock");
        assert!(matches!(defaults.try_get(&key), Err(Error::Decode { .. })));
        assert_eq!(defaults.get(&key), None);
        assert!(defaults.has(&key));
    }

    #[test]
    fn encode_failure_leaves_previous_entry() {
        let defaults = Defaults::new(RecordingStore::default());
        let key: Key<Pairs> = Key::from_static("pairs");

        defaults
            .store()
            .write_bytes("pairs", Bytes::from_static(b"{}"))
            .unwrap();
        defaults.store().writes.lock().clear();

        let mut map = HashMap::new();
        map.insert((1, 2), "x".to_string());
        let value = Pairs(map);

        assert!(matches!(defaults.try_set(&value, &key), Err(Error::Encode { .. })));
        defaults.set(&value, &key);

        assert!(defaults.store().writes.lock().is_empty());
        assert_eq!(
            defaults.store().read_bytes("pairs").unwrap(),
            Some(Bytes::from_static(b"{}"))
        );
    }

    #[test]
    fn non_finite_value_keeps_previous_entry() {
        let defaults = Defaults::new(RecordingStore::default());
        let key: Key<Vec<f64>> = Key::from_static("weights");

        defaults.set(&vec![0.5], &key);
        defaults.store().writes.lock().clear();

        assert!(matches!(
            defaults.try_set(&vec![f64::NAN], &key),
            Err(Error::Encode { .. })
        ));
        defaults.set(&vec![f64::INFINITY], &key);

        assert!(defaults.store().writes.lock().is_empty());
        assert_eq!(defaults.get(&key), Some(vec![0.5]));
    }

    #[test]
    fn store_failures_never_escape_lenient_operations() {
        let defaults = Defaults::new(BrokenStore);
        let key: Key<i64> = Key::from_static("count");

        defaults.set(&1, &key);
        assert_eq!(defaults.get(&key), None);
        assert!(!defaults.has(&key));
        defaults.clear(&key);
        defaults.remove_all(&Scope::named("com.example.app"));

        assert!(matches!(defaults.try_get(&key), Err(Error::Store(_))));
        assert!(matches!(defaults.try_has(&key), Err(Error::Store(_))));
    }

    #[test]
    fn remove_all_targets_the_scope_domain() {
        let defaults = Defaults::new(RecordingStore::default());
        defaults.set(&1, &Key::<i64>::from_static("a"));

        defaults.remove_all(&Scope::unnamed());
        assert!(defaults.store().removed_domains.lock().is_empty());
        assert!(defaults.has(&Key::<i64>::from_static("a")));

        defaults.remove_all(&Scope::named("com.example.app"));
        assert_eq!(
            *defaults.store().removed_domains.lock(),
            vec!["com.example.app".to_string()]
        );
        assert!(!defaults.has(&Key::<i64>::from_static("a")));
    }

    #[test]
    fn works_over_shared_and_boxed_stores() {
        let shared = std::sync::Arc::new(RecordingStore::default());
        let defaults = Defaults::new(std::sync::Arc::clone(&shared));
        defaults.set(&true, &Key::from_static("flag"));
        assert!(shared.exists("flag").unwrap());

        let boxed: Box<dyn PrefStore> = Box::new(RecordingStore::default());
        let defaults = Defaults::new(boxed);
        defaults.set(&2.5f64, &Key::from_static("ratio"));
        assert_eq!(defaults.get(&Key::<f64>::from_static("ratio")), Some(2.5));
    }
}
