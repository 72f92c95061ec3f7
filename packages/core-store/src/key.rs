//! Typed keys.

use std::any::type_name;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A string identity paired with the type of the value stored under it.
///
/// The identity must be stable and unique per logical setting within one
/// store. Nothing enforces uniqueness: two keys with the same identity alias
/// the same entry, whatever their value types.
///
/// Keys are cheap values, not store entries. Declare them as constants:
///
/// ```rust
/// use prefkit_core_store::Key;
///
/// const LAUNCH_COUNT: Key<i64> = Key::from_static("launchCount");
///
/// assert_eq!(LAUNCH_COUNT.identity(), "launchCount");
/// ```
pub struct Key<V> {
    identity: Cow<'static, str>,
    // fn() -> V keeps Key Send + Sync and covariant whatever V is.
    _value: PhantomData<fn() -> V>,
}

impl<V> Key<V> {
    /// Create a key from any string identity.
    pub fn new(identity: impl Into<Cow<'static, str>>) -> Self {
        Self {
            identity: identity.into(),
            _value: PhantomData,
        }
    }

    /// Create a key from a static identity, usable in `const` items.
    pub const fn from_static(identity: &'static str) -> Self {
        Self {
            identity: Cow::Borrowed(identity),
            _value: PhantomData,
        }
    }

    /// The identity naming the stored entry.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The same identity, typed for a different value.
    ///
    /// Used to address the raw representation of an enum-like value.
    pub fn cast<U>(&self) -> Key<U> {
        Key {
            identity: self.identity.clone(),
            _value: PhantomData,
        }
    }
}

impl<V> Clone for Key<V> {
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            _value: PhantomData,
        }
    }
}

impl<V> fmt::Debug for Key<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key<{}>({:?})", type_name::<V>(), self.identity)
    }
}

impl<V> fmt::Display for Key<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity)
    }
}

impl<V> PartialEq for Key<V> {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl<V> Eq for Key<V> {}

impl<V> Hash for Key<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl<V> From<&'static str> for Key<V> {
    fn from(identity: &'static str) -> Self {
        Key::from_static(identity)
    }
}

impl<V> From<String> for Key<V> {
    fn from(identity: String) -> Self {
        Key::new(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NotClone;

    #[test]
    fn const_keys() {
        const COUNT: Key<i64> = Key::from_static("count");
        assert_eq!(COUNT.identity(), "count");
        assert_eq!(format!("{}", COUNT), "count");
    }

    #[test]
    fn clone_does_not_need_value_bounds() {
        let key: Key<NotClone> = Key::new(String::from("opaque"));
        let copy = key.clone();
        assert_eq!(key, copy);
    }

    #[test]
    fn cast_keeps_identity() {
        let key: Key<Vec<String>> = Key::from("recent");
        let raw: Key<String> = key.cast();
        assert_eq!(raw.identity(), "recent");
    }

    #[test]
    fn debug_names_the_value_type() {
        let key: Key<bool> = Key::from_static("enabled");
        let debug = format!("{:?}", key);
        assert!(debug.contains("bool"));
        assert!(debug.contains("enabled"));
    }

    #[test]
    fn keys_hash_by_identity() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Key::<i64>::from_static("a"));
        set.insert(Key::<i64>::new("a".to_string()));
        set.insert(Key::<i64>::from_static("b"));
        assert_eq!(set.len(), 2);
    }
}
