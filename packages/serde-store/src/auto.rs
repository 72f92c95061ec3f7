//! Settings-backed properties with implicit keys and persisted defaults.
//!
//! A property is addressed by a compile-time identity, normally the name of
//! the accessor declared with [`auto_properties!`](crate::auto_properties).
//! Reading a property that has a default and no stored value writes the
//! default back, so every later read returns the same value even if the
//! default expression changes between releases.

use prefkit_core_store::{Key, Storable};

use crate::Settings;

/// Property-style reads and writes on top of [`Settings`].
///
/// This trait is automatically implemented for all `Settings` implementations.
pub trait AutoProperty: Settings {
    /// Write `new_value`, or `fallback` when there is no new value.
    ///
    /// Something is always persisted.
    fn write_or<V: Storable>(&self, new_value: Option<V>, fallback: V, identity: &'static str) {
        let value = new_value.unwrap_or(fallback);
        self.set(&value, &Key::from_static(identity));
    }

    /// Write `new_value`, or clear the entry when there is no new value.
    fn write_optional<V: Storable>(&self, new_value: Option<V>, identity: &'static str) {
        let key = Key::<V>::from_static(identity);
        match new_value {
            Some(value) => self.set(&value, &key),
            None => self.clear(&key),
        }
    }

    /// Persist `fallback` for an absent property and read it back.
    ///
    /// This is the write half of a default-persisting read. The result is
    /// what the store returns afterwards, so `None` means the default did not
    /// stick.
    fn persist_default<V: Storable>(&self, fallback: V, identity: &'static str) -> Option<V> {
        tracing::debug!(identity, "persisting default for absent property");
        let key = Key::<V>::from_static(identity);

        if let Err(error) = self.try_set(&fallback, &key) {
            tracing::error!(identity, %error, "failed to persist default");
        }

        self.get(&key)
    }

    /// Read the stored value. When absent, persist and return `fallback` if
    /// there is one.
    fn read_optional<V: Storable>(&self, fallback: Option<V>, identity: &'static str) -> Option<V> {
        if let Some(value) = self.get(&Key::<V>::from_static(identity)) {
            return Some(value);
        }

        fallback.and_then(|fallback| self.persist_default(fallback, identity))
    }

    /// Read the stored value, persisting `fallback` on first access.
    ///
    /// # Panics
    ///
    /// Panics if no value comes back after the default was persisted, for
    /// example when the store rejects the write.
    fn read_or<V: Storable>(&self, fallback: V, identity: &'static str) -> V {
        match self.read_optional(Some(fallback), identity) {
            Some(value) => value,
            None => panic!(
                "property `{}` is absent right after its default was persisted",
                identity
            ),
        }
    }
}

// Blanket implementation for all Settings
impl<T: Settings + ?Sized> AutoProperty for T {}

/// Declare a struct of settings-backed properties.
///
/// Each property is written `getter, setter: Type = default;` or
/// `getter, setter: Type;`. The getter's name is the key identity.
///
/// - With a default, the getter returns `Type` and persists the default on
///   first read; the setter takes `Option<Type>` and writes the default for
///   `None`.
/// - Without a default, the getter returns `Option<Type>`; the setter clears
///   the entry for `None`.
///
/// ```rust
/// use prefkit_json_store::InMemoryStore;
/// use prefkit_serde_store::{auto_properties, Defaults};
///
/// auto_properties! {
///     /// Preferences of the main window.
///     pub struct WindowPrefs {
///         pub launch_count, set_launch_count: i64 = 0;
///         pub last_file, set_last_file: String;
///     }
/// }
///
/// let defaults = Defaults::new(InMemoryStore::default());
/// let prefs = WindowPrefs::new(&defaults);
///
/// assert_eq!(prefs.launch_count(), 0);
/// assert_eq!(prefs.last_file(), None);
///
/// prefs.set_last_file(Some("notes.txt".to_string()));
/// assert_eq!(prefs.last_file(), Some("notes.txt".to_string()));
/// ```
#[macro_export]
macro_rules! auto_properties {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($body:tt)*
        }
    ) => {
        $(#[$meta])*
        $vis struct $name<'a, T: ?Sized> {
            settings: &'a T,
        }

        impl<'a, T: $crate::AutoProperty + ?Sized> $name<'a, T> {
            pub fn new(settings: &'a T) -> Self {
                Self { settings }
            }

            $crate::auto_properties!(@accessors $($body)*);
        }
    };

    (@accessors) => {};

    (@accessors
        $(#[$pmeta:meta])*
        $pvis:vis $get:ident, $set:ident : $ty:ty = $default:expr;
        $($rest:tt)*
    ) => {
        $(#[$pmeta])*
        $pvis fn $get(&self) -> $ty {
            $crate::AutoProperty::read_or(self.settings, $default, stringify!($get))
        }

        $pvis fn $set(&self, value: Option<$ty>) {
            $crate::AutoProperty::write_or(self.settings, value, $default, stringify!($get))
        }

        $crate::auto_properties!(@accessors $($rest)*);
    };

    (@accessors
        $(#[$pmeta:meta])*
        $pvis:vis $get:ident, $set:ident : $ty:ty;
        $($rest:tt)*
    ) => {
        $(#[$pmeta])*
        $pvis fn $get(&self) -> Option<$ty> {
            $crate::AutoProperty::read_optional::<$ty>(self.settings, None, stringify!($get))
        }

        $pvis fn $set(&self, value: Option<$ty>) {
            $crate::AutoProperty::write_optional(self.settings, value, stringify!($get))
        }

        $crate::auto_properties!(@accessors $($rest)*);
    };
}
