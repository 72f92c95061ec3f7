//! Enum-like values persisted through a raw representation.

use prefkit_core_store::Storable;

/// A value with a storable raw form, such as a fieldless enum or a flag set.
///
/// Stored through [`Settings::set_raw`](crate::Settings::set_raw) and read
/// back through [`Settings::get_raw`](crate::Settings::get_raw). Conversion
/// from raw may fail: an unknown discriminant reads as absent.
pub trait RawRepresentable: Sized {
    type Raw: Storable;

    fn raw_value(&self) -> Self::Raw;

    fn from_raw(raw: Self::Raw) -> Option<Self>;
}

/// Implement [`RawRepresentable`] for a fieldless enum from a variant table.
///
/// ```rust
/// use prefkit_serde_store::{raw_representable, RawRepresentable};
///
/// #[derive(Debug, PartialEq)]
/// enum Theme {
///     Light,
///     Dark,
/// }
///
/// raw_representable!(Theme: i64 {
///     Light = 0,
///     Dark = 1,
/// });
///
/// assert_eq!(Theme::Dark.raw_value(), 1);
/// assert_eq!(Theme::from_raw(0), Some(Theme::Light));
/// assert_eq!(Theme::from_raw(7), None);
/// ```
#[macro_export]
macro_rules! raw_representable {
    ($ty:ty : $raw:ty { $($variant:ident = $value:expr),+ $(,)? }) => {
        impl $crate::RawRepresentable for $ty {
            type Raw = $raw;

            fn raw_value(&self) -> $raw {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            fn from_raw(raw: $raw) -> Option<Self> {
                $(
                    if raw == $value {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }
    };
}
