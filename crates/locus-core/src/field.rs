//! The opaque slot-value contract.

use std::fmt::Debug;
use std::hash::Hash;

/// A value stored in one buffer slot.
///
/// Fields are defined outside this framework; locus never interprets
/// their contents. The only requirement is a canonical null Field, which
/// buffers hand out for unset slots and invalid positions so that reads
/// always produce a concrete value.
///
/// `Eq + Hash` lets buffers maintain a lookup index from Field identity
/// to the positions holding it.
///
/// # Examples
///
/// ```
/// use locus_core::Field;
///
/// let unset: Option<&str> = Field::null();
/// assert!(unset.is_null());
/// assert!(!Some("payload").is_null());
/// ```
pub trait Field: Clone + Eq + Hash + Debug + Send + Sync + 'static {
    /// The canonical empty Field.
    fn null() -> Self;

    /// Returns `true` if this is the canonical empty Field.
    fn is_null(&self) -> bool {
        *self == Self::null()
    }
}

/// `None` is the null Field.
impl<T> Field for Option<T>
where
    T: Clone + Eq + Hash + Debug + Send + Sync + 'static,
{
    fn null() -> Self {
        None
    }

    fn is_null(&self) -> bool {
        self.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    struct Tag(&'static str);

    impl Field for Tag {
        fn null() -> Self {
            Tag("")
        }
    }

    #[test]
    fn option_null_is_none() {
        assert_eq!(<Option<u32> as Field>::null(), None);
        assert!(!Some(0u32).is_null());
    }

    #[test]
    fn default_is_null_compares_against_null() {
        assert!(Tag("").is_null());
        assert!(!Tag("x").is_null());
    }
}
