//! Lookup Module
//!
//! Defines the outcome of reading a key through the store. Callers that
//! care why a value was absent can match on it; callers that only want
//! the value collapse it with [`Lookup::into_option`].

// == Lookup ==
/// The result of looking up a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// A record was found and its expiry has not passed.
    Fresh(T),
    /// No record exists under the key.
    Missing,
    /// A record existed but its expiry had passed; it has been evicted.
    Expired,
    /// A record exists but could not be decoded. It is left in place.
    Corrupt,
}

impl<T> Lookup<T> {
    /// Collapses the lookup to just the usable value.
    ///
    /// # Returns
    /// * `Some(value)` for a fresh record, `None` for everything else
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Fresh(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true when the lookup produced a usable value.
    pub fn is_fresh(&self) -> bool {
        matches!(self, Lookup::Fresh(_))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_option_keeps_fresh_value() {
        let lookup = Lookup::Fresh(42);

        assert!(lookup.is_fresh());
        assert_eq!(lookup.into_option(), Some(42));
    }

    #[test]
    fn test_into_option_drops_non_fresh_outcomes() {
        assert_eq!(Lookup::<u64>::Missing.into_option(), None);
        assert_eq!(Lookup::<u64>::Expired.into_option(), None);
        assert_eq!(Lookup::<u64>::Corrupt.into_option(), None);
    }
}
