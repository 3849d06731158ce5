//! Newtype identifiers for records.
//!
//! Each collection hands out its own identifiers, so each record kind gets its
//! own identifier type. A [`ListingId`] can never be passed where a [`UserId`]
//! is expected.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Common behaviour of every record identifier.
///
/// Identifiers wrap an `i32`. Values assigned by a store start at 1; values
/// `<= 0` are never assigned and are used by queries to mean "any".
pub trait RecordId:
    Copy + Eq + Ord + Hash + Debug + Display + From<i32> + Into<i32> + Send + Sync + 'static
{
    /// Returns the raw integer value.
    fn get(self) -> i32 {
        self.into()
    }

    /// Returns `true` if this identifier could have been assigned by a store.
    fn is_assigned(self) -> bool {
        self.get() > 0
    }
}

/// Defines an `i32` identifier newtype implementing [`RecordId`].
///
/// # Example
///
/// ```ignore
/// define_id!(UserId);
///
/// let id = UserId::new(1);
/// assert_eq!(id.get(), 1);
/// ```
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            Default,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates an identifier from its raw value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Returns the raw value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl $crate::id::RecordId for $name {}
    };
}

define_id!(
    /// Identifier of a [`User`](crate::model::User).
    UserId
);
define_id!(
    /// Identifier of a [`Listing`](crate::model::Listing).
    ListingId
);
define_id!(
    /// Identifier of an [`Order`](crate::model::Order).
    OrderId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unassigned_ids_are_non_positive() {
        assert!(!UserId::default().is_assigned());
        assert!(!UserId::new(-3).is_assigned());
        assert!(UserId::new(1).is_assigned());
    }

    #[test]
    fn ids_serialize_transparently() {
        let json = serde_json::to_string(&OrderId::new(42)).unwrap();
        assert_eq!(json, "42");
    }
}
