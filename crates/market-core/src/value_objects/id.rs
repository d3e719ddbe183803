//! Typed identifiers
//!
//! Every table uses a database-assigned `BIGSERIAL` key. Wrapping each key in
//! its own type keeps a `PhotoId` from being passed where a `ProductId` is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error when parsing an identifier from a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format")]
    InvalidFormat,
    #[error("id must be positive")]
    NotPositive,
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw database key
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Parse from string representation; only positive keys are valid
            pub fn parse(s: &str) -> Result<Self, IdParseError> {
                let raw = s.trim().parse::<i64>().map_err(|_| IdParseError::InvalidFormat)?;
                if raw <= 0 {
                    return Err(IdParseError::NotPositive);
                }
                Ok(Self(raw))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(
    /// User account id
    UserId
);
define_id!(
    /// Category id
    CategoryId
);
define_id!(
    /// Product id
    ProductId
);
define_id!(
    /// Product photo id
    PhotoId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(PhotoId::parse("7").unwrap(), PhotoId::new(7));
        assert_eq!(" 42 ".parse::<ProductId>().unwrap(), ProductId::new(42));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(UserId::parse("abc"), Err(IdParseError::InvalidFormat));
        assert_eq!(UserId::parse("0"), Err(IdParseError::NotPositive));
        assert_eq!(UserId::parse("-3"), Err(IdParseError::NotPositive));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&CategoryId::new(12)).unwrap();
        assert_eq!(json, "12");

        let id: CategoryId = serde_json::from_str("12").unwrap();
        assert_eq!(id.into_inner(), 12);
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductId::new(99).to_string(), "99");
    }
}
