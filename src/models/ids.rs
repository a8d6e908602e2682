//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an ID from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parse an ID from a full UUID string
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                Ok(Self(Uuid::parse_str(s)?))
            }

            /// Short display form, e.g. `exp-1a2b3c4d`
            pub fn short(&self) -> String {
                format!("{}{}", $display_prefix, &self.0.simple().to_string()[..8])
            }

            /// Check whether a user-typed reference names this ID
            ///
            /// Accepts the full UUID, or a prefix of its simple form with or
            /// without the display prefix (at least 4 hex digits).
            pub fn matches_reference(&self, reference: &str) -> bool {
                let reference = reference.trim();
                if let Ok(uuid) = Uuid::parse_str(reference) {
                    return uuid == self.0;
                }
                let hex = reference.strip_prefix($display_prefix).unwrap_or(reference);
                hex.len() >= 4 && self.0.simple().to_string().starts_with(&hex.to_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(ExpenseId, "exp-");
define_id!(UserId, "usr-");

impl UserId {
    /// The implicit single user of the local-only store
    pub const fn local() -> Self {
        Self(Uuid::nil())
    }

    /// Check whether this is the implicit local user
    pub fn is_local(&self) -> bool {
        self.0.is_nil()
    }
}
