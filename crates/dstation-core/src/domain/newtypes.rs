//! Domain newtypes with validation
//!
//! Strongly-typed wrappers around the raw string identifiers the NAS API
//! hands out. Distinct wrapper types prevent cross-entity ID mixups (a
//! `TaskId` can never be passed where a `FeedId` is expected).

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DsError;

/// Declares an opaque, non-empty string identifier newtype.
macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, rejecting the empty string
            pub fn new(id: String) -> Result<Self, DsError> {
                if id.is_empty() {
                    return Err(DsError::DecodingFailed(format!(
                        "{} cannot be empty",
                        $label
                    )));
                }
                Ok(Self(id))
            }

            /// Get the inner string reference
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s.to_string())
            }
        }

        impl TryFrom<String> for $name {
            type Error = DsError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Identifier for a download task (e.g., "dbid_123")
    TaskId,
    "Task ID"
);

string_id!(
    /// Identifier for an RSS feed registered on the server
    FeedId,
    "Feed ID"
);

string_id!(
    /// Identifier for a single item within an RSS feed
    FeedItemId,
    "Feed item ID"
);

string_id!(
    /// Opaque session token issued by the server at login and resubmitted
    /// as a query parameter on every authenticated call
    SessionId,
    "Session ID"
);
