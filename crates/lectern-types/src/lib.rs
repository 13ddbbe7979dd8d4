//! # lectern-types
//!
//! Shared domain types used across the Lectern workspace.
//!
//! Identifiers are opaque 128-bit values. They render as canonical hyphenated
//! UUID strings at every boundary and are stored as 16-byte blobs.

pub mod identity;
pub mod post;
pub mod search;
pub mod stats;
pub mod thread;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error returned when a boundary string is not a canonical UUID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {0:?}")]
pub struct IdParseError(pub String);

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Allocate a fresh random identifier.
            pub fn new_v4() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn from_bytes(bytes: [u8; 16]) -> Self {
                Self(Uuid::from_bytes(bytes))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0.hyphenated(), f)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| IdParseError(s.to_string()))
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// A forum account.
    UserId
);
define_id!(
    /// The authorship handle shared by a student or instructor role record.
    PostCreatorId
);
define_id!(
    /// A course forum.
    CourseId
);
define_id!(
    /// Any post, thread root or reply.
    PostId
);
define_id!(
    /// A thread. Always equal to the id of its root post.
    ThreadId
);

impl ThreadId {
    /// The root post that originated this thread.
    pub fn root_post(&self) -> PostId {
        PostId(self.0)
    }
}

impl From<ThreadId> for PostId {
    fn from(id: ThreadId) -> Self {
        id.root_post()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_hyphenated() {
        let id = PostId::from_bytes([0xab; 16]);
        assert_eq!(id.to_string(), "abababab-abab-abab-abab-abababababab");
    }

    #[test]
    fn test_parse_accepts_canonical_form() {
        let id = UserId::new_v4();
        let parsed: UserId = id.to_string().parse().expect("parse");
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "not-a-uuid".parse::<CourseId>().expect_err("should fail");
        assert_eq!(err, IdParseError("not-a-uuid".to_string()));
    }

    #[test]
    fn test_thread_id_is_root_post_id() {
        let thread = ThreadId::new_v4();
        assert_eq!(thread.root_post().0, thread.0);
        assert_eq!(PostId::from(thread), thread.root_post());
    }

    #[test]
    fn test_serde_transparent() {
        let id = PostCreatorId::from_bytes([1; 16]);
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"01010101-0101-0101-0101-010101010101\"");
    }
}
