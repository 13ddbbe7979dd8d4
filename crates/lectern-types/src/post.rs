//! Posts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PostCreatorId, PostId, ThreadId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostKind {
    Thread,
    Reply,
}

impl PostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Thread => "thread",
            PostKind::Reply => "reply",
        }
    }
}

impl FromStr for PostKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "thread" => Ok(PostKind::Thread),
            "reply" => Ok(PostKind::Reply),
            other => Err(format!("unknown post kind: {other}")),
        }
    }
}

/// A stored post. `thread_id` is the owning thread; a root post owns itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub content: String,
    pub post_creator_id: PostCreatorId,
    pub kind: PostKind,
    pub thread_id: ThreadId,
}

impl Post {
    pub fn is_root(&self) -> bool {
        self.kind == PostKind::Thread
    }
}
