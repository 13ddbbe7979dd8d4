//! Engagement statistics.

use serde::{Deserialize, Serialize};

use crate::UserId;

/// One row of the engagement report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEngagement {
    pub user_id: UserId,
    pub user_name: String,
    pub threads_viewed: u64,
    pub posts_created: u64,
}
