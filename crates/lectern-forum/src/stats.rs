//! Engagement statistics for instructors.

use lectern_db::queries::stats;
use lectern_types::identity::{Role, Session};
use lectern_types::stats::UserEngagement;
use rusqlite::Connection;

use crate::{ForumError, Result};

/// Statistics for a logged-in session. Only roles allowed to view
/// statistics get them.
pub fn statistics(conn: &Connection, session: &Session) -> Result<Vec<UserEngagement>> {
    if !session.role.can_view_statistics() {
        return Err(ForumError::RoleMismatch {
            expected: Role::Instructor,
            actual: Some(session.role),
        });
    }
    engagement_report(conn)
}

/// Every user with threads viewed and posts created, most views first.
pub fn engagement_report(conn: &Connection) -> Result<Vec<UserEngagement>> {
    let rows = stats::engagement(conn)?;
    tracing::debug!(users = rows.len(), "engagement report");
    Ok(rows)
}
