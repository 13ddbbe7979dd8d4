//! Per-user engagement statistics.

use lectern_types::stats::UserEngagement;
use lectern_types::UserId;
use rusqlite::Connection;

use crate::Result;

/// Every user once, with threads viewed and posts created. Users without a
/// role record, posts or views count zero. Sorted by threads viewed,
/// descending; ties keep whatever order SQLite yields.
pub fn engagement(conn: &Connection) -> Result<Vec<UserEngagement>> {
    let mut stmt = conn.prepare(
        "SELECT u.user_id,
                u.name,
                (SELECT COUNT(*) FROM views v WHERE v.user_id = u.user_id) AS threads_viewed,
                (SELECT COUNT(*) FROM posts p
                 WHERE p.pcid IN (
                     SELECT pcid FROM students WHERE user_id = u.user_id
                     UNION
                     SELECT pcid FROM instructors WHERE user_id = u.user_id
                 )) AS posts_created
         FROM users u
         ORDER BY threads_viewed DESC",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(UserEngagement {
                user_id: UserId(row.get(0)?),
                user_name: row.get(1)?,
                threads_viewed: row.get::<_, i64>(2)? as u64,
                posts_created: row.get::<_, i64>(3)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}
