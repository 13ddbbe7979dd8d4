//! Likes and views. Both relations are sets: repeating an action is a no-op.

use lectern_types::{PostId, ThreadId, UserId};
use rusqlite::Connection;

use crate::Result;

/// Record that a user likes a post. Returns `false` if already liked.
pub fn like(conn: &Connection, user_id: UserId, post_id: PostId) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO likes (user_id, post_id) VALUES (?1, ?2)",
        rusqlite::params![user_id.0, post_id.0],
    )?;
    Ok(inserted > 0)
}

/// Number of users liking a post.
pub fn like_count(conn: &Connection, post_id: PostId) -> Result<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM likes WHERE post_id = ?1",
        [post_id.0],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

/// Record that a user viewed a thread. Returns `false` if already viewed.
pub fn view(conn: &Connection, user_id: UserId, thread_id: ThreadId) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO views (user_id, thread_id) VALUES (?1, ?2)",
        rusqlite::params![user_id.0, thread_id.0],
    )?;
    Ok(inserted > 0)
}

/// Number of distinct users that viewed a thread.
pub fn view_count(conn: &Connection, thread_id: ThreadId) -> Result<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM views WHERE thread_id = ?1",
        [thread_id.0],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

/// Number of distinct threads a user viewed.
pub fn threads_viewed_by(conn: &Connection, user_id: UserId) -> Result<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM views WHERE user_id = ?1",
        [user_id.0],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}
