//! Post queries.

use lectern_types::post::{Post, PostKind};
use lectern_types::{PostCreatorId, PostId, ThreadId};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension};

use crate::{not_found, DbError, Result};

/// Insert a post. A thread root must pass its own id as `thread_id`.
///
/// Inserting a root before its thread row is allowed: the thread reference is
/// checked when the enclosing transaction commits.
pub fn insert(
    conn: &Connection,
    post_id: PostId,
    content: &str,
    pcid: PostCreatorId,
    kind: PostKind,
    thread_id: ThreadId,
) -> Result<()> {
    conn.execute(
        "INSERT INTO posts (post_id, content, pcid, kind, thread_id) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![post_id.0, content, pcid.0, kind.as_str(), thread_id.0],
    )?;
    Ok(())
}

/// Get a post by id.
pub fn get(conn: &Connection, post_id: PostId) -> Result<Post> {
    conn.query_row(
        "SELECT post_id, content, pcid, kind, thread_id FROM posts WHERE post_id = ?1",
        [post_id.0],
        post_from_row,
    )
    .map_err(not_found(format!("post {post_id}")))
}

/// The thread a post belongs to, `None` for an unknown post.
pub fn owning_thread(conn: &Connection, post_id: PostId) -> Result<Option<ThreadId>> {
    let thread = conn
        .query_row(
            "SELECT thread_id FROM posts WHERE post_id = ?1",
            [post_id.0],
            |row| Ok(ThreadId(row.get(0)?)),
        )
        .optional()?;
    Ok(thread)
}

/// Replies filed under a thread, oldest first.
pub fn replies_of(conn: &Connection, thread_id: ThreadId) -> Result<Vec<Post>> {
    let mut stmt = conn.prepare(
        "SELECT post_id, content, pcid, kind, thread_id FROM posts
         WHERE thread_id = ?1 AND kind = 'reply'
         ORDER BY rowid",
    )?;
    let rows = stmt
        .query_map([thread_id.0], post_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Number of posts authored by a post creator.
pub fn count_by_creator(conn: &Connection, pcid: PostCreatorId) -> Result<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM posts WHERE pcid = ?1",
        [pcid.0],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

/// Delete a post. Deleting a root removes the whole thread; deleting a
/// reply clears any thread slot that recorded it.
pub fn delete(conn: &Connection, post_id: PostId) -> Result<()> {
    let changed = conn.execute("DELETE FROM posts WHERE post_id = ?1", [post_id.0])?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("post {post_id}")));
    }
    Ok(())
}

pub(crate) fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    let kind: String = row.get(3)?;
    let kind = kind
        .parse::<PostKind>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into()))?;
    Ok(Post {
        post_id: PostId(row.get(0)?),
        content: row.get(1)?,
        post_creator_id: PostCreatorId(row.get(2)?),
        kind,
        thread_id: ThreadId(row.get(4)?),
    })
}
