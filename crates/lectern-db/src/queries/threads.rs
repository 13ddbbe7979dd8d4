//! Thread rows, reply slots, tags and folder placement.

use lectern_types::identity::Role;
use lectern_types::thread::{ThreadColor, ThreadState};
use lectern_types::{CourseId, PostId, ThreadId};
use rusqlite::types::Type;
use rusqlite::Connection;
use uuid::Uuid;

use crate::{not_found, DbError, Result};

/// A thread row: the slots and the color the database derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRow {
    pub state: ThreadState,
    pub color: ThreadColor,
}

/// Insert a thread row with both slots empty. The root post must exist.
pub fn insert(conn: &Connection, thread_id: ThreadId) -> Result<()> {
    conn.execute("INSERT INTO threads (thread_id) VALUES (?1)", [thread_id.0])?;
    Ok(())
}

/// Get a thread row.
pub fn get(conn: &Connection, thread_id: ThreadId) -> Result<ThreadRow> {
    conn.query_row(
        "SELECT thread_id, student_reply_id, instructor_reply_id, color
         FROM threads WHERE thread_id = ?1",
        [thread_id.0],
        |row| {
            let code: i64 = row.get(3)?;
            let color = ThreadColor::try_from(code).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e))
            })?;
            Ok(ThreadRow {
                state: ThreadState {
                    thread_id: ThreadId(row.get(0)?),
                    student_reply: row.get::<_, Option<Uuid>>(1)?.map(PostId),
                    instructor_reply: row.get::<_, Option<Uuid>>(2)?.map(PostId),
                },
                color,
            })
        },
    )
    .map_err(not_found(format!("thread {thread_id}")))
}

/// Write the reply slot for `role`. The color column follows automatically.
pub fn write_slot(conn: &Connection, thread_id: ThreadId, role: Role, reply: PostId) -> Result<()> {
    let sql = match role {
        Role::Student => "UPDATE threads SET student_reply_id = ?1 WHERE thread_id = ?2",
        Role::Instructor => "UPDATE threads SET instructor_reply_id = ?1 WHERE thread_id = ?2",
    };
    let changed = conn.execute(sql, rusqlite::params![reply.0, thread_id.0])?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("thread {thread_id}")));
    }
    Ok(())
}

/// Tag a thread. Returns `false` if the tag was already present.
pub fn add_tag(conn: &Connection, thread_id: ThreadId, tag: &str) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO tags (thread_id, tag) VALUES (?1, ?2)",
        rusqlite::params![thread_id.0, tag],
    )?;
    Ok(inserted > 0)
}

/// Tags of a thread, alphabetically.
pub fn tags_of(conn: &Connection, thread_id: ThreadId) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT tag FROM tags WHERE thread_id = ?1 ORDER BY tag")?;
    let rows = stmt
        .query_map([thread_id.0], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Place a thread in a folder of a course. Returns `false` if already there.
pub fn place_in_folder(
    conn: &Connection,
    thread_id: ThreadId,
    course_id: CourseId,
    folder: &str,
) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO thread_folders (thread_id, course_id, folder_name)
         VALUES (?1, ?2, ?3)",
        rusqlite::params![thread_id.0, course_id.0, folder],
    )?;
    Ok(inserted > 0)
}

/// Folders a thread is placed in.
pub fn folders_of(conn: &Connection, thread_id: ThreadId) -> Result<Vec<(CourseId, String)>> {
    let mut stmt = conn.prepare(
        "SELECT course_id, folder_name FROM thread_folders
         WHERE thread_id = ?1 ORDER BY folder_name",
    )?;
    let rows = stmt
        .query_map([thread_id.0], |row| Ok((CourseId(row.get(0)?), row.get(1)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Threads placed in one folder, in placement order.
pub fn list_in_folder(conn: &Connection, course_id: CourseId, folder: &str) -> Result<Vec<ThreadId>> {
    let mut stmt = conn.prepare(
        "SELECT thread_id FROM thread_folders
         WHERE course_id = ?1 AND folder_name = ?2
         ORDER BY rowid",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![course_id.0, folder], |row| {
            Ok(ThreadId(row.get(0)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
