//! Read-side views of threads and posts.

use lectern_db::queries::{courses, posts, reactions, threads};
use lectern_types::post::Post;
use lectern_types::thread::{ThreadColor, ThreadState};
use lectern_types::{CourseId, PostId, ThreadId};
use rusqlite::Connection;
use serde::Serialize;

use crate::{ForumError, Result};

/// Everything a shell needs to render a thread.
#[derive(Debug, Clone, Serialize)]
pub struct ThreadView {
    pub root: Post,
    pub state: ThreadState,
    pub color: ThreadColor,
    pub tags: Vec<String>,
    pub folders: Vec<String>,
    pub replies: Vec<Post>,
    pub likes: u64,
    pub views: u64,
}

/// Assemble a thread with its replies, tags, folders and counters.
pub fn thread_view(conn: &Connection, thread_id: ThreadId) -> Result<ThreadView> {
    let row = threads::get(conn, thread_id)?;
    let root = posts::get(conn, thread_id.root_post())?;
    let folders = threads::folders_of(conn, thread_id)?
        .into_iter()
        .map(|(_, name)| name)
        .collect();

    Ok(ThreadView {
        root,
        color: row.color,
        state: row.state,
        tags: threads::tags_of(conn, thread_id)?,
        folders,
        replies: posts::replies_of(conn, thread_id)?,
        likes: reactions::like_count(conn, thread_id.root_post())?,
        views: reactions::view_count(conn, thread_id)?,
    })
}

/// Threads filed in a folder, oldest placement first.
pub fn threads_in_folder(conn: &Connection, course: CourseId, folder: &str) -> Result<Vec<ThreadId>> {
    if !courses::folder_exists(conn, course, folder)? {
        return Err(ForumError::NotFound(format!(
            "folder {folder:?} in course {course}"
        )));
    }
    Ok(threads::list_in_folder(conn, course, folder)?)
}

/// Get a single post.
pub fn post(conn: &Connection, post_id: PostId) -> Result<Post> {
    Ok(posts::get(conn, post_id)?)
}

/// Number of users liking a post.
pub fn likes_of(conn: &Connection, post_id: PostId) -> Result<u64> {
    posts::get(conn, post_id)?;
    Ok(reactions::like_count(conn, post_id)?)
}
