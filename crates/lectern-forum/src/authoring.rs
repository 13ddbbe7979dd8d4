//! Thread and reply authoring, likes and views.
//!
//! Thread creation and `create_reply` each run in one transaction; a failure
//! at any step leaves no trace.

use lectern_db::queries::{courses, identity, posts, reactions, threads};
use lectern_types::post::PostKind;
use lectern_types::thread::Transition;
use lectern_types::{CourseId, PostCreatorId, PostId, ThreadId, UserId};
use rusqlite::Connection;

use crate::{ForumError, Result};

/// Outcome of [`create_reply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reply {
    pub post_id: PostId,
    pub thread_id: ThreadId,
    pub transition: Transition,
}

/// Start a thread in `folder` of `course`, optionally tagged.
///
/// A blank `tag` attaches no tag. The folder must already exist.
pub fn create_thread(
    conn: &mut Connection,
    author: PostCreatorId,
    course: CourseId,
    content: &str,
    folder: &str,
    tag: &str,
) -> Result<ThreadId> {
    create_filed_thread(conn, author, course, content, &[folder], &[tag])
}

/// Start a thread filed under every folder in `folders` with every tag in
/// `tags`, all in one transaction. Blank tags are skipped; at least one
/// folder is required and each must exist.
pub fn create_filed_thread(
    conn: &mut Connection,
    author: PostCreatorId,
    course: CourseId,
    content: &str,
    folders: &[&str],
    tags: &[&str],
) -> Result<ThreadId> {
    if folders.is_empty() {
        return Err(ForumError::ConstraintViolation(
            "a thread needs at least one folder".into(),
        ));
    }
    let thread_id = ThreadId::new_v4();

    let tx = conn.transaction()?;
    for folder in folders {
        if !courses::folder_exists(&tx, course, folder)? {
            return Err(ForumError::NotFound(format!(
                "folder {folder:?} in course {course}"
            )));
        }
    }
    posts::insert(
        &tx,
        thread_id.root_post(),
        content,
        author,
        PostKind::Thread,
        thread_id,
    )?;
    threads::insert(&tx, thread_id)?;
    for tag in tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        threads::add_tag(&tx, thread_id, tag)?;
    }
    for folder in folders {
        threads::place_in_folder(&tx, thread_id, course, folder)?;
    }
    tx.commit()?;

    tracing::info!(thread = %thread_id, %course, ?folders, "thread created");
    Ok(thread_id)
}

/// Reply to any post of a thread, the root or another reply.
///
/// The author's kind decides which slot of the owning thread records the
/// reply. A previous reply in that slot is overwritten.
pub fn create_reply(
    conn: &mut Connection,
    author: PostCreatorId,
    target: PostId,
    content: &str,
) -> Result<Reply> {
    let post_id = PostId::new_v4();

    let tx = conn.transaction()?;
    let thread_id = posts::owning_thread(&tx, target)?
        .ok_or_else(|| ForumError::NotFound(format!("post {target}")))?;
    let role = identity::creator_kind(&tx, author)?;

    let mut state = threads::get(&tx, thread_id)?.state;
    let transition = state.record_reply(role, post_id);

    posts::insert(&tx, post_id, content, author, PostKind::Reply, thread_id)?;
    threads::write_slot(&tx, thread_id, role, post_id)?;
    tx.commit()?;

    tracing::info!(post = %post_id, thread = %thread_id, %role, "reply created");
    tracing::debug!(
        thread = %thread_id,
        from = transition.from.code(),
        to = transition.to.code(),
        overwritten = ?transition.overwritten,
        "thread color transition"
    );
    Ok(Reply {
        post_id,
        thread_id,
        transition,
    })
}

/// Like a post. Returns `false` if the user already liked it.
pub fn like_post(conn: &Connection, user: UserId, post: PostId) -> Result<bool> {
    posts::get(conn, post)?;
    Ok(reactions::like(conn, user, post)?)
}

/// Record a thread view. Returns `false` if the user already viewed it.
pub fn view_thread(conn: &Connection, user: UserId, thread: ThreadId) -> Result<bool> {
    threads::get(conn, thread)?;
    Ok(reactions::view(conn, user, thread)?)
}
