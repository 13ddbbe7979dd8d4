//! Courses, folders and memberships.

use lectern_db::queries::courses;
use lectern_types::identity::Course;
use lectern_types::{CourseId, UserId};
use rusqlite::Connection;

use crate::{ForumError, Result};

/// Create a course together with its initial folders.
pub fn create_course(
    conn: &mut Connection,
    name: &str,
    term: &str,
    anonymous: bool,
    invitation_url: &str,
    folders: &[&str],
) -> Result<Course> {
    let course = Course {
        course_id: CourseId::new_v4(),
        name: name.to_string(),
        term: term.to_string(),
        anonymous,
        invitation_url: invitation_url.to_string(),
    };

    let tx = conn.transaction()?;
    courses::insert(&tx, &course)?;
    for folder in folders {
        courses::insert_folder(&tx, course.course_id, folder)?;
    }
    tx.commit()?;

    tracing::info!(course = %course.course_id, name, folders = folders.len(), "course created");
    Ok(course)
}

/// Add a folder to an existing course. Folder names are unique per course.
pub fn add_folder(conn: &Connection, course_id: CourseId, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ForumError::ConstraintViolation(
            "folder name must not be empty".into(),
        ));
    }
    courses::get(conn, course_id)?;
    courses::insert_folder(conn, course_id, name)?;
    Ok(())
}

/// Enroll a user in a course. Returns `false` if already a member.
pub fn enroll(conn: &Connection, user_id: UserId, course_id: CourseId) -> Result<bool> {
    let added = courses::enroll(conn, user_id, course_id)?;
    if added {
        tracing::debug!(user = %user_id, course = %course_id, "enrolled");
    }
    Ok(added)
}

/// Folder names of a course, alphabetically.
pub fn list_folders(conn: &Connection, course_id: CourseId) -> Result<Vec<String>> {
    courses::get(conn, course_id)?;
    Ok(courses::list_folders(conn, course_id)?)
}

/// Courses a user belongs to, in enrollment order.
pub fn courses_of(conn: &Connection, user_id: UserId) -> Result<Vec<Course>> {
    courses::memberships_of(conn, user_id)?
        .into_iter()
        .map(|id| courses::get(conn, id).map_err(ForumError::from))
        .collect()
}
