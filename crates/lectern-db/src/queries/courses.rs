//! Course, folder and membership queries.

use lectern_types::identity::Course;
use lectern_types::{CourseId, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::{not_found, Result};

/// Insert a course.
pub fn insert(conn: &Connection, course: &Course) -> Result<()> {
    conn.execute(
        "INSERT INTO courses (course_id, name, term, anonymous, invitation_url)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            course.course_id.0,
            course.name,
            course.term,
            course.anonymous,
            course.invitation_url,
        ],
    )?;
    Ok(())
}

/// Get a course by id.
pub fn get(conn: &Connection, course_id: CourseId) -> Result<Course> {
    conn.query_row(
        "SELECT course_id, name, term, anonymous, invitation_url FROM courses WHERE course_id = ?1",
        [course_id.0],
        |row| {
            Ok(Course {
                course_id: CourseId(row.get(0)?),
                name: row.get(1)?,
                term: row.get(2)?,
                anonymous: row.get(3)?,
                invitation_url: row.get(4)?,
            })
        },
    )
    .map_err(not_found(format!("course {course_id}")))
}

/// Create a folder in a course.
pub fn insert_folder(conn: &Connection, course_id: CourseId, name: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO folders (course_id, name) VALUES (?1, ?2)",
        rusqlite::params![course_id.0, name],
    )?;
    Ok(())
}

/// Whether `name` is a folder of the course. Names are scoped per course.
pub fn folder_exists(conn: &Connection, course_id: CourseId, name: &str) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM folders WHERE course_id = ?1 AND name = ?2",
            rusqlite::params![course_id.0, name],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// List the folder names of a course.
pub fn list_folders(conn: &Connection, course_id: CourseId) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM folders WHERE course_id = ?1 ORDER BY name")?;
    let rows = stmt
        .query_map([course_id.0], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Enroll a user in a course. Returns `false` if already enrolled.
pub fn enroll(conn: &Connection, user_id: UserId, course_id: CourseId) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO memberships (user_id, course_id) VALUES (?1, ?2)",
        rusqlite::params![user_id.0, course_id.0],
    )?;
    Ok(inserted > 0)
}

/// Courses a user belongs to, in enrollment order.
pub fn memberships_of(conn: &Connection, user_id: UserId) -> Result<Vec<CourseId>> {
    let mut stmt =
        conn.prepare("SELECT course_id FROM memberships WHERE user_id = ?1 ORDER BY seq")?;
    let rows = stmt
        .query_map([user_id.0], |row| Ok(CourseId(row.get(0)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Whether a user is a member of a course.
pub fn is_member(conn: &Connection, user_id: UserId, course_id: CourseId) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM memberships WHERE user_id = ?1 AND course_id = ?2",
            rusqlite::params![user_id.0, course_id.0],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::DbError;

    pub(crate) fn course(name: &str) -> Course {
        Course {
            course_id: CourseId::new_v4(),
            name: name.to_string(),
            term: "Spring".to_string(),
            anonymous: true,
            invitation_url: "https://forum.example/class/tdt4145".to_string(),
        }
    }

    fn test_db() -> Connection {
        crate::open_memory().expect("open test db")
    }

    #[test]
    fn test_insert_and_get() {
        let conn = test_db();
        let c = course("Databases");
        insert(&conn, &c).expect("insert");
        assert_eq!(get(&conn, c.course_id).expect("get"), c);
        assert!(matches!(get(&conn, CourseId::new_v4()), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_folder_names_scoped_per_course() {
        let conn = test_db();
        let a = course("A");
        let b = course("B");
        insert(&conn, &a).expect("insert a");
        insert(&conn, &b).expect("insert b");

        insert_folder(&conn, a.course_id, "Exam").expect("folder a");
        insert_folder(&conn, b.course_id, "Exam").expect("same name in b");
        assert!(insert_folder(&conn, a.course_id, "Exam")
            .expect_err("duplicate in a")
            .is_constraint());

        insert_folder(&conn, a.course_id, "Project").expect("folder");
        assert_eq!(list_folders(&conn, a.course_id).expect("list"), ["Exam", "Project"]);
        assert!(folder_exists(&conn, b.course_id, "Exam").expect("exists"));
        assert!(!folder_exists(&conn, b.course_id, "Project").expect("exists"));
    }

    #[test]
    fn test_enroll_is_idempotent_and_ordered() {
        let conn = test_db();
        let user = UserId::new_v4();
        crate::queries::identity::insert_user(&conn, user, "U", "u@uni.no").expect("user");
        let first = course("First");
        let second = course("Second");
        insert(&conn, &first).expect("insert");
        insert(&conn, &second).expect("insert");

        assert!(enroll(&conn, user, second.course_id).expect("enroll"));
        assert!(enroll(&conn, user, first.course_id).expect("enroll"));
        assert!(!enroll(&conn, user, first.course_id).expect("re-enroll"));

        assert_eq!(
            memberships_of(&conn, user).expect("memberships"),
            [second.course_id, first.course_id]
        );
        assert!(is_member(&conn, user, first.course_id).expect("member"));
    }
}
