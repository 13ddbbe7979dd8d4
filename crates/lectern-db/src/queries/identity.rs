//! User, role, post creator and credential queries.

use lectern_types::identity::{Role, User};
use lectern_types::{PostCreatorId, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::{not_found, DbError, Result};

/// Insert a user.
pub fn insert_user(conn: &Connection, user_id: UserId, name: &str, email: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO users (user_id, name, email) VALUES (?1, ?2, ?3)",
        rusqlite::params![user_id.0, name, email],
    )?;
    Ok(())
}

/// Insert a post creator tagged with the role it authors for.
pub fn insert_post_creator(conn: &Connection, pcid: PostCreatorId, kind: Role) -> Result<()> {
    conn.execute(
        "INSERT INTO post_creators (pcid, kind) VALUES (?1, ?2)",
        rusqlite::params![pcid.0, kind.as_str()],
    )?;
    Ok(())
}

/// Attach a role record to a user. The post creator must already exist with
/// the same kind.
pub fn insert_role(conn: &Connection, user_id: UserId, pcid: PostCreatorId, role: Role) -> Result<()> {
    let sql = match role {
        Role::Student => "INSERT INTO students (user_id, pcid) VALUES (?1, ?2)",
        Role::Instructor => "INSERT INTO instructors (user_id, pcid) VALUES (?1, ?2)",
    };
    conn.execute(sql, rusqlite::params![user_id.0, pcid.0])?;
    Ok(())
}

/// Store the password hash for an email.
pub fn insert_credential(conn: &Connection, email: &str, password_hash: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO credentials (email, password_hash) VALUES (?1, ?2)",
        rusqlite::params![email, password_hash],
    )?;
    Ok(())
}

/// Replace the password hash for an existing credential.
pub fn update_credential(conn: &Connection, email: &str, password_hash: &str) -> Result<()> {
    let changed = conn.execute(
        "UPDATE credentials SET password_hash = ?1 WHERE email = ?2",
        rusqlite::params![password_hash, email],
    )?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("credential for {email}")));
    }
    Ok(())
}

/// Stored password hash for an email, `None` when the email has no credential.
pub fn password_hash(conn: &Connection, email: &str) -> Result<Option<String>> {
    let hash = conn
        .query_row(
            "SELECT password_hash FROM credentials WHERE email = ?1",
            [email],
            |row| row.get(0),
        )
        .optional()?;
    Ok(hash)
}

/// Get a user by email.
pub fn get_by_email(conn: &Connection, email: &str) -> Result<User> {
    conn.query_row(
        "SELECT user_id, name, email FROM users WHERE email = ?1",
        [email],
        user_from_row,
    )
    .map_err(not_found(format!("user with email {email}")))
}

/// Get a user by id.
pub fn get_user(conn: &Connection, user_id: UserId) -> Result<User> {
    conn.query_row(
        "SELECT user_id, name, email FROM users WHERE user_id = ?1",
        [user_id.0],
        user_from_row,
    )
    .map_err(not_found(format!("user {user_id}")))
}

/// List all users in insertion order.
pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT user_id, name, email FROM users ORDER BY rowid")?;
    let rows = stmt
        .query_map([], user_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// The role record of a user, if any, with its post creator.
pub fn role_of(conn: &Connection, user_id: UserId) -> Result<Option<(Role, PostCreatorId)>> {
    let student = conn
        .query_row(
            "SELECT pcid FROM students WHERE user_id = ?1",
            [user_id.0],
            |row| row.get(0),
        )
        .optional()?;
    if let Some(pcid) = student {
        return Ok(Some((Role::Student, PostCreatorId(pcid))));
    }

    let instructor = conn
        .query_row(
            "SELECT pcid FROM instructors WHERE user_id = ?1",
            [user_id.0],
            |row| row.get(0),
        )
        .optional()?;
    Ok(instructor.map(|pcid| (Role::Instructor, PostCreatorId(pcid))))
}

/// The kind tag of a post creator.
pub fn creator_kind(conn: &Connection, pcid: PostCreatorId) -> Result<Role> {
    let kind: String = conn
        .query_row(
            "SELECT kind FROM post_creators WHERE pcid = ?1",
            [pcid.0],
            |row| row.get(0),
        )
        .map_err(not_found(format!("post creator {pcid}")))?;
    kind.parse()
        .map_err(|e: lectern_types::identity::UnknownRole| DbError::Serialization(e.to_string()))
}

/// Delete a user. Cascades to credential, role record, post creator, posts,
/// memberships, likes and views.
pub fn delete_user(conn: &Connection, user_id: UserId) -> Result<()> {
    let changed = conn.execute("DELETE FROM users WHERE user_id = ?1", [user_id.0])?;
    if changed == 0 {
        return Err(DbError::NotFound(format!("user {user_id}")));
    }
    Ok(())
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        user_id: UserId(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn test_db() -> Connection {
        crate::open_memory().expect("open test db")
    }

    /// Insert a user with a role record and credential; returns its ids.
    pub(crate) fn provision(
        conn: &Connection,
        name: &str,
        email: &str,
        role: Role,
    ) -> (UserId, PostCreatorId) {
        let user_id = UserId::new_v4();
        let pcid = PostCreatorId::new_v4();
        insert_user(conn, user_id, name, email).expect("insert user");
        insert_post_creator(conn, pcid, role).expect("insert creator");
        insert_role(conn, user_id, pcid, role).expect("insert role");
        insert_credential(conn, email, "hash").expect("insert credential");
        (user_id, pcid)
    }

    #[test]
    fn test_insert_and_get_user() {
        let conn = test_db();
        let (user_id, _) = provision(&conn, "Alice", "alice@uni.no", Role::Student);

        let user = get_by_email(&conn, "alice@uni.no").expect("get");
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.name, "Alice");
        assert_eq!(get_user(&conn, user_id).expect("get by id"), user);
    }

    #[test]
    fn test_unknown_email() {
        let conn = test_db();
        let result = get_by_email(&conn, "nobody@uni.no");
        assert!(matches!(result, Err(DbError::NotFound(_))));
        assert_eq!(password_hash(&conn, "nobody@uni.no").expect("query"), None);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let conn = test_db();
        insert_user(&conn, UserId::new_v4(), "A", "dup@uni.no").expect("first");
        let err = insert_user(&conn, UserId::new_v4(), "B", "dup@uni.no").expect_err("dup");
        assert!(err.is_constraint());
    }

    #[test]
    fn test_role_of() {
        let conn = test_db();
        let (student, spcid) = provision(&conn, "S", "s@uni.no", Role::Student);
        let (instructor, ipcid) = provision(&conn, "I", "i@uni.no", Role::Instructor);
        let bare = UserId::new_v4();
        insert_user(&conn, bare, "N", "n@uni.no").expect("insert");

        assert_eq!(role_of(&conn, student).expect("role"), Some((Role::Student, spcid)));
        assert_eq!(role_of(&conn, instructor).expect("role"), Some((Role::Instructor, ipcid)));
        assert_eq!(role_of(&conn, bare).expect("role"), None);
        assert_eq!(creator_kind(&conn, ipcid).expect("kind"), Role::Instructor);
    }

    #[test]
    fn test_creator_cannot_back_both_roles() {
        let conn = test_db();
        let (_, pcid) = provision(&conn, "S", "s@uni.no", Role::Student);
        let other = UserId::new_v4();
        insert_user(&conn, other, "T", "t@uni.no").expect("insert");

        let err = insert_role(&conn, other, pcid, Role::Instructor).expect_err("kind mismatch");
        assert!(err.is_constraint());
    }

    #[test]
    fn test_user_holds_one_role() {
        let conn = test_db();
        let (user_id, _) = provision(&conn, "S", "s@uni.no", Role::Student);
        let pcid = PostCreatorId::new_v4();
        insert_post_creator(&conn, pcid, Role::Instructor).expect("creator");

        let err = insert_role(&conn, user_id, pcid, Role::Instructor).expect_err("second role");
        assert!(err.is_constraint());
    }

    #[test]
    fn test_delete_user_cascades_identity() {
        let conn = test_db();
        let (user_id, pcid) = provision(&conn, "S", "s@uni.no", Role::Student);

        delete_user(&conn, user_id).expect("delete");

        assert_eq!(password_hash(&conn, "s@uni.no").expect("query"), None);
        assert_eq!(role_of(&conn, user_id).expect("role"), None);
        assert!(matches!(creator_kind(&conn, pcid), Err(DbError::NotFound(_))));
        assert!(matches!(delete_user(&conn, user_id), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_update_credential() {
        let conn = test_db();
        provision(&conn, "S", "s@uni.no", Role::Student);
        update_credential(&conn, "s@uni.no", "new").expect("update");
        assert_eq!(password_hash(&conn, "s@uni.no").expect("query").as_deref(), Some("new"));
        assert!(matches!(
            update_credential(&conn, "x@uni.no", "new"),
            Err(DbError::NotFound(_))
        ));
    }
}
