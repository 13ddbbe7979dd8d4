//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use lectern_forum::auth::{self, NewAccount};
use lectern_forum::credentials::PasswordCost;
use lectern_forum::structure;
use lectern_types::identity::{Course, Role, Session};
use rusqlite::Connection;

/// Argon2 parameters small enough for debug builds.
pub const CHEAP: PasswordCost = PasswordCost {
    memory_kib: 64,
    iterations: 1,
    parallelism: 1,
};

pub const PASSWORD: &str = "correct horse battery staple";

pub fn course(conn: &mut Connection) -> Course {
    structure::create_course(
        conn,
        "Datamodellering og Databaser",
        "Spring",
        true,
        "https://forum.example/class/tdt4145",
        &["Project", "Exam", "Ov1", "Logistics"],
    )
    .expect("create course")
}

/// Provision an account, enroll it and log it in.
pub fn member(conn: &mut Connection, course: &Course, name: &str, email: &str, role: Role) -> Session {
    let account = auth::provision_account(
        conn,
        &NewAccount {
            name: name.to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            role,
        },
        &CHEAP,
    )
    .expect("provision");
    structure::enroll(conn, account.user_id, course.course_id).expect("enroll");
    auth::login(conn, email, PASSWORD, role, None).expect("login")
}

pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count rows")
}
