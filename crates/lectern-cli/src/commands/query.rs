//! `search` and `stats`.

use std::io::Write;

use lectern_forum::{auth, search as forum_search, stats as forum_stats};
use lectern_types::identity::Role;
use rusqlite::Connection;

use super::{write_post_ids, write_statistics};

/// Print the ids of posts matching `keyword`.
pub fn search(
    out: &mut impl Write,
    conn: &Connection,
    keyword: &str,
    max_keyword_len: usize,
    json: bool,
) -> anyhow::Result<()> {
    if keyword.chars().count() > max_keyword_len {
        anyhow::bail!("keyword longer than {max_keyword_len} characters");
    }
    let ids = forum_search::search(conn, keyword)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&ids)?)?;
    } else {
        write_post_ids(out, &ids)?;
    }
    Ok(())
}

/// Log in as an instructor and print engagement statistics.
pub fn stats(
    out: &mut impl Write,
    conn: &Connection,
    email: &str,
    password: &str,
    json: bool,
) -> anyhow::Result<()> {
    let session = auth::login(conn, email, password, Role::Instructor, None)?;
    let rows = forum_stats::statistics(conn, &session)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
    } else {
        write_statistics(out, &rows)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_forum::auth::NewAccount;
    use lectern_forum::credentials::PasswordCost;
    use lectern_forum::{authoring, structure, ForumError};
    use lectern_types::{PostId, ThreadId};

    const CHEAP: PasswordCost = PasswordCost {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };

    fn forum() -> (Connection, ThreadId) {
        let mut conn = lectern_db::open_memory().expect("open");
        let course = structure::create_course(&mut conn, "Databases", "Fall", true, "u", &["Exam"])
            .expect("course");
        let mut creators = Vec::new();
        for (name, email, role) in [
            ("Ola Nordmann", "ola@uni.no", Role::Student),
            ("Kari Lecturer", "kari@uni.no", Role::Instructor),
        ] {
            let account = auth::provision_account(
                &mut conn,
                &NewAccount {
                    name: name.into(),
                    email: email.into(),
                    password: "secret".into(),
                    role,
                },
                &CHEAP,
            )
            .expect("account");
            structure::enroll(&conn, account.user_id, course.course_id).expect("enroll");
            creators.push(account);
        }
        let thread = authoring::create_thread(
            &mut conn,
            creators[0].post_creator_id,
            course.course_id,
            "Is normalisation on the exam?",
            "Exam",
            "Question",
        )
        .expect("thread");
        authoring::view_thread(&conn, creators[0].user_id, thread).expect("view");
        (conn, thread)
    }

    #[test]
    fn test_search_json() {
        let (conn, thread) = forum();
        let mut out = Vec::new();
        search(&mut out, &conn, "exam", 50, true).expect("search");

        let ids: Vec<PostId> = serde_json::from_slice(&out).expect("json");
        assert_eq!(ids, [thread.root_post()]);
    }

    #[test]
    fn test_search_rejects_long_keyword() {
        let (conn, _) = forum();
        let mut out = Vec::new();
        assert!(search(&mut out, &conn, "abcdef", 5, false).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_stats_table() {
        let (conn, _) = forum();
        let mut out = Vec::new();
        stats(&mut out, &conn, "kari@uni.no", "secret", false).expect("stats");

        let text = String::from_utf8(out).expect("utf8");
        let ola = text.find("Ola Nordmann").expect("student row");
        let kari = text.find("Kari Lecturer").expect("instructor row");
        assert!(ola < kari);
    }

    #[test]
    fn test_stats_refuses_students() {
        let (conn, _) = forum();
        let mut out = Vec::new();
        let err = stats(&mut out, &conn, "ola@uni.no", "secret", true).expect_err("student");
        assert!(matches!(
            err.downcast_ref::<ForumError>(),
            Some(ForumError::RoleMismatch { .. })
        ));
    }
}
