//! Keyword search over posts, tags, folders and author names.
//!
//! Every axis is a case-insensitive substring match (`LIKE '%keyword%'`).
//! Both sides go through `casefold`, so letters outside ASCII fold too.
//! Wildcards typed by the user are matched literally.

use std::collections::BTreeSet;

use lectern_types::search::SearchHits;
use lectern_types::PostId;
use rusqlite::Connection;

use crate::Result;

const BY_CONTENT: &str = r"
    SELECT post_id FROM posts
    WHERE casefold(content) LIKE casefold(?1) ESCAPE '\'";

const BY_TAG: &str = r"
    SELECT DISTINCT thread_id FROM tags
    WHERE casefold(tag) LIKE casefold(?1) ESCAPE '\'";

const BY_FOLDER: &str = r"
    SELECT DISTINCT tf.thread_id
    FROM thread_folders tf
    JOIN folders f ON f.course_id = tf.course_id AND f.name = tf.folder_name
    WHERE casefold(f.name) LIKE casefold(?1) ESCAPE '\'";

const BY_AUTHOR: &str = r"
    SELECT p.post_id
    FROM posts p
    JOIN (
        SELECT s.pcid FROM students s
        JOIN users u ON u.user_id = s.user_id
        WHERE casefold(u.name) LIKE casefold(?1) ESCAPE '\'
        UNION
        SELECT i.pcid FROM instructors i
        JOIN users u ON u.user_id = i.user_id
        WHERE casefold(u.name) LIKE casefold(?1) ESCAPE '\'
    ) c ON c.pcid = p.pcid";

/// Build a `%keyword%` pattern with `\`, `%` and `_` escaped.
pub fn like_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Matches for `keyword` along each axis. A blank keyword matches nothing;
/// any other keyword is matched as given, surrounding spaces included.
pub fn hits(conn: &Connection, keyword: &str) -> Result<SearchHits> {
    if keyword.trim().is_empty() {
        return Ok(SearchHits::default());
    }
    let pattern = like_pattern(keyword);

    let hits = SearchHits {
        content: collect_ids(conn, BY_CONTENT, &pattern)?,
        tags: collect_ids(conn, BY_TAG, &pattern)?,
        folders: collect_ids(conn, BY_FOLDER, &pattern)?,
        authors: collect_ids(conn, BY_AUTHOR, &pattern)?,
    };
    tracing::debug!(
        keyword,
        content = hits.content.len(),
        tags = hits.tags.len(),
        folders = hits.folders.len(),
        authors = hits.authors.len(),
        "search axes resolved"
    );
    Ok(hits)
}

/// Deduplicated union of all axes.
pub fn matching_posts(conn: &Connection, keyword: &str) -> Result<BTreeSet<PostId>> {
    Ok(hits(conn, keyword)?.union())
}

fn collect_ids(conn: &Connection, sql: &str, pattern: &str) -> Result<BTreeSet<PostId>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let ids = stmt
        .query_map([pattern], |row| Ok(PostId(row.get(0)?)))?
        .collect::<std::result::Result<BTreeSet<_>, _>>()?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::identity::tests::provision;
    use crate::queries::threads::{self, tests::new_thread};
    use crate::queries::{courses, posts};
    use lectern_types::identity::Role;
    use lectern_types::post::PostKind;
    use lectern_types::{PostCreatorId, ThreadId};

    struct Fixture {
        conn: Connection,
        student: PostCreatorId,
        instructor: PostCreatorId,
        course: lectern_types::CourseId,
    }

    fn fixture() -> Fixture {
        let conn = crate::open_memory().expect("open");
        let (_, student) = provision(&conn, "Ola Nordmann", "ola@uni.no", Role::Student);
        let (_, instructor) = provision(&conn, "Kari Lecturer", "kari@uni.no", Role::Instructor);
        let course = courses::tests::course("Databases");
        courses::insert(&conn, &course).expect("course");
        for folder in ["Project", "Exam", "Ov1"] {
            courses::insert_folder(&conn, course.course_id, folder).expect("folder");
        }
        Fixture {
            conn,
            student,
            instructor,
            course: course.course_id,
        }
    }

    fn reply(conn: &Connection, pcid: PostCreatorId, thread: ThreadId, content: &str) -> PostId {
        let id = PostId::new_v4();
        posts::insert(conn, id, content, pcid, PostKind::Reply, thread).expect("reply");
        id
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_empty_keyword_matches_nothing() {
        let mut f = fixture();
        new_thread(&mut f.conn, f.student, "anything at all");
        assert!(hits(&f.conn, "").expect("search").is_empty());
        assert!(matching_posts(&f.conn, "   ").expect("search").is_empty());
    }

    #[test]
    fn test_content_axis_is_case_insensitive() {
        let mut f = fixture();
        let thread = new_thread(&mut f.conn, f.student, "What is WAL mode?");
        let r = reply(&f.conn, f.instructor, thread, "write-ahead logging");

        let found = matching_posts(&f.conn, "wal").expect("search");
        assert_eq!(found, BTreeSet::from([thread.root_post()]));
        let found = matching_posts(&f.conn, "LOGGING").expect("search");
        assert_eq!(found, BTreeSet::from([r]));
    }

    #[test]
    fn test_tag_and_folder_axes_return_roots() {
        let mut f = fixture();
        let thread = new_thread(&mut f.conn, f.student, "q");
        reply(&f.conn, f.instructor, thread, "a");
        threads::add_tag(&f.conn, thread, "Homework").expect("tag");
        threads::place_in_folder(&f.conn, thread, f.course, "Project").expect("place");
        threads::place_in_folder(&f.conn, thread, f.course, "Exam").expect("place");

        let h = hits(&f.conn, "homework").expect("search");
        assert_eq!(h.tags, BTreeSet::from([thread.root_post()]));
        assert!(h.folders.is_empty());

        // Matches both Project and Exam placements but counts once.
        let h = hits(&f.conn, "e").expect("search");
        assert_eq!(h.folders, BTreeSet::from([thread.root_post()]));
    }

    #[test]
    fn test_author_axis_covers_both_roles() {
        let mut f = fixture();
        let thread = new_thread(&mut f.conn, f.student, "q");
        let r = reply(&f.conn, f.instructor, thread, "a");

        assert_eq!(
            matching_posts(&f.conn, "nordmann").expect("search"),
            BTreeSet::from([thread.root_post()])
        );
        assert_eq!(
            matching_posts(&f.conn, "lecturer").expect("search"),
            BTreeSet::from([r])
        );
        assert_eq!(
            matching_posts(&f.conn, "kARI lECTURER").expect("search"),
            BTreeSet::from([r])
        );
    }

    #[test]
    fn test_case_folding_beyond_ascii() {
        let mut f = fixture();
        let (_, author) = provision(&f.conn, "Øystein Ås", "oystein@uni.no", Role::Student);
        courses::insert_folder(&f.conn, f.course, "Øvinger").expect("folder");
        let thread = new_thread(&mut f.conn, author, "Spørsmål om ØVING");
        threads::add_tag(&f.conn, thread, "Øving").expect("tag");
        threads::place_in_folder(&f.conn, thread, f.course, "Øvinger").expect("place");
        let root = BTreeSet::from([thread.root_post()]);

        let h = hits(&f.conn, "øving").expect("search");
        assert_eq!(h.content, root);
        assert_eq!(h.tags, root);
        assert_eq!(h.folders, root);
        assert!(h.authors.is_empty());

        let h = hits(&f.conn, "ØYSTEIN ås").expect("search");
        assert_eq!(h.authors, root);
        assert_eq!(matching_posts(&f.conn, "SPØRSMÅL").expect("search"), root);
    }

    #[test]
    fn test_keyword_is_not_trimmed() {
        let mut f = fixture();
        let spaced = new_thread(&mut f.conn, f.student, "Hi Ola");
        new_thread(&mut f.conn, f.student, "Ola here");

        assert_eq!(
            matching_posts(&f.conn, " ola").expect("search"),
            BTreeSet::from([spaced.root_post()])
        );
    }

    #[test]
    fn test_union_counts_post_once() {
        let mut f = fixture();
        let thread = new_thread(&mut f.conn, f.student, "Ola asks about Ola");
        threads::add_tag(&f.conn, thread, "Ola-tag").expect("tag");

        let h = hits(&f.conn, "ola").expect("search");
        assert!(h.content.contains(&thread.root_post()));
        assert!(h.tags.contains(&thread.root_post()));
        assert!(h.authors.contains(&thread.root_post()));
        assert_eq!(h.union().len(), 1);
    }

    #[test]
    fn test_wildcards_are_literal() {
        let mut f = fixture();
        let plain = new_thread(&mut f.conn, f.student, "plain text");
        let percent = new_thread(&mut f.conn, f.student, "100% sure");

        assert_eq!(
            matching_posts(&f.conn, "%").expect("search"),
            BTreeSet::from([percent.root_post()])
        );
        assert!(!matching_posts(&f.conn, "_")
            .expect("search")
            .contains(&plain.root_post()));
    }

    #[test]
    fn test_no_match() {
        let mut f = fixture();
        new_thread(&mut f.conn, f.student, "q");
        assert!(matching_posts(&f.conn, "zzz-nothing").expect("search").is_empty());
    }
}
