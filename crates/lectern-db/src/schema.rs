//! SQL schema definitions.

/// Complete schema for the Lectern v1 database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Identity
-- ============================================================

CREATE TABLE IF NOT EXISTS users (
    user_id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS credentials (
    email TEXT PRIMARY KEY REFERENCES users(email) ON UPDATE CASCADE ON DELETE CASCADE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS post_creators (
    pcid BLOB PRIMARY KEY,
    kind TEXT NOT NULL CHECK (kind IN ('student', 'instructor')),
    UNIQUE (pcid, kind)
);

-- The fixed `kind` column pins each role table to creators of its own kind,
-- so no post creator can back both a student and an instructor.
CREATE TABLE IF NOT EXISTS students (
    user_id BLOB PRIMARY KEY REFERENCES users(user_id) ON DELETE CASCADE,
    pcid BLOB NOT NULL UNIQUE,
    kind TEXT NOT NULL DEFAULT 'student' CHECK (kind = 'student'),
    FOREIGN KEY (pcid, kind) REFERENCES post_creators(pcid, kind) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS instructors (
    user_id BLOB PRIMARY KEY REFERENCES users(user_id) ON DELETE CASCADE,
    pcid BLOB NOT NULL UNIQUE,
    kind TEXT NOT NULL DEFAULT 'instructor' CHECK (kind = 'instructor'),
    FOREIGN KEY (pcid, kind) REFERENCES post_creators(pcid, kind) ON DELETE CASCADE
);

CREATE TRIGGER IF NOT EXISTS students_single_role BEFORE INSERT ON students
WHEN EXISTS (SELECT 1 FROM instructors WHERE user_id = NEW.user_id)
BEGIN
    SELECT RAISE(ABORT, 'user already holds an instructor role');
END;

CREATE TRIGGER IF NOT EXISTS instructors_single_role BEFORE INSERT ON instructors
WHEN EXISTS (SELECT 1 FROM students WHERE user_id = NEW.user_id)
BEGIN
    SELECT RAISE(ABORT, 'user already holds a student role');
END;

CREATE TRIGGER IF NOT EXISTS students_release_creator AFTER DELETE ON students
BEGIN
    DELETE FROM post_creators WHERE pcid = OLD.pcid;
END;

CREATE TRIGGER IF NOT EXISTS instructors_release_creator AFTER DELETE ON instructors
BEGIN
    DELETE FROM post_creators WHERE pcid = OLD.pcid;
END;

-- ============================================================
-- Forum structure
-- ============================================================

CREATE TABLE IF NOT EXISTS courses (
    course_id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    term TEXT NOT NULL,
    anonymous INTEGER NOT NULL DEFAULT 0,
    invitation_url TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS folders (
    course_id BLOB NOT NULL REFERENCES courses(course_id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    PRIMARY KEY (course_id, name)
);

CREATE TABLE IF NOT EXISTS memberships (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id BLOB NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    course_id BLOB NOT NULL REFERENCES courses(course_id) ON DELETE CASCADE,
    UNIQUE (user_id, course_id)
);

CREATE INDEX IF NOT EXISTS idx_memberships_course ON memberships(course_id);

-- ============================================================
-- Post graph
-- ============================================================

-- A root post owns itself; a reply owns the thread it was filed under.
CREATE TABLE IF NOT EXISTS posts (
    post_id BLOB PRIMARY KEY,
    content TEXT NOT NULL,
    pcid BLOB NOT NULL REFERENCES post_creators(pcid) ON DELETE CASCADE,
    kind TEXT NOT NULL CHECK (kind IN ('thread', 'reply')),
    thread_id BLOB NOT NULL
        REFERENCES threads(thread_id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    UNIQUE (post_id, kind),
    CHECK ((kind = 'thread') = (thread_id = post_id))
);

CREATE INDEX IF NOT EXISTS idx_posts_creator ON posts(pcid);
CREATE INDEX IF NOT EXISTS idx_posts_thread ON posts(thread_id);

CREATE TABLE IF NOT EXISTS threads (
    thread_id BLOB PRIMARY KEY,
    kind TEXT NOT NULL DEFAULT 'thread' CHECK (kind = 'thread'),
    student_reply_id BLOB REFERENCES posts(post_id) ON DELETE SET NULL,
    instructor_reply_id BLOB REFERENCES posts(post_id) ON DELETE SET NULL,
    color INTEGER GENERATED ALWAYS AS (
        2 * (student_reply_id IS NOT NULL) + (instructor_reply_id IS NOT NULL)
    ) STORED,
    FOREIGN KEY (thread_id, kind) REFERENCES posts(post_id, kind) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS tags (
    thread_id BLOB NOT NULL REFERENCES threads(thread_id) ON DELETE CASCADE,
    tag TEXT NOT NULL,
    PRIMARY KEY (thread_id, tag)
);

CREATE TABLE IF NOT EXISTS thread_folders (
    thread_id BLOB NOT NULL REFERENCES threads(thread_id) ON DELETE CASCADE,
    course_id BLOB NOT NULL,
    folder_name TEXT NOT NULL,
    PRIMARY KEY (thread_id, course_id, folder_name),
    FOREIGN KEY (course_id, folder_name) REFERENCES folders(course_id, name)
        ON UPDATE CASCADE ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_thread_folders_folder ON thread_folders(course_id, folder_name);

-- ============================================================
-- Reactions
-- ============================================================

CREATE TABLE IF NOT EXISTS likes (
    user_id BLOB NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    post_id BLOB NOT NULL REFERENCES posts(post_id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, post_id)
);

CREATE INDEX IF NOT EXISTS idx_likes_post ON likes(post_id);

CREATE TABLE IF NOT EXISTS views (
    user_id BLOB NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    thread_id BLOB NOT NULL REFERENCES threads(thread_id) ON DELETE CASCADE,
    PRIMARY KEY (user_id, thread_id)
);

CREATE INDEX IF NOT EXISTS idx_views_thread ON views(thread_id);
"#;
