//! Interactive menu session.
//!
//! Top level: log in as student or instructor, or quit. After login a
//! student can post and search; an instructor can also view statistics.
//! Recoverable forum errors are printed and the user is asked again.

use std::io::{BufRead, Write};

use lectern_forum::{auth, authoring, search, stats, ForumError};
use lectern_types::identity::{Role, Session};
use lectern_types::PostId;
use rusqlite::Connection;

use super::{write_post_ids, write_statistics};

const LOGIN_MENU: &str = "\nYou have three options:\n\
    - Login as Student    [1]\n\
    - Login as Instructor [2]\n\
    - Quit                [q]";

const STUDENT_MENU: &str = "\nYou have three options:\n\
    - Make a post            [1]\n\
    - Search for a keyword   [2]\n\
    - Log out                [q]";

const INSTRUCTOR_MENU: &str = "\nYou have four options:\n\
    - Make a post            [1]\n\
    - Search for a keyword   [2]\n\
    - View statistics        [3]\n\
    - Log out                [q]";

const POST_MENU: &str = "\nYou have three options:\n\
    - Create a thread       [1]\n\
    - Create a reply        [2]\n\
    - Go back               [q]";

/// Input ran out before the user quit.
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
struct EndOfInput;

pub struct Shell<'c, R, W> {
    conn: &'c mut Connection,
    input: R,
    output: W,
    max_keyword_len: usize,
}

impl<'c, R: BufRead, W: Write> Shell<'c, R, W> {
    pub fn new(conn: &'c mut Connection, input: R, output: W, max_keyword_len: usize) -> Self {
        Self {
            conn,
            input,
            output,
            max_keyword_len,
        }
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        match self.login_menu() {
            Err(e) if e.is::<EndOfInput>() => {
                tracing::debug!("input closed, leaving shell");
                Ok(())
            }
            other => other,
        }
    }

    fn login_menu(&mut self) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "{LOGIN_MENU}")?;
            let role = match self.prompt("Please enter your option: ")?.as_str() {
                "1" => Role::Student,
                "2" => Role::Instructor,
                q if q.eq_ignore_ascii_case("q") => {
                    writeln!(self.output, "\nBye!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Wrong option, try again")?;
                    continue;
                }
            };
            let session = self.login(role)?;
            self.action_menu(&session)?;
        }
    }

    /// Ask for email, then password, until both pass and the role matches.
    fn login(&mut self, role: Role) -> anyhow::Result<Session> {
        loop {
            let email = self.prompt("\nPlease enter email: ")?;
            match auth::check_email(self.conn, &email) {
                Ok(()) => {}
                Err(ForumError::NotFound(_)) => {
                    writeln!(self.output, "Email not in database")?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }
            let password = self.prompt("Please enter password: ")?;
            let attempt = auth::login(self.conn, &email, &password, role, None);
            if let Some(session) = self.recover(attempt)? {
                writeln!(self.output, "Logged in as {role}")?;
                return Ok(session);
            }
        }
    }

    fn action_menu(&mut self, session: &Session) -> anyhow::Result<()> {
        let menu = match session.role {
            Role::Student => STUDENT_MENU,
            Role::Instructor => INSTRUCTOR_MENU,
        };
        loop {
            writeln!(self.output, "{menu}")?;
            match self.prompt("Please enter your option: ")?.as_str() {
                "1" => self.post_menu(session)?,
                "2" => self.search_keyword()?,
                "3" if session.role.can_view_statistics() => self.view_statistics(session)?,
                q if q.eq_ignore_ascii_case("q") => return Ok(()),
                _ => writeln!(self.output, "Wrong option, try again")?,
            }
        }
    }

    fn post_menu(&mut self, session: &Session) -> anyhow::Result<()> {
        loop {
            writeln!(self.output, "{POST_MENU}")?;
            match self.prompt("Please enter your option: ")?.as_str() {
                "1" => self.create_thread(session)?,
                "2" => self.create_reply(session)?,
                q if q.eq_ignore_ascii_case("q") => return Ok(()),
                _ => writeln!(self.output, "Wrong option, try again")?,
            }
        }
    }

    fn create_thread(&mut self, session: &Session) -> anyhow::Result<()> {
        let content = self.prompt("Please enter your post content: ")?;
        let folder = self.prompt("Please enter your post folder: ")?;
        let tag = self.prompt("Please enter your post tag: ")?;

        let created = authoring::create_thread(
            self.conn,
            session.post_creator_id,
            session.course_id,
            &content,
            &folder,
            &tag,
        );
        if let Some(thread) = self.recover(created)? {
            writeln!(self.output, "\nPostID of created post: {}", thread.root_post())?;
        }
        Ok(())
    }

    /// Re-asks until the target id names an existing post.
    fn create_reply(&mut self, session: &Session) -> anyhow::Result<()> {
        loop {
            let target = self.prompt("Please enter id of post to reply to: ")?;
            let content = self.prompt("Please enter your post content: ")?;

            let created = target
                .parse::<PostId>()
                .map_err(ForumError::from)
                .and_then(|target| {
                    authoring::create_reply(self.conn, session.post_creator_id, target, &content)
                });
            match created {
                Ok(reply) => {
                    writeln!(self.output, "\nPostID of created post: {}", reply.post_id)?;
                    return Ok(());
                }
                Err(ForumError::NotFound(_) | ForumError::InvalidId(_)) => {
                    writeln!(self.output, "Wrong post id")?;
                }
                Err(e) => {
                    self.recover::<()>(Err(e))?;
                    return Ok(());
                }
            }
        }
    }

    fn search_keyword(&mut self) -> anyhow::Result<()> {
        let keyword = self.prompt("Please enter keyword: ")?;
        if keyword.chars().count() > self.max_keyword_len {
            writeln!(
                self.output,
                "Keyword too long, at most {} characters",
                self.max_keyword_len
            )?;
            return Ok(());
        }
        if let Some(ids) = self.recover(search::search(self.conn, &keyword))? {
            writeln!(self.output, "Here are your search results:")?;
            write_post_ids(&mut self.output, &ids)?;
        }
        Ok(())
    }

    fn view_statistics(&mut self, session: &Session) -> anyhow::Result<()> {
        if let Some(rows) = self.recover(stats::statistics(self.conn, session))? {
            write_statistics(&mut self.output, &rows)?;
        }
        Ok(())
    }

    /// Print a recoverable error and yield `None`; fail on anything else.
    fn recover<T>(&mut self, result: lectern_forum::Result<T>) -> anyhow::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_recoverable() => {
                writeln!(self.output, "{}", describe(&e))?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn prompt(&mut self, text: &str) -> anyhow::Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }
}

fn describe(e: &ForumError) -> String {
    match e {
        ForumError::AuthenticationFailed => "Incorrect password".to_string(),
        ForumError::RoleMismatch {
            expected: Role::Student,
            ..
        } => "You are not a Student!".to_string(),
        ForumError::RoleMismatch {
            expected: Role::Instructor,
            ..
        } => "You are not an Instructor!".to_string(),
        other => other.to_string(),
    }
}
