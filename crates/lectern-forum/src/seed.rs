//! Seeded demo data.
//!
//! [`generate`] builds one course with the standard folders, enrolls a mix of
//! students and instructors, and fills the forum with threads, replies, likes
//! and views. All random choices come from a `StdRng` seeded by
//! [`SeedPlan::seed`], so the same plan yields the same forum shape.
//! Identifiers are still fresh UUIDs on every run.
//!
//! Content goes through the regular authoring operations, so seeded threads
//! obey the same color rules as hand-written ones.

use lectern_types::identity::{Course, Role};
use lectern_types::{PostCreatorId, PostId, ThreadId, UserId};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::auth::{self, NewAccount};
use crate::credentials::PasswordCost;
use crate::{authoring, structure, Result};

/// Folders every seeded course starts with.
pub const FOLDERS: [&str; 11] = [
    "Ov1",
    "Ov2",
    "Ov3",
    "Ov4",
    "Project",
    "Exam",
    "Logistics",
    "Other",
    "Midterm",
    "Forelesninger",
    "Treningsoppgaver",
];

/// Tags seeded threads draw from.
pub const TAGS: [&str; 6] = [
    "Question",
    "Announcement",
    "Homework",
    "Homework Solution",
    "Lecture Notes",
    "General Announcement",
];

const FIRST_NAMES: [&str; 12] = [
    "Ola", "Kari", "Ingrid", "Lars", "Sigrid", "Emil", "Nora", "Jonas", "Maja", "Henrik",
    "Astrid", "Magnus",
];

const LAST_NAMES: [&str; 10] = [
    "Nordmann", "Hansen", "Johansen", "Olsen", "Larsen", "Andersen", "Pedersen", "Nilsen",
    "Berg", "Haugen",
];

const TOPICS: [&str; 10] = [
    "BCNF decomposition",
    "the ER diagram",
    "functional dependencies",
    "SQL joins",
    "transaction isolation",
    "B+ tree indexes",
    "relational algebra",
    "the project delivery",
    "the exam syllabus",
    "two-phase locking",
];

const QUESTIONS: [&str; 5] = [
    "Can someone explain {}?",
    "I am stuck on {}, any hints?",
    "Is {} part of the curriculum?",
    "Where can I read more about {}?",
    "Question about {} in this week's exercise",
];

const ANSWERS: [&str; 5] = [
    "Have a look at the lecture notes on {}.",
    "The textbook chapter on {} covers this.",
    "I had the same problem with {}, try drawing it out.",
    "We will go through {} in the next lecture.",
    "Good question, {} is on the exam.",
];

const PASSWORD_LEN: usize = 11;

/// How much demo data to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedPlan {
    pub seed: u64,
    pub students: usize,
    pub instructors: usize,
    pub threads: usize,
    pub replies: usize,
    /// Like attempts; duplicates collapse.
    pub likes: usize,
    /// View attempts; duplicates collapse.
    pub views: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            seed: 6,
            students: 30,
            instructors: 5,
            threads: 40,
            replies: 80,
            likes: 300,
            views: 400,
        }
    }
}

/// Login details of a seeded account.
#[derive(Debug, Clone, Serialize)]
pub struct SeededAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub user_id: UserId,
    pub post_creator_id: PostCreatorId,
}

/// What [`generate`] wrote.
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub course: Course,
    pub accounts: Vec<SeededAccount>,
    pub threads: Vec<ThreadId>,
    pub replies: usize,
    /// Distinct likes written.
    pub likes: usize,
    /// Distinct views written.
    pub views: usize,
}

/// Populate the database according to `plan`.
pub fn generate(conn: &mut Connection, plan: &SeedPlan, cost: &PasswordCost) -> Result<SeedReport> {
    let mut rng = StdRng::seed_from_u64(plan.seed);
    tracing::info!(seed = plan.seed, "seeding demo data");

    let course = structure::create_course(
        conn,
        "Datamodellering og Databaser",
        "Fall",
        true,
        "https://forum.example/class/tdt4145",
        &FOLDERS,
    )?;

    let mut accounts = Vec::with_capacity(plan.students + plan.instructors);
    let roles = std::iter::repeat(Role::Student)
        .take(plan.students)
        .chain(std::iter::repeat(Role::Instructor).take(plan.instructors));
    for (n, role) in roles.enumerate() {
        let account = seed_account(conn, &mut rng, n, role, cost)?;
        structure::enroll(conn, account.user_id, course.course_id)?;
        accounts.push(account);
    }

    let mut report = SeedReport {
        course,
        accounts,
        threads: Vec::with_capacity(plan.threads),
        replies: 0,
        likes: 0,
        views: 0,
    };
    if report.accounts.is_empty() {
        tracing::warn!("no accounts to author content, skipping posts");
        return Ok(report);
    }

    let course_id = report.course.course_id;
    let mut posts: Vec<PostId> = Vec::with_capacity(plan.threads + plan.replies);

    for _ in 0..plan.threads {
        let Some(author) = report.accounts.choose(&mut rng) else {
            break;
        };
        let topic = pick(&mut rng, &TOPICS);
        let content = fill(pick(&mut rng, &QUESTIONS), topic);

        let tag_count = rng.gen_range(0..=3);
        let tags: Vec<&str> = TAGS.choose_multiple(&mut rng, tag_count).copied().collect();
        let folder_count = rng.gen_range(1..=3);
        let folders: Vec<&str> = FOLDERS
            .choose_multiple(&mut rng, folder_count)
            .copied()
            .collect();

        let thread = authoring::create_filed_thread(
            conn,
            author.post_creator_id,
            course_id,
            &content,
            &folders,
            &tags,
        )?;

        posts.push(thread.root_post());
        report.threads.push(thread);
    }

    for _ in 0..plan.replies {
        let (Some(target), Some(author)) = (
            posts.choose(&mut rng).copied(),
            report.accounts.choose(&mut rng),
        ) else {
            break;
        };
        let content = fill(pick(&mut rng, &ANSWERS), pick(&mut rng, &TOPICS));
        let reply = authoring::create_reply(conn, author.post_creator_id, target, &content)?;
        posts.push(reply.post_id);
        report.replies += 1;
    }

    for _ in 0..plan.likes {
        let (Some(user), Some(post)) = (
            report.accounts.choose(&mut rng).map(|a| a.user_id),
            posts.choose(&mut rng).copied(),
        ) else {
            break;
        };
        if authoring::like_post(conn, user, post)? {
            report.likes += 1;
        }
    }

    for _ in 0..plan.views {
        let (Some(user), Some(thread)) = (
            report.accounts.choose(&mut rng).map(|a| a.user_id),
            report.threads.choose(&mut rng).copied(),
        ) else {
            break;
        };
        if authoring::view_thread(conn, user, thread)? {
            report.views += 1;
        }
    }

    tracing::info!(
        accounts = report.accounts.len(),
        threads = report.threads.len(),
        replies = report.replies,
        likes = report.likes,
        views = report.views,
        "seeding complete"
    );
    Ok(report)
}

fn seed_account(
    conn: &mut Connection,
    rng: &mut StdRng,
    n: usize,
    role: Role,
    cost: &PasswordCost,
) -> Result<SeededAccount> {
    let first = pick(rng, &FIRST_NAMES);
    let last = pick(rng, &LAST_NAMES);
    let domain = match role {
        Role::Student => "stud.lectern.test",
        Role::Instructor => "lectern.test",
    };
    let name = format!("{first} {last}");
    let email = format!("{}.{}{n}@{domain}", first.to_lowercase(), last.to_lowercase());
    let password: String = rng
        .sample_iter(&Alphanumeric)
        .take(PASSWORD_LEN)
        .map(char::from)
        .collect();

    let account = auth::provision_account(
        conn,
        &NewAccount {
            name: name.clone(),
            email: email.clone(),
            password: password.clone(),
            role,
        },
        cost,
    )?;
    Ok(SeededAccount {
        name,
        email,
        password,
        role,
        user_id: account.user_id,
        post_creator_id: account.post_creator_id,
    })
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn fill(template: &str, topic: &str) -> String {
    template.replacen("{}", topic, 1)
}
