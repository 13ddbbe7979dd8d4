//! `init` and `seed`.

use std::io::Write;
use std::path::Path;

use lectern_forum::credentials::PasswordCost;
use lectern_forum::seed::{self, SeedPlan};
use rusqlite::Connection;

/// The database is opened and migrated before any command runs; this only
/// reports where it lives.
pub fn init(out: &mut impl Write, db_path: &Path) -> anyhow::Result<()> {
    writeln!(
        out,
        "Database ready at {} (schema v{})",
        db_path.display(),
        lectern_db::SCHEMA_VERSION
    )?;
    Ok(())
}

/// Generate demo data and print the logins.
pub fn seed(
    out: &mut impl Write,
    conn: &mut Connection,
    plan: &SeedPlan,
    cost: &PasswordCost,
    json: bool,
) -> anyhow::Result<()> {
    let report = seed::generate(conn, plan, cost)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(out, "Seeded course {} ({})", report.course.name, report.course.course_id)?;
    writeln!(
        out,
        "  {} accounts, {} threads, {} replies, {} likes, {} views",
        report.accounts.len(),
        report.threads.len(),
        report.replies,
        report.likes,
        report.views
    )?;
    writeln!(out)?;
    writeln!(out, "Demo logins:")?;
    for account in &report.accounts {
        writeln!(
            out,
            "  {:<10} {:<40} {}",
            account.role.to_string(),
            account.email,
            account.password
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHEAP: PasswordCost = PasswordCost {
        memory_kib: 64,
        iterations: 1,
        parallelism: 1,
    };

    fn plan() -> SeedPlan {
        SeedPlan {
            seed: 9,
            students: 2,
            instructors: 1,
            threads: 2,
            replies: 2,
            likes: 3,
            views: 3,
        }
    }

    #[test]
    fn test_init_reports_path() {
        let mut out = Vec::new();
        init(&mut out, Path::new("/tmp/lectern.db")).expect("init");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("/tmp/lectern.db"));
        assert!(text.contains("schema v1"));
    }

    #[test]
    fn test_seed_prints_logins() {
        let mut conn = lectern_db::open_memory().expect("open");
        let mut out = Vec::new();
        seed(&mut out, &mut conn, &plan(), &CHEAP, false).expect("seed");

        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("3 accounts, 2 threads, 2 replies"));
        assert_eq!(text.matches("@stud.lectern.test").count(), 2);
        assert!(text.contains("Instructor"));
    }

    #[test]
    fn test_seed_json() {
        let mut conn = lectern_db::open_memory().expect("open");
        let mut out = Vec::new();
        seed(&mut out, &mut conn, &plan(), &CHEAP, true).expect("seed");

        let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(value["accounts"].as_array().map(Vec::len), Some(3));
        assert_eq!(value["replies"], 2);
    }
}
