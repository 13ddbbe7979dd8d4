//! lectern: command-line front end of the Lectern course forum.
//!
//! ```bash
//! lectern init
//! lectern seed --seed 6
//! lectern search homework
//! lectern stats --email kari@uni.no --password secret --json
//! lectern shell
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::LecternConfig;

/// Lectern - course Q&A forum on SQLite
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Database file. Overrides the configured path.
    #[arg(short = 'D', long, global = true)]
    database: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or migrate the database
    Init,

    /// Fill the database with demo data and print the demo logins
    Seed {
        /// RNG seed. Defaults to the configured seed.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print ids of posts matching a keyword
    Search {
        keyword: String,
    },

    /// Engagement statistics (instructors only)
    Stats {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Interactive session
    Shell,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = LecternConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("lectern={}", config.logging.level).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let db_path = cli.database.clone().unwrap_or_else(|| config.database_path());
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut conn = lectern_db::open(&db_path)?;
    info!(path = %db_path.display(), "database opened");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Init => commands::admin::init(&mut out, &db_path),
        Commands::Seed { seed } => {
            let mut plan = config.seed.clone();
            if let Some(seed) = seed {
                plan.seed = seed;
            }
            commands::admin::seed(&mut out, &mut conn, &plan, &config.password_cost(), cli.json)
        }
        Commands::Search { keyword } => commands::query::search(
            &mut out,
            &conn,
            &keyword,
            config.search.max_keyword_len,
            cli.json,
        ),
        Commands::Stats { email, password } => {
            commands::query::stats(&mut out, &conn, &email, &password, cli.json)
        }
        Commands::Shell => {
            let stdin = std::io::stdin();
            commands::shell::Shell::new(
                &mut conn,
                stdin.lock(),
                &mut out,
                config.search.max_keyword_len,
            )
            .run()
        }
    }
}
