//! Subcommand handlers.
//!
//! Handlers write to any `io::Write` so they can be driven from tests.

pub mod admin;
pub mod query;
pub mod shell;

use std::collections::BTreeSet;
use std::io::{self, Write};

use lectern_types::stats::UserEngagement;
use lectern_types::PostId;

/// Plain-text table with a header row and boxed borders.
struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn write(&self, out: &mut impl Write) -> io::Result<()> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let border: String = widths
            .iter()
            .map(|w| format!("+{}", "-".repeat(w + 2)))
            .chain(std::iter::once("+".to_string()))
            .collect();
        let line = |cells: &[String]| -> String {
            let mut s = String::new();
            for (cell, &width) in cells.iter().zip(&widths) {
                s.push_str(&format!("| {cell:<width$} "));
            }
            s.push('|');
            s
        };

        writeln!(out, "{border}")?;
        writeln!(out, "{}", line(&self.header))?;
        writeln!(out, "{border}")?;
        for row in &self.rows {
            writeln!(out, "{}", line(row))?;
        }
        writeln!(out, "{border}")
    }
}

pub(crate) fn write_post_ids(out: &mut impl Write, ids: &BTreeSet<PostId>) -> io::Result<()> {
    let mut table = Table::new(&["PostID"]);
    for id in ids {
        table.push(vec![id.to_string()]);
    }
    table.write(out)
}

pub(crate) fn write_statistics(out: &mut impl Write, rows: &[UserEngagement]) -> io::Result<()> {
    let mut table = Table::new(&["UserName", "ThreadsViewed", "PostsCreated"]);
    for row in rows {
        table.push(vec![
            row.user_name.clone(),
            row.threads_viewed.to_string(),
            row.posts_created.to_string(),
        ]);
    }
    table.write(out)
}
