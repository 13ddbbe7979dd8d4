//! Keyword search across content, tags, folders and authors.

use std::collections::BTreeSet;

use lectern_db::queries::search as axes;
use lectern_types::search::SearchHits;
use lectern_types::PostId;
use rusqlite::Connection;

use crate::Result;

/// Posts matching `keyword` on any axis, each once.
pub fn search(conn: &Connection, keyword: &str) -> Result<BTreeSet<PostId>> {
    let found = axes::matching_posts(conn, keyword)?;
    tracing::debug!(keyword, matches = found.len(), "search");
    Ok(found)
}

/// Per-axis matches for `keyword`.
pub fn search_hits(conn: &Connection, keyword: &str) -> Result<SearchHits> {
    Ok(axes::hits(conn, keyword)?)
}
