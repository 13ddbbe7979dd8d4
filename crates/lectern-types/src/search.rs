//! Keyword search results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::PostId;

/// Per-axis matches for one keyword.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHits {
    /// Posts whose content contains the keyword.
    pub content: BTreeSet<PostId>,
    /// Root posts of threads carrying a matching tag.
    pub tags: BTreeSet<PostId>,
    /// Root posts of threads placed in a matching folder.
    pub folders: BTreeSet<PostId>,
    /// Posts written by a user whose name matches.
    pub authors: BTreeSet<PostId>,
}

impl SearchHits {
    /// Union of all four axes, each post once.
    pub fn union(&self) -> BTreeSet<PostId> {
        self.content
            .iter()
            .chain(&self.tags)
            .chain(&self.folders)
            .chain(&self.authors)
            .copied()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
            && self.tags.is_empty()
            && self.folders.is_empty()
            && self.authors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_dedups_across_axes() {
        let a = PostId::from_bytes([1; 16]);
        let b = PostId::from_bytes([2; 16]);
        let hits = SearchHits {
            content: BTreeSet::from([a]),
            tags: BTreeSet::from([a, b]),
            folders: BTreeSet::from([b]),
            authors: BTreeSet::from([a]),
        };
        assert_eq!(hits.union(), BTreeSet::from([a, b]));
        assert!(!hits.is_empty());
        assert!(SearchHits::default().is_empty());
    }
}
