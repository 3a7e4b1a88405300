use crate::domain::Version;

/// A commit as read from the raw log, with the tags that point at it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Commit {
    pub id: String,
    pub tree_id: String,
    pub parent_ids: Vec<String>,
    pub author: String,
    pub committer: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl Commit {
    /// Versions of every attached tag that parses as one; the rest are skipped
    pub fn versions<S: AsRef<str>>(&self, prefixes: &[S]) -> Vec<Version> {
        self.tags
            .iter()
            .filter_map(|tag| Version::parse_tag(tag, prefixes).ok())
            .collect()
    }

    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() > 1
    }

    /// Abbreviated commit id for log output
    pub fn short_id(&self) -> &str {
        self.id.get(..7).unwrap_or(&self.id)
    }
}
