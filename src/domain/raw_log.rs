//! Parser for `git log --pretty=raw` output
//!
//! The log is a sequence of blocks:
//!
//! ```text
//! commit <id>
//! tree <id>
//! parent <id>            (zero or more)
//! author <ident> <timestamp> <tz>
//! committer <ident> <timestamp> <tz>
//!
//!     Title
//!
//!     Body lines...
//! ```
//!
//! Parsing is a fold over the lines. Input that does not fit the shape is
//! skipped rather than rejected.

use crate::domain::{Commit, TagIndex};

/// Parse raw log text into commits, in input order, attaching tag names from `tags`.
pub fn parse_raw_log(raw: &str, tags: &TagIndex) -> Vec<Commit> {
    raw.lines()
        .fold(LogFold::default(), |fold, line| fold.step(line, tags))
        .finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Message,
}

#[derive(Debug)]
struct Draft {
    commit: Commit,
    section: Section,
    body: Vec<String>,
}

impl Draft {
    fn start(id: &str, tags: &TagIndex) -> Self {
        let commit = Commit {
            id: id.to_string(),
            tags: tags.names_for(id).to_vec(),
            ..Default::default()
        };
        Draft {
            commit,
            section: Section::Header,
            body: Vec::new(),
        }
    }

    fn header_line(&mut self, line: &str) {
        if line.is_empty() {
            self.section = Section::Message;
        } else if is_indented(line) {
            // Header ended without the blank separator
            self.section = Section::Message;
            self.message_line(line);
        } else if let Some(tree) = line.strip_prefix("tree ") {
            self.commit.tree_id = tree.to_string();
        } else if let Some(parent) = line.strip_prefix("parent ") {
            self.commit.parent_ids.push(parent.to_string());
        } else if let Some(author) = line.strip_prefix("author ") {
            self.commit.author = strip_timestamp(author);
        } else if let Some(committer) = line.strip_prefix("committer ") {
            self.commit.committer = strip_timestamp(committer);
        }
        // gpgsig, mergetag, encoding and their continuation lines are ignored
    }

    fn message_line(&mut self, line: &str) {
        let content = trim_message_line(line);
        if content.trim().is_empty() {
            return;
        }
        if self.commit.title.is_empty() {
            self.commit.title = content.to_string();
        } else {
            self.body.push(content.to_string());
        }
    }

    fn into_commit(self) -> Commit {
        Commit {
            body: self.body.join("\n"),
            ..self.commit
        }
    }
}

#[derive(Debug, Default)]
struct LogFold {
    commits: Vec<Commit>,
    draft: Option<Draft>,
}

impl LogFold {
    fn step(mut self, line: &str, tags: &TagIndex) -> Self {
        if let Some(rest) = line.strip_prefix("commit ") {
            // Decorations like "(tag: v1.0.0)" may follow the id
            let id = rest.split_whitespace().next().unwrap_or_default();
            if let Some(done) = self.draft.take() {
                self.commits.push(done.into_commit());
            }
            self.draft = Some(Draft::start(id, tags));
            return self;
        }

        if let Some(draft) = self.draft.as_mut() {
            match draft.section {
                Section::Header => draft.header_line(line),
                Section::Message => draft.message_line(line),
            }
        }
        self
    }

    fn finish(mut self) -> Vec<Commit> {
        if let Some(done) = self.draft.take() {
            self.commits.push(done.into_commit());
        }
        self.commits
    }
}

fn is_indented(line: &str) -> bool {
    line.starts_with('\t') || line.starts_with("    ")
}

fn trim_message_line(line: &str) -> &str {
    line.strip_prefix('\t')
        .or_else(|| line.strip_prefix("    "))
        .unwrap_or(line)
}

/// Drops the trailing timestamp and timezone from an author/committer line.
/// Lines with fewer than three tokens are kept as they are.
fn strip_timestamp(ident: &str) -> String {
    let mut parts = ident.rsplitn(3, ' ');
    let _timezone = parts.next();
    let _timestamp = parts.next();
    parts.next().unwrap_or(ident).to_string()
}
