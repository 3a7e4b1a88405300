//! Repository access
//!
//! Version resolution only needs two things from a repository: the list of
//! tags and the raw log of a commit range. Both are behind the [Repository]
//! trait so the analysis can run against canned data in tests.
//!
//! - [repository::GitRepository]: discovers a repository with `git2`, reads tags
//!   from the on-disk ref stores and runs `git log` for the raw log
//! - [mock::MockRepository]: in-memory tags and log text

pub mod mock;
pub mod refs;
pub mod repository;

pub use mock::MockRepository;
pub use repository::GitRepository;

use crate::domain::Tag;
use crate::error::Result;

/// Source of tags and raw commit logs
pub trait Repository {
    /// All tags found in the repository, in discovery order.
    ///
    /// The same tag may be reported more than once when several ref stores
    /// know about it.
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Raw log (`git log --reverse --pretty=raw`) of the range `start..end`,
    /// oldest commit first. With no `start`, the whole history up to `end`.
    fn raw_log(&self, start: Option<&str>, end: &str) -> Result<String>;
}

impl<R: Repository + ?Sized> Repository for &R {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        (**self).list_tags()
    }

    fn raw_log(&self, start: Option<&str>, end: &str) -> Result<String> {
        (**self).raw_log(start, end)
    }
}

/// Human readable form of a log range
pub fn describe_range(start: Option<&str>, end: &str) -> String {
    match start {
        Some(start) => format!("{}..{}", start, end),
        None => end.to_string(),
    }
}
