use crate::domain::Tag;
use crate::error::{GenSemverError, Result};
use crate::git::{describe_range, Repository};
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
#[derive(Debug, Default)]
pub struct MockRepository {
    tags: Vec<Tag>,
    log: String,
    log_failure: Option<String>,
    log_requests: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag pointing to a commit id
    pub fn add_tag(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.tags.push(Tag::new(name, target));
    }

    /// Set the raw log returned for any range
    pub fn set_log(&mut self, raw: impl Into<String>) {
        self.log = raw.into();
    }

    /// Make `raw_log` fail as if git exited with `stderr`
    pub fn fail_log(&mut self, stderr: impl Into<String>) {
        self.log_failure = Some(stderr.into());
    }

    /// Ranges passed to `raw_log`, in call order
    pub fn log_requests(&self) -> Vec<String> {
        self.log_requests.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn raw_log(&self, start: Option<&str>, end: &str) -> Result<String> {
        let range = describe_range(start, end);
        self.log_requests.borrow_mut().push(range.clone());

        match &self.log_failure {
            Some(stderr) => Err(GenSemverError::ToolFailure {
                command: format!("git log {}", range),
                stderr: stderr.clone(),
            }),
            None => Ok(self.log.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", "aaa");
        repo.add_tag("v2.0.0", "bbb");

        let tags = repo.list_tags().unwrap();
        assert_eq!(tags, vec![Tag::new("v1.0.0", "aaa"), Tag::new("v2.0.0", "bbb")]);
    }

    #[test]
    fn test_mock_repository_records_log_requests() {
        let mut repo = MockRepository::new();
        repo.set_log("commit abc\n");

        assert_eq!(repo.raw_log(Some("aaa"), "HEAD").unwrap(), "commit abc\n");
        assert_eq!(repo.raw_log(None, "main").unwrap(), "commit abc\n");
        assert_eq!(repo.log_requests(), vec!["aaa..HEAD", "main"]);
    }

    #[test]
    fn test_mock_repository_log_failure() {
        let mut repo = MockRepository::new();
        repo.fail_log("fatal: bad revision");
        assert!(matches!(
            repo.raw_log(None, "HEAD"),
            Err(GenSemverError::ToolFailure { .. })
        ));
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_tags().unwrap().is_empty());
        assert!(repo.log_requests().is_empty());
    }
}
