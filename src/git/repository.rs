use crate::domain::Tag;
use crate::error::{GenSemverError, Result};
use crate::git::{describe_range, refs};
use git2::{ErrorCode, ObjectType, Oid, Repository as Git2Repo};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// A repository on disk, located with `git2`, whose log comes from the git executable
pub struct GitRepository {
    repo: Git2Repo,
    executable: String,
}

impl GitRepository {
    /// Discover the repository containing `path` (or one of its ancestors)
    pub fn discover<P: AsRef<Path>>(path: P, executable: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                GenSemverError::repository_not_found(format!(
                    "no .git found in {} or its parents",
                    path.display()
                ))
            } else {
                GenSemverError::Git(e)
            }
        })?;
        log::debug!("using repository at {}", repo.path().display());

        Ok(Self::from_git2(repo, executable))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, executable: impl Into<String>) -> Self {
        GitRepository {
            repo,
            executable: executable.into(),
        }
    }

    fn work_dir(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }

    // Annotated tags point at tag objects rather than commits. Each one gets a
    // second entry for the commit it peels to so it can be matched in the log.
    fn with_peeled(&self, tags: Vec<Tag>) -> Vec<Tag> {
        let mut result = Vec::with_capacity(tags.len());
        for tag in tags {
            let peeled = self.peel_to_commit(&tag.target);
            let name = tag.name.clone();
            result.push(tag);
            if let Some(commit_id) = peeled {
                result.push(Tag::new(name, commit_id));
            }
        }
        result
    }

    fn peel_to_commit(&self, target: &str) -> Option<String> {
        let oid = Oid::from_str(target).ok()?;
        let object = self.repo.find_object(oid, None).ok()?;
        if object.kind() != Some(ObjectType::Tag) {
            return None;
        }
        object.peel_to_commit().ok().map(|commit| commit.id().to_string())
    }
}

impl super::Repository for GitRepository {
    fn list_tags(&self) -> Result<Vec<Tag>> {
        let tags = refs::collect_tags(&refs::common_dir(self.repo.path()));
        log::debug!("found {} tag references", tags.len());
        Ok(self.with_peeled(tags))
    }

    fn raw_log(&self, start: Option<&str>, end: &str) -> Result<String> {
        let range = describe_range(start, end);
        log::debug!("running {} log {}", self.executable, range);

        let output = Command::new(&self.executable)
            .args([
                "log",
                "--reverse",
                "--pretty=raw",
                "--no-decorate",
                "--no-show-signature",
            ])
            .arg(&range)
            .arg("--")
            .current_dir(self.work_dir())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GenSemverError::ToolUnavailable {
                    tool: self.executable.clone(),
                    reason: e.to_string(),
                },
                _ => GenSemverError::Io(e),
            })?;

        if !output.status.success() {
            return Err(GenSemverError::ToolFailure {
                command: format!("{} log {}", self.executable, range),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        (dir, repo)
    }

    fn commit(repo: &Git2Repo, message: &str) -> Oid {
        let sig = repo.signature().unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn git_available() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    #[test]
    fn test_discover_outside_repository() {
        let dir = TempDir::new().unwrap();
        match GitRepository::discover(dir.path(), "git") {
            Err(GenSemverError::RepositoryNotFound(_)) => {}
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("expected no repository"),
        }
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let (dir, repo) = init_repo();
        commit(&repo, "Initial commit");
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        assert!(GitRepository::discover(&nested, "git").is_ok());
    }

    #[test]
    fn test_list_tags_lightweight_and_annotated() {
        let (_dir, repo) = init_repo();
        let first = commit(&repo, "Initial commit");
        let second = commit(&repo, "feat: more");

        repo.tag_lightweight("v1.0.0", &repo.find_object(first, None).unwrap(), false)
            .unwrap();
        let sig = repo.signature().unwrap();
        let tag_oid = repo
            .tag(
                "v1.1.0",
                &repo.find_object(second, None).unwrap(),
                &sig,
                "release",
                false,
            )
            .unwrap();

        let git_repo = GitRepository::from_git2(repo, "git");
        let tags = git_repo.list_tags().unwrap();

        assert!(tags.contains(&Tag::new("v1.0.0", first.to_string())));
        assert!(tags.contains(&Tag::new("v1.1.0", tag_oid.to_string())));
        assert!(tags.contains(&Tag::new("v1.1.0", second.to_string())));
        assert_eq!(tags.len(), 3);
    }

    #[test]
    fn test_raw_log_lists_range_oldest_first() {
        if !git_available() {
            return;
        }
        let (_dir, repo) = init_repo();
        let base = commit(&repo, "Initial commit");
        commit(&repo, "fix: one");
        commit(&repo, "feat: two\n\nDetails");

        let git_repo = GitRepository::from_git2(repo, "git");
        let raw = git_repo
            .raw_log(Some(&base.to_string()), "HEAD")
            .unwrap();

        let one = raw.find("    fix: one").unwrap();
        let two = raw.find("    feat: two").unwrap();
        assert!(one < two);
        assert!(!raw.contains("Initial commit"));
        assert!(raw.starts_with("commit "));
    }

    #[test]
    fn test_raw_log_ignores_show_signature_setting() {
        if !git_available() {
            return;
        }
        let (_dir, repo) = init_repo();
        let base = commit(&repo, "Initial commit");
        commit(&repo, "fix: signed elsewhere");
        repo.config()
            .unwrap()
            .set_bool("log.showSignature", true)
            .unwrap();

        let git_repo = GitRepository::from_git2(repo, "git");
        let raw = git_repo
            .raw_log(Some(&base.to_string()), "HEAD")
            .unwrap();

        let commits = crate::domain::parse_raw_log(&raw, &crate::domain::TagIndex::default());
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].title, "fix: signed elsewhere");
        assert!(!raw.contains("gpg:"));
    }

    #[test]
    fn test_raw_log_bad_revision_fails() {
        if !git_available() {
            return;
        }
        let (_dir, repo) = init_repo();
        commit(&repo, "Initial commit");

        let git_repo = GitRepository::from_git2(repo, "git");
        match git_repo.raw_log(Some("no-such-rev"), "HEAD") {
            Err(GenSemverError::ToolFailure { stderr, .. }) => assert!(!stderr.is_empty()),
            other => panic!("expected tool failure, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_raw_log_missing_executable() {
        let (_dir, repo) = init_repo();
        commit(&repo, "Initial commit");

        let git_repo = GitRepository::from_git2(repo, "gensemver-test-no-such-git");
        match git_repo.raw_log(None, "HEAD") {
            Err(GenSemverError::ToolUnavailable { tool, .. }) => {
                assert_eq!(tool, "gensemver-test-no-such-git")
            }
            other => panic!("expected unavailable tool, got {:?}", other.map(|_| ())),
        }
    }
}
