//! Main workflow orchestration logic
//!
//! Keeps the resolution workflow apart from clap so it can be driven
//! programmatically and tested against a mock repository.

use crate::analyzer::VersionResolver;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::Version;
use crate::error::{GenSemverError, Result};
use crate::git::Repository;

/// Revision used as the end of the range when none is given
pub const DEFAULT_END: &str = "HEAD";

/// Arguments for the resolution workflow
///
/// Mirrors the CLI positional arguments and `--prev`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunArgs {
    /// Explicit start revision (exclusive)
    pub start: Option<String>,

    /// Explicit end revision (inclusive), defaults to HEAD
    pub end: Option<String>,

    /// Previous version override, unparsed
    pub prev: Option<String>,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The version the new one was derived from, if any
    pub previous: Option<Version>,

    /// Start of the scanned range
    pub start: Option<String>,

    pub end: String,

    /// The computed next version
    pub version: Version,

    /// No previous version existed, so the initial version was used
    pub bootstrapped: bool,
}

/// Main resolution workflow
///
/// 1. Parse the `--prev` override (before touching the repository)
/// 2. Open the repository and list its tags
/// 3. Select the previous version and the start of the range
/// 4. Fall back to the initial version when there is no previous version
/// 5. Otherwise scan the range and bump the previous version
pub fn run<R, F>(args: &RunArgs, config: &Config, open_repository: F) -> Result<Resolution>
where
    R: Repository,
    F: FnOnce() -> Result<R>,
{
    let override_version = args
        .prev
        .as_deref()
        .map(|raw| {
            Version::parse(raw).map_err(|e| GenSemverError::InvalidOverrideVersion {
                value: raw.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;
    let initial_version = config.initial_version()?;
    let resolver = VersionResolver::new(config)?;

    let repo = open_repository()?;
    let tags = repo.list_tags()?;
    let detected = resolver.select_previous_version(&tags);

    let start = args
        .start
        .clone()
        .or_else(|| detected.as_ref().map(|p| p.tag.target.clone()));
    let end = args.end.clone().unwrap_or_else(|| DEFAULT_END.to_string());

    if let Some(detected) = &detected {
        log::debug!(
            "latest version tag: {} ({})",
            detected.tag.name,
            detected.tag.target
        );
    }
    let previous = override_version.or(detected.map(|p| p.version));

    let Some(previous) = previous else {
        let warning = BoundaryWarning::NoPreviousVersion {
            initial_version: initial_version.to_string(),
        };
        log::warn!("{}", warning);
        return Ok(Resolution {
            previous: None,
            start,
            end,
            version: initial_version,
            bootstrapped: true,
        });
    };

    log::info!(
        "Previous version: {} ({})",
        previous,
        start.as_deref().unwrap_or("start of history")
    );

    let version = resolver.resolve_new_version(&repo, start.as_deref(), &end, &previous, &tags)?;

    Ok(Resolution {
        previous: Some(previous),
        start,
        end,
        version,
        bootstrapped: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    const FEATURE_LOG: &str = "commit c2\ntree t\nparent c1\n\n    feat(cli): add flag\n";

    fn repo_with_tag() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", "c0");
        repo.add_tag("v1.1.0", "c1");
        repo.add_tag("docs-snapshot", "c1");
        repo.set_log(FEATURE_LOG);
        repo
    }

    #[test]
    fn test_run_detects_previous_version() {
        let repo = repo_with_tag();
        let resolution = run(&RunArgs::default(), &Config::default(), || Ok(&repo)).unwrap();

        assert_eq!(resolution.previous, Some(Version::new(1, 1, 0)));
        assert_eq!(resolution.start.as_deref(), Some("c1"));
        assert_eq!(resolution.end, "HEAD");
        assert_eq!(resolution.version, Version::new(1, 2, 0));
        assert!(!resolution.bootstrapped);
        assert_eq!(repo.log_requests(), vec!["c1..HEAD"]);
    }

    #[test]
    fn test_run_with_explicit_start() {
        let repo = repo_with_tag();
        let args = RunArgs {
            start: Some("abc123".to_string()),
            ..Default::default()
        };
        let resolution = run(&args, &Config::default(), || Ok(&repo)).unwrap();

        assert_eq!(resolution.previous, Some(Version::new(1, 1, 0)));
        assert_eq!(repo.log_requests(), vec!["abc123..HEAD"]);
    }

    #[test]
    fn test_run_with_explicit_range() {
        let repo = repo_with_tag();
        let args = RunArgs {
            start: Some("v1.0.0".to_string()),
            end: Some("release".to_string()),
            ..Default::default()
        };
        run(&args, &Config::default(), || Ok(&repo)).unwrap();
        assert_eq!(repo.log_requests(), vec!["v1.0.0..release"]);
    }

    #[test]
    fn test_run_prev_override() {
        let repo = repo_with_tag();
        let args = RunArgs {
            prev: Some("3.4.5".to_string()),
            ..Default::default()
        };
        let resolution = run(&args, &Config::default(), || Ok(&repo)).unwrap();

        assert_eq!(resolution.previous, Some(Version::new(3, 4, 5)));
        assert_eq!(resolution.version, Version::new(3, 5, 0));
        // the range still starts at the detected tag
        assert_eq!(repo.log_requests(), vec!["c1..HEAD"]);
    }

    #[test]
    fn test_run_invalid_prev_fails_before_repository_access() {
        let args = RunArgs {
            prev: Some("v1.2".to_string()),
            ..Default::default()
        };
        let err = run(&args, &Config::default(), || -> Result<MockRepository> {
            panic!("repository must not be opened")
        })
        .unwrap_err();
        assert!(matches!(err, GenSemverError::InvalidOverrideVersion { .. }));
    }

    #[test]
    fn test_run_bootstraps_without_tags() {
        let mut repo = MockRepository::new();
        repo.add_tag("latest", "c1");
        repo.set_log(FEATURE_LOG);

        let resolution = run(&RunArgs::default(), &Config::default(), || Ok(&repo)).unwrap();

        assert_eq!(resolution.version, Version::new(1, 0, 0));
        assert_eq!(resolution.previous, None);
        assert!(resolution.bootstrapped);
        assert!(repo.log_requests().is_empty());
    }

    #[test]
    fn test_run_bootstrap_uses_configured_initial_version() {
        let repo = MockRepository::new();
        let mut config = Config::default();
        config.versioning.initial_version = "0.1.0".to_string();

        let resolution = run(&RunArgs::default(), &config, || Ok(&repo)).unwrap();
        assert_eq!(resolution.version, Version::new(0, 1, 0));
    }

    #[test]
    fn test_run_prev_without_tags_scans_whole_history() {
        let mut repo = MockRepository::new();
        repo.set_log(FEATURE_LOG);
        let args = RunArgs {
            prev: Some("0.9.0".to_string()),
            ..Default::default()
        };

        let resolution = run(&args, &Config::default(), || Ok(&repo)).unwrap();
        assert_eq!(resolution.version, Version::new(0, 10, 0));
        assert_eq!(repo.log_requests(), vec!["HEAD"]);
    }

    #[test]
    fn test_run_no_determinable_version() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", "c0");
        repo.set_log("commit c1\ntree t\n\n    Update README\n");

        let err = run(&RunArgs::default(), &Config::default(), || Ok(&repo)).unwrap_err();
        assert!(matches!(err, GenSemverError::NoDeterminableVersion { .. }));
    }

    #[test]
    fn test_run_repository_error_propagates() {
        let err = run(&RunArgs::default(), &Config::default(), || -> Result<MockRepository> {
            Err(GenSemverError::repository_not_found("nowhere"))
        })
        .unwrap_err();
        assert!(matches!(err, GenSemverError::RepositoryNotFound(_)));
    }
}
