use crate::analyzer::SeverityClassifier;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::domain::{parse_raw_log, Commit, Severity, Tag, TagIndex, Version};
use crate::error::{GenSemverError, Result};
use crate::git::{describe_range, Repository};
use std::cmp::Ordering;

/// The latest released version and the tag it came from
#[derive(Debug, Clone, PartialEq)]
pub struct PreviousVersion {
    pub version: Version,
    pub tag: Tag,
}

/// Derives the next version from the commits following the previous one
pub struct VersionResolver {
    classifier: SeverityClassifier,
    tag_prefixes: Vec<String>,
}

impl VersionResolver {
    /// Create a resolver using the configured rules and tag prefixes
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_classifier(
            SeverityClassifier::new(&config.rules)?,
            config.versioning.tag_prefixes.clone(),
        ))
    }

    pub fn with_classifier(classifier: SeverityClassifier, tag_prefixes: Vec<String>) -> Self {
        VersionResolver {
            classifier,
            tag_prefixes,
        }
    }

    /// Pick the tag carrying the greatest version.
    ///
    /// Tags that do not parse are skipped. When two tags carry the same version
    /// the later one wins.
    pub fn select_previous_version(&self, tags: &[Tag]) -> Option<PreviousVersion> {
        let mut previous: Option<PreviousVersion> = None;

        for tag in tags {
            let version = match Version::parse_tag(&tag.name, &self.tag_prefixes) {
                Ok(version) => version,
                Err(e) => {
                    let warning = BoundaryWarning::UnparsableTag {
                        tag: tag.name.clone(),
                        reason: e.to_string(),
                    };
                    log::debug!("{}", warning);
                    continue;
                }
            };

            let is_newer = previous
                .as_ref()
                .map_or(true, |p| version.compare(&p.version) != Ordering::Less);
            if is_newer {
                previous = Some(PreviousVersion {
                    version,
                    tag: tag.clone(),
                });
            }
        }

        previous
    }

    /// Highest severity among `commits`, scanned oldest first.
    ///
    /// A commit tagged with `old_version` resets the scan, and a major change
    /// ends it. Returns `None` when no commit matched a rule.
    pub fn scan(&self, commits: &[Commit], old_version: &Version) -> Option<Severity> {
        let mut max_severity: Option<Severity> = None;

        for commit in commits {
            if commit
                .versions(&self.tag_prefixes)
                .iter()
                .any(|version| version == old_version)
            {
                let warning = BoundaryWarning::PreviousVersionInRange {
                    commit: commit.id.clone(),
                    version: old_version.to_string(),
                };
                log::info!("{}", warning);
                max_severity = None;
                continue;
            }

            let Some(severity) = self.classifier.classify(commit) else {
                let warning = BoundaryWarning::UnclassifiedCommit {
                    commit: commit.id.clone(),
                    title: commit.title.clone(),
                };
                if commit.is_merge() {
                    log::debug!("{} (merge commit)", warning);
                } else {
                    log::debug!("{}", warning);
                }
                continue;
            };

            log::debug!("{} {}: {}", commit.short_id(), severity, commit.title);
            max_severity = max_severity.max(Some(severity));

            if max_severity == Some(Severity::Major) {
                break;
            }
        }

        max_severity
    }

    /// Next version after `old_version`, from the commits in `start..end`
    pub fn resolve_new_version<R: Repository>(
        &self,
        repo: &R,
        start: Option<&str>,
        end: &str,
        old_version: &Version,
        tags: &[Tag],
    ) -> Result<Version> {
        let raw = repo.raw_log(start, end)?;
        let commits = parse_raw_log(&raw, &TagIndex::new(tags));
        log::info!(
            "Scanning {} commits in {}",
            commits.len(),
            describe_range(start, end)
        );

        let severity = self
            .scan(&commits, old_version)
            .ok_or_else(|| GenSemverError::no_new_version(describe_range(start, end)))?;
        log::info!("Highest change severity: {}", severity);

        old_version.bump(severity)
    }
}
