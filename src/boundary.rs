use std::fmt;

/// Non-fatal conditions met while resolving a version.
/// These are reported through the logger and never abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag exists but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// No version tag and no override, so the initial version is used
    NoPreviousVersion { initial_version: String },
    /// The previous version's own commit showed up inside the scanned range
    PreviousVersionInRange {
        commit: String,
        version: String,
    },
    /// Commit message matches none of the severity rules
    UnclassifiedCommit { commit: String, title: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::NoPreviousVersion { initial_version } => {
                write!(
                    f,
                    "No previous version found, starting at {}",
                    initial_version
                )
            }
            BoundaryWarning::PreviousVersionInRange { commit, version } => {
                let short_hash = commit.get(..7).unwrap_or(commit.as_str());
                write!(
                    f,
                    "Commit {} is tagged with previous version {}, ignoring earlier commits",
                    short_hash, version
                )
            }
            BoundaryWarning::UnclassifiedCommit { commit, title } => {
                let short_hash = commit.get(..7).unwrap_or(commit.as_str());
                write!(f, "Commit {} has no version impact: {}", short_hash, title)
            }
        }
    }
}
