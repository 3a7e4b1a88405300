use crate::error::{GenSemverError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Tag prefixes stripped before a tag name is parsed as a version.
pub const DEFAULT_TAG_PREFIXES: [&str; 2] = ["v", "R"];

/// Semantic version representation (major.minor.patch[-pre][+build])
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(semver::Version);

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version(semver::Version::new(major, minor, patch))
    }

    /// Parse a strict `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` string
    pub fn parse(version: &str) -> Result<Self> {
        semver::Version::parse(version)
            .map(Version)
            .map_err(|e| GenSemverError::version(format!("'{}': {}", version, e)))
    }

    /// Parse version from a tag name (e.g., "v1.2.3" -> 1.2.3)
    ///
    /// At most one of `prefixes` is stripped, the first one that matches.
    pub fn parse_tag<S: AsRef<str>>(tag: &str, prefixes: &[S]) -> Result<Self> {
        let clean_tag = prefixes
            .iter()
            .find_map(|prefix| tag.strip_prefix(prefix.as_ref()))
            .unwrap_or(tag);
        Self::parse(clean_tag)
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }

    /// Semantic version precedence; build metadata is ignored.
    pub fn compare(&self, other: &Version) -> Ordering {
        self.0.cmp_precedence(&other.0)
    }

    /// Bump version according to severity.
    ///
    /// Pre-release and build metadata are dropped, so the result is always a
    /// clean release version. Fails when the bumped component would overflow.
    pub fn bump(&self, severity: Severity) -> Result<Self> {
        let overflow = || GenSemverError::VersionOverflow {
            version: self.to_string(),
            severity,
        };
        let bumped = match severity {
            Severity::Major => {
                Version::new(self.major().checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            Severity::Minor => Version::new(
                self.major(),
                self.minor().checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            Severity::Patch => Version::new(
                self.major(),
                self.minor(),
                self.patch().checked_add(1).ok_or_else(overflow)?,
            ),
        };
        Ok(bumped)
    }
}

impl FromStr for Version {
    type Err = GenSemverError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Impact level of a change, ordered Patch < Minor < Major
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Patch,
    Minor,
    Major,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Patch => "patch",
            Severity::Minor => "minor",
            Severity::Major => "major",
        };
        f.write_str(name)
    }
}
