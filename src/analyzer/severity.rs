use crate::config::RulesConfig;
use crate::domain::{Commit, Severity};
use crate::error::{GenSemverError, Result};
use regex::Regex;

/// Classifies a single commit as a major, minor or patch change
///
/// Rules, first match wins:
/// 1. body contains a breaking marker => major
/// 2. title starts with a minor type followed by `(` or `:` => minor
/// 3. title starts with a patch type followed by `(` or `:` => patch
///
/// Anything else has no version impact.
#[derive(Debug, Clone)]
pub struct SeverityClassifier {
    breaking_markers: Vec<String>,
    minor: Option<Regex>,
    patch: Option<Regex>,
}

impl SeverityClassifier {
    /// Build a classifier from the configured rules
    pub fn new(rules: &RulesConfig) -> Result<Self> {
        Ok(SeverityClassifier {
            breaking_markers: rules.breaking_markers.clone(),
            minor: type_prefix(&rules.minor_types)?,
            patch: type_prefix(&rules.patch_types)?,
        })
    }

    /// Returns `None` when the commit matches no rule
    pub fn classify(&self, commit: &Commit) -> Option<Severity> {
        if self
            .breaking_markers
            .iter()
            .any(|marker| commit.body.contains(marker.as_str()))
        {
            return Some(Severity::Major);
        }

        if matches(&self.minor, &commit.title) {
            return Some(Severity::Minor);
        }

        if matches(&self.patch, &commit.title) {
            return Some(Severity::Patch);
        }

        None
    }
}

fn matches(rule: &Option<Regex>, title: &str) -> bool {
    rule.as_ref().is_some_and(|re| re.is_match(title))
}

// `^(?:type1|type2)[(:]`
fn type_prefix(types: &[String]) -> Result<Option<Regex>> {
    if types.is_empty() {
        return Ok(None);
    }
    let alternatives: Vec<String> = types.iter().map(|t| regex::escape(t)).collect();
    Regex::new(&format!("^(?:{})[(:]", alternatives.join("|")))
        .map(Some)
        .map_err(|e| GenSemverError::config(format!("invalid commit type rule: {}", e)))
}
