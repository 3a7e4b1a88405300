//! Analysis engine for determining the next version from commits

pub mod resolver;
pub mod severity;

pub use resolver::{PreviousVersion, VersionResolver};
pub use severity::SeverityClassifier;
