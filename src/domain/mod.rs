//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod raw_log;
pub mod tag;
pub mod version;

pub use commit::Commit;
pub use raw_log::parse_raw_log;
pub use tag::{Tag, TagIndex};
pub use version::{Severity, Version};
