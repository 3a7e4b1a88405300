use std::collections::HashMap;

/// Represents a git tag and the object id it points to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub target: String,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            target: target.into(),
        }
    }
}

/// Lookup from commit id to the names of every tag referencing it
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    by_target: HashMap<String, Vec<String>>,
}

impl TagIndex {
    /// Build the index, keeping tag names in discovery order.
    /// Duplicate tags produce duplicate names.
    pub fn new(tags: &[Tag]) -> Self {
        let mut by_target: HashMap<String, Vec<String>> = HashMap::new();
        for tag in tags {
            by_target
                .entry(tag.target.clone())
                .or_default()
                .push(tag.name.clone());
        }
        TagIndex { by_target }
    }

    /// Tag names pointing at `commit_id`, empty when there are none
    pub fn names_for(&self, commit_id: &str) -> &[String] {
        self.by_target
            .get(commit_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
