//! Tag discovery from the on-disk ref stores of a git directory
//!
//! Three stores are read and concatenated without deduplication:
//! `info/refs`, loose files under `refs/tags/`, then `packed-refs`.

use crate::domain::Tag;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const TAG_REF_PREFIX: &str = "refs/tags/";

/// Collect tags from every ref store under `git_dir`. Missing stores yield nothing.
pub fn collect_tags(git_dir: &Path) -> Vec<Tag> {
    let mut tags = read_store(&git_dir.join("info").join("refs"), parse_info_refs);
    tags.extend(read_loose_tags(&git_dir.join("refs").join("tags")));
    tags.extend(read_store(&git_dir.join("packed-refs"), parse_packed_refs));
    tags
}

/// Directory holding the shared ref stores for `git_dir`.
///
/// A linked worktree's git dir names it in a `commondir` file, absolute or
/// relative to the git dir. Without that file the git dir is its own.
pub fn common_dir(git_dir: &Path) -> PathBuf {
    match fs::read_to_string(git_dir.join("commondir")) {
        Ok(content) if !content.trim().is_empty() => git_dir.join(content.trim()),
        _ => git_dir.to_path_buf(),
    }
}

fn read_store(path: &Path, parse: fn(&str) -> Vec<Tag>) -> Vec<Tag> {
    match fs::read_to_string(path) {
        Ok(content) => parse(&content),
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            log::warn!("Failed to read {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// `info/refs`: one `<id>\t<ref>` per line.
/// Peeled entries (`refs/tags/<name>^{}`) are reported under the plain tag name.
pub fn parse_info_refs(content: &str) -> Vec<Tag> {
    content
        .lines()
        .filter_map(|line| {
            let (id, name) = line.split_once('\t')?;
            let tag = name.strip_prefix(TAG_REF_PREFIX)?;
            let tag = tag.strip_suffix("^{}").unwrap_or(tag);
            Some(Tag::new(tag, id))
        })
        .collect()
}

/// `packed-refs`: one `<id> <ref>` per line.
///
/// A `^<id>` line right after an annotated tag carries the commit the tag
/// peels to; it is reported as a second entry for the same tag name.
pub fn parse_packed_refs(content: &str) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();
    let mut last_tag: Option<String> = None;

    for line in content.lines() {
        if let Some(peeled) = line.strip_prefix('^') {
            if let Some(name) = last_tag.take() {
                tags.push(Tag::new(name, peeled.trim()));
            }
            continue;
        }

        last_tag = line.split_once(' ').and_then(|(id, name)| {
            let tag = name.trim().strip_prefix(TAG_REF_PREFIX)?;
            tags.push(Tag::new(tag, id));
            Some(tag.to_string())
        });
    }
    tags
}

/// Loose tag files: the path below `refs/tags` is the name, the content the id
pub fn read_loose_tags(dir: &Path) -> Vec<Tag> {
    let mut tags = Vec::new();
    walk_loose_tags(dir, "", &mut tags);
    tags
}

fn walk_loose_tags(dir: &Path, prefix: &str, tags: &mut Vec<Tag>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("Failed to list {}: {}", dir.display(), e);
            }
            return;
        }
    };

    let mut entries: Vec<_> = entries.flatten().collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        let name = format!("{}{}", prefix, file_name);
        let path = entry.path();

        if path.is_dir() {
            walk_loose_tags(&path, &format!("{}/", name), tags);
            continue;
        }

        match fs::read_to_string(&path) {
            Ok(content) => tags.push(Tag::new(name, content.trim())),
            Err(e) => log::warn!("Failed to parse reffile {}: {}", name, e),
        }
    }
}
