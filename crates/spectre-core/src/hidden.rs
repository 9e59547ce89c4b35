//! Hidden-path addressing.
//!
//! A path names a node by its child indices from the chosen root, joined with `:`
//! (the root itself is `"0"`). A node is effectively hidden when its own path or any
//! prefix of it is in the set.

use std::collections::HashSet;

/// Path of the root node handed to `bake`.
pub const ROOT_PATH: &str = "0";

pub const PATH_SEPARATOR: char = ':';

/// Appends a child index to a parent path.
pub fn child_path(parent: &str, index: usize) -> String {
    format!("{parent}{PATH_SEPARATOR}{index}")
}

/// Every prefix of `path` ending on a segment boundary, shortest first, `path` itself last.
pub fn path_prefixes(path: &str) -> impl Iterator<Item = &str> {
    path.match_indices(PATH_SEPARATOR)
        .map(move |(i, _)| &path[..i])
        .chain(std::iter::once(path))
        .filter(|p| !p.is_empty())
}

/// Parses a path into its numeric segments; `None` when any segment is not an index.
pub fn path_segments(path: &str) -> Option<Vec<usize>> {
    path.split(PATH_SEPARATOR).map(|s| s.parse().ok()).collect()
}

/// Set of hidden paths. Owned by the caller and read-only to `bake`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HiddenSet {
    paths: HashSet<String>,
}

impl HiddenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Literal membership, without looking at ancestors.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.paths.insert(path.into())
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.paths.remove(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Sorted copy of the hidden paths, for stable output.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut v: Vec<String> = self.paths.iter().cloned().collect();
        v.sort();
        v
    }

    /// The shortest prefix of `path` (possibly `path` itself) that is hidden.
    pub fn controlling_ancestor<'p>(&self, path: &'p str) -> Option<&'p str> {
        path_prefixes(path).find(|p| self.paths.contains(*p))
    }

    /// True when `path` or one of its ancestors is hidden.
    pub fn is_hidden(&self, path: &str) -> bool {
        self.controlling_ancestor(path).is_some()
    }

    /// Toggles visibility for a hit on `path`.
    ///
    /// A hit inside a hidden branch reveals the whole branch by removing its controlling
    /// ancestor; otherwise the hit path itself is hidden. Returns the path that changed and
    /// whether it is now hidden.
    pub fn toggle_for_hit(&mut self, path: &str) -> (String, bool) {
        match self.controlling_ancestor(path) {
            Some(ancestor) => {
                let ancestor = ancestor.to_string();
                self.paths.remove(&ancestor);
                (ancestor, false)
            }
            None => {
                self.paths.insert(path.to_string());
                (path.to_string(), true)
            }
        }
    }
}

impl<S: Into<String>> FromIterator<S> for HiddenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for HiddenSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.paths.extend(iter.into_iter().map(Into::into));
    }
}
