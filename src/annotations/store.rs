//! Path-keyed annotation storage.

use std::collections::HashMap;

use crate::annotations::AnnotationMap;
use crate::error::{Error, Result};
use crate::routing::RoutePath;

/// Annotation maps keyed by exact literal route path.
///
/// Entries are created on first use and never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationStore {
    entries: HashMap<String, AnnotationMap>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow-merge `values` into the map stored for `path`, last write wins.
    ///
    /// Pattern paths cannot be addressed and fail with `InvalidArgument`,
    /// leaving the store untouched.
    pub fn merge(&mut self, path: &RoutePath, values: AnnotationMap) -> Result<&AnnotationMap> {
        let literal = match path {
            RoutePath::Literal(literal) => literal,
            RoutePath::Pattern(source) => {
                return Err(Error::InvalidArgument(format!(
                    "route path must be a string, got pattern `{}`",
                    source
                )));
            }
        };

        let entry = self.entries.entry(literal.clone()).or_default();
        for (key, value) in values {
            entry.insert(key, value);
        }
        Ok(entry)
    }

    /// Annotations stored for a literal path.
    pub fn get(&self, path: &str) -> Option<&AnnotationMap> {
        self.entries.get(path)
    }

    /// Annotations applying to a route path; always `None` for patterns.
    pub fn lookup(&self, path: &RoutePath) -> Option<&AnnotationMap> {
        path.as_literal().and_then(|literal| self.get(literal))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnnotationMap)> {
        self.entries.iter().map(|(path, map)| (path.as_str(), map))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
