//! Query results grouped by HTTP method.

use std::collections::BTreeMap;

use axum::http::Method;
use serde::Serialize;

use crate::routing::RouteDescriptor;

/// Matching routes keyed by lower-case method name (`"get"`, `"post"`).
///
/// Methods without a match are absent; a query matching nothing yields an
/// empty value rather than `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteMatches {
    by_method: BTreeMap<String, Vec<RouteDescriptor>>,
}

impl RouteMatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, route: RouteDescriptor) {
        self.by_method
            .entry(method_key(&route.method))
            .or_default()
            .push(route);
    }

    /// Routes matched under `method`.
    pub fn get(&self, method: &Method) -> Option<&[RouteDescriptor]> {
        self.get_str(method.as_str())
    }

    /// Routes matched under a method name, case-insensitive.
    pub fn get_str(&self, method: &str) -> Option<&[RouteDescriptor]> {
        self.by_method
            .get(&method.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// Method names with at least one match.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.by_method.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RouteDescriptor])> {
        self.by_method
            .iter()
            .map(|(method, routes)| (method.as_str(), routes.as_slice()))
    }

    /// Number of methods with matches.
    pub fn len(&self) -> usize {
        self.by_method.len()
    }

    /// Total matched routes across methods.
    pub fn total(&self) -> usize {
        self.by_method.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_method.is_empty()
    }
}

impl IntoIterator for RouteMatches {
    type Item = (String, Vec<RouteDescriptor>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<RouteDescriptor>>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_method.into_iter()
    }
}

fn method_key(method: &Method) -> String {
    method.as_str().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping_and_lookup() {
        let mut matches = RouteMatches::new();
        assert!(matches.is_empty());

        matches.push(RouteDescriptor::new(Method::GET, "/a"));
        matches.push(RouteDescriptor::new(Method::POST, "/a"));
        matches.push(RouteDescriptor::new(Method::GET, "/b"));

        assert_eq!(matches.len(), 2);
        assert_eq!(matches.total(), 3);
        assert_eq!(matches.get(&Method::GET).map(<[_]>::len), Some(2));
        assert_eq!(matches.get_str("POST").map(<[_]>::len), Some(1));
        assert!(matches.get(&Method::PUT).is_none());
    }

    #[test]
    fn test_serializes_as_method_map() {
        let mut matches = RouteMatches::new();
        matches.push(RouteDescriptor::new(Method::GET, "/posts/"));
        let json = serde_json::to_value(&matches).unwrap();
        assert_eq!(json["get"][0]["path"], "/posts/");
        assert!(json.get("post").is_none());

        let empty = serde_json::to_value(RouteMatches::new()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }
}
