//! Uniform route descriptor.

use axum::http::Method;
use serde::{Serialize, Serializer};

/// Path a route was registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoutePath {
    /// Plain path string, e.g. `/blog/:post`. Addressable by annotations.
    Literal(String),
    /// Source text of a pattern matcher, e.g. `^/files/.*$`. Never annotatable.
    Pattern(String),
}

impl RoutePath {
    pub fn literal(path: impl Into<String>) -> Self {
        Self::Literal(path.into())
    }

    pub fn pattern(source: impl Into<String>) -> Self {
        Self::Pattern(source.into())
    }

    /// The path string, if this is a literal path.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(path) => Some(path),
            Self::Pattern(_) => None,
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }
}

impl From<&str> for RoutePath {
    fn from(path: &str) -> Self {
        Self::Literal(path.to_string())
    }
}

impl From<String> for RoutePath {
    fn from(path: String) -> Self {
        Self::Literal(path)
    }
}

impl From<&String> for RoutePath {
    fn from(path: &String) -> Self {
        Self::Literal(path.clone())
    }
}

impl std::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(path) => f.write_str(path),
            Self::Pattern(source) => write!(f, "/{}/", source),
        }
    }
}

impl Serialize for RoutePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A registered route as seen by the annotation index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: RoutePath,
    /// Path parameter names, passed through from the host.
    pub keys: Vec<String>,
    /// Handler or layer label, passed through from the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RouteDescriptor {
    /// Create a descriptor, deriving `keys` from `:name` segments of literal paths.
    pub fn new(method: Method, path: impl Into<RoutePath>) -> Self {
        let path = path.into();
        let keys = path.as_literal().map(param_keys).unwrap_or_default();
        Self {
            method,
            path,
            keys,
            name: None,
        }
    }

    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

fn serialize_method<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&method.as_str().to_ascii_lowercase())
}

/// Parameter names of a path such as `/posts/:postId/comments/:id?`.
pub fn param_keys(path: &str) -> Vec<String> {
    path.split('/')
        .filter_map(|segment| segment.strip_prefix(':'))
        .map(|key| key.trim_end_matches(['?', '*', '+']))
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}
