//! Annotation predicates.
//!
//! A query is either a list of criteria combined with AND, or a single
//! caller-supplied filter function over the whole annotation map.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::annotations::AnnotationMap;

/// A single declarative condition on an annotation map.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// The key is present, whatever its value.
    Has(String),
    /// Every key is present with an equal value.
    Equals(AnnotationMap),
}

impl Criterion {
    pub fn has(name: impl Into<String>) -> Self {
        Self::Has(name.into())
    }

    /// Single key/value equality.
    pub fn equals(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut map = AnnotationMap::new();
        map.insert(name.into(), value.into());
        Self::Equals(map)
    }

    pub fn matches(&self, annotations: &AnnotationMap) -> bool {
        match self {
            Self::Has(name) => annotations.contains_key(name),
            Self::Equals(expected) => expected.iter().all(|(name, value)| {
                annotations
                    .get(name)
                    .is_some_and(|actual| values_equal(actual, value))
            }),
        }
    }
}

/// Strict equality, except numbers compare by value so `2` equals `2.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                a == b
            } else if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                a == b
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        _ => a == b,
    }
}

impl From<&str> for Criterion {
    fn from(name: &str) -> Self {
        Self::Has(name.to_string())
    }
}

impl From<String> for Criterion {
    fn from(name: String) -> Self {
        Self::Has(name)
    }
}

impl From<AnnotationMap> for Criterion {
    fn from(map: AnnotationMap) -> Self {
        Self::Equals(map)
    }
}

/// Interpret a textual value as JSON when it parses (`true`, `2000`,
/// `null`), otherwise as a plain string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

type FilterFn = dyn Fn(&AnnotationMap) -> bool + Send + Sync;

/// What `find_all` selects routes by.
#[derive(Clone)]
pub enum Query {
    /// Every criterion must hold. An empty list selects every annotated route.
    All(Vec<Criterion>),
    /// Arbitrary filter over the route's annotations.
    Where(Arc<FilterFn>),
}

impl Query {
    /// Query with no criteria yet.
    pub fn new() -> Self {
        Self::All(Vec::new())
    }

    pub fn filter<F>(f: F) -> Self
    where
        F: Fn(&AnnotationMap) -> bool + Send + Sync + 'static,
    {
        Self::Where(Arc::new(f))
    }

    /// Add a criterion. A filter query is replaced by a criteria list.
    pub fn and(self, criterion: impl Into<Criterion>) -> Self {
        match self {
            Self::All(mut criteria) => {
                criteria.push(criterion.into());
                Self::All(criteria)
            }
            Self::Where(_) => Self::All(vec![criterion.into()]),
        }
    }

    /// Whether a route carrying `annotations` is selected.
    /// Routes without annotations are never selected.
    pub fn matches(&self, annotations: Option<&AnnotationMap>) -> bool {
        let Some(annotations) = annotations else {
            return false;
        };
        match self {
            Self::All(criteria) => criteria.iter().all(|c| c.matches(annotations)),
            Self::Where(filter) => filter(annotations),
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All(criteria) => f.debug_tuple("All").field(criteria).finish(),
            Self::Where(_) => f.write_str("Where(<fn>)"),
        }
    }
}

impl From<Criterion> for Query {
    fn from(criterion: Criterion) -> Self {
        Self::All(vec![criterion])
    }
}

impl From<Vec<Criterion>> for Query {
    fn from(criteria: Vec<Criterion>) -> Self {
        Self::All(criteria)
    }
}

impl From<&str> for Query {
    fn from(name: &str) -> Self {
        Criterion::from(name).into()
    }
}

impl From<String> for Query {
    fn from(name: String) -> Self {
        Criterion::from(name).into()
    }
}

impl From<AnnotationMap> for Query {
    fn from(map: AnnotationMap) -> Self {
        Criterion::from(map).into()
    }
}

impl<const N: usize> From<[&str; N]> for Query {
    fn from(names: [&str; N]) -> Self {
        Self::All(names.into_iter().map(Criterion::from).collect())
    }
}

impl FromIterator<Criterion> for Query {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        Self::All(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> AnnotationMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_has_ignores_value() {
        let annotations = map(json!({"index": false, "label": null}));
        assert!(Criterion::has("index").matches(&annotations));
        assert!(Criterion::has("label").matches(&annotations));
        assert!(!Criterion::has("name").matches(&annotations));
    }

    #[test]
    fn test_equals_requires_every_key() {
        let annotations = map(json!({"name": "foo"}));
        assert!(Criterion::from(map(json!({"name": "foo"}))).matches(&annotations));
        assert!(!Criterion::from(map(json!({"name": "foo", "class": 2000}))).matches(&annotations));
        assert!(!Criterion::equals("name", "bar").matches(&annotations));
    }

    #[test]
    fn test_equals_distinguishes_types() {
        let annotations = map(json!({"index": true, "order": 1}));
        assert!(Criterion::equals("index", true).matches(&annotations));
        assert!(!Criterion::equals("index", "true").matches(&annotations));
        assert!(!Criterion::equals("order", "1").matches(&annotations));
        assert!(!Criterion::equals("order", 2).matches(&annotations));
    }

    #[test]
    fn test_equals_compares_numbers_by_value() {
        let annotations = map(json!({"weight": 2.0, "order": 1, "id": u64::MAX}));
        assert!(Criterion::equals("weight", 2).matches(&annotations));
        assert!(Criterion::equals("weight", parse_value("2")).matches(&annotations));
        assert!(Criterion::equals("order", 1.0).matches(&annotations));
        assert!(Criterion::equals("id", u64::MAX).matches(&annotations));
        assert!(!Criterion::equals("id", u64::MAX - 1).matches(&annotations));
        assert!(!Criterion::equals("weight", "2").matches(&annotations));
    }

    #[test]
    fn test_query_never_matches_missing_annotations() {
        let called = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = called.clone();
        let query = Query::filter(move |_| {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
            true
        });
        assert!(!query.matches(None));
        assert!(!called.load(std::sync::atomic::Ordering::SeqCst));

        assert!(!Query::new().matches(None));
        assert!(Query::new().matches(Some(&AnnotationMap::new())));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("2000"), json!(2000));
        assert_eq!(parse_value("Blog"), json!("Blog"));
        assert_eq!(parse_value("\"2000\""), json!("2000"));
    }

    #[test]
    fn test_query_and() {
        let query = Query::from("label").and(Criterion::equals("index", true));
        assert!(query.matches(Some(&map(json!({"label": "Blog", "index": true})))));
        assert!(!query.matches(Some(&map(json!({"label": "Blog"})))));
    }
}
