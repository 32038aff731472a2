//! Annotated route tables.
//!
//! # Responsibilities
//! - Attach an annotation store to a host route table
//! - `annotate`: merge annotations into a path's map
//! - `find_all`: select routes by annotations, grouped by method
//!
//! # Design Decisions
//! - Extension is a capability: `AnnotateExt` on an already-annotated table
//!   is the identity, so extending twice keeps existing annotations
//! - Annotations are keyed by path, not by (method, path)
//! - `find_all` is read-only over both the store and the host table

use std::collections::HashSet;

use crate::annotations::{AnnotationMap, AnnotationStore, Query, RouteMatches};
use crate::config::schema::AnnotateConfig;
use crate::config::ConfigError;
use crate::error::Result;
use crate::observability::metrics;
use crate::routing::{FlatTable, RoutePath, RouteSource, RouteTable, StackTable};

/// A host route table extended with annotations.
#[derive(Debug, Clone, Default)]
pub struct Annotated<H> {
    host: H,
    store: AnnotationStore,
}

impl<H> Annotated<H> {
    /// Wrap `host` with an empty annotation store.
    pub fn new(host: H) -> Self {
        Self {
            host,
            store: AnnotationStore::new(),
        }
    }

    /// Merge `values` into the annotations of `path`.
    ///
    /// Fails with `Error::InvalidArgument` for pattern paths.
    pub fn annotate(&mut self, path: impl Into<RoutePath>, values: AnnotationMap) -> Result<&mut Self> {
        let path = path.into();
        let keys = values.len();
        let merged = self.store.merge(&path, values).inspect_err(|e| {
            tracing::debug!(path = %path, error = %e, "Rejected annotation");
        })?;

        tracing::debug!(path = %path, keys, total_keys = merged.len(), "Route annotated");
        metrics::record_annotation();
        Ok(self)
    }

    /// Make `path` annotated without adding any key.
    pub fn declare(&mut self, path: impl Into<RoutePath>) -> Result<&mut Self> {
        self.annotate(path, AnnotationMap::new())
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.store
    }

    /// Annotations stored for a literal path.
    pub fn annotations_for(&self, path: &str) -> Option<&AnnotationMap> {
        self.store.get(path)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Drop the annotations and return the host table.
    pub fn into_inner(self) -> H {
        self.host
    }
}

impl<H: RouteSource> Annotated<H> {
    /// Routes whose annotations satisfy `query`, grouped by method in
    /// registration order.
    pub fn find_all(&self, query: impl Into<Query>) -> RouteMatches {
        let query = query.into();
        let mut matches = RouteMatches::new();

        for route in self.host.descriptors() {
            if query.matches(self.store.lookup(&route.path)) {
                matches.push(route);
            }
        }

        tracing::debug!(query = ?query, methods = matches.len(), routes = matches.total(), "find_all");
        metrics::record_query(matches.total());
        matches
    }

    /// Annotated paths no route of the host registers.
    pub fn orphan_paths(&self) -> Vec<String> {
        let registered: HashSet<String> = self
            .host
            .descriptors()
            .into_iter()
            .filter_map(|route| route.path.as_literal().map(str::to_string))
            .collect();
        let mut orphans: Vec<String> = self
            .store
            .paths()
            .filter(|path| !registered.contains(*path))
            .map(str::to_string)
            .collect();
        orphans.sort();
        orphans
    }
}

impl Annotated<RouteTable> {
    /// Build the route table and apply every configured annotation.
    pub fn from_config(config: &AnnotateConfig) -> Result<Self, ConfigError> {
        let table = RouteTable::from_config(&config.routes)?;
        let mut annotated = Self::new(table);
        for entry in &config.annotations {
            annotated.annotate(entry.path.as_str(), entry.values.clone())?;
        }

        for path in annotated.orphan_paths() {
            tracing::warn!(path = %path, "Annotated path matches no registered route");
        }
        Ok(annotated)
    }
}

/// Host tables that can be extended with annotations.
pub trait AnnotateExt: Sized {
    type Output;

    /// Extend with an empty annotation store. Already-annotated tables are
    /// returned unchanged.
    fn annotated(self) -> Self::Output;
}

impl<H> AnnotateExt for Annotated<H> {
    type Output = Self;

    fn annotated(self) -> Self {
        self
    }
}

macro_rules! impl_annotate_ext {
    ($($host:ty),*) => {
        $(
            impl AnnotateExt for $host {
                type Output = Annotated<$host>;

                fn annotated(self) -> Self::Output {
                    Annotated::new(self)
                }
            }
        )*
    };
}

impl_annotate_ext!(FlatTable, StackTable, RouteTable);

/// Extend `host` with annotations; a no-op for annotated tables.
pub fn extend<H: AnnotateExt>(host: H) -> H::Output {
    host.annotated()
}
