//! Route annotation subsystem.
//!
//! # Data Flow
//! ```text
//! annotate(path, values)
//!     → store.rs (path → AnnotationMap, shallow merge)
//!
//! find_all(query)
//!     → routing::RouteSource::descriptors() (host table, any shape)
//!     → store.rs lookup by literal path
//!     → predicate.rs (criteria AND, or filter fn)
//!     → matches.rs (group by method, registration order)
//! ```
//!
//! # Design Decisions
//! - Annotations attach to paths; every method under a path shares them
//! - Pattern paths can never be annotated or matched
//! - A query matching nothing returns an empty `RouteMatches`

pub mod index;
pub mod matches;
pub mod predicate;
pub mod store;

pub use index::{extend, AnnotateExt, Annotated};
pub use matches::RouteMatches;
pub use predicate::{Criterion, Query};
pub use store::AnnotationStore;

/// Annotation name → value.
pub type AnnotationMap = serde_json::Map<String, serde_json::Value>;
