//! Route annotations for web route tables.
//!
//! Attach key/value annotations to route paths and query the registered
//! routes by those annotations, whatever shape the host route table has.
//!
//! ```
//! use axum::http::Method;
//! use route_annotate::{extend, FlatTable};
//! use serde_json::json;
//!
//! let mut table = FlatTable::new();
//! table.route(Method::GET, "/blog").route(Method::GET, "/blog/:post");
//!
//! let mut app = extend(table);
//! app.annotate("/blog", json!({"label": "Blog"}).as_object().cloned().unwrap())
//!     .unwrap();
//!
//! let found = app.find_all("label");
//! assert_eq!(found.get(&Method::GET).unwrap().len(), 1);
//! ```

pub mod admin;
pub mod annotations;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use annotations::{extend, AnnotateExt, Annotated, AnnotationMap, Criterion, Query, RouteMatches};
pub use config::AnnotateConfig;
pub use error::Error;
pub use routing::{FlatTable, RouteDescriptor, RoutePath, RouteSource, RouteTable, StackRoute, StackTable};
