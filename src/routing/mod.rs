//! Route table adapters.
//!
//! # Data Flow
//! ```text
//! Host route table (one of several shapes)
//!     → table.rs (FlatTable: method → routes, StackTable: ordered layers)
//!     → RouteSource::descriptors()
//!     → Vec<RouteDescriptor> in registration order
//!     → annotations::Annotated::find_all (filtering, written once)
//! ```
//!
//! # Design Decisions
//! - One uniform descriptor, one adapter per host shape
//! - Descriptors carry framework fields (keys, name) but never interpret them
//! - Adapters are read-only views; the index never mutates the host table

pub mod descriptor;
pub mod table;

pub use descriptor::{param_keys, RouteDescriptor, RoutePath};
pub use table::{FlatTable, Layer, RouteTable, StackHandler, StackRoute, StackTable};

use axum::http::Method;

/// HTTP methods an all-methods route is reported under.
pub static KNOWN_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
    Method::CONNECT,
    Method::TRACE,
];

/// A host route table the annotation index can read.
pub trait RouteSource {
    /// Every registered route, in registration order.
    fn descriptors(&self) -> Vec<RouteDescriptor>;
}

impl<T: RouteSource + ?Sized> RouteSource for &T {
    fn descriptors(&self) -> Vec<RouteDescriptor> {
        (**self).descriptors()
    }
}

impl<T: RouteSource + ?Sized> RouteSource for Box<T> {
    fn descriptors(&self) -> Vec<RouteDescriptor> {
        (**self).descriptors()
    }
}
