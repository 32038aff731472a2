//! Shared fixtures for integration tests.

use axum::http::Method;
use route_annotate::{extend, AnnotationMap, Annotated, FlatTable, RoutePath, StackRoute, StackTable};
use serde_json::Value;

/// Object literal → annotation map.
pub fn map(value: Value) -> AnnotationMap {
    value.as_object().cloned().expect("annotation literal must be an object")
}

/// GET+POST `/blog`, GET `/blog/:post`, GET pattern `^/files/.*$`, flat shape.
#[allow(dead_code)]
pub fn flat_blog() -> Annotated<FlatTable> {
    let mut table = FlatTable::new();
    table
        .route(Method::GET, "/blog")
        .route(Method::POST, "/blog")
        .route(Method::GET, "/blog/:post")
        .route(Method::GET, RoutePath::pattern("^/files/.*$"));
    extend(table)
}

/// Same routes as [`flat_blog`] plus an all-methods `/health`, stack shape.
#[allow(dead_code)]
pub fn stack_blog() -> Annotated<StackTable> {
    let mut table = StackTable::new();
    table
        .middleware("query")
        .route(StackRoute::new("/blog").method(Method::GET).method(Method::POST))
        .route(StackRoute::new("/blog/:post").method(Method::GET))
        .route(StackRoute::new(RoutePath::pattern("^/files/.*$")).method(Method::GET))
        .route(StackRoute::new("/health").all());
    extend(table)
}

/// Paths of `routes`, in order.
#[allow(dead_code)]
pub fn paths(routes: Option<&[route_annotate::RouteDescriptor]>) -> Vec<String> {
    routes
        .unwrap_or_default()
        .iter()
        .map(|route| route.path.to_string())
        .collect()
}
