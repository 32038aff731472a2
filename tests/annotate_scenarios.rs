//! End-to-end annotate / find_all behavior over both table shapes.

use axum::http::Method;
use route_annotate::routing::KNOWN_METHODS;
use route_annotate::{extend, Annotated, Criterion, Error, Query, RoutePath, RouteSource};
use serde_json::json;

mod common;
use common::{flat_blog, map, paths, stack_blog};

fn annotate_blog<H>(app: &mut Annotated<H>) {
    app.annotate("/blog", map(json!({"label": "Blog", "index": true})))
        .unwrap()
        .annotate("/blog/:post", map(json!({"label": "Blog Post"})))
        .unwrap();
}

#[test]
fn test_blog_label_matches_get_and_post() {
    let mut app = flat_blog();
    annotate_blog(&mut app);

    let found = app.find_all(map(json!({"label": "Blog"})));
    assert_eq!(found.len(), 2);
    assert_eq!(paths(found.get(&Method::GET)), vec!["/blog"]);
    assert_eq!(paths(found.get(&Method::POST)), vec!["/blog"]);
}

#[test]
fn test_blog_index_presence() {
    let mut app = flat_blog();
    annotate_blog(&mut app);

    let found = app.find_all("index");
    assert_eq!(paths(found.get(&Method::GET)), vec!["/blog"]);
    assert_eq!(paths(found.get(&Method::POST)), vec!["/blog"]);
}

#[test]
fn test_presence_keeps_registration_order() {
    let mut app = flat_blog();
    annotate_blog(&mut app);

    let found = app.find_all("label");
    assert_eq!(paths(found.get(&Method::GET)), vec!["/blog", "/blog/:post"]);
    assert_eq!(found.total(), 3);
}

#[test]
fn test_criteria_are_anded() {
    let mut app = flat_blog();
    annotate_blog(&mut app);

    let found = app.find_all(vec![Criterion::has("label"), Criterion::equals("index", true)]);
    assert_eq!(found.total(), 2);

    let found = app.find_all(["label", "missing"]);
    assert!(found.is_empty());
}

#[test]
fn test_filter_function() {
    let mut app = flat_blog();
    annotate_blog(&mut app);

    let found = app.find_all(Query::filter(|annotations| {
        annotations
            .get("label")
            .and_then(|label| label.as_str())
            .is_some_and(|label| label.ends_with("Post"))
    }));
    assert_eq!(found.len(), 1);
    assert_eq!(paths(found.get(&Method::GET)), vec!["/blog/:post"]);
}

#[test]
fn test_filter_never_sees_unannotated_routes() {
    let mut app = flat_blog();
    app.declare("/blog").unwrap();

    let found = app.find_all(Query::filter(|annotations| annotations.is_empty()));
    assert_eq!(found.total(), 2);
    assert!(paths(found.get(&Method::GET)).iter().all(|p| p == "/blog"));
}

#[test]
fn test_no_annotations_never_match() {
    let app = flat_blog();
    assert!(app.find_all("label").is_empty());
    assert!(app.find_all(Query::new()).is_empty());
    assert!(app.find_all(Query::filter(|_| true)).is_empty());
}

#[test]
fn test_pattern_route_is_never_returned() {
    let mut app = flat_blog();
    annotate_blog(&mut app);

    let err = app
        .annotate(RoutePath::pattern("^/files/.*$"), map(json!({"label": "Files"})))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));

    let found = app.find_all(Query::filter(|_| true));
    assert!(found.iter().all(|(_, routes)| routes.iter().all(|r| !r.path.is_pattern())));
    assert!(app.annotations_for("^/files/.*$").is_none());
}

#[test]
fn test_annotations_merge_right_biased() {
    let mut app = flat_blog();
    app.annotate("/blog", map(json!({"label": "Blog", "index": true}))).unwrap();
    app.annotate("/blog", map(json!({"label": "Journal", "order": 2}))).unwrap();

    assert_eq!(
        app.annotations_for("/blog"),
        Some(&map(json!({"label": "Journal", "index": true, "order": 2})))
    );
}

#[test]
fn test_find_all_is_repeatable_and_read_only() {
    let mut app = flat_blog();
    annotate_blog(&mut app);
    let before_routes = app.host().descriptors();
    let before_annotations = app.annotations().clone();

    let first = app.find_all("label");
    let second = app.find_all("label");

    assert_eq!(first, second);
    assert_eq!(app.host().descriptors(), before_routes);
    assert_eq!(app.annotations(), &before_annotations);
}

#[test]
fn test_stack_shape_matches_flat_shape() {
    let mut flat = flat_blog();
    let mut stack = stack_blog();
    annotate_blog(&mut flat);
    annotate_blog(&mut stack);

    let query = || Query::from(map(json!({"label": "Blog"})));
    let flat_found = flat.find_all(query());
    let stack_found = stack.find_all(query());

    assert_eq!(paths(flat_found.get(&Method::GET)), paths(stack_found.get(&Method::GET)));
    assert_eq!(paths(flat_found.get(&Method::POST)), paths(stack_found.get(&Method::POST)));
}

#[test]
fn test_stack_all_methods_route_reported_under_every_method() {
    let mut app = stack_blog();
    app.annotate("/health", map(json!({"public": true}))).unwrap();

    let found = app.find_all("public");
    assert_eq!(found.len(), KNOWN_METHODS.len());
    for method in KNOWN_METHODS.iter() {
        assert_eq!(paths(found.get(method)), vec!["/health"], "method {}", method);
    }
}

#[test]
fn test_extend_twice_keeps_annotations() {
    let mut app = flat_blog();
    annotate_blog(&mut app);

    let app = extend(extend(app));
    assert_eq!(app.find_all("index").total(), 2);
}
