//! Read-only admin API over the annotated route table.
//!
//! # Endpoints
//! - `GET /admin/status`: version, route and annotation counts
//! - `GET /admin/annotations`: every annotated path with its map
//! - `GET /admin/routes?has=NAME&KEY=VALUE`: `find_all` grouped by method

pub mod auth;
pub mod handlers;
pub mod server;

use std::sync::Arc;

use arc_swap::{ArcSwap, ArcSwapOption};
use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::annotations::Annotated;
use crate::routing::RouteTable;

use self::auth::admin_auth_middleware;
use self::handlers::*;

pub use server::AdminServer;

/// Shared admin state. Index and API key are each swapped whole on reload.
#[derive(Clone)]
pub struct AdminState {
    pub index: Arc<ArcSwap<Annotated<RouteTable>>>,
    pub api_key: Arc<ArcSwapOption<String>>,
}

impl AdminState {
    pub fn new(index: Annotated<RouteTable>, api_key: Option<String>) -> Self {
        Self {
            index: Arc::new(ArcSwap::from_pointee(index)),
            api_key: Arc::new(ArcSwapOption::new(api_key.map(Arc::new))),
        }
    }
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/annotations", get(get_annotations))
        .route("/admin/routes", get(get_routes))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
