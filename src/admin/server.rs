//! Admin HTTP server.
//!
//! # Responsibilities
//! - Serve the admin router on a bound listener
//! - Apply reloads by swapping the annotated table and the API key
//! - Stop on the shutdown broadcast

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};

use crate::admin::{setup_admin_router, AdminState};
use crate::annotations::Annotated;
use crate::config::Reload;
use crate::observability::metrics;
use crate::routing::RouteTable;

/// Admin API server.
pub struct AdminServer {
    state: AdminState,
}

impl AdminServer {
    /// Create a server exposing `index`.
    pub fn new(index: Annotated<RouteTable>, api_key: Option<String>) -> Self {
        Self {
            state: AdminState::new(index, api_key),
        }
    }

    /// Shared state, e.g. for inspecting the live index.
    pub fn state(&self) -> &AdminState {
        &self.state
    }

    /// Run until `shutdown` fires, applying reloads received on `config_updates`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<Reload>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Admin server starting");

        let state = self.state.clone();
        let mut reload_shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = config_updates.recv() => match update {
                        Some(reload) => apply_reload(&state, reload),
                        None => break,
                    },
                    _ = reload_shutdown.recv() => break,
                }
            }
        });

        let app = setup_admin_router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("Admin server stopped");
        Ok(())
    }
}

fn apply_reload(state: &AdminState, reload: Reload) {
    let Reload { index, api_key } = reload;
    tracing::info!(
        routes = index.host().len(),
        annotated_paths = index.annotations().len(),
        "Annotations reloaded"
    );
    state.index.store(Arc::new(index));

    let key_changed = state.api_key.load().as_deref() != api_key.as_ref();
    if key_changed {
        tracing::info!(enabled = api_key.is_some(), "Admin API key replaced");
        state.api_key.store(api_key.map(Arc::new));
    }
    metrics::record_reload();
}
