//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! annotation service. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

use crate::annotations::AnnotationMap;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AnnotateConfig {
    /// Admin API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Host route table, in either supported shape.
    pub routes: RouteTableConfig,

    /// Annotations applied to route paths, in order.
    pub annotations: Vec<AnnotationConfig>,
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Bind address (e.g., "127.0.0.1:8081").
    pub bind_address: String,

    /// Bearer token required by the admin API. Open when unset.
    pub api_key: Option<String>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8081".to_string(),
            api_key: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_filter: String,

    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Metrics listener address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "route_annotate=info,tower_http=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9091".to_string(),
        }
    }
}

/// Host route table.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum RouteTableConfig {
    /// Method-keyed routes, each carrying its own path.
    Flat {
        #[serde(default)]
        routes: Vec<FlatRouteConfig>,
    },
    /// Ordered router stack.
    Stack {
        #[serde(default)]
        layers: Vec<LayerConfig>,
    },
}

impl Default for RouteTableConfig {
    fn default() -> Self {
        Self::Flat { routes: Vec::new() }
    }
}

/// Route of a flat table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlatRouteConfig {
    /// HTTP method name, case-insensitive.
    pub method: String,

    /// Literal path, e.g. "/blog/:post".
    pub path: Option<String>,

    /// Pattern source, e.g. "^/files/.*$". Exclusive with `path`.
    pub pattern: Option<String>,

    /// Path parameter names. Derived from `:name` segments when unset.
    pub keys: Option<Vec<String>>,

    /// Handler label.
    pub name: Option<String>,
}

/// Layer of a stack table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayerConfig {
    /// Layer label (middleware or handler name).
    pub name: Option<String>,

    /// Wrapped route; middleware layers have none.
    pub route: Option<StackRouteConfig>,
}

/// Route wrapped by a stack layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StackRouteConfig {
    pub path: Option<String>,
    pub pattern: Option<String>,
    pub keys: Option<Vec<String>>,

    /// Handled methods. Empty means all methods.
    #[serde(default)]
    pub methods: Vec<String>,
}

/// Annotations for one route path.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnnotationConfig {
    pub path: String,

    #[serde(default)]
    pub values: AnnotationMap,
}
