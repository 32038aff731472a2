//! Host route table shapes.
//!
//! # Responsibilities
//! - `FlatTable`: method → ordered routes, each carrying its own path
//! - `StackTable`: ordered layers, each optionally wrapping a route with
//!   per-method handlers (or one method-less handler for "all methods")
//! - `RouteTable`: either shape, built from configuration
//!
//! # Design Decisions
//! - Registration order is preserved within each method
//! - A stack route reports each distinct handler method once
//! - Middleware layers (no route) are invisible to the index

use axum::http::Method;

use crate::config::schema::{FlatRouteConfig, LayerConfig, RouteTableConfig};
use crate::error::{Error, Result};
use crate::routing::{RouteDescriptor, RoutePath, RouteSource, KNOWN_METHODS};

/// Method-keyed route table.
#[derive(Debug, Clone, Default)]
pub struct FlatTable {
    buckets: Vec<(Method, Vec<RouteDescriptor>)>,
}

impl FlatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route to its method bucket.
    pub fn insert(&mut self, route: RouteDescriptor) -> &mut Self {
        match self.buckets.iter_mut().find(|(m, _)| *m == route.method) {
            Some((_, routes)) => routes.push(route),
            None => self.buckets.push((route.method.clone(), vec![route])),
        }
        self
    }

    /// Register `path` under `method`.
    pub fn route(&mut self, method: Method, path: impl Into<RoutePath>) -> &mut Self {
        self.insert(RouteDescriptor::new(method, path))
    }

    /// Routes registered under `method`.
    pub fn routes(&self, method: &Method) -> &[RouteDescriptor] {
        self.buckets
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, routes)| routes.as_slice())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, routes)| routes.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteSource for FlatTable {
    fn descriptors(&self) -> Vec<RouteDescriptor> {
        self.buckets
            .iter()
            .flat_map(|(_, routes)| routes.iter().cloned())
            .collect()
    }
}

/// Handler entry of a stack route. `None` means the route accepts all methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackHandler {
    pub method: Option<Method>,
}

/// Route wrapped by a stack layer.
#[derive(Debug, Clone)]
pub struct StackRoute {
    pub path: RoutePath,
    pub keys: Vec<String>,
    pub handlers: Vec<StackHandler>,
}

impl StackRoute {
    pub fn new(path: impl Into<RoutePath>) -> Self {
        let path = path.into();
        let keys = path.as_literal().map(super::param_keys).unwrap_or_default();
        Self {
            path,
            keys,
            handlers: Vec::new(),
        }
    }

    /// Add a handler for one method.
    pub fn method(mut self, method: Method) -> Self {
        self.handlers.push(StackHandler {
            method: Some(method),
        });
        self
    }

    /// Add a method-less handler.
    pub fn all(mut self) -> Self {
        self.handlers.push(StackHandler { method: None });
        self
    }

    /// Distinct methods this route answers, in first-seen order.
    fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<Method> = Vec::new();
        for handler in &self.handlers {
            let expanded = match &handler.method {
                Some(method) => std::slice::from_ref(method),
                None => &KNOWN_METHODS[..],
            };
            for method in expanded {
                if !methods.contains(method) {
                    methods.push(method.clone());
                }
            }
        }
        methods
    }
}

/// One entry of a router stack.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub name: Option<String>,
    pub route: Option<StackRoute>,
}

/// Stack-based router table.
#[derive(Debug, Clone, Default)]
pub struct StackTable {
    layers: Vec<Layer>,
}

impl StackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// Push a layer wrapping `route`.
    pub fn route(&mut self, route: StackRoute) -> &mut Self {
        self.push(Layer {
            name: None,
            route: Some(route),
        })
    }

    /// Push a layer with no route, e.g. a middleware.
    pub fn middleware(&mut self, name: impl Into<String>) -> &mut Self {
        self.push(Layer {
            name: Some(name.into()),
            route: None,
        })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl RouteSource for StackTable {
    fn descriptors(&self) -> Vec<RouteDescriptor> {
        let mut descriptors = Vec::new();
        for layer in &self.layers {
            let Some(route) = &layer.route else {
                continue;
            };
            for method in route.methods() {
                descriptors.push(RouteDescriptor {
                    method,
                    path: route.path.clone(),
                    keys: route.keys.clone(),
                    name: layer.name.clone(),
                });
            }
        }
        descriptors
    }
}

/// A route table of either shape.
#[derive(Debug, Clone)]
pub enum RouteTable {
    Flat(FlatTable),
    Stack(StackTable),
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::Flat(FlatTable::new())
    }
}

impl RouteTable {
    /// Build a table from validated configuration.
    pub fn from_config(config: &RouteTableConfig) -> Result<Self> {
        match config {
            RouteTableConfig::Flat { routes } => {
                let mut table = FlatTable::new();
                for route in routes {
                    table.insert(flat_route(route)?);
                }
                Ok(Self::Flat(table))
            }
            RouteTableConfig::Stack { layers } => {
                let mut table = StackTable::new();
                for layer in layers {
                    table.push(stack_layer(layer)?);
                }
                Ok(Self::Stack(table))
            }
        }
    }

    /// Number of descriptors the table exposes.
    pub fn len(&self) -> usize {
        self.descriptors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteSource for RouteTable {
    fn descriptors(&self) -> Vec<RouteDescriptor> {
        match self {
            Self::Flat(table) => table.descriptors(),
            Self::Stack(table) => table.descriptors(),
        }
    }
}

fn flat_route(config: &FlatRouteConfig) -> Result<RouteDescriptor> {
    let method = parse_method(&config.method)?;
    let mut route = RouteDescriptor::new(method, config_path(&config.path, &config.pattern)?);
    if let Some(keys) = &config.keys {
        route.keys = keys.clone();
    }
    if let Some(name) = &config.name {
        route.name = Some(name.clone());
    }
    Ok(route)
}

fn stack_layer(config: &LayerConfig) -> Result<Layer> {
    let route = match &config.route {
        Some(route_config) => {
            let mut route = StackRoute::new(config_path(&route_config.path, &route_config.pattern)?);
            if let Some(keys) = &route_config.keys {
                route.keys = keys.clone();
            }
            if route_config.methods.is_empty() {
                route = route.all();
            }
            for method in &route_config.methods {
                route = route.method(parse_method(method)?);
            }
            Some(route)
        }
        None => None,
    };
    Ok(Layer {
        name: config.name.clone(),
        route,
    })
}

fn config_path(path: &Option<String>, pattern: &Option<String>) -> Result<RoutePath> {
    match (path, pattern) {
        (Some(path), None) => Ok(RoutePath::literal(path.as_str())),
        (None, Some(pattern)) => Ok(RoutePath::pattern(pattern.as_str())),
        _ => Err(Error::InvalidArgument(
            "route needs exactly one of `path` or `pattern`".to_string(),
        )),
    }
}

/// Parse a method name case-insensitively (`get`, `GET`).
pub fn parse_method(name: &str) -> Result<Method> {
    let upper = name.trim().to_ascii_uppercase();
    if upper.is_empty() {
        return Err(Error::InvalidArgument("empty HTTP method".to_string()));
    }
    Method::from_bytes(upper.as_bytes())
        .map_err(|_| Error::InvalidArgument(format!("invalid HTTP method `{}`", name)))
}
