//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every route names exactly one of `path` / `pattern`
//! - Method names are valid HTTP methods
//! - Addresses parse, annotation paths are non-empty
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AnnotateConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{AnnotateConfig, RouteTableConfig};
use crate::routing::table::parse_method;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{location}: route needs exactly one of `path` or `pattern`")]
    AmbiguousPath { location: String },

    #[error("{location}: invalid HTTP method `{method}`")]
    InvalidMethod { location: String, method: String },

    #[error("annotations[{index}]: path must not be empty")]
    EmptyAnnotationPath { index: usize },

    #[error("{field}: invalid socket address `{value}`")]
    InvalidAddress { field: &'static str, value: String },
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &AnnotateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    match &config.routes {
        RouteTableConfig::Flat { routes } => {
            for (i, route) in routes.iter().enumerate() {
                let location = format!("routes.routes[{}]", i);
                check_path(&mut errors, &location, &route.path, &route.pattern);
                check_method(&mut errors, &location, &route.method);
            }
        }
        RouteTableConfig::Stack { layers } => {
            for (i, layer) in layers.iter().enumerate() {
                let Some(route) = &layer.route else {
                    continue;
                };
                let location = format!("routes.layers[{}].route", i);
                check_path(&mut errors, &location, &route.path, &route.pattern);
                for method in &route.methods {
                    check_method(&mut errors, &location, method);
                }
            }
        }
    }

    for (index, entry) in config.annotations.iter().enumerate() {
        if entry.path.is_empty() {
            errors.push(ValidationError::EmptyAnnotationPath { index });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_path(
    errors: &mut Vec<ValidationError>,
    location: &str,
    path: &Option<String>,
    pattern: &Option<String>,
) {
    if path.is_some() == pattern.is_some() {
        errors.push(ValidationError::AmbiguousPath {
            location: location.to_string(),
        });
    }
}

fn check_method(errors: &mut Vec<ValidationError>, location: &str, method: &str) {
    if parse_method(method).is_err() {
        errors.push(ValidationError::InvalidMethod {
            location: location.to_string(),
            method: method.to_string(),
        });
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
