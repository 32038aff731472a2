//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AnnotateConfig (validated, immutable)
//!     → Annotated::<RouteTable>::from_config
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → watcher.rs builds a Reload (annotated table + api key)
//!     → admin server swaps both in atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AdminConfig, AnnotateConfig, AnnotationConfig, ObservabilityConfig, RouteTableConfig};
pub use validation::ValidationError;
pub use watcher::{ConfigWatcher, Reload};
