//! Hot reload of the annotation config.
//!
//! # Responsibilities
//! - Watch the directory holding the config file, not the file itself, so
//!   editors that save by renaming a temp file over it keep triggering reloads
//! - Rebuild the annotated table off the serving path
//! - Hand finished `Reload`s to the admin server
//!
//! # Design Decisions
//! - Only modify/create events naming the config file are considered
//! - A config that fails to load or build is logged and dropped; the
//!   previous table stays live

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::annotations::Annotated;
use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::AnnotateConfig;
use crate::routing::RouteTable;

/// A rebuilt annotated table plus the settings swapped with it.
#[derive(Debug, Clone)]
pub struct Reload {
    pub index: Annotated<RouteTable>,
    pub api_key: Option<String>,
}

impl Reload {
    pub fn from_config(config: &AnnotateConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            index: Annotated::from_config(config)?,
            api_key: config.admin.api_key.clone(),
        })
    }

    /// Load, validate and build from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::from_config(&load_config(path)?)
    }
}

/// Watches one config file and emits a `Reload` per accepted change.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<Reload>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end for rebuilt tables.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<Reload>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. Reloads stop when the returned handle is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name: OsString = self
            .path
            .file_name()
            .ok_or_else(|| notify::Error::generic("config path has no file name"))?
            .to_os_string();
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let Self { path, update_tx } = self;
        let watched = path.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches_config(&event, &file_name) => {
                    tracing::debug!(kind = ?event.kind, path = ?watched, "Config file changed");
                    match Reload::load(&watched) {
                        Ok(reload) => {
                            let _ = update_tx.send(reload);
                        }
                        Err(e) => {
                            tracing::warn!(path = ?watched, error = %e, "Ignoring config change");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = ?path, dir = ?dir, "Watching config for changes");
        Ok(watcher)
    }
}

/// Whether `event` creates or modifies the file called `file_name`.
fn touches_config(event: &Event, file_name: &OsStr) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}
