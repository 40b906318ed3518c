//! Mount configuration.
//!
//! Mount configurations are JSON objects tagged by type:
//! ```json
//! {"type": "scripts"}
//! {"type": "modules"}
//! {"type": "tasks"}
//! {"type": "plugins"}
//! {"type": "file", "path": "/srv/files/%h"}
//! ```
//!
//! A file server configuration maps mount names to those objects:
//! ```json
//! {"mounts": {"site": {"type": "file", "path": "/srv/site"}}}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fileserve_core::Error;

use crate::file::FileMount;
use crate::modules::{ModulesMount, TasksMount};
use crate::mount::MountKind;
use crate::plugins::PluginsMount;
use crate::scripts::ScriptMount;

/// Configuration for a single mount point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MountConfig {
    /// Scripts inside modules
    Scripts,
    /// Plain files inside modules
    Modules,
    /// Task files inside modules
    Tasks,
    /// Plugin directories of every module
    Plugins,
    /// A directory on disk, possibly per node
    File { path: String },
}

impl MountConfig {
    /// Build the mount this configuration describes.
    pub fn build(&self, name: &str) -> Result<MountKind, Error> {
        let mount: MountKind = match self {
            MountConfig::Scripts => ScriptMount::new(name).into(),
            MountConfig::Modules => ModulesMount::new(name).into(),
            MountConfig::Tasks => TasksMount::new(name).into(),
            MountConfig::Plugins => PluginsMount::new(name).into(),
            MountConfig::File { path } => FileMount::new(name, path.clone())?.into(),
        };
        Ok(mount)
    }
}

/// The whole file server configuration: named mounts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileServerConfig {
    #[serde(default)]
    pub mounts: BTreeMap<String, MountConfig>,
}

impl FileServerConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}
