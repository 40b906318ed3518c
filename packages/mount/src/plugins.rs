//! Serves plugins gathered from every module in the environment.
//!
//! Unlike the module-scoped mounts, paths here are not prefixed with a module
//! name. A plugin path is looked up in each module in turn.

use std::path::PathBuf;

use fileserve_core::{Error, Request};

use crate::mount::Mount;

/// Merges the plugin directories of all modules into one tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginsMount {
    name: String,
}

impl PluginsMount {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Mount for PluginsMount {
    fn name(&self) -> &str {
        &self.name
    }

    /// The plugin from the first module (in environment order) that has it.
    fn find(&self, path: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error> {
        Ok(request
            .environment()
            .modules()
            .into_iter()
            .find_map(|module| module.plugin(path)))
    }

    /// Every module's plugin directory.
    ///
    /// The only supported search returns whole directories, so `path` is not
    /// consulted.
    fn search(&self, _path: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error> {
        let directories: Vec<PathBuf> = request
            .environment()
            .modules()
            .into_iter()
            .filter_map(|module| module.plugin_directory())
            .collect();

        if directories.is_empty() {
            Ok(None)
        } else {
            Ok(Some(directories))
        }
    }
}
