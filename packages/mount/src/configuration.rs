//! The mount registry: routes request keys to mounts.
//!
//! A request key has the form `<mount>/<path>`. The registry picks the mount
//! by name and hands it the rest of the key. The registry is built once at
//! startup and only read afterwards.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use fileserve_core::{Error, Request};

use crate::config::{FileServerConfig, MountConfig};
use crate::modules::{ModulesMount, TasksMount};
use crate::mount::{Mount, MountKind};
use crate::plugins::PluginsMount;
use crate::scripts::ScriptMount;

lazy_static! {
    static ref MOUNT_NAME: Regex = Regex::new(r"^[-\w]+$").unwrap();
    static ref REPEATED_SLASHES: Regex = Regex::new(r"/+").unwrap();
}

/// Name of the mount that module names fall back to.
pub const MODULES_MOUNT: &str = "modules";

/// A table of named mounts.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    mounts: BTreeMap<String, MountKind>,
}

impl Configuration {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the module-backed mounts every file server has.
    pub fn with_default_mounts() -> Self {
        let defaults: [MountKind; 4] = [
            ModulesMount::new(MODULES_MOUNT).into(),
            PluginsMount::new("plugins").into(),
            TasksMount::new("tasks").into(),
            ScriptMount::new("scripts").into(),
        ];

        let mut configuration = Self::new();
        for mount in defaults {
            configuration.mounts.insert(mount.name().to_string(), mount);
        }
        configuration
    }

    /// The default mounts plus everything in `config`.
    ///
    /// Configured mounts replace defaults of the same name.
    pub fn from_config(config: &FileServerConfig) -> Result<Self, Error> {
        let mut configuration = Self::with_default_mounts();
        for (name, mount) in &config.mounts {
            configuration.add_mount(name, mount)?;
        }
        Ok(configuration)
    }

    /// Read a configuration file and build the registry from it.
    pub fn load(path: &Path) -> Result<Self, Error> {
        Self::from_config(&FileServerConfig::load(path)?)
    }

    /// Build and register a mount, replacing any mount of the same name.
    pub fn add_mount(&mut self, name: &str, config: &MountConfig) -> Result<(), Error> {
        validate_mount_name(name)?;
        let mount = config.build(name)?;
        tracing::debug!(mount = name, kind = mount.kind(), "Adding mount");
        self.mounts.insert(name.to_string(), mount);
        Ok(())
    }

    /// Register an already built mount under its own name.
    pub fn insert(&mut self, mount: MountKind) -> Result<Option<MountKind>, Error> {
        validate_mount_name(mount.name())?;
        Ok(self.mounts.insert(mount.name().to_string(), mount))
    }

    pub fn mount(&self, name: &str) -> Option<&MountKind> {
        self.mounts.get(name)
    }

    /// All mounts, sorted by name.
    pub fn mounts(&self) -> impl Iterator<Item = (&str, &MountKind)> {
        self.mounts.iter().map(|(name, mount)| (name.as_str(), mount))
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    /// Pick the mount for a request key and the path to hand it.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No mount is registered under that name.
    /// * `Ok(Some((mount, None)))` - The key addresses the mount itself.
    /// * `Ok(Some((mount, Some(path))))` - The mount and the path inside it.
    /// * `Err(Error::InvalidMount)` - The mount name is malformed.
    /// * `Err(Error::Usage)` - The path contains a `..` segment.
    ///
    /// A key whose first segment names a module rather than a mount is routed
    /// to the `modules` mount with the module name kept on the path.
    pub fn split_path(
        &self,
        key: &str,
        request: &dyn Request,
    ) -> Result<Option<(&MountKind, Option<String>)>, Error> {
        let key = key.strip_prefix('/').unwrap_or(key);
        let (mount_name, rest) = match key.split_once('/') {
            Some((mount_name, rest)) => (mount_name, Some(rest)),
            None => (key, None),
        };

        validate_mount_name(mount_name)?;

        let Some(mount) = self.find_mount(mount_name, request) else {
            return Ok(None);
        };

        let path = if mount.name() == MODULES_MOUNT && mount_name != MODULES_MOUNT {
            Some(format!("{}/{}", mount_name, rest.unwrap_or_default()))
        } else {
            rest.map(str::to_string)
        };

        let path = path
            .map(|p| {
                let collapsed = REPEATED_SLASHES.replace_all(&p, "/");
                collapsed.strip_prefix('/').unwrap_or(&collapsed).to_string()
            })
            .filter(|p| !p.is_empty());

        if let Some(p) = &path {
            if p.split('/').any(|segment| segment == "..") {
                return Err(Error::Usage {
                    message: format!("Invalid relative path '{}'", p),
                });
            }
        }

        Ok(Some((mount, path)))
    }

    fn find_mount(&self, mount_name: &str, request: &dyn Request) -> Option<&MountKind> {
        if let Some(mount) = self.mounts.get(mount_name) {
            return Some(mount);
        }

        let environment = request.environment();
        if environment.module(mount_name).is_none() {
            return None;
        }

        let mount = self.mounts.get(MODULES_MOUNT)?;
        tracing::warn!(
            module = mount_name,
            environment = environment.name(),
            "Accessing module '{}' as a mount is deprecated; use 'modules/{}' instead",
            mount_name,
            mount_name
        );
        Some(mount)
    }

    /// Resolve a request key to a single location.
    pub fn find(&self, key: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error> {
        let Some((mount, path)) = self.split_path(key, request)? else {
            tracing::debug!(key, "No mount for key");
            return Ok(None);
        };

        tracing::debug!(
            key,
            mount = mount.name(),
            environment = request.environment().name(),
            "Finding"
        );
        mount.find(path.as_deref().unwrap_or_default(), request)
    }

    /// Resolve a request key to every matching location.
    pub fn search(&self, key: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error> {
        let Some((mount, path)) = self.split_path(key, request)? else {
            tracing::debug!(key, "No mount for key");
            return Ok(None);
        };

        tracing::debug!(
            key,
            mount = mount.name(),
            environment = request.environment().name(),
            "Searching"
        );
        mount.search(path.as_deref().unwrap_or_default(), request)
    }
}

fn validate_mount_name(name: &str) -> Result<(), Error> {
    if MOUNT_NAME.is_match(name) {
        Ok(())
    } else {
        Err(Error::InvalidMount {
            name: name.to_string(),
        })
    }
}
