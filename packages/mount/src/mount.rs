//! The shared mount contract and the closed set of mount variants.

use std::path::PathBuf;

use fileserve_core::{Error, Module, ModulePath, Request};

use crate::file::FileMount;
use crate::modules::{ModulesMount, TasksMount};
use crate::plugins::PluginsMount;
use crate::scripts::ScriptMount;

/// A named strategy mapping a mount-relative path to concrete locations.
///
/// Every variant answers the same two questions:
/// - `find`: the single location a path resolves to
/// - `search`: every location a path resolves to
///
/// A miss is `Ok(None)` for both. `search` never reports a miss as an empty
/// vector. Errors are reserved for malformed requests.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Mount>`.
pub trait Mount: Send + Sync {
    /// The name the mount is registered under.
    fn name(&self) -> &str;

    fn find(&self, path: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error>;

    fn search(&self, path: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error>;
}

impl<T: Mount + ?Sized> Mount for Box<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn find(&self, path: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error> {
        self.as_ref().find(path, request)
    }

    fn search(&self, path: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error> {
        self.as_ref().search(path, request)
    }
}

/// Resolve a `<module>/<relative>` path through the request's environment.
///
/// Fails only when the path names no module. An unknown module is a miss and
/// `resolve` is never called for it.
pub(crate) fn resolve_in_module<F>(
    path: &str,
    request: &dyn Request,
    resolve: F,
) -> Result<Option<PathBuf>, Error>
where
    F: FnOnce(&dyn Module, &str) -> Option<PathBuf>,
{
    let path = ModulePath::parse(path)?;

    match request.environment().module(path.module()) {
        Some(module) => Ok(resolve(module, path.relative())),
        None => Ok(None),
    }
}

/// Every mount the file server knows how to build.
#[derive(Debug, Clone, PartialEq)]
pub enum MountKind {
    /// Scripts shipped inside modules.
    Scripts(ScriptMount),
    /// Plain files shipped inside modules.
    Modules(ModulesMount),
    /// Task files shipped inside modules.
    Tasks(TasksMount),
    /// Plugin directories across every module.
    Plugins(PluginsMount),
    /// A directory tree on disk.
    File(FileMount),
}

impl MountKind {
    /// The configuration type name of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            MountKind::Scripts(_) => "scripts",
            MountKind::Modules(_) => "modules",
            MountKind::Tasks(_) => "tasks",
            MountKind::Plugins(_) => "plugins",
            MountKind::File(_) => "file",
        }
    }

    fn as_mount(&self) -> &dyn Mount {
        match self {
            MountKind::Scripts(m) => m,
            MountKind::Modules(m) => m,
            MountKind::Tasks(m) => m,
            MountKind::Plugins(m) => m,
            MountKind::File(m) => m,
        }
    }
}

impl Mount for MountKind {
    fn name(&self) -> &str {
        self.as_mount().name()
    }

    fn find(&self, path: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error> {
        self.as_mount().find(path, request)
    }

    fn search(&self, path: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error> {
        self.as_mount().search(path, request)
    }
}

impl From<ScriptMount> for MountKind {
    fn from(mount: ScriptMount) -> Self {
        MountKind::Scripts(mount)
    }
}

impl From<ModulesMount> for MountKind {
    fn from(mount: ModulesMount) -> Self {
        MountKind::Modules(mount)
    }
}

impl From<TasksMount> for MountKind {
    fn from(mount: TasksMount) -> Self {
        MountKind::Tasks(mount)
    }
}

impl From<PluginsMount> for MountKind {
    fn from(mount: PluginsMount) -> Self {
        MountKind::Plugins(mount)
    }
}

impl From<FileMount> for MountKind {
    fn from(mount: FileMount) -> Self {
        MountKind::File(mount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use fileserve_core::{FileRequest, StaticEnvironment, StaticModule};

    fn request() -> FileRequest {
        let env = StaticEnvironment::new("production").with_module(
            StaticModule::new("foo")
                .with_script("bar/baz", "/code/foo/scripts/bar/baz")
                .with_file("bar/baz", "/code/foo/files/bar/baz")
                .with_task("bar/baz", "/code/foo/tasks/bar/baz")
                .with_plugin_directory("/code/foo/lib"),
        );
        FileRequest::new(Arc::new(env))
    }

    #[test]
    fn kind_names() {
        assert_eq!(MountKind::from(ScriptMount::new("scripts")).kind(), "scripts");
        assert_eq!(MountKind::from(ModulesMount::new("modules")).kind(), "modules");
        assert_eq!(MountKind::from(TasksMount::new("tasks")).kind(), "tasks");
        assert_eq!(MountKind::from(PluginsMount::new("plugins")).kind(), "plugins");
    }

    #[test]
    fn variants_dispatch_to_their_module_lookup() {
        let request = request();
        let mounts: Vec<MountKind> = vec![
            ScriptMount::new("scripts").into(),
            ModulesMount::new("modules").into(),
            TasksMount::new("tasks").into(),
        ];
        let found: Vec<PathBuf> = mounts
            .iter()
            .map(|m| m.find("foo/bar/baz", &request).unwrap().unwrap())
            .collect();
        assert_eq!(
            found,
            vec![
                PathBuf::from("/code/foo/scripts/bar/baz"),
                PathBuf::from("/code/foo/files/bar/baz"),
                PathBuf::from("/code/foo/tasks/bar/baz"),
            ]
        );
    }

    #[test]
    fn boxed_mount_delegates() {
        let mount: Box<dyn Mount> = Box::new(ScriptMount::new("scripts"));
        assert_eq!(mount.name(), "scripts");
        assert_eq!(
            mount.search("foo/bar/baz", &request()).unwrap(),
            Some(vec![PathBuf::from("/code/foo/scripts/bar/baz")])
        );
    }

    #[test]
    fn resolver_not_called_for_unknown_module() {
        let request = request();
        let result = resolve_in_module("nope/bar", &request, |_, _| {
            panic!("resolver must not run for an unknown module")
        })
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn resolver_receives_relative_path() {
        let request = request();
        let result = resolve_in_module("foo/a/b/c", &request, |module, relative| {
            assert_eq!(module.name(), "foo");
            assert_eq!(relative, "a/b/c");
            Some(PathBuf::from("hit"))
        })
        .unwrap();
        assert_eq!(result, Some(PathBuf::from("hit")));
    }
}
