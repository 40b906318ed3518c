//! Serves scripts shipped inside modules.
//!
//! Paths have the form `<module>/<relative>`. The module is looked up in the
//! request's environment and asked for the script at `<relative>`.

use std::path::PathBuf;

use fileserve_core::{Error, Request};

use crate::mount::{resolve_in_module, Mount};

/// Resolves `<module>/<relative>` to a script owned by `<module>`.
///
/// The mount holds no state besides its name, so one instance can serve any
/// number of concurrent requests.
///
/// # Example
///
/// ```rust
/// use std::path::PathBuf;
/// use std::sync::Arc;
/// use fileserve_core::{FileRequest, StaticEnvironment, StaticModule};
/// use fileserve_mount::{Mount, ScriptMount};
///
/// let env = StaticEnvironment::new("production")
///     .with_module(StaticModule::new("foo").with_script("bar/baz", "/code/foo/scripts/bar/baz"));
/// let request = FileRequest::new(Arc::new(env));
/// let mount = ScriptMount::new("scripts");
///
/// assert_eq!(
///     mount.find("foo/bar/baz", &request).unwrap(),
///     Some(PathBuf::from("/code/foo/scripts/bar/baz"))
/// );
/// assert_eq!(mount.find("nope/bar/baz", &request).unwrap(), None);
/// assert!(mount.find("", &request).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptMount {
    name: String,
}

impl ScriptMount {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Mount for ScriptMount {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, path: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error> {
        resolve_in_module(path, request, |module, relative| module.script(relative))
    }

    fn search(&self, path: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error> {
        Ok(self.find(path, request)?.map(|location| vec![location]))
    }
}
