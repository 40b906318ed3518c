//! Collaborator traits: Environment, Module, Request.
//!
//! Mounts never know how modules are discovered or where their content
//! lives. They only ask an [`Environment`] for a [`Module`] by name and then
//! ask the module to resolve a relative path.

use std::path::PathBuf;
use std::sync::Arc;

/// A configuration context owning a set of named modules.
///
/// Implementations must be safe for concurrent reads; mounts may be called
/// from many threads against the same environment.
///
/// # Object Safety
///
/// This trait is object-safe: requests carry a `&dyn Environment`.
pub trait Environment: Send + Sync {
    /// The environment name, used in log output.
    fn name(&self) -> &str;

    /// Look up a module by name.
    ///
    /// An unknown name is a normal outcome and yields `None`. Name matching
    /// rules (case sensitivity, allowed characters) are up to the
    /// implementation.
    fn module(&self, name: &str) -> Option<&dyn Module>;

    /// Every module in the environment, in lookup order.
    fn modules(&self) -> Vec<&dyn Module>;
}

/// One named unit of content within an environment.
///
/// Only [`Module::script`] is required. The remaining lookups default to
/// `None` so a module that carries no files, tasks or plugins need not
/// mention them.
pub trait Module: Send + Sync {
    fn name(&self) -> &str;

    /// Resolve a path under the module's scripts.
    ///
    /// An empty `relative` is valid input; what it means (the module's
    /// default script, or nothing) is up to the implementation.
    fn script(&self, relative: &str) -> Option<PathBuf>;

    /// Resolve a path under the module's plain files.
    fn file(&self, _relative: &str) -> Option<PathBuf> {
        None
    }

    /// Resolve a path under the module's tasks.
    fn task_file(&self, _relative: &str) -> Option<PathBuf> {
        None
    }

    /// Resolve a path under the module's plugin directory.
    fn plugin(&self, _relative: &str) -> Option<PathBuf> {
        None
    }

    /// The module's plugin directory, if it has one.
    fn plugin_directory(&self) -> Option<PathBuf> {
        None
    }
}

/// The request-scoped context a mount resolves against.
pub trait Request {
    fn environment(&self) -> &dyn Environment;

    /// The requesting node's name, used by mounts with per-node paths.
    fn node(&self) -> Option<&str> {
        None
    }
}

/// A request built from a shared environment and an optional node name.
#[derive(Clone)]
pub struct FileRequest {
    environment: Arc<dyn Environment>,
    node: Option<String>,
}

impl FileRequest {
    pub fn new(environment: Arc<dyn Environment>) -> Self {
        Self {
            environment,
            node: None,
        }
    }

    /// Attach the requesting node's name.
    #[must_use]
    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }
}

impl Request for FileRequest {
    fn environment(&self) -> &dyn Environment {
        self.environment.as_ref()
    }

    fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }
}

impl std::fmt::Debug for FileRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRequest")
            .field("environment", &self.environment.name())
            .field("node", &self.node)
            .finish()
    }
}

// Blanket implementations for shared handles

impl<T: Environment + ?Sized> Environment for Arc<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn module(&self, name: &str) -> Option<&dyn Module> {
        self.as_ref().module(name)
    }

    fn modules(&self) -> Vec<&dyn Module> {
        self.as_ref().modules()
    }
}

impl<T: Environment + ?Sized> Environment for Box<T> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn module(&self, name: &str) -> Option<&dyn Module> {
        self.as_ref().module(name)
    }

    fn modules(&self) -> Vec<&dyn Module> {
        self.as_ref().modules()
    }
}

impl<T: Request + ?Sized> Request for &T {
    fn environment(&self) -> &dyn Environment {
        (**self).environment()
    }

    fn node(&self) -> Option<&str> {
        (**self).node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneModule;

    impl Module for OneModule {
        fn name(&self) -> &str {
            "only"
        }

        fn script(&self, relative: &str) -> Option<PathBuf> {
            Some(PathBuf::from(format!("/scripts/{}", relative)))
        }
    }

    struct OneModuleEnvironment {
        module: OneModule,
    }

    impl Environment for OneModuleEnvironment {
        fn name(&self) -> &str {
            "test"
        }

        fn module(&self, name: &str) -> Option<&dyn Module> {
            (name == "only").then_some(&self.module as &dyn Module)
        }

        fn modules(&self) -> Vec<&dyn Module> {
            vec![&self.module as &dyn Module]
        }
    }

    #[test]
    fn optional_module_lookups_default_to_none() {
        let module = OneModule;
        assert!(module.file("x").is_none());
        assert!(module.task_file("x").is_none());
        assert!(module.plugin("x").is_none());
        assert!(module.plugin_directory().is_none());
        assert_eq!(module.script("x"), Some(PathBuf::from("/scripts/x")));
    }

    #[test]
    fn file_request_exposes_environment_and_node() {
        let env: Arc<dyn Environment> = Arc::new(OneModuleEnvironment { module: OneModule });
        let request = FileRequest::new(env.clone());
        assert_eq!(request.environment().name(), "test");
        assert!(request.node().is_none());

        let request = request.with_node("web01.example.com");
        assert_eq!(request.node(), Some("web01.example.com"));
        assert!(request.environment().module("only").is_some());
    }

    #[test]
    fn arc_environment_delegates() {
        let env = Arc::new(OneModuleEnvironment { module: OneModule });
        assert_eq!(Environment::name(&env), "test");
        assert!(Environment::module(&env, "missing").is_none());
        assert_eq!(Environment::modules(&env).len(), 1);
    }

    #[test]
    fn object_safety_works() {
        let env = OneModuleEnvironment { module: OneModule };
        let dynamic: &dyn Environment = &env;
        let module = dynamic.module("only").unwrap();
        assert_eq!(module.name(), "only");
    }

    #[test]
    fn debug_shows_environment_name() {
        let request = FileRequest::new(Arc::new(OneModuleEnvironment { module: OneModule }))
            .with_node("db01");
        let debug = format!("{:?}", request);
        assert!(debug.contains("test"));
        assert!(debug.contains("db01"));
    }
}
