//! Mounts serving plain files and task files out of modules.
//!
//! Both use the same `<module>/<relative>` decomposition as
//! [`ScriptMount`](crate::ScriptMount); they differ only in which part of the
//! module they ask.

use std::path::PathBuf;

use fileserve_core::{Error, Request};

use crate::mount::{resolve_in_module, Mount};

/// Resolves `<module>/<relative>` to one of the module's plain files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulesMount {
    name: String,
}

impl ModulesMount {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Mount for ModulesMount {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, path: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error> {
        resolve_in_module(path, request, |module, relative| module.file(relative))
    }

    fn search(&self, path: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error> {
        Ok(self.find(path, request)?.map(|location| vec![location]))
    }
}

/// Resolves `<module>/<relative>` to one of the module's task files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksMount {
    name: String,
}

impl TasksMount {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Mount for TasksMount {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, path: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error> {
        resolve_in_module(path, request, |module, relative| module.task_file(relative))
    }

    fn search(&self, path: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error> {
        Ok(self.find(path, request)?.map(|location| vec![location]))
    }
}
