//! Table-backed environment.
//!
//! `StaticEnvironment` answers module lookups from fixed tables, one per kind
//! of module content. It does no discovery of its own: whoever builds it
//! decides what each relative path resolves to.
//!
//! Environments can be written out as JSON:
//! ```json
//! {
//!   "name": "production",
//!   "modules": {
//!     "foo": {
//!       "scripts": {"bar/baz": "/etc/code/modules/foo/scripts/bar/baz"},
//!       "plugin_directory": "/etc/code/modules/foo/lib"
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Environment, Error, Module};

/// A module whose content is a set of lookup tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticModule {
    #[serde(skip)]
    name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    scripts: BTreeMap<String, PathBuf>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    files: BTreeMap<String, PathBuf>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    tasks: BTreeMap<String, PathBuf>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    plugins: BTreeMap<String, PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    plugin_directory: Option<PathBuf>,
}

impl StaticModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_script(
        mut self,
        relative: impl Into<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        self.scripts.insert(relative.into(), location.into());
        self
    }

    #[must_use]
    pub fn with_file(
        mut self,
        relative: impl Into<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        self.files.insert(relative.into(), location.into());
        self
    }

    #[must_use]
    pub fn with_task(
        mut self,
        relative: impl Into<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        self.tasks.insert(relative.into(), location.into());
        self
    }

    #[must_use]
    pub fn with_plugin(
        mut self,
        relative: impl Into<String>,
        location: impl Into<PathBuf>,
    ) -> Self {
        self.plugins.insert(relative.into(), location.into());
        self
    }

    #[must_use]
    pub fn with_plugin_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.plugin_directory = Some(directory.into());
        self
    }
}

impl Module for StaticModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn script(&self, relative: &str) -> Option<PathBuf> {
        self.scripts.get(relative).cloned()
    }

    fn file(&self, relative: &str) -> Option<PathBuf> {
        self.files.get(relative).cloned()
    }

    fn task_file(&self, relative: &str) -> Option<PathBuf> {
        self.tasks.get(relative).cloned()
    }

    fn plugin(&self, relative: &str) -> Option<PathBuf> {
        self.plugins.get(relative).cloned()
    }

    fn plugin_directory(&self) -> Option<PathBuf> {
        self.plugin_directory.clone()
    }
}

/// An environment backed by an in-memory module table.
///
/// Modules are kept sorted by name, which is also the order
/// [`Environment::modules`] reports them in.
///
/// # Example
///
/// ```rust
/// use fileserve_core::{Environment, Module, StaticEnvironment, StaticModule};
///
/// let env = StaticEnvironment::new("production")
///     .with_module(StaticModule::new("foo").with_script("bar/baz", "/code/foo/scripts/bar/baz"));
///
/// let module = env.module("foo").unwrap();
/// assert!(module.script("bar/baz").is_some());
/// assert!(env.module("nope").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EnvironmentDocument")]
pub struct StaticEnvironment {
    name: String,
    modules: BTreeMap<String, StaticModule>,
}

/// Wire shape of a [`StaticEnvironment`]; module names live only in the map keys.
#[derive(Deserialize)]
struct EnvironmentDocument {
    #[serde(default = "default_environment_name")]
    name: String,
    #[serde(default)]
    modules: BTreeMap<String, StaticModule>,
}

fn default_environment_name() -> String {
    "production".to_string()
}

impl From<EnvironmentDocument> for StaticEnvironment {
    fn from(doc: EnvironmentDocument) -> Self {
        let modules = doc
            .modules
            .into_iter()
            .map(|(name, mut module)| {
                module.name = name.clone();
                (name, module)
            })
            .collect();
        StaticEnvironment {
            name: doc.name,
            modules,
        }
    }
}

impl StaticEnvironment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modules: BTreeMap::new(),
        }
    }

    /// Add a module, replacing any module with the same name.
    #[must_use]
    pub fn with_module(mut self, module: StaticModule) -> Self {
        self.insert_module(module);
        self
    }

    /// Add a module, returning the one it replaced.
    pub fn insert_module(&mut self, module: StaticModule) -> Option<StaticModule> {
        self.modules.insert(module.name.clone(), module)
    }

    pub fn remove_module(&mut self, name: &str) -> Option<StaticModule> {
        self.modules.remove(name)
    }

    /// Parse an environment from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read an environment from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

impl Environment for StaticEnvironment {
    fn name(&self) -> &str {
        &self.name
    }

    fn module(&self, name: &str) -> Option<&dyn Module> {
        self.modules.get(name).map(|m| m as &dyn Module)
    }

    fn modules(&self) -> Vec<&dyn Module> {
        self.modules.values().map(|m| m as &dyn Module).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    fn sample() -> StaticEnvironment {
        StaticEnvironment::new("production")
            .with_module(
                StaticModule::new("foo")
                    .with_script("bar/baz", "/code/foo/scripts/bar/baz")
                    .with_file("motd", "/code/foo/files/motd")
                    .with_task("init.sh", "/code/foo/tasks/init.sh"),
            )
            .with_module(StaticModule::new("alpha").with_plugin_directory("/code/alpha/lib"))
    }

    #[test]
    fn module_lookup_by_name() {
        let env = sample();
        let module = env.module("foo").unwrap();
        assert_eq!(module.name(), "foo");
        assert_eq!(
            module.script("bar/baz"),
            Some(PathBuf::from("/code/foo/scripts/bar/baz"))
        );
        assert_eq!(module.file("motd"), Some(PathBuf::from("/code/foo/files/motd")));
        assert_eq!(
            module.task_file("init.sh"),
            Some(PathBuf::from("/code/foo/tasks/init.sh"))
        );
        assert!(module.script("missing").is_none());
    }

    #[test]
    fn unknown_module_is_none() {
        assert!(sample().module("nope").is_none());
    }

    #[test]
    fn modules_are_sorted_by_name() {
        let env = sample();
        let names: Vec<&str> = env.modules().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["alpha", "foo"]);
    }

    #[test]
    fn insert_replaces_existing_module() {
        let mut env = sample();
        let old = env.insert_module(StaticModule::new("foo"));
        assert!(old.is_some());
        assert!(env.module("foo").unwrap().script("bar/baz").is_none());

        assert!(env.remove_module("foo").is_some());
        assert!(env.module("foo").is_none());
    }

    #[test]
    fn parse_json_names_modules_from_keys() {
        let env = StaticEnvironment::from_json(
            r#"{
                "name": "staging",
                "modules": {
                    "foo": {"scripts": {"bar/baz": "eh"}},
                    "bar": {"plugin_directory": "/code/bar/lib"}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(env.name(), "staging");
        let foo = env.module("foo").unwrap();
        assert_eq!(foo.name(), "foo");
        assert_eq!(foo.script("bar/baz"), Some(PathBuf::from("eh")));
        assert_eq!(
            env.module("bar").unwrap().plugin_directory(),
            Some(PathBuf::from("/code/bar/lib"))
        );
    }

    #[test]
    fn parse_json_defaults() {
        let env = StaticEnvironment::from_json("{}").unwrap();
        assert_eq!(env.name(), "production");
        assert!(env.modules().is_empty());
    }

    #[test]
    fn parse_json_rejects_garbage() {
        let err = StaticEnvironment::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn serialized_form_omits_empty_tables() {
        let env = StaticEnvironment::new("production")
            .with_module(StaticModule::new("foo").with_script("run.sh", "/s/run.sh"));
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "production",
                "modules": {"foo": {"scripts": {"run.sh": "/s/run.sh"}}}
            })
        );
    }

    #[test]
    fn serialized_form_parses_back() {
        let env = sample();
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(StaticEnvironment::from_json(&json).unwrap(), env);
    }

    #[test]
    fn module_tables_from_literals() {
        let scripts: BTreeMap<String, PathBuf> = btree! {
            "a.sh".to_string() => PathBuf::from("/s/a.sh"),
            "b.sh".to_string() => PathBuf::from("/s/b.sh"),
        };
        let module = scripts
            .into_iter()
            .fold(StaticModule::new("m"), |m, (rel, loc)| m.with_script(rel, loc));
        assert!(module.script("a.sh").is_some());
        assert!(module.script("b.sh").is_some());
        assert!(module.script("c.sh").is_none());
    }
}
