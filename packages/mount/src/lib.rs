//! fileserve mounts: resolution strategies behind one contract.
//!
//! Each mount maps a mount-relative path to concrete locations:
//! - `ScriptMount`: `<module>/<relative>` to a module's script
//! - `ModulesMount`: `<module>/<relative>` to a module's plain file
//! - `TasksMount`: `<module>/<relative>` to a module's task file
//! - `PluginsMount`: a plugin path merged across every module
//! - `FileMount`: a path inside a directory on disk
//!
//! `Configuration` holds the named mounts a file server exposes and routes
//! `<mount>/<path>` request keys to them.
//!
//! # Example
//!
//! ```rust
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use fileserve_core::{FileRequest, StaticEnvironment, StaticModule};
//! use fileserve_mount::Configuration;
//!
//! let env = StaticEnvironment::new("production")
//!     .with_module(StaticModule::new("foo").with_script("bar/baz", "/code/foo/scripts/bar/baz"));
//! let request = FileRequest::new(Arc::new(env));
//!
//! let configuration = Configuration::with_default_mounts();
//! assert_eq!(
//!     configuration.find("scripts/foo/bar/baz", &request).unwrap(),
//!     Some(PathBuf::from("/code/foo/scripts/bar/baz"))
//! );
//! ```

pub mod config;
pub mod configuration;
mod file;
mod modules;
mod mount;
mod plugins;
mod scripts;

pub use config::{FileServerConfig, MountConfig};
pub use configuration::Configuration;
pub use file::FileMount;
pub use modules::{ModulesMount, TasksMount};
pub use mount::{Mount, MountKind};
pub use plugins::PluginsMount;
pub use scripts::ScriptMount;
