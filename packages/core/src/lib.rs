//! Core fileserve types.
//!
//! Everything a mount needs to resolve a request, and nothing about how
//! mounts themselves work:
//! - `ModulePath`: a `<module>/<relative>` path split into its two halves
//! - `Environment` / `Module`: the lookups mounts delegate to
//! - `Request`: the request-scoped context carrying an environment
//! - `Error`: usage and configuration errors (a miss is `Ok(None)`, never an error)
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use fileserve_core::{
//!     Environment, FileRequest, Module, ModulePath, Request, StaticEnvironment, StaticModule,
//! };
//!
//! let env = StaticEnvironment::new("production")
//!     .with_module(StaticModule::new("foo").with_script("bar/baz", "/code/foo/scripts/bar/baz"));
//! let request = FileRequest::new(Arc::new(env));
//!
//! let path = ModulePath::parse("foo/bar/baz").unwrap();
//! let module = request.environment().module(path.module()).unwrap();
//! assert!(module.script(path.relative()).is_some());
//! ```

mod error;
mod path;
mod static_env;
mod traits;

pub use error::Error;
pub use path::ModulePath;
pub use static_env::{StaticEnvironment, StaticModule};
pub use traits::{Environment, FileRequest, Module, Request};
