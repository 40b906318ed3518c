//! Serves a directory tree on disk.
//!
//! The mount path may contain per-node patterns, expanded against the
//! requesting node's name on every lookup:
//! - `%h`: short host name (up to the first `.`)
//! - `%H`: full node name
//! - `%d`: domain (after the first `.`)

use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use fileserve_core::{Error, Request};

use crate::mount::Mount;

lazy_static! {
    static ref ANY_PATTERN: Regex = Regex::new(r"%.").unwrap();
    static ref NODE_PATTERN: Regex = Regex::new(r"%([hHd])").unwrap();
}

/// A mount rooted at a directory, optionally varying per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMount {
    name: String,
    path: String,
    expandable: bool,
}

impl FileMount {
    /// Create a file mount rooted at `path`.
    ///
    /// Paths without patterns are checked up front and must name a readable
    /// directory. Paths with patterns can only be checked once expanded.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Result<Self, Error> {
        let path = path.into();
        let expandable = ANY_PATTERN.is_match(&path);

        if !expandable {
            let is_dir = std::fs::metadata(&path)
                .map(|meta| meta.is_dir())
                .unwrap_or(false);
            if !is_dir {
                return Err(Error::InvalidConfig {
                    message: format!("{} does not exist or is not a directory", path),
                });
            }
            if std::fs::read_dir(&path).is_err() {
                return Err(Error::InvalidConfig {
                    message: format!("{} is not readable", path),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            path,
            expandable,
        })
    }

    /// Whether the configured path contains patterns.
    pub fn is_expandable(&self) -> bool {
        self.expandable
    }

    /// The mount root for a node.
    pub fn path(&self, node: Option<&str>) -> Result<PathBuf, Error> {
        if !self.is_expandable() {
            return Ok(PathBuf::from(&self.path));
        }

        let node = node.ok_or_else(|| Error::Usage {
            message: format!(
                "Cannot expand mount path '{}' without a node name",
                self.path
            ),
        })?;

        Ok(PathBuf::from(expand(&self.path, node).into_owned()))
    }

    fn complete_path(&self, relative: &str, node: Option<&str>) -> Result<Option<PathBuf>, Error> {
        let root = self.path(node)?;

        // No relative path: serve the mount itself.
        let relative = relative.trim_start_matches('/');
        if relative.is_empty() {
            return Ok(Some(root));
        }

        let relative = Path::new(relative);
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(Error::Usage {
                message: format!(
                    "Relative path '{}' escapes mount '{}'",
                    relative.display(),
                    self.name
                ),
            });
        }

        let file = root.join(relative);
        if file.exists() || file.symlink_metadata().is_ok() {
            Ok(Some(file))
        } else {
            tracing::info!(
                file = %file.display(),
                "File does not exist or is not accessible"
            );
            Ok(None)
        }
    }
}

fn expand<'a>(path: &'a str, node: &str) -> Cow<'a, str> {
    NODE_PATTERN.replace_all(path, |caps: &Captures| match &caps[1] {
        "h" => node.split('.').next().unwrap_or(node).to_string(),
        "d" => node
            .split_once('.')
            .map(|(_, domain)| domain)
            .unwrap_or(node)
            .to_string(),
        _ => node.to_string(),
    })
}

impl Mount for FileMount {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, path: &str, request: &dyn Request) -> Result<Option<PathBuf>, Error> {
        self.complete_path(path, request.node())
    }

    fn search(&self, path: &str, request: &dyn Request) -> Result<Option<Vec<PathBuf>>, Error> {
        Ok(self
            .complete_path(path, request.node())?
            .map(|location| vec![location]))
    }
}
