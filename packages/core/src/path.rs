//! Decomposition of module-scoped paths.

use std::fmt;

use crate::Error;

/// A path of the form `<module>/<relative>` split into its two halves.
///
/// The module name is everything before the first `/`; the relative path is
/// everything after it. Later slashes belong to the relative path, which is
/// handed to the module untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModulePath<'a> {
    module: &'a str,
    relative: &'a str,
}

impl<'a> ModulePath<'a> {
    /// Split a path into module name and relative path.
    ///
    /// # Errors
    ///
    /// Returns a usage error when no module name can be derived, that is when
    /// the path is empty or starts with `/`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fileserve_core::ModulePath;
    ///
    /// let path = ModulePath::parse("foo/bar/baz").unwrap();
    /// assert_eq!(path.module(), "foo");
    /// assert_eq!(path.relative(), "bar/baz");
    ///
    /// // No separator: the whole string names the module.
    /// let path = ModulePath::parse("foo").unwrap();
    /// assert_eq!(path.relative(), "");
    ///
    /// assert!(ModulePath::parse("").is_err());
    /// ```
    pub fn parse(path: &'a str) -> Result<Self, Error> {
        let (module, relative) = path.split_once('/').unwrap_or((path, ""));

        if module.is_empty() {
            return Err(Error::no_module_specified());
        }

        Ok(ModulePath { module, relative })
    }

    /// The module name (first segment).
    pub fn module(&self) -> &'a str {
        self.module
    }

    /// The path inside the module. Empty when the input had no `/`.
    pub fn relative(&self) -> &'a str {
        self.relative
    }

    /// Check whether the path addresses the module itself.
    pub fn is_module_root(&self) -> bool {
        self.relative.is_empty()
    }
}

impl fmt::Display for ModulePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_module_root() {
            write!(f, "{}", self.module)
        } else {
            write!(f, "{}/{}", self.module, self.relative)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_first_slash_only() {
        let path = ModulePath::parse("foo/bar/baz").unwrap();
        assert_eq!(path.module(), "foo");
        assert_eq!(path.relative(), "bar/baz");
        assert!(!path.is_module_root());
    }

    #[test]
    fn bare_module_has_empty_relative_path() {
        let path = ModulePath::parse("foo").unwrap();
        assert_eq!(path.module(), "foo");
        assert_eq!(path.relative(), "");
        assert!(path.is_module_root());
    }

    #[test]
    fn trailing_slash_gives_empty_relative_path() {
        let path = ModulePath::parse("foo/").unwrap();
        assert_eq!(path.module(), "foo");
        assert_eq!(path.relative(), "");
    }

    #[test]
    fn inner_double_slashes_are_left_to_the_module() {
        let path = ModulePath::parse("foo//bar").unwrap();
        assert_eq!(path.module(), "foo");
        assert_eq!(path.relative(), "/bar");
    }

    #[test]
    fn empty_path_is_usage_error() {
        let err = ModulePath::parse("").unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("No module specified"));
    }

    #[test]
    fn leading_slash_is_usage_error() {
        let err = ModulePath::parse("/bar").unwrap_err();
        assert!(err.is_usage());
    }

    #[test]
    fn display_round_trips_input() {
        assert_eq!(ModulePath::parse("foo").unwrap().to_string(), "foo");
        assert_eq!(
            ModulePath::parse("foo/bar/baz").unwrap().to_string(),
            "foo/bar/baz"
        );
    }
}
