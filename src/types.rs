/// Value records nested inside a documentation pass.
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A directory contributing source files to a pass.
/// Written in config files as a bare path string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PathBuf", into = "PathBuf")]
pub struct SourceRoot {
    /// Filesystem path of the root.
    pub path: PathBuf,
}

impl From<PathBuf> for SourceRoot {
    fn from(path: PathBuf) -> Self {
        return Self { path };
    }
}

impl From<SourceRoot> for PathBuf {
    fn from(root: SourceRoot) -> Self {
        return root.path;
    }
}

/// Maps a local path prefix to a remote url template so generated pages
/// can link back to the source they were built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLinkDefinition {
    /// Appended to the url, followed by the line number, when linking to a
    /// specific line (e.g. `#L`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_suffix: Option<String>,
    /// Local directory prefix.
    pub path: PathBuf,
    /// Remote location that `path` corresponds to.
    pub url: String,
}

impl SourceLinkDefinition {
    /// Remote url for `file`, optionally pointing at `line`.
    /// Returns `None` if `file` is not under `path`.
    pub fn link_for(&self, file: &Path, line: Option<u32>) -> Option<String> {
        let rest = file.strip_prefix(&self.path).ok()?;
        let segments: Vec<String> = rest
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => return Some(s.to_string_lossy().into_owned()),
                _ => return None,
            })
            .collect();

        let mut link = if segments.is_empty() {
            self.url.clone()
        } else {
            format!("{}/{}", self.url.trim_end_matches('/'), segments.join("/"))
        };

        if let (Some(suffix), Some(n)) = (self.line_suffix.as_deref(), line) {
            link.push_str(suffix);
            link.push_str(&n.to_string());
        }
        return Some(link);
    }

    /// Number of path components in the prefix. Longer means more specific.
    pub(crate) fn depth(&self) -> usize {
        return self.path.components().count();
    }
}

/// Per-package override of the pass-wide documentation flags.
/// Applies to the package named by `prefix` and every package below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageOptions {
    /// Document non-public declarations.
    #[serde(default)]
    pub include_non_public: bool,
    /// Dotted package prefix, e.g. `com.example.internal`.
    pub prefix: String,
    /// Warn about undocumented public declarations.
    #[serde(default = "default_true")]
    pub report_undocumented: bool,
    /// Leave deprecated declarations out of the output.
    #[serde(default)]
    pub skip_deprecated: bool,
    /// Leave the package out of the output entirely.
    #[serde(default)]
    pub suppress: bool,
}

impl PackageOptions {
    /// Whether this override applies to `package`: the prefix is the package
    /// itself or one of its dotted ancestors.
    pub fn matches(&self, package: &str) -> bool {
        if self.prefix.is_empty() {
            return true;
        }
        return match package.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        };
    }
}

/// Serde default for flags that are on unless disabled.
pub(crate) const fn default_true() -> bool {
    return true;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_link(line_suffix: Option<&str>) -> SourceLinkDefinition {
        return SourceLinkDefinition {
            line_suffix: line_suffix.map(str::to_string),
            path: PathBuf::from("core/src"),
            url: "https://github.com/acme/widgets/blob/main/core/src/".to_string(),
        };
    }

    #[test]
    fn link_for_file_under_prefix() {
        let def = github_link(Some("#L"));
        assert_eq!(
            def.link_for(Path::new("core/src/acme/Widget.kt"), Some(42)).as_deref(),
            Some("https://github.com/acme/widgets/blob/main/core/src/acme/Widget.kt#L42")
        );
    }

    #[test]
    fn line_needs_both_suffix_and_number() {
        let with_suffix = github_link(Some("#L"));
        let without_suffix = github_link(None);
        let file = Path::new("core/src/Widget.kt");
        let plain = "https://github.com/acme/widgets/blob/main/core/src/Widget.kt";

        assert_eq!(with_suffix.link_for(file, None).as_deref(), Some(plain));
        assert_eq!(without_suffix.link_for(file, Some(7)).as_deref(), Some(plain));
    }

    #[test]
    fn file_outside_prefix_has_no_link() {
        let def = github_link(Some("#L"));
        assert_eq!(def.link_for(Path::new("core/test/WidgetTest.kt"), Some(1)), None);
        assert_eq!(def.link_for(Path::new("core/srcgen/Widget.kt"), None), None);
    }

    #[test]
    fn package_prefix_matches_on_dot_boundary() {
        let opts = PackageOptions {
            include_non_public: false,
            prefix: "com.acme".to_string(),
            report_undocumented: true,
            skip_deprecated: false,
            suppress: true,
        };
        assert!(opts.matches("com.acme"));
        assert!(opts.matches("com.acme.internal"));
        assert!(!opts.matches("com.acmetools"));
        assert!(!opts.matches("com"));
    }

    #[test]
    fn source_root_is_a_bare_path() {
        let root: SourceRoot = serde_json::from_str("\"src/main\"").unwrap();
        assert_eq!(root.path, PathBuf::from("src/main"));
        assert_eq!(serde_json::to_string(&root).unwrap(), "\"src/main\"");
    }
}
