//! The configuration model: one `Configuration` holding any number of
//! documentation passes, plus loading, validation, and serialization.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::external_link::ExternalDocumentationLink;
use crate::platform::Platform;
use crate::types::{PackageOptions, SourceLinkDefinition, SourceRoot, default_true};

/// File name looked up by `Configuration::discover`.
pub const CONFIG_FILE: &str = ".docpass.toml";
/// JSON fallback looked up by `Configuration::discover`.
pub const JSON_CONFIG_FILE: &str = "docpass.json";
/// Standard library documentation linked from every pass by default.
pub const STDLIB_DOCS_URL: &str = "https://kotlinlang.org/api/latest/jvm/stdlib/";

/// Top-level configuration. Built once from a config file and read-only
/// for the rest of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Directory for incremental-generation caches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_root: Option<PathBuf>,
    /// Output format identifier, e.g. `html` or `markdown`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Emit package and module index pages.
    #[serde(default = "default_true")]
    pub generate_index_pages: bool,
    /// Platform identifiers assumed for declarations without an explicit one.
    #[serde(default)]
    pub implied_platforms: Vec<String>,
    /// Directory generated documentation is written to.
    pub output_dir: PathBuf,
    /// Documentation passes, in declaration order. May be empty.
    #[serde(default)]
    pub passes: Vec<PassConfiguration>,
}

/// One documentation-generation unit: a module built for one platform.
/// Independent of every other pass in the same configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools, reason = "each flag is an independent documentation policy")]
pub struct PassConfiguration {
    /// Platform the sources are analysed for.
    #[serde(default)]
    pub analysis_platform: Platform,
    /// API version passed to the analyser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Compiled dependencies needed to resolve symbols.
    #[serde(default)]
    pub classpath: Vec<PathBuf>,
    /// Pull extension functions declared in dependencies onto documented types.
    #[serde(default)]
    pub collect_inherited_extensions_from_libraries: bool,
    /// Links to documentation hosted elsewhere.
    #[serde(default)]
    pub external_documentation_links: Vec<ExternalDocumentationLink>,
    /// Markdown files with module and package descriptions.
    #[serde(default)]
    pub includes: Vec<PathBuf>,
    /// Document non-public declarations.
    #[serde(default)]
    pub include_non_public: bool,
    /// Document declarations in the root (unnamed) package.
    #[serde(default)]
    pub include_root_package: bool,
    /// Major JDK version whose documentation is linked.
    #[serde(default = "default_jdk_version")]
    pub jdk_version: u32,
    /// Language version passed to the analyser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_version: Option<String>,
    /// Name of the documented module.
    pub module_name: String,
    /// Skip the default JDK documentation link.
    #[serde(default)]
    pub no_jdk_link: bool,
    /// Skip the default standard library documentation link.
    #[serde(default)]
    pub no_stdlib_link: bool,
    /// Overrides of the flags above for specific packages.
    #[serde(default)]
    pub per_package_options: Vec<PackageOptions>,
    /// Warn about undocumented public declarations.
    #[serde(default = "default_true")]
    pub report_undocumented: bool,
    /// Source files referenced from `@sample` tags.
    #[serde(default)]
    pub samples: Vec<PathBuf>,
    /// Version since which the documented API is available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since_version: Option<String>,
    /// Leave deprecated declarations out of the output.
    #[serde(default)]
    pub skip_deprecated: bool,
    /// Omit packages with nothing to document.
    #[serde(default = "default_true")]
    pub skip_empty_packages: bool,
    /// Mappings from local source paths to remote source browsers.
    #[serde(default)]
    pub source_links: Vec<SourceLinkDefinition>,
    /// Directories the documented sources live in. May be empty.
    #[serde(default)]
    pub source_roots: Vec<SourceRoot>,
    /// Files excluded from documentation.
    #[serde(default)]
    pub suppressed_files: Vec<PathBuf>,
    /// Target identifiers shown next to platform-specific declarations.
    #[serde(default)]
    pub targets: Vec<String>,
}

fn default_format() -> String {
    return "html".to_string();
}

const fn default_jdk_version() -> u32 {
    return 8;
}

impl Configuration {
    /// Load `.docpass.toml` from `root`, falling back to `docpass.json`.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` (naming the TOML path) if neither
    /// file exists, or any error from `Configuration::load`.
    pub fn discover(root: &Path) -> Result<Self, Error> {
        let toml_path = root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Self::load(&toml_path);
        }
        let json_path = root.join(JSON_CONFIG_FILE);
        if json_path.is_file() {
            return Self::load(&json_path);
        }
        return Err(Error::ConfigNotFound { path: toml_path });
    }

    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonDe` for malformed JSON, including bad urls and
    /// platform keys, or any validation error.
    pub fn from_json_str(content: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(content).map_err(Error::JsonDe)?;
        config.validate()?;
        return Ok(config);
    }

    /// Parse and validate a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` for malformed TOML, including bad urls and
    /// platform keys, or any validation error.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        return Ok(config);
    }

    /// Read a configuration file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigNotFound` if the file doesn't exist,
    /// `Error::UnsupportedConfigFormat` for extensions other than
    /// `.toml` / `.json`, `Error::Io` for other read failures, or any
    /// parse or validation error.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let is_json = match path.extension().and_then(|e| return e.to_str()) {
            Some("toml") => false,
            Some("json") => true,
            _ => return Err(Error::UnsupportedConfigFormat { path: path.to_path_buf() }),
        };

        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        log::debug!("loading configuration from {}", path.display());
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        log::debug!("loaded {} pass(es) from {}", config.passes.len(), path.display());
        return Ok(config);
    }

    /// The first pass documenting `module`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownPass` if no pass has that module name.
    pub fn pass(&self, module: &str) -> Result<&PassConfiguration, Error> {
        return self
            .passes
            .iter()
            .find(|p| return p.module_name == module)
            .ok_or_else(|| return Error::UnknownPass { module: module.to_string() });
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonSer` if serialization fails.
    pub fn to_json_string(&self) -> Result<String, Error> {
        return serde_json::to_string_pretty(self).map_err(Error::JsonSer);
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlSer` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, Error> {
        return Ok(toml::to_string_pretty(self)?);
    }

    /// Check the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingField` for an empty `output_dir` or
    /// `module_name`, or `Error::DuplicatePackagePrefix` when one pass
    /// overrides the same package prefix twice.
    pub fn validate(&self) -> Result<(), Error> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::MissingField { field: "output_dir".to_string() });
        }

        for (index, pass) in self.passes.iter().enumerate() {
            if pass.module_name.trim().is_empty() {
                return Err(Error::MissingField {
                    field: format!("passes[{index}].module_name"),
                });
            }
            pass.validate()?;
        }
        return Ok(());
    }
}

impl PassConfiguration {
    /// Standard library and JDK links implied by this pass.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedUrl` only if a built-in url fails to parse.
    pub fn default_external_links(&self) -> Result<Vec<ExternalDocumentationLink>, Error> {
        let mut links = Vec::new();

        if !self.no_stdlib_link {
            links.push(ExternalDocumentationLink::parse(STDLIB_DOCS_URL, None)?);
        }

        if !self.no_jdk_link && self.analysis_platform == Platform::Jvm {
            let version = self.jdk_version;
            let jdk = if version < 11 {
                ExternalDocumentationLink::parse(
                    &format!("https://docs.oracle.com/javase/{version}/docs/api/"),
                    None,
                )?
            } else {
                // Modular JDKs publish `element-list` instead of `package-list`.
                ExternalDocumentationLink::parse(
                    &format!("https://docs.oracle.com/en/java/javase/{version}/docs/api/java.base/"),
                    Some(&format!("https://docs.oracle.com/en/java/javase/{version}/docs/api/element-list")),
                )?
            };
            links.push(jdk);
        }

        return Ok(links);
    }

    /// Declared links followed by the default links not already declared.
    ///
    /// # Errors
    ///
    /// Propagates errors from `default_external_links`.
    pub fn effective_external_links(&self) -> Result<Vec<ExternalDocumentationLink>, Error> {
        let mut links = self.external_documentation_links.clone();
        for default in self.default_external_links()? {
            if !links.iter().any(|l| return l.url == default.url) {
                links.push(default);
            }
        }
        return Ok(links);
    }

    /// The override with the longest prefix applying to `package`.
    pub fn package_options_for(&self, package: &str) -> Option<&PackageOptions> {
        return self
            .per_package_options
            .iter()
            .filter(|o| return o.matches(package))
            .max_by_key(|o| return o.prefix.len());
    }

    /// Remote url for `file` using the most specific source link definition.
    pub fn source_link_for(&self, file: &Path, line: Option<u32>) -> Option<String> {
        return self
            .source_links
            .iter()
            .filter(|d| return file.starts_with(&d.path))
            .max_by_key(|d| return d.depth())
            .and_then(|d| return d.link_for(file, line));
    }

    /// Check per-pass invariants.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicatePackagePrefix` for a repeated prefix.
    fn validate(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for options in &self.per_package_options {
            if !seen.insert(options.prefix.as_str()) {
                return Err(Error::DuplicatePackagePrefix {
                    module: self.module_name.clone(),
                    prefix: options.prefix.clone(),
                });
            }
        }
        return Ok(());
    }
}
