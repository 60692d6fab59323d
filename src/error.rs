/// Crate-level error types for docpass diagnostics.
use std::path::PathBuf;

/// All errors in docpass are load-time or validation-time failures. Each
/// variant names the field, file, or value the user has to correct.
#[allow(clippy::error_impl_error, reason = "crate-level error type re-exported as docpass::Error")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No configuration file exists at the expected location.
    #[error("config not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was searched for the config file.
        path: PathBuf,
    },

    /// The same package prefix is overridden twice within one pass.
    #[error("duplicate package prefix `{prefix}` in pass `{module}`")]
    DuplicatePackagePrefix {
        /// Module name of the pass holding the duplicate.
        module: String,
        /// The repeated package prefix.
        prefix: String,
    },

    /// An external documentation link was declared without a base url.
    #[error("incomplete external link: `url` (optionally with `package_list_url`) must be provided")]
    IncompleteExternalLink,

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON deserialization failed.
    #[error("json deserialize: {0}")]
    JsonDe(
        /// The wrapped JSON error.
        #[source]
        serde_json::Error,
    ),

    /// JSON serialization failed.
    #[error("json serialize: {0}")]
    JsonSer(
        /// The wrapped JSON error.
        #[source]
        serde_json::Error,
    ),

    /// A url-typed field holds a string that is not an absolute url.
    #[error("malformed url in `{field}`: `{value}` ({reason})")]
    MalformedUrl {
        /// Name of the field being parsed.
        field: String,
        /// Description of the parse failure.
        reason: String,
        /// The offending input string.
        value: String,
    },

    /// A required field is empty.
    #[error("missing required field: `{field}`")]
    MissingField {
        /// Dotted path of the missing field.
        field: String,
    },

    /// No source link definition of the pass covers the file.
    #[error("no source link in pass `{module}` covers {}", file.display())]
    NoSourceLink {
        /// Local file a remote url was requested for.
        file: PathBuf,
        /// Module name of the pass whose source links were searched.
        module: String,
    },

    /// A config file could not be parsed for editing.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// TOML serialization failed.
    #[error("toml serialize: {0}")]
    TomlSer(
        /// The wrapped TOML serialization error.
        #[from]
        toml::ser::Error,
    ),

    /// No pass in the configuration has the requested module name.
    #[error("unknown pass: `{module}`")]
    UnknownPass {
        /// Module name that was not found.
        module: String,
    },

    /// The config file extension is neither `.toml` nor `.json`.
    #[error("unsupported config format: {}", path.display())]
    UnsupportedConfigFormat {
        /// Path of the rejected config file.
        path: PathBuf,
    },

    /// A platform key is not one of `jvm`, `js`, `native`, `common`.
    #[error("unsupported platform: `{key}`")]
    UnsupportedPlatformKey {
        /// The key exactly as the user wrote it.
        key: String,
    },
}
