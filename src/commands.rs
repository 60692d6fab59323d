//! CLI commands for docpass: check, links, source-link, link add.

use std::path::{Path, PathBuf};

use docpass::config::{self, Configuration, PassConfiguration};
use docpass::error;
use docpass::external_link::ExternalDocumentationLinkBuilder;
use docpass::url_codec;

// ── Config loading ────────────────────────────────────────────────────

/// Load the config named on the command line, or discover it in `.`.
///
/// # Errors
///
/// Returns any load or validation error.
fn load(config_path: Option<&Path>) -> Result<Configuration, error::Error> {
    return match config_path {
        Some(path) => Configuration::load(path),
        None => Configuration::discover(Path::new(".")),
    };
}

// ── CLI commands ──────────────────────────────────────────────────────

/// Load and validate the configuration, then summarize each pass.
///
/// # Errors
///
/// Returns errors from config loading, validation, or link resolution.
pub fn check(config_path: Option<&Path>) -> Result<(), error::Error> {
    let config = load(config_path)?;

    for pass in &config.passes {
        let files = count_source_files(pass);
        let links = pass.effective_external_links()?.len();
        println!(
            "{} ({}): {} source root(s), {files} source file(s), {links} external link(s)",
            pass.module_name,
            pass.analysis_platform,
            pass.source_roots.len(),
        );
    }

    println!(
        "Configuration OK: {} pass(es), {} output to {}",
        config.passes.len(),
        config.format,
        config.output_dir.display()
    );
    return Ok(());
}

/// Print every effective external link, one per line, for all passes or
/// only the pass documenting `module`.
///
/// # Errors
///
/// Returns errors from config loading, `Error::UnknownPass` for an
/// unknown module, or link resolution errors.
pub fn links(config_path: Option<&Path>, module: Option<&str>) -> Result<(), error::Error> {
    let config = load(config_path)?;
    let passes: Vec<&PassConfiguration> = match module {
        Some(name) => vec![config.pass(name)?],
        None => config.passes.iter().collect(),
    };

    for pass in passes {
        for link in pass.effective_external_links()? {
            println!(
                "{}  {}  {}",
                pass.module_name,
                url_codec::format(&link.url),
                url_codec::format(&link.package_list_url)
            );
        }
    }
    return Ok(());
}

/// Append an external documentation link to a pass in the TOML config,
/// preserving the rest of the file's formatting.
///
/// # Errors
///
/// Returns `Error::MalformedUrl` for bad urls, `Error::UnknownPass` if no
/// pass documents `module`, `Error::UnsupportedConfigFormat` for a non-TOML
/// config, or I/O and parse errors.
pub fn link_add(
    config_path: Option<&Path>,
    module: &str,
    url: &str,
    package_list_url: Option<&str>,
) -> Result<(), error::Error> {
    let path = config_path.map_or_else(|| return PathBuf::from(config::CONFIG_FILE), Path::to_path_buf);
    if path.extension().is_none_or(|ext| return ext != "toml") {
        return Err(error::Error::UnsupportedConfigFormat { path });
    }

    // Resolve first so a bad declaration never reaches the file.
    let link = ExternalDocumentationLinkBuilder::from_strings(url, package_list_url)?.build()?;

    let (path, mut doc) = read_config_doc(&path)?;
    let pass = find_pass_table(&mut doc, module)?;

    let entry = pass
        .entry("external_documentation_links")
        .or_insert(toml_edit::Item::ArrayOfTables(toml_edit::ArrayOfTables::new()));

    match entry {
        toml_edit::Item::ArrayOfTables(tables) => {
            let mut table = toml_edit::Table::new();
            table["url"] = toml_edit::value(url_codec::format(&link.url));
            if package_list_url.is_some() {
                table["package_list_url"] = toml_edit::value(url_codec::format(&link.package_list_url));
            }
            tables.push(table);
        },
        toml_edit::Item::Value(toml_edit::Value::Array(array)) => {
            let mut inline = toml_edit::InlineTable::new();
            inline.insert("url", url_codec::format(&link.url).into());
            if package_list_url.is_some() {
                inline.insert("package_list_url", url_codec::format(&link.package_list_url).into());
            }
            array.push(inline);
        },
        _ => {
            return Err(error::Error::ParseFailed {
                file: path,
                reason: format!("`external_documentation_links` of pass `{module}` is not an array"),
            });
        },
    }

    std::fs::write(&path, doc.to_string())?;
    println!(
        "Added link to {module}: {} (package list {})",
        link.url, link.package_list_url
    );
    return Ok(());
}

/// Print the remote source url for `file` (and optionally `line`).
///
/// # Errors
///
/// Returns errors from config loading, `Error::UnknownPass`, or
/// `Error::NoSourceLink` when no source link covers the file.
pub fn source_link(
    config_path: Option<&Path>,
    module: &str,
    file: &Path,
    line: Option<u32>,
) -> Result<(), error::Error> {
    let config = load(config_path)?;
    let pass = config.pass(module)?;
    let Some(link) = pass.source_link_for(file, line) else {
        return Err(error::Error::NoSourceLink {
            file: file.to_path_buf(),
            module: module.to_string(),
        });
    };
    println!("{link}");
    return Ok(());
}

// ── Helpers ───────────────────────────────────────────────────────────

/// Count regular files under every existing source root of a pass.
/// Roots missing from disk are logged and skipped.
fn count_source_files(pass: &PassConfiguration) -> usize {
    let mut total = 0_usize;
    for root in &pass.source_roots {
        if !root.path.exists() {
            log::warn!(
                "pass `{}`: source root {} does not exist",
                pass.module_name,
                root.path.display()
            );
            continue;
        }
        let files = walkdir::WalkDir::new(&root.path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| return e.file_type().is_file())
            .count();
        log::debug!("pass `{}`: {files} file(s) under {}", pass.module_name, root.path.display());
        total = total.saturating_add(files);
    }
    return total;
}

/// Find the `[[passes]]` table whose `module_name` equals `module`.
///
/// # Errors
///
/// Returns `Error::UnknownPass` if there is none.
fn find_pass_table<'doc>(
    doc: &'doc mut toml_edit::DocumentMut,
    module: &str,
) -> Result<&'doc mut toml_edit::Table, error::Error> {
    return doc
        .get_mut("passes")
        .and_then(toml_edit::Item::as_array_of_tables_mut)
        .and_then(|passes| {
            return passes.iter_mut().find(|t| {
                return t.get("module_name").and_then(toml_edit::Item::as_str) == Some(module);
            });
        })
        .ok_or_else(|| return error::Error::UnknownPass { module: module.to_string() });
}

/// Parse a TOML config into a format-preserving document.
///
/// # Errors
///
/// Returns `Error::ConfigNotFound` if the file doesn't exist, `Error::Io`
/// on other read failures, or `Error::ParseFailed` on parse failure.
fn read_config_doc(path: &Path) -> Result<(PathBuf, toml_edit::DocumentMut), error::Error> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(error::Error::ConfigNotFound { path: path.to_path_buf() });
        },
        Err(e) => return Err(error::Error::Io(e)),
    };

    let doc: toml_edit::DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
        return error::Error::ParseFailed {
            file: path.to_path_buf(),
            reason: e.to_string(),
        };
    })?;

    return Ok((path.to_path_buf(), doc));
}
