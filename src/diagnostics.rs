use std::path::Path;

use crate::error::Error;
use crate::platform::Platform;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where the user can
/// act on it, how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::ConfigNotFound { path } => render_config_not_found(path),
        Error::DuplicatePackagePrefix { module, prefix } => render_duplicate_prefix(module, prefix),
        Error::IncompleteExternalLink => render_incomplete_link(),
        Error::MalformedUrl { field, value, reason } => render_malformed_url(field, value, reason),
        Error::NoSourceLink { file, module } => render_no_source_link(file, module),
        Error::UnknownPass { module } => render_unknown_pass(module),
        Error::UnsupportedPlatformKey { key } => render_unsupported_platform(key),
        _ => render_generic(e),
    }
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::MissingField { field } => format!("\
# Error: Missing Field

`{field}` must not be empty.
"),

        Error::ParseFailed { file, reason } => format!("\
# Error: Parse Failed

Could not parse `{}`: {reason}
", file.display()),

        Error::UnsupportedConfigFormat { path } => format!("\
# Error: Unsupported Config Format

`{}` is neither a `.toml` nor a `.json` file.
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}
"),
        Error::JsonDe(e) => format!("\
# Error: Invalid JSON

{e}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_config_not_found(path: &Path) -> String {
    format!("\
# Error: Config Not Found

`{}` does not exist.

## Fix

Create it with at least an output directory:

    output_dir = \"build/docs\"

Or point at another file:

    docpass --config path/to/docpass.json check
", path.display())
}

fn render_duplicate_prefix(module: &str, prefix: &str) -> String {
    format!("\
# Error: Duplicate Package Prefix

Pass `{module}` overrides package `{prefix}` more than once.

## Fix

Merge the `[[passes.per_package_options]]` entries with `prefix = \"{prefix}\"` into one.
")
}

fn render_incomplete_link() -> String {
    "\
# Error: Incomplete External Link

An external documentation link has no `url`.

## Fix

Give every link a base url; `package_list_url` is optional:

    [[passes.external_documentation_links]]
    url = \"https://example.org/docs/\"
"
    .to_string()
}

fn render_malformed_url(field: &str, value: &str, reason: &str) -> String {
    format!("\
# Error: Malformed URL

`{field}` is set to `{value}`, which is not an absolute url ({reason}).

## Fix

Use a full url including the scheme, e.g. `https://example.org/docs/`.
")
}

fn render_no_source_link(file: &Path, module: &str) -> String {
    format!("\
# Error: No Source Link

No `source_links` entry of pass `{module}` has a `path` containing `{}`.

## Fix

Add a definition whose `path` is a prefix of the file:

    [[passes.source_links]]
    path = \"src\"
    url = \"https://github.com/org/repo/blob/main/src\"
    line_suffix = \"#L\"
", file.display())
}

fn render_unknown_pass(module: &str) -> String {
    format!("\
# Error: Unknown Pass

No pass has `module_name = \"{module}\"`.

## Fix

List the configured passes:

    docpass check
")
}

fn render_unsupported_platform(key: &str) -> String {
    let supported = Platform::ALL
        .iter()
        .map(|p| format!("- `{p}`"))
        .collect::<Vec<_>>()
        .join("\n");

    format!("\
# Error: Unsupported Platform

`{key}` is not a known analysis platform.

## Supported platforms

{supported}
")
}
