mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use docpass::diagnostics;

#[derive(Parser)]
#[command(name = "docpass", about = "Validate and inspect documentation pass configurations")]
struct Cli {
    /// Config file (`.toml` or `.json`). Defaults to `.docpass.toml`, then `docpass.json`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
    /// Log resolution details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the configuration, summarizing each pass
    Check,
    /// Manage external documentation links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
    /// Print the effective external documentation links
    Links {
        /// Only show links for this module's pass
        #[arg(long)]
        module: Option<String>,
    },
    /// Print the remote source url for a local file
    SourceLink {
        /// Local source file
        file: PathBuf,
        /// Line to link to
        #[arg(long)]
        line: Option<u32>,
        /// Module whose source links are used
        #[arg(long)]
        module: String,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Append an external documentation link to a pass
    Add {
        /// Module whose pass receives the link
        #[arg(long)]
        module: String,
        /// Explicit package list url (defaults to `<url>/package-list`)
        #[arg(long)]
        package_list_url: Option<String>,
        /// Base url of the external documentation
        url: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Check => commands::check(config),
        Commands::Link {
            action: LinkAction::Add { module, package_list_url, url },
        } => commands::link_add(config, &module, &url, package_list_url.as_deref()),
        Commands::Links { module } => commands::links(config, module.as_deref()),
        Commands::SourceLink { file, line, module } => commands::source_link(config, &module, &file, line),
    };

    match result {
        Ok(()) => return ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            return ExitCode::FAILURE;
        },
    }
}
