mod commands;
mod config;
mod diagnostics;
mod error;
mod format;
mod markdown;
mod render;
mod revision;
mod role;
mod scanner;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

/// Command-line interface definition.
#[derive(Parser)]
#[command(
    name = "srclink",
    version,
    about = "Expand :tree:, :component: and :example: roles into links pinned to the current revision"
)]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
    /// Use this revision instead of asking git (used verbatim)
    #[arg(long, global = true)]
    revision: Option<String>,
    /// Verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Rewrite all documentation files in place with roles expanded
    Apply,
    /// List every role invocation and the URL it resolves to
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a documentation file with roles expanded
    Render {
        /// Markdown or reStructuredText file to render
        file: PathBuf,
    },
    /// Show registered roles and their URL patterns
    Roles,
    /// Print the base URL for the current revision
    Url,
}

/// Install a stderr subscriber whose level follows `-v` and `RUST_LOG`.
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

    // INFO by default so every run reports the commit id and tag it links to.
    let level = match verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let revision = cli.revision.as_deref();

    let result = match &cli.command {
        Commands::Apply => commands::apply(revision),
        Commands::List { json } => commands::list(revision, *json),
        Commands::Render { file } => commands::render(file, revision),
        Commands::Roles => commands::roles(revision),
        Commands::Url => commands::url(revision),
    };

    return match result {
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::FAILURE
        },
        Ok(()) => ExitCode::SUCCESS,
    };
}
