mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "prd",
    about = "Parse, classify and validate Product Requirements Documents",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .prd/ or .git/)
    #[arg(long, global = true, env = "PRD_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a PRD file and show the extracted record
    Parse {
        /// Markdown or text file
        file: PathBuf,
    },

    /// Validate a PRD file (exits non-zero when required fields are missing)
    Validate {
        /// Markdown or text file
        file: PathBuf,
    },

    /// Print whether a PRD describes a platform or an agent
    Classify {
        /// Markdown or text file
        file: PathBuf,
    },

    /// Re-emit a PRD as normalized markdown
    Render {
        /// Markdown or text file
        file: PathBuf,
    },

    /// Manage .prd/config.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Parse { file } => cmd::document::parse(&root, &file, cli.json),
        Commands::Validate { file } => cmd::document::validate(&root, &file, cli.json),
        Commands::Classify { file } => cmd::document::classify(&root, &file, cli.json),
        Commands::Render { file } => cmd::document::render(&root, &file),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
