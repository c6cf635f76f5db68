//! Wikipad command line entry point

use std::path::PathBuf;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wikipad::commands::{markup_command, ApplyCommand};
use wikipad::core::{AppConfig, APP_NAME, VERSION};
use wikipad::editor::Selection;
use wikipad::widgets::format_size;

#[derive(Parser)]
#[command(name = "wikipad", version, about = "reStructuredText markup toolbar for the command line")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Apply a toolbar command to a selection of a file, in place
    Apply {
        /// bold, italic, bullist, numlist, table, preformatted,
        /// heading1-3, link, uri or figure
        command: String,
        /// Name for link, URI for uri, image path for figure
        argument: Option<String>,
        #[arg(long)]
        file: PathBuf,
        /// Selection start, in characters
        #[arg(long, default_value_t = 0)]
        start: usize,
        /// Selection end, in characters (defaults to start)
        #[arg(long)]
        end: Option<usize>,
        /// Figure caption
        #[arg(long)]
        caption: Option<String>,
    },
    /// Print a byte count the way upload progress shows it
    Size { bytes: u64 },
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    info!("{} v{} starting...", APP_NAME, VERSION);

    match cli.command {
        CliCommand::Apply {
            command,
            argument,
            file,
            start,
            end,
            caption,
        } => {
            let config = match &cli.config {
                Some(path) => AppConfig::load_from(path).await?,
                None => AppConfig::load().await?,
            };
            let command = ApplyCommand {
                file,
                command: markup_command(&command, argument.as_deref(), caption.as_deref())?,
                selection: Selection::new(start, end.unwrap_or(start)),
                editor: config.editor,
            };
            let edit = command.execute().await?;
            println!("{} {}", edit.selection.start, edit.selection.end);
        }
        CliCommand::Size { bytes } => {
            println!("{}", format_size(bytes));
        }
    }

    Ok(())
}
