mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use elfsift_core::Binary;
use std::path::PathBuf;

/// Simple ELF64 header and section table inspector
#[derive(Parser)]
#[command(
    name = "elfsift",
    about = "Inspect ELF64 binaries (file header and section header table)",
    version,
    author
)]
struct Cli {
    /// Path to binary file
    #[arg(required = true)]
    path: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum Command {
    /// Show the file header only
    Header,
    /// List all sections
    Sections,
    /// Header followed by the section table
    #[default]
    All,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let bin = Binary::open(&cli.path)
        .with_context(|| format!("cannot analyze {}", cli.path.display()))?;
    log::info!("{} sections in {}", bin.sections.len(), bin.path);

    let command = cli.command.unwrap_or_default();
    match cli.format {
        OutputFormat::Text => {
            let text = match command {
                Command::Header => report::render_header(&bin.header),
                Command::Sections => report::render_sections(&bin.sections),
                Command::All => report::render_report(&bin),
            };
            print!("{text}");
        }
        OutputFormat::Json => {
            let json = match command {
                Command::Header => serde_json::to_string_pretty(&bin.header)?,
                Command::Sections => serde_json::to_string_pretty(&bin.sections)?,
                Command::All => serde_json::to_string_pretty(&bin)?,
            };
            println!("{json}");
        }
    }

    Ok(())
}
