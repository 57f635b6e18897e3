//! Kinship CLI - Command line interface for the family tree engine

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kinship_core::FamilyTree;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod loader;
mod output;

use commands::{completions, load, query, shell, show};
use config::Config;
use loader::{DataFiles, LoadReport};
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "kinship")]
#[command(author, version, about = "Family tree builder and relationship queries")]
pub struct Cli {
    /// Directory holding person.txt, fathers.txt and mothers.txt
    #[arg(short, long, global = true, env = "KINSHIP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/kinship/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format: table, json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the record files and report what was added
    Load(load::LoadArgs),
    /// Show everything known about one person
    Show(show::ShowArgs),
    /// Run a relationship query
    Query(query::QueryArgs),
    /// Interactive console for building and querying a tree
    Shell,
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context holding the in-memory tree
pub struct AppContext {
    pub config: Config,
    pub data_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub tree: FamilyTree,
}

impl AppContext {
    pub fn new(cli: &Cli) -> anyhow::Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let data_dir = cli.data_dir.clone().or_else(|| config.data_dir.clone());
        let format = OutputFormat::from(cli.format.as_deref().unwrap_or(&config.format));

        Ok(Self {
            config,
            data_dir,
            format,
            tree: FamilyTree::new(),
        })
    }

    /// Seed the tree from the data directory, if one is configured
    pub fn load_data(&mut self) -> anyhow::Result<Option<LoadReport>> {
        let Some(dir) = &self.data_dir else {
            tracing::debug!("No data directory configured; starting with an empty tree");
            return Ok(None);
        };
        let files = DataFiles::in_dir(dir, &self.config);
        let report = loader::load_files(&mut self.tree, &files)?;
        Ok(Some(report))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting kinship CLI");

    let mut ctx = AppContext::new(&cli)?;

    match &cli.command {
        Commands::Load(args) => load::run(args, &mut ctx)?,
        Commands::Show(args) => {
            ctx.load_data()?;
            show::run(args, &ctx)?
        }
        Commands::Query(args) => {
            ctx.load_data()?;
            query::run(args, &ctx)?
        }
        Commands::Shell => {
            ctx.load_data()?;
            let stdin = std::io::stdin();
            shell::run(&mut ctx.tree, stdin.lock(), std::io::stdout(), ctx.format)?
        }
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
