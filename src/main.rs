use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use compendium::core::currency::Denomination;
use compendium::core::filter::SortColumn;
use compendium::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct FilterArgs {
    /// Show a single file (by name, without extension) instead of all files merged
    #[arg(short, long)]
    file: Option<String>,

    /// Only items whose name contains this text, ignoring case
    #[arg(short, long)]
    name: Option<String>,

    /// Minimum price, inclusive
    #[arg(long, allow_hyphen_values = true)]
    min: Option<String>,

    /// Maximum price, inclusive
    #[arg(long, allow_hyphen_values = true)]
    max: Option<String>,

    /// Unit of --min and --max: pp, gp, ep, sp or cp
    #[arg(short, long)]
    unit: Option<Denomination>,

    /// Column to sort by: name, pp, gp, ep, sp or cp. Repeat to sort again;
    /// naming the same column twice flips its direction
    #[arg(short, long)]
    sort: Vec<SortColumn>,

    /// Reverse the direction of the last sort
    #[arg(short, long, requires = "sort")]
    desc: bool,
}

impl From<FilterArgs> for compendium::ShowOptions {
    fn from(args: FilterArgs) -> Self {
        compendium::ShowOptions {
            file: args.file,
            name: args.name,
            min: args.min,
            max: args.max,
            unit: args.unit,
            sort: args.sort,
            descending: args.desc,
        }
    }
}

impl From<Commands> for compendium::AppCommand {
    fn from(cmd: Commands) -> compendium::AppCommand {
        match cmd {
            Commands::Sources => compendium::AppCommand::Sources,
            Commands::Show(args) => compendium::AppCommand::Show(args.into()),
            Commands::Import { path } => compendium::AppCommand::Import { path },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the JSON files in the catalog folder
    Sources,
    /// Display the catalog, filtered and sorted
    Show(FilterArgs),
    /// Copy a JSON file into the catalog folder
    Import {
        /// File to import
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => match cli.config_path.as_deref() {
            Some(path) => compendium::cli::setup::setup_at_path(path),
            None => compendium::cli::setup::setup(),
        },
        Some(cmd) => compendium::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
