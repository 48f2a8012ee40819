mod scan;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "autumn",
    version,
    about = "Enumerate the resources of a package across class path directories and archives",
    long_about = "Autumn resolves a dotted package name against every directory and jar on the \
                  class path and lists the files found beneath it, the same way a component \
                  scanner discovers candidate classes at start-up."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the resources below a package
    #[command(
        long_about = "Looks the package up in every class path entry and prints each file found. \
                            Without --classpath or --config, the CLASSPATH environment variable is used, \
                            falling back to the current directory."
    )]
    Scan(ScanArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    /// Dotted package name, e.g. com.example.app
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// Class path entry (directory or archive); may be repeated
    #[arg(long = "classpath", short = 'c', value_name = "ENTRY")]
    pub classpath: Vec<PathBuf>,

    /// JSON file holding a class path configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print fully qualified class names, skipping non-class resources
    #[arg(long)]
    pub classes: bool,

    /// Print the result as a JSON array
    #[arg(long)]
    pub json: bool,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let _guard = autumn_io::logging::init_logging("cli", true);

    match cli.command {
        Commands::Scan(args) => scan::run(args, &mut std::io::stdout().lock()),
    }
}
