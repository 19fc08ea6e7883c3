//! oneclick CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use commands::{GenerateCommand, PostmanCommand, SetupCommand};
use oneclick_cli_lib::observability::{self, LogFormat};

#[derive(Parser)]
#[command(name = "oneclick")]
#[command(version)]
#[command(about = "Generate the API layer of a Laravel application", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    log_format: LogFormat,

    /// Laravel project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Extra configuration file layered over the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate model, migration, repository, service, resource,
    /// controller, form requests and routes for one entity
    #[command(alias = "generate:project")]
    Generate {
        /// Entity name (`PascalCase`, e.g. `Post`, `BlogPost`)
        name: String,
        /// Field definitions (e.g. `title:string`, `author_id:foreignId`);
        /// asked interactively when omitted
        #[arg(short, long = "field")]
        fields: Vec<String>,
        /// Do not ask for custom repository methods
        #[arg(long)]
        no_methods: bool,
        /// Show a diff for every patched file
        #[arg(long)]
        diff: bool,
    },
    /// Write the support files and wire `bootstrap/app.php`
    Setup {
        /// Show a diff for every patched file
        #[arg(long)]
        diff: bool,
    },
    /// Export the generated API routes as a Postman collection
    #[command(name = "postman:export", alias = "postman-export")]
    PostmanExport {
        /// Collection name
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    observability::init(cli.verbose, cli.log_format)?;

    match cli.command {
        Commands::Generate {
            name,
            fields,
            no_methods,
            diff,
        } => {
            let cmd = GenerateCommand::new(name, fields, !no_methods, diff, cli.root, cli.config);
            cmd.execute()?;
        }
        Commands::Setup { diff } => {
            SetupCommand::new(diff, cli.root, cli.config).execute()?;
        }
        Commands::PostmanExport { name } => {
            PostmanCommand::new(name, cli.root, cli.config).execute()?;
        }
    }

    Ok(())
}
