mod assembler;
mod constants;
mod derived_fields;
mod image_audit;
mod image_name;
mod models;
mod ordered_map;
mod pipeline;
mod repository;
mod serializer;
mod settings;
mod validator;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, Level};

use pipeline::{Destination, EmitPipeline};
use repository::Repository;
use settings::EmitterSettings;

#[derive(Parser)]
#[command(name = constants::APP_NAME, version = constants::APP_VERSION)]
#[command(about = "Generate the storefront catalog data module", long_about = None)]
struct Cli {
    /// Base path prepended to every image file name
    #[arg(long, global = true)]
    image_base: Option<String>,

    /// Module the generated file imports its types from
    #[arg(long, global = true)]
    types_module: Option<String>,

    /// Log debug details to standard error
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the categories, products and reviews module (the default)
    Generate {
        /// Write to this file instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the catalog's image names with the files in a directory
    AuditImages {
        /// Directory holding the product images
        dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = EmitterSettings::default()
        .with_image_base(cli.image_base)
        .with_types_module(cli.types_module);
    debug!(?settings, title = constants::APP_TITLE, "settings resolved");

    let pipeline = EmitPipeline::new(Repository::new(&constants::APP_CATALOG), settings);

    match cli.command.unwrap_or(Command::Generate { output: None }) {
        Command::Generate { output } => {
            let destination = output.map_or(Destination::Stdout, Destination::File);
            pipeline.generate(&destination)
        }
        Command::AuditImages { dir } => pipeline.audit_images(&dir),
    }
}
