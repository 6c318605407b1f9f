//! egonet CLI - Command-line interface for egonet
//!
//! Builds the attributed social graph from an ego-network dataset directory
//! and prints summaries of it. Nothing is written to disk.

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use egonet_graph::IngestOrder;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "egonet")]
#[command(author = "egonet Contributors")]
#[command(version)]
#[command(about = "Build attributed social graphs from ego-network datasets", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and print a summary
    Build {
        #[command(flatten)]
        build: BuildArgs,

        /// Print the build report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one node's features, circles and neighbours
    Node {
        #[command(flatten)]
        build: BuildArgs,

        /// Dataset node id
        id: u64,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List circles and their member counts
    Circles {
        #[command(flatten)]
        build: BuildArgs,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// List the feature name registry
    Names {
        #[command(flatten)]
        build: BuildArgs,
    },
}

/// Options shared by every subcommand.
#[derive(Args)]
struct BuildArgs {
    /// Dataset directory
    path: PathBuf,

    /// JSON build config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// When parsed files are applied to the graph
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Combine repeated feature rows with elementwise max instead of overwriting
    #[arg(long)]
    merge_features: bool,

    /// Parse files one at a time
    #[arg(long)]
    sequential: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Feature names first, then edges, features, ego features, circles
    Deferred,
    /// Directory listing order
    Listing,
}

impl From<BuildArgs> for commands::BuildOptions {
    fn from(args: BuildArgs) -> Self {
        Self {
            path: args.path,
            config: args.config,
            order: args.order.map(|order| match order {
                OrderArg::Deferred => IngestOrder::Deferred,
                OrderArg::Listing => IngestOrder::Listing,
            }),
            merge_features: args.merge_features,
            sequential: args.sequential,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Build { build, json } => commands::build(&build.into(), json),
        Commands::Node { build, id, json } => commands::node(&build.into(), id, json),
        Commands::Circles { build, json } => commands::circles(&build.into(), json),
        Commands::Names { build } => commands::names(&build.into()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
