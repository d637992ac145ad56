use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wariai::commands;
use wariai::config::Config;

#[derive(Parser)]
#[command(
    name = "wariai",
    version,
    about = "Japanese book-title ratio-clause miner with entity graph analytics",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML); environment variables otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Harvest ratio-pattern titles from the NDL Search SRU API
    Harvest {
        /// Minimal run: first 2 queries, 1 page each
        #[arg(long, default_value = "false")]
        smoke: bool,

        /// Output CSV path (default: <output_dir>/titles_raw.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Harvest ratio-pattern titles from the Google Books volumes API
    HarvestBooks {
        /// Search query (default: intitle:"が9割")
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum volumes to fetch
        #[arg(short, long)]
        max_results: Option<u32>,

        /// Output CSV path (default: <output_dir>/titles_raw.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse harvested titles into the extraction table
    Extract {
        /// Input title CSV (default: <output_dir>/titles_raw.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output CSV path (default: <output_dir>/titles_extracted.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build subject and predicate rankings
    Rank {
        /// Input extraction CSV (default: <output_dir>/titles_extracted.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Build the entity graph and run cycle and path analysis
    Graph {
        /// Input extraction CSV (default: <output_dir>/titles_extracted.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Keep only edges of at least this weight
        #[arg(long)]
        min_weight: Option<f64>,

        /// Drop weakly connected components of at most this many nodes
        #[arg(long)]
        prune_components: Option<usize>,

        /// Minimum node count for reported paths
        #[arg(long, default_value = "3")]
        min_path_nodes: usize,
    },

    /// Render the Markdown run summary
    Report {
        /// Input extraction CSV (default: <output_dir>/titles_extracted.csv)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Custom Handlebars template
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output path (default: <output_dir>/report.md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;

    tracing::info!("wariai starting");

    match cli.command {
        Commands::Harvest { smoke, output } => {
            tracing::info!(smoke = %smoke, "Starting harvest command");
            commands::harvest(config, smoke, output).await?;
        }

        Commands::HarvestBooks {
            query,
            max_results,
            output,
        } => {
            tracing::info!(query = ?query, max_results = ?max_results, "Starting harvest-books command");
            commands::harvest_books(config, query, max_results, output).await?;
        }

        Commands::Extract { input, output } => {
            tracing::info!(input = ?input, "Starting extract command");
            commands::extract(config, input, output)?;
        }

        Commands::Rank { input } => {
            tracing::info!(input = ?input, "Starting rank command");
            commands::rank(config, input)?;
        }

        Commands::Graph {
            input,
            min_weight,
            prune_components,
            min_path_nodes,
        } => {
            tracing::info!(
                input = ?input,
                min_weight = ?min_weight,
                prune_components = ?prune_components,
                "Starting graph command"
            );
            commands::graph(config, input, min_weight, prune_components, min_path_nodes)?;
        }

        Commands::Report {
            input,
            template,
            output,
        } => {
            tracing::info!(input = ?input, template = ?template, "Starting report command");
            commands::report(config, input, template, output)?;
        }
    }

    tracing::info!("wariai completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("wariai=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("wariai=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}
