use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use topsis_ranker::adapters::http::{api_router, AnalysisAppState};
use topsis_ranker::adapters::{
    delivery_from_config, CsvMatrixReader, CsvResultWriter, LocalResultStore, XlsxMatrixReader,
};
use topsis_ranker::application::{
    DeliveryStatus, RankAlternativesCommand, RankAlternativesHandler, RankAlternativesResult,
};
use topsis_ranker::config::AppConfig;
use topsis_ranker::ports::{ResultDelivery, ResultStore};

/// TOPSIS Ranker: rank alternatives by closeness to the ideal solution.
#[derive(Parser)]
#[command(name = "topsis-ranker", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the rows of a CSV or Excel decision table
    Rank {
        /// Input .csv/.xlsx/.xls: identifier column followed by numeric criteria
        input: PathBuf,

        /// Comma-separated criterion weights, e.g. "1,1,1,2"
        #[arg(long, allow_hyphen_values = true)]
        weights: String,

        /// Comma-separated impacts, "+" to maximize and "-" to minimize
        #[arg(long, allow_hyphen_values = true)]
        impacts: String,

        /// Result file (default: <results_dir>/result_<input stem>.csv)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// E-mail the result file to this address
        #[arg(long)]
        email: Option<String>,
    },

    /// Start the HTTP API
    Serve {
        /// Address to bind (overrides TOPSIS__SERVER__HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides TOPSIS__SERVER__PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = AppConfig::load().context("Failed to load configuration")?;
    let cli = Cli::parse();

    if let Commands::Serve { host, port } = &cli.command {
        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
    }
    config.validate().context("Invalid configuration")?;

    init_tracing(&config);

    let delivery = delivery_from_config(config.email.as_ref())?;

    match cli.command {
        Commands::Rank {
            input,
            weights,
            impacts,
            output,
            email,
        } => {
            rank(&config, delivery, &input, weights, impacts, output, email).await?;
        }
        Commands::Serve { .. } => {
            serve(&config, delivery).await?;
        }
    }

    Ok(())
}

/// Installs the subscriber: RUST_LOG wins over the configured filter, and
/// production emits JSON lines. Logs go to stderr so stdout stays clean.
fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_handler(
    store: Arc<dyn ResultStore>,
    delivery: Arc<dyn ResultDelivery>,
) -> RankAlternativesHandler {
    RankAlternativesHandler::new(
        vec![
            Arc::new(CsvMatrixReader::new()),
            Arc::new(XlsxMatrixReader::new()),
        ],
        Arc::new(CsvResultWriter::new()),
        store,
        delivery,
    )
}

async fn rank(
    config: &AppConfig,
    delivery: Arc<dyn ResultDelivery>,
    input: &Path,
    weights: String,
    impacts: String,
    output: Option<PathBuf>,
    email: Option<String>,
) -> Result<()> {
    let content = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let filename = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (results_dir, output_name) = match &output {
        Some(path) => {
            let Some(name) = path.file_name() else {
                bail!("Output path {} has no file name", path.display());
            };
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            (dir.to_path_buf(), Some(name.to_string_lossy().into_owned()))
        }
        None => (config.storage.results_dir.clone(), None),
    };

    let handler = build_handler(Arc::new(LocalResultStore::new(results_dir)), delivery);
    let result = handler
        .handle(RankAlternativesCommand {
            filename,
            content,
            weights,
            impacts,
            recipient: email,
            output_name,
        })
        .await?;

    print_ranking(&result);
    println!("\nResult written to {}", result.stored.path.display());

    match &result.delivery {
        DeliveryStatus::Delivered { recipient } => println!("Result sent to {}", recipient),
        DeliveryStatus::Failed { .. } => {
            if let Some(warning) = result.delivery.warning() {
                eprintln!("warning: {}", warning);
            }
        }
        DeliveryStatus::NotRequested => {}
    }

    Ok(())
}

fn print_ranking(result: &RankAlternativesResult) {
    let id_width = result
        .evaluation
        .ranking
        .iter()
        .map(|s| s.id().len())
        .chain(std::iter::once(result.matrix.id_header().len()))
        .max()
        .unwrap_or(0);

    println!("{:<id_width$}  {:>12}  {:>4}", result.matrix.id_header(), "Topsis Score", "Rank");
    for scored in &result.evaluation.ranking {
        println!("{:<id_width$}  {:>12.6}  {:>4}", scored.id(), scored.score, scored.rank);
    }
}

async fn serve(config: &AppConfig, delivery: Arc<dyn ResultDelivery>) -> Result<()> {
    let store: Arc<dyn ResultStore> =
        Arc::new(LocalResultStore::new(config.storage.results_dir.clone()));
    let handler = Arc::new(build_handler(store.clone(), delivery));
    let app = api_router(AnalysisAppState::new(handler, store), &config.server);

    let addr = config.server.socket_addr()?;
    if config.email.is_none() {
        warn!("No e-mail provider configured; result delivery is disabled");
    }
    info!(%addr, results_dir = %config.storage.results_dir.display(), "TOPSIS API listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
