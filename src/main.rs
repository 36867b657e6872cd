//! TOPSIS Ranker CLI
//!
//! # Commands
//!
//! - `rank` - Rank a CSV/Excel file and write the result CSV
//! - `serve` - Start the HTTP upload service

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use topsis_ranker::adapters::http::{build_app, TopsisAppState};
use topsis_ranker::adapters::{LocalResultStorage, ResendMailer};
use topsis_ranker::application::{DeliverResultHandler, RankTableCommand, RankTableHandler};
use topsis_ranker::config::AppConfig;
use topsis_ranker::domain::analysis::parse_table;
use topsis_ranker::domain::foundation::TableKind;
use topsis_ranker::ports::ResultMailer;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// TOPSIS Ranker - Multi-criteria ranking of alternatives
#[derive(Parser)]
#[command(name = "topsis-ranker")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the rows of a table and write the result CSV
    ///
    /// Examples:
    ///   topsis-ranker rank data.csv "1,1,1,2" "+,+,-,+" result.csv
    ///   topsis-ranker rank phones.xlsx "1,2,1" "-,+,+" out.csv
    ///
    /// An `.xlsx` input is also saved as a `.csv` copy next to it.
    Rank {
        /// Input table (.csv, .xlsx or .xls)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Comma-separated positive weights, one per criterion
        #[arg(value_name = "WEIGHTS", allow_hyphen_values = true)]
        weights: String,

        /// Comma-separated impacts (+ or -), one per criterion
        #[arg(value_name = "IMPACTS", allow_hyphen_values = true)]
        impacts: String,

        /// Output CSV path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
    /// Start the HTTP upload service
    ///
    /// Configuration is read from `TOPSIS__*` environment variables.
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank {
            input,
            weights,
            impacts,
            output,
        } => {
            init_tracing("warn", false);
            rank(input, weights, impacts, output).await
        }
        Commands::Serve => serve().await,
    }
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn rank(input: PathBuf, weights: String, impacts: String, output: PathBuf) -> Result<(), BoxError> {
    let content = tokio::fs::read(&input)
        .await
        .map_err(|e| format!("cannot read {}: {}", input.display(), e))?;

    let scored = RankTableHandler::new().handle(RankTableCommand {
        file_name: input.to_string_lossy().to_string(),
        content: content.clone(),
        weights,
        impacts,
    })?;

    if is_xlsx(&input) {
        let copy = write_csv_copy(&input, &content).await?;
        info!(path = %copy.display(), "wrote csv copy of workbook");
    }

    tokio::fs::write(&output, scored.to_csv()?)
        .await
        .map_err(|e| format!("cannot write {}: {}", output.display(), e))?;

    println!("TOPSIS result saved to {}", output.display());
    Ok(())
}

fn is_xlsx(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("xlsx"))
}

/// Writes the workbook's first sheet as `<input stem>.csv` next to the input.
async fn write_csv_copy(input: &Path, content: &[u8]) -> Result<PathBuf, BoxError> {
    let raw = parse_table(content, &TableKind::Spreadsheet)?;
    let copy = input.with_extension("csv");
    tokio::fs::write(&copy, raw.to_csv()?)
        .await
        .map_err(|e| format!("cannot write {}: {}", copy.display(), e))?;
    Ok(copy)
}

async fn serve() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.is_production());
    config.validate()?;

    let storage = Arc::new(LocalResultStorage::new(&config.storage.output_dir));
    let mailer: Option<Arc<dyn ResultMailer>> = match &config.email {
        Some(email) => Some(Arc::new(ResendMailer::from_config(email)?) as Arc<dyn ResultMailer>),
        None => {
            tracing::warn!("no email section configured; email delivery is disabled");
            None
        }
    };

    let state = TopsisAppState::new(
        RankTableHandler::new(),
        DeliverResultHandler::new(storage, mailer),
    );
    let app = build_app(
        state,
        config.server.max_upload_bytes,
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, output_dir = %config.storage.output_dir.display(), "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
