//! Virtual try-on command-line binary.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};

use tryon_cli::logging::init_tracing;
use tryon_cli::presenter::{render_error, render_json, render_text};
use tryon_cli::{AppConfig, CliError, CliResult, GarmentInput, SubmissionInput, TryOnPipeline};
use tryon_client::{Credential, TryOnClient};
use tryon_media::GarmentSource;
use tryon_models::Category;

/// Try a garment on a model photo using the virtual try-on service.
#[derive(Parser, Debug)]
#[command(name = "tryon", version, about)]
struct Cli {
    /// Photo of the person (PNG or JPEG).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Garment image file.
    #[arg(long, conflicts_with = "garment_url")]
    garment: Option<PathBuf>,

    /// Direct link to a garment image.
    #[arg(long)]
    garment_url: Option<String>,

    /// Clothing category: upper_body, lower_body or dresses.
    #[arg(long, default_value = "upper_body")]
    category: Category,

    /// Optional garment description (max 200 characters).
    #[arg(long)]
    description: Option<String>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprint!("{}", render_error(&e));
            return Ok(ExitCode::from(2));
        }
    };

    init_tracing(config.log_format);
    info!("Starting tryon");

    let pipeline = match build_pipeline(&config) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to initialize: {}", e);
            eprint!("{}", render_error(&e));
            return Ok(ExitCode::from(2));
        }
    };

    let input = match read_input(&cli).await {
        Ok(i) => i,
        Err(e) => {
            eprint!("{}", render_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    let report = match pipeline.run(input).await {
        Ok(r) => r,
        Err(e) => {
            eprint!("{}", render_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    match cli.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => println!("{}", render_json(&report)?),
    }

    if report.result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn build_pipeline(config: &AppConfig) -> CliResult<TryOnPipeline> {
    let credential = Credential::from_env()?;
    let client = TryOnClient::new(config.client.clone())?;
    let garments = GarmentSource::new(config.media.clone())
        .map_err(|e| CliError::config(e.to_string()))?;

    Ok(TryOnPipeline::new(client, garments, credential))
}

async fn read_input(cli: &Cli) -> CliResult<SubmissionInput> {
    let model = match &cli.model {
        Some(path) => Some(read_file(path).await?),
        None => None,
    };

    let garment = match (&cli.garment, &cli.garment_url) {
        (Some(path), _) => Some(GarmentInput::Upload(read_file(path).await?)),
        (None, Some(url)) => Some(GarmentInput::Url(url.clone())),
        (None, None) => None,
    };

    Ok(SubmissionInput {
        model,
        garment,
        category: cli.category,
        description: cli.description.clone(),
    })
}

async fn read_file(path: &Path) -> CliResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadInput {
            path: path.display().to_string(),
            source,
        })
}
