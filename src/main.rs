use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod batch;
mod config;
mod error;
mod heuristic;
mod mock;
mod models;
mod service;
mod session;
mod view;

use config::{Config, LatencyMode};
use service::{ReviewApi, SentimentService};
use session::ReviewWidget;

#[derive(Parser)]
#[command(name = "reel-sentiment")]
#[command(about = "Movie review sentiment showcase", long_about = None)]
struct Cli {
    /// Print raw JSON instead of rendered views
    #[arg(long, global = true)]
    json: bool,
    /// Seed for the mock random source (overrides REEL_SENTIMENT_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Simulated network latency (overrides REEL_SENTIMENT_LATENCY)
    #[arg(long, value_enum, global = true)]
    latency: Option<LatencyMode>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hero page: metrics, accuracy chart and sample reviews
    Home,
    /// Gallery of sample dataset entries
    Reviews,
    /// Detail panel for a single review
    Review { id: i64 },
    /// Model metrics, training history and architecture
    Metrics,
    /// Classify a review, or every row of a CSV file with a `text` column
    #[command(group(
        ArgGroup::new("input")
            .args(["text", "csv"])
            .required(true)
            .multiple(false)
    ))]
    Classify {
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to encode JSON output")?;
    println!("{rendered}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::from_env()
        .context("invalid environment configuration")?
        .with_overrides(cli.seed, cli.latency);

    tracing::debug!(?config, "resolved configuration");
    let latency = config.latency.latency();
    let service = match config.seed {
        Some(seed) => SentimentService::seeded(seed, latency),
        None => SentimentService::from_entropy(latency),
    };
    let now = chrono::Utc::now();

    match cli.command {
        Commands::Home => {
            let dashboard = session::load_dashboard(&service).await;
            if cli.json {
                print_json(&dashboard)?;
            } else {
                print!("{}", view::render_home(&dashboard, now));
            }
        }
        Commands::Reviews => {
            let envelope = service.list_reviews().await?;
            if cli.json {
                print_json(&envelope)?;
            } else {
                print!("{}", view::render_gallery(&envelope.data, now));
            }
        }
        Commands::Review { id } => {
            if cli.json {
                print_json(&service.get_review(id).await?)?;
            } else {
                let detail = session::load_detail(&service, id).await?;
                print!("{}", view::render_detail(&detail));
            }
        }
        Commands::Metrics => {
            let (metrics, progress) =
                tokio::join!(service.get_metrics(), service.get_training_progress());
            let (metrics, progress) = (metrics?, progress?);
            if cli.json {
                print_json(&serde_json::json!({ "metrics": metrics, "training": progress }))?;
            } else {
                print!("{}", view::render_metrics(&metrics.data));
                println!();
                print!("{}", view::render_training_history(&progress.data));
                println!();
                print!("{}", view::render_architecture());
            }
        }
        Commands::Classify { text, csv } => {
            if let Some(path) = csv {
                let texts = batch::read_texts(&path)?;
                let outcomes = batch::classify_all(&service, texts).await;
                if cli.json {
                    print_json(&outcomes)?;
                } else {
                    for outcome in &outcomes {
                        match outcome {
                            batch::BatchOutcome::Classified(review) => {
                                println!("> {}", review.text);
                                print!("{}", view::render_prediction(review));
                            }
                            batch::BatchOutcome::Rejected { text, reason } => {
                                println!("> {text}");
                                println!("! {reason}");
                            }
                        }
                    }
                }
            } else if let Some(text) = text {
                let mut widget = ReviewWidget::new();
                widget.set_text(text);
                widget.analyze(&service).await;
                if cli.json {
                    match (widget.error(), widget.prediction()) {
                        (None, Some(prediction)) => print_json(prediction)?,
                        (error, _) => print_json(&serde_json::json!({ "error": error }))?,
                    }
                } else {
                    print!("{}", view::render_widget(&widget));
                }
            }
        }
    }

    Ok(())
}
