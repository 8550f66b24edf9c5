//! Label Writer CLI
//!
//! Local execution entry point. For AWS Lambda, use `label-writer-lambda`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use label_writer::{
    clients::{OpenAiClient, RekognitionDetector},
    error::{AppError, Result},
    models::{ApiKey, Config, UploadEvent, UploadRecord},
    pipeline::NotificationProcessor,
    services::{LabelFetcher, build_prompt},
};

/// Label Writer - articles from uploaded images
#[derive(Parser, Debug)]
#[command(
    name = "label-writer",
    version,
    about = "Turns uploaded images into articles"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one invocation from an S3 notification JSON file
    Process {
        /// Path to the event payload
        #[arg(long)]
        event: PathBuf,
    },

    /// Print the labels detected for one object
    Labels {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        key: String,
    },

    /// Print the prompt that would be sent for the given labels
    Prompt {
        /// Label names
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Validate configuration
    Validate,
}

/// Logger writing diagnostics to stdout, like the Lambda runtime's log stream.
fn logger_builder(verbose: bool) -> env_logger::Builder {
    let level = if verbose { "debug" } else { "info" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder
        .format_timestamp_secs()
        .target(env_logger::Target::Stdout);
    builder
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    logger_builder(verbose).init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env_overrides();

    match cli.command {
        Command::Process { event } => {
            config.validate()?;
            let content = std::fs::read_to_string(&event)?;
            let upload: UploadEvent = serde_json::from_str(&content)?;
            log::info!(
                "Loaded {} records from {}",
                upload.records.len(),
                event.display()
            );

            let detector = RekognitionDetector::from_env().await;
            let completion = OpenAiClient::new(&config.generation, ApiKey::from_env())?;
            let processor =
                NotificationProcessor::new(&config, Arc::new(detector), Arc::new(completion));

            let envelope = processor.process(&upload).await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }

        Command::Labels { bucket, key } => {
            config.validate()?;
            let detector = RekognitionDetector::from_env().await;
            let fetcher = LabelFetcher::new(Arc::new(detector), &config.vision);
            let record = UploadRecord::new(bucket, key);

            let labels = fetcher.fetch(&record).await?;
            if labels.is_empty() {
                log::warn!("No labels above {}% for {}", config.vision.min_confidence, record);
            }
            for label in labels {
                println!("{label}");
            }
        }

        Command::Prompt { labels } => {
            let names: Vec<&str> = labels.iter().map(String::as_str).collect();
            println!("{}", build_prompt(&names));
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            if !ApiKey::from_env().is_present() {
                return Err(AppError::config("OPENAI_API_KEY is not set"));
            }

            log::info!("✓ Config OK (model {})", config.generation.model);
        }
    }

    Ok(())
}
