//! AWS Lambda entry point for Label Writer
//!
//! Deploy with `cargo lambda build --release --features lambda`
//! and subscribe the function to the bucket's object-created notifications.

use label_writer::lambda::{build_processor, handler};
use lambda_runtime::{Error as LambdaError, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Label Writer Lambda starting...");

    let processor = build_processor().await?;
    lambda_runtime::run(service_fn(|event| handler(event, &processor))).await
}
