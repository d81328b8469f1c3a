use lambda_runtime::{service_fn, LambdaEvent};
use serverless_filter_bot::config::Config;
use serverless_filter_bot::error::FilterError;
use serverless_filter_bot::handler::{HandlerResponse, WatermarkHandler};
use serverless_filter_bot::s3::S3ObjectStore;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    // Initialize logging subsystem
    serverless_filter_bot::logging::init_subscriber()?;

    let config = Config::from_env().and_then(|config| {
        config.validate()?;
        Ok(config)
    });
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error_kind = e.kind(), error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        source_bucket = %config.source_bucket_name,
        destination_bucket = %config.destination_bucket_name,
        font_path = ?config.font_path,
        "Configuration loaded successfully"
    );

    // One SDK client per execution environment, reused across invocations
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config));

    let handler = Arc::new(WatermarkHandler::new(config, store)?);

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<serde_json::Value>| {
            let handler = Arc::clone(&handler);
            async move { handle_request(&handler, event).await }
        },
    ))
    .await
}

async fn handle_request(
    handler: &WatermarkHandler<S3ObjectStore>,
    event: LambdaEvent<serde_json::Value>,
) -> Result<HandlerResponse, FilterError> {
    tracing::debug!(request_id = %event.context.request_id, "Received invocation");
    handler.handle_value(event.payload).await
}
