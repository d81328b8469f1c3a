// Logging subscriber setup

use serverless_filter_bot::logging::{env_filter, init_subscriber};

#[test]
fn test_can_initialize_tracing_subscriber() {
    // Initialization succeeds, and a second call keeps the first subscriber
    assert!(init_subscriber().is_ok());
    assert!(init_subscriber().is_ok());

    tracing::info!(bucket = "uploads", key = "cat.png", "Processing image");
}

#[test]
fn test_filter_directives() {
    assert_eq!(env_filter(None).to_string(), "info");
    assert_eq!(
        env_filter(Some("serverless_filter_bot=debug")).to_string(),
        "serverless_filter_bot=debug"
    );
}
