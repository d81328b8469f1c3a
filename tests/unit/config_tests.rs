// Configuration loading and validation

use serverless_filter_bot::config::Config;
use serverless_filter_bot::error::FilterError;
use std::collections::HashMap;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_config_from_environment_map() {
    let config = Config::from_source(vars(&[
        ("SOURCE_BUCKET_NAME", "uploads"),
        ("DESTINATION_BUCKET_NAME", "uploads-filtered"),
    ]))
    .unwrap();

    assert_eq!(config.source_bucket_name, "uploads");
    assert_eq!(config.destination_bucket_name, "uploads-filtered");
    assert!(config.validate().is_ok());
}

#[test]
fn test_unrelated_variables_are_ignored() {
    let config = Config::from_source(vars(&[
        ("SOURCE_BUCKET_NAME", "uploads"),
        ("DESTINATION_BUCKET_NAME", "uploads-filtered"),
        ("AWS_REGION", "eu-west-1"),
        ("AWS_LAMBDA_FUNCTION_NAME", "filter-bot"),
    ]))
    .unwrap();

    assert_eq!(config.font_path, None);
}

#[test]
fn test_missing_required_variables() {
    // Scenario 1: nothing set
    let result = Config::from_source(HashMap::new());
    assert!(matches!(result, Err(FilterError::Config(_))));

    // Scenario 2: only the destination
    let result = Config::from_source(vars(&[("DESTINATION_BUCKET_NAME", "out")]));
    assert!(matches!(result, Err(FilterError::Config(_))));
}

#[test]
fn test_validation_errors() {
    let base = Config {
        source_bucket_name: "uploads".to_string(),
        destination_bucket_name: "uploads-filtered".to_string(),
        font_path: None,
    };

    let mut blank_destination = base.clone();
    blank_destination.destination_bucket_name = String::new();
    let err = blank_destination.validate().unwrap_err();
    assert!(err.to_string().contains("DESTINATION_BUCKET_NAME"));

    let mut same_bucket = base.clone();
    same_bucket.destination_bucket_name = "uploads".to_string();
    assert!(matches!(same_bucket.validate(), Err(FilterError::Config(_))));

    let mut empty_font = base;
    empty_font.font_path = Some(std::path::PathBuf::new());
    assert!(empty_font.validate().is_err());
}
