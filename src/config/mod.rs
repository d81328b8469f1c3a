//! Function settings, read once from the environment at cold start.
//!
//! | Variable                  | Required | Meaning                               |
//! |---------------------------|----------|---------------------------------------|
//! | `SOURCE_BUCKET_NAME`      | yes      | Only events from this bucket are used |
//! | `DESTINATION_BUCKET_NAME` | yes      | Where `filtered-*` objects are written |
//! | `FONT_PATH`               | no       | TrueType/OpenType font for the stamp  |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::FilterError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub source_bucket_name: String,
    pub destination_bucket_name: String,
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, FilterError> {
        Self::load(::config::Environment::default())
    }

    /// Load from an explicit variable map instead of the process environment.
    pub fn from_source(vars: HashMap<String, String>) -> Result<Self, FilterError> {
        Self::load(::config::Environment::default().source(Some(vars)))
    }

    fn load(env: ::config::Environment) -> Result<Self, FilterError> {
        let settings = ::config::Config::builder()
            .add_source(env)
            .build()
            .map_err(|e| FilterError::Config(format!("Failed to read environment: {}", e)))?;

        settings
            .try_deserialize::<Config>()
            .map_err(|e| FilterError::Config(format!("Invalid settings: {}", e)))
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if self.source_bucket_name.trim().is_empty() {
            return Err(FilterError::Config(
                "SOURCE_BUCKET_NAME cannot be empty".to_string(),
            ));
        }

        if self.destination_bucket_name.trim().is_empty() {
            return Err(FilterError::Config(
                "DESTINATION_BUCKET_NAME cannot be empty".to_string(),
            ));
        }

        // Output in the source bucket would trigger the function again
        if self.source_bucket_name == self.destination_bucket_name {
            return Err(FilterError::Config(format!(
                "Source and destination bucket must differ, both are '{}'",
                self.source_bucket_name
            )));
        }

        if let Some(path) = &self.font_path {
            if path.as_os_str().is_empty() {
                return Err(FilterError::Config("FONT_PATH cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}
