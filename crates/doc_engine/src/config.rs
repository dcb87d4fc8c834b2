//! Configuration for filing rendering

use serde::{Deserialize, Serialize};

/// Configuration for where and how generated filings are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilingConfig {
    /// Directory where generated filings land before delivery
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// File name prefix for generated filings
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_file_prefix() -> String {
    "Заявление".to_string()
}

impl Default for FilingConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
        }
    }
}
