//! Report configuration from TOML (`[report]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReportConfig {
    /// Directory receiving the Markdown and JSON reports
    pub output_dir: String,
}

impl Default for FileReportConfig {
    fn default() -> Self {
        Self {
            output_dir: "reports".to_string(),
        }
    }
}
