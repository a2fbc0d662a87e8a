//! Configuration file for the diff CLI.
//!
//! ```yaml
//! # Fields that change on every run
//! ignore:
//!   - id
//!   - meta.createdAt
//! output: json
//! ```

use crate::DiffOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DiffConfig {
    /// Dotted paths skipped during comparison.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Output format: "text" or "json"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl DiffConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, anyhow::Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, anyhow::Error> {
        let config: DiffConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        for path in &self.ignore {
            if path.trim().is_empty() {
                anyhow::bail!("Ignored paths must not be empty");
            }
            if path.starts_with('$') {
                anyhow::bail!(
                    "Ignored path '{path}' looks like a JSONPath expression. \
                     Use the dotted key of the field instead, e.g. 'user.id' or 'items[0]'"
                );
            }
        }

        if let Some(output) = &self.output {
            if !OUTPUT_FORMATS.contains(&output.as_str()) {
                anyhow::bail!(
                    "Unknown output format: '{output}'. Supported formats: {}",
                    OUTPUT_FORMATS.join(", ")
                );
            }
        }

        Ok(())
    }

    /// Build comparison options, adding `extra_ignore` to the configured paths.
    pub fn to_options(&self, extra_ignore: &[String]) -> DiffOptions {
        let mut ignore = self.ignore.clone();
        for path in extra_ignore {
            if !ignore.contains(path) {
                ignore.push(path.clone());
            }
        }
        DiffOptions { ignore }
    }
}
