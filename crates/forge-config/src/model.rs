//! Model source files and output location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_base_template() -> PathBuf {
    PathBuf::from("base.yaml")
}

fn default_fact_catalog() -> PathBuf {
    PathBuf::from("facts.yaml")
}

fn default_name_column() -> String {
    String::from("ELEMENT_NUMBER")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Base semantic model template.
    #[serde(default = "default_base_template")]
    pub base_template: PathBuf,

    /// Fact catalog the requested names are resolved against.
    #[serde(default = "default_fact_catalog")]
    pub fact_catalog: PathBuf,

    /// When set, generated models are written here.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Query result column holding fact names.
    #[serde(default = "default_name_column")]
    pub name_column: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_template: default_base_template(),
            fact_catalog: default_fact_catalog(),
            output: None,
            name_column: default_name_column(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ModelConfig::default();
        assert_eq!(config.base_template, PathBuf::from("base.yaml"));
        assert_eq!(config.fact_catalog, PathBuf::from("facts.yaml"));
        assert!(config.output.is_none());
        assert_eq!(config.name_column, "ELEMENT_NUMBER");
    }
}
