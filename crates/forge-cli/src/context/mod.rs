use std::path::{Path, PathBuf};

use forge_config::ForgeConfig;
use forge_core::ModelPaths;
use forge_stage::{ObjectStoreStage, StageError};

use crate::cli::root_commands::ModelArgs;

mod config_warnings;

pub use config_warnings::warn_unconfigured;

/// Loaded configuration plus the lookups command handlers share.
pub struct AppContext {
    pub config: ForgeConfig,
}

impl AppContext {
    pub const fn new(config: ForgeConfig) -> Self {
        Self { config }
    }

    /// Model locations: command-line overrides first, then configuration.
    pub fn model_paths(&self, args: &ModelArgs) -> ModelPaths {
        let model = &self.config.model;
        ModelPaths {
            base_template: args
                .template
                .clone()
                .unwrap_or_else(|| model.base_template.clone()),
            fact_catalog: self.catalog_path(args.catalog.as_deref()),
            output: args.output.clone().or_else(|| model.output.clone()),
        }
    }

    pub fn catalog_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(
            || self.config.model.fact_catalog.clone(),
            Path::to_path_buf,
        )
    }

    /// Query column holding fact names.
    pub fn name_column<'a>(&'a self, explicit: Option<&'a str>) -> &'a str {
        explicit.unwrap_or(&self.config.model.name_column)
    }

    /// Transport for the configured stage backend.
    pub fn stage_transport(&self) -> Result<ObjectStoreStage, StageError> {
        ObjectStoreStage::from_config(&self.config.stage)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use forge_config::{ForgeConfig, ModelConfig};
    use pretty_assertions::assert_eq;

    use super::AppContext;
    use crate::cli::root_commands::ModelArgs;

    fn ctx() -> AppContext {
        AppContext::new(ForgeConfig {
            model: ModelConfig {
                base_template: PathBuf::from("cfg/base.yaml"),
                fact_catalog: PathBuf::from("cfg/facts.yaml"),
                output: Some(PathBuf::from("cfg/out.yaml")),
                name_column: String::from("FACT_NAME"),
            },
            ..Default::default()
        })
    }

    #[test]
    fn config_supplies_unset_paths() {
        let paths = ctx().model_paths(&ModelArgs::default());
        assert_eq!(paths.base_template, PathBuf::from("cfg/base.yaml"));
        assert_eq!(paths.fact_catalog, PathBuf::from("cfg/facts.yaml"));
        assert_eq!(paths.output, Some(PathBuf::from("cfg/out.yaml")));
    }

    #[test]
    fn arguments_override_config() {
        let args = ModelArgs {
            template: Some(PathBuf::from("t.yaml")),
            catalog: Some(PathBuf::from("f.yaml")),
            output: Some(PathBuf::from("o.yaml")),
        };
        let paths = ctx().model_paths(&args);
        assert_eq!(paths.base_template, PathBuf::from("t.yaml"));
        assert_eq!(paths.fact_catalog, PathBuf::from("f.yaml"));
        assert_eq!(paths.output, Some(PathBuf::from("o.yaml")));
    }

    #[test]
    fn name_column_prefers_argument() {
        let ctx = ctx();
        assert_eq!(ctx.name_column(None), "FACT_NAME");
        assert_eq!(ctx.name_column(Some("ELEMENT_NUMBER")), "ELEMENT_NUMBER");
    }
}
