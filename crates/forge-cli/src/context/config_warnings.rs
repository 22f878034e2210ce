use forge_config::ForgeConfig;

/// Emit warnings for env vars that look intended for a section but did not configure it.
pub fn warn_unconfigured(config: &ForgeConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ForgeConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.snowflake.is_configured() && has_env_prefix(&env_keys, "SEMFORGE_SNOWFLAKE") {
        warnings.push(
            "Snowflake config appears incomplete while SEMFORGE_SNOWFLAKE* env vars exist. Use double underscores (example: SEMFORGE_SNOWFLAKE__ACCOUNT)."
                .to_string(),
        );
    }

    if !config.stage.is_enabled() && has_env_prefix(&env_keys, "SEMFORGE_STAGE") {
        warnings.push(
            "Stage config appears default while SEMFORGE_STAGE* env vars exist. Use double underscores (example: SEMFORGE_STAGE__DESTINATION)."
                .to_string(),
        );
    }

    if config.snowflake.token.is_empty() && env_keys.iter().any(|key| key == "SNOWFLAKE_PASSWORD") {
        warnings.push(
            "SNOWFLAKE_PASSWORD is set but password login is not supported. Set SNOWFLAKE_TOKEN or SNOWFLAKE_PAT to a programmatic access token."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
