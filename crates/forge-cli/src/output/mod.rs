use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?.trim_end().to_string()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Sample {
        name: &'static str,
        facts: Vec<&'static str>,
    }

    fn sample() -> Sample {
        Sample {
            name: "mortgage",
            facts: vec!["LOAN_AMOUNT", "INCOME"],
        }
    }

    #[test]
    fn json_is_pretty() {
        let rendered = render(&sample(), OutputFormat::Json).unwrap();
        assert_eq!(
            rendered,
            "{\n  \"name\": \"mortgage\",\n  \"facts\": [\n    \"LOAN_AMOUNT\",\n    \"INCOME\"\n  ]\n}"
        );
    }

    #[test]
    fn yaml_is_block_style() {
        let rendered = render(&sample(), OutputFormat::Yaml).unwrap();
        assert_eq!(rendered, "name: mortgage\nfacts:\n- LOAN_AMOUNT\n- INCOME");
    }

    #[test]
    fn raw_is_compact_json() {
        let rendered = render(&sample(), OutputFormat::Raw).unwrap();
        assert_eq!(rendered, r#"{"name":"mortgage","facts":["LOAN_AMOUNT","INCOME"]}"#);
    }
}
