use anyhow::Context;
use forge_snowflake::{AnalystClient, AnalystContent, AnalystResponse};

use crate::cli::root_commands::AskArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `semforge ask`.
pub async fn handle(args: &AskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = AnalystClient::new(&ctx.config.snowflake)?;

    let reply = match (&args.source.model, &args.source.stage_file) {
        (Some(path), _) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read model {}", path.display()))?;
            client.send_message(&args.question, &yaml).await
        }
        (None, Some(stage_file)) => {
            client
                .send_message_for_file(&args.question, stage_file)
                .await
        }
        (None, None) => anyhow::bail!("either --model or --stage-file is required"),
    }
    .context("Cortex Analyst request failed")?;

    match flags.format {
        OutputFormat::Raw => {
            print!("{}", describe(&reply));
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Yaml => output(&reply, flags.format),
    }
}

/// Plain-text rendering: interpretation, SQL, suggestions, then warnings.
fn describe(reply: &AnalystResponse) -> String {
    let mut text = String::new();
    for block in &reply.message.content {
        match block {
            AnalystContent::Text { text: body } => {
                text.push_str(body);
                text.push('\n');
            }
            AnalystContent::Sql { statement } => {
                text.push_str("SQL:\n");
                text.push_str(statement);
                text.push('\n');
            }
            AnalystContent::Suggestions { suggestions } if !suggestions.is_empty() => {
                text.push_str("Suggestions:\n");
                for suggestion in suggestions {
                    text.push_str(&format!("  - {suggestion}\n"));
                }
            }
            AnalystContent::Suggestions { .. } | AnalystContent::Unknown => {}
        }
    }
    for warning in &reply.warnings {
        text.push_str(&format!("warning: {}\n", warning.message));
    }
    if let Some(request_id) = &reply.request_id {
        text.push_str(&format!("request id: {request_id}\n"));
    }
    text
}

#[cfg(test)]
mod tests {
    use forge_snowflake::AnalystResponse;
    use pretty_assertions::assert_eq;

    use super::describe;

    #[test]
    fn describes_every_block_kind() {
        let reply: AnalystResponse = serde_json::from_str(
            r#"{
                "message": {"role": "analyst", "content": [
                    {"type": "text", "text": "Total loan amount"},
                    {"type": "sql", "statement": "SELECT SUM(loan_amount) FROM loans"},
                    {"type": "suggestions", "suggestions": ["Average income?"]},
                    {"type": "chart", "chart_spec": "{}"}
                ]},
                "warnings": [{"message": "no time dimension"}],
                "request_id": "req-1"
            }"#,
        )
        .unwrap();

        assert_eq!(
            describe(&reply),
            "Total loan amount\nSQL:\nSELECT SUM(loan_amount) FROM loans\nSuggestions:\n  - Average income?\nwarning: no time dimension\nrequest id: req-1\n"
        );
    }
}
