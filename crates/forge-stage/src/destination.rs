//! Stage destination strings such as `@models/semantic/`.

use std::fmt;

use crate::error::StageError;

/// A parsed stage reference: the stage name plus an optional folder path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDestination {
    stage: String,
    subpath: Option<String>,
}

impl StageDestination {
    /// Normalize `raw` to a single leading `@` and split off the folder path.
    ///
    /// `my_stage`, `@my_stage` and `@@my_stage/` all name the same stage.
    ///
    /// # Errors
    ///
    /// Returns [`StageError::InvalidDestination`] if no stage name remains.
    pub fn parse(raw: &str) -> Result<Self, StageError> {
        let trimmed = raw.trim().trim_start_matches('@');
        let (stage, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        let stage = stage.trim();
        if stage.is_empty() {
            return Err(StageError::InvalidDestination {
                raw: raw.to_string(),
                reason: String::from("stage name is empty"),
            });
        }

        let subpath = rest
            .split('/')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("/");

        Ok(Self {
            stage: stage.to_string(),
            subpath: (!subpath.is_empty()).then_some(subpath),
        })
    }

    /// Stage name without the `@`.
    #[must_use]
    pub fn stage(&self) -> &str {
        &self.stage
    }

    #[must_use]
    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }

    /// Object key of `name` inside this destination: `{stage}/{subpath}/{name}`.
    #[must_use]
    pub fn object_key(&self, name: &str) -> String {
        match &self.subpath {
            Some(subpath) => format!("{}/{subpath}/{name}", self.stage),
            None => format!("{}/{name}", self.stage),
        }
    }

    /// Stage path of `name`, usable as a Cortex Analyst `semantic_model_file`.
    #[must_use]
    pub fn file_path(&self, name: &str) -> String {
        format!("@{}", self.object_key(name))
    }
}

impl fmt::Display for StageDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subpath {
            Some(subpath) => write!(f, "@{}/{subpath}/", self.stage),
            None => write!(f, "@{}", self.stage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_at_is_normalized() {
        let bare = StageDestination::parse("my_stage").unwrap();
        let prefixed = StageDestination::parse("@my_stage").unwrap();
        let doubled = StageDestination::parse("@@my_stage").unwrap();
        assert_eq!(bare, prefixed);
        assert_eq!(prefixed, doubled);
        assert_eq!(bare.to_string(), "@my_stage");
    }

    #[test]
    fn subfolder_is_split_off() {
        let dest = StageDestination::parse("@my_stage/semantic_models/").unwrap();
        assert_eq!(dest.stage(), "my_stage");
        assert_eq!(dest.subpath(), Some("semantic_models"));
        assert_eq!(dest.to_string(), "@my_stage/semantic_models/");
    }

    #[test]
    fn nested_subfolders_are_collapsed() {
        let dest = StageDestination::parse(" @DB.PUBLIC.MODELS//a/b/ ").unwrap();
        assert_eq!(dest.stage(), "DB.PUBLIC.MODELS");
        assert_eq!(dest.subpath(), Some("a/b"));
        assert_eq!(dest.object_key("m.yaml"), "DB.PUBLIC.MODELS/a/b/m.yaml");
        assert_eq!(dest.file_path("m.yaml"), "@DB.PUBLIC.MODELS/a/b/m.yaml");
    }

    #[test]
    fn trailing_slash_only_has_no_subpath() {
        let dest = StageDestination::parse("@my_stage/").unwrap();
        assert_eq!(dest.subpath(), None);
        assert_eq!(dest.object_key("x.yaml"), "my_stage/x.yaml");
    }

    #[test]
    fn empty_stage_is_rejected() {
        for raw in ["", "@", "  @ ", "@/folder"] {
            assert!(
                matches!(
                    StageDestination::parse(raw),
                    Err(StageError::InvalidDestination { .. })
                ),
                "{raw:?} should be rejected"
            );
        }
    }
}
