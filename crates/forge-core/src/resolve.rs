//! Fact resolution: requested names → catalog records, in request order.

use serde::Serialize;

use crate::catalog::{FactCatalog, FactRecord};

/// Outcome of resolving a list of requested fact names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Matched records, one per resolvable request, in request order.
    pub facts: Vec<FactRecord>,
    /// Requested names with no catalog entry, in request order.
    pub missing: Vec<String>,
}

impl Resolution {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

/// Resolve each requested name against the catalog.
///
/// Every request is looked up independently, so a name requested twice
/// appears twice in the result. Unknown names are skipped with a warning and
/// recorded in [`Resolution::missing`]; absence is never an error.
#[must_use]
pub fn resolve<S: AsRef<str>>(names: &[S], catalog: &FactCatalog) -> Resolution {
    let mut resolution = Resolution::default();

    for name in names {
        let name = name.as_ref();
        match catalog.find(name) {
            Some(fact) => resolution.facts.push(fact.clone()),
            None => {
                tracing::warn!(fact = name, "fact not found in catalog");
                resolution.missing.push(name.to_string());
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn catalog() -> FactCatalog {
        FactCatalog::from_document(
            serde_yaml::from_str(
                "- name: A\n  description: alpha\n- name: B\n- name: C\n- name: A\n  description: shadowed\n",
            )
            .unwrap(),
        )
    }

    fn names(resolution: &Resolution) -> Vec<&str> {
        resolution.facts.iter().map(FactRecord::name).collect()
    }

    #[test]
    fn preserves_request_order() {
        let resolution = resolve(&["C", "A", "B"], &catalog());
        assert_eq!(names(&resolution), vec!["C", "A", "B"]);
        assert!(resolution.missing.is_empty());
    }

    #[test]
    fn skips_missing_and_records_them() {
        let resolution = resolve(&["A", "MISSING", "C"], &catalog());
        assert_eq!(names(&resolution), vec!["A", "C"]);
        assert_eq!(resolution.missing, vec!["MISSING".to_string()]);
    }

    #[test]
    fn duplicate_requests_resolve_independently() {
        let resolution = resolve(&["B", "B"], &catalog());
        assert_eq!(names(&resolution), vec!["B", "B"]);
    }

    #[test]
    fn first_catalog_match_wins() {
        let resolution = resolve(&["A"], &catalog());
        assert_eq!(resolution.facts[0].description(), Some("alpha"));
    }

    #[test]
    fn empty_inputs() {
        let none: [&str; 0] = [];
        assert!(resolve(&none, &catalog()).is_empty());

        let resolution = resolve(&["A"], &FactCatalog::default());
        assert!(resolution.is_empty());
        assert_eq!(resolution.missing, vec!["A".to_string()]);
    }

    #[test]
    fn accepts_owned_names() {
        let requested = vec![String::from("B"), String::from("a")];
        let resolution = resolve(&requested, &catalog());
        assert_eq!(names(&resolution), vec!["B"]);
        assert_eq!(resolution.missing, vec!["a".to_string()]);
    }
}
