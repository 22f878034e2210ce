//! End-to-end tests for the local generation pipeline using on-disk fixtures.

use std::path::PathBuf;

use forge_core::{
    Document, FactRecord, FactsPlacement, ModelPaths, PipelineError, build_model, generate_model,
    list_available_facts, load_facts, load_template, resolve,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

const TEMPLATE: &str = "\
name: mortgage_model
description: Mortgage applications
tables:
  - name: t1
    base_table:
      database: DB
      schema: PUBLIC
      table: LOANS
    facts: []
";

const CATALOG: &str = "\
- name: LOAN_AMOUNT
  expr: loan_amount
  data_type: NUMBER
  description: Requested loan amount
- name: INCOME
  expr: income
  data_type: NUMBER
  description: Applicant income
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    fn paths(&self, template: &str, catalog: &str) -> ModelPaths {
        ModelPaths {
            base_template: self.file("base.yaml", template),
            fact_catalog: self.file("facts.yaml", catalog),
            output: None,
        }
    }
}

fn doc(yaml: &str) -> Document {
    serde_yaml::from_str(yaml).expect("valid yaml")
}

fn fact_names(model: &Document) -> Vec<String> {
    model["tables"][0]["facts"]
        .as_sequence()
        .expect("facts sequence")
        .iter()
        .map(|fact| fact["name"].as_str().expect("name").to_string())
        .collect()
}

#[test]
fn end_to_end_skips_unknown_fact() {
    let fixture = Fixture::new();
    let paths = fixture.paths(
        "tables:\n  - name: t1\n    facts: []\n",
        "- name: LOAN_AMOUNT\n  description: amount\n- name: INCOME\n  description: income\n",
    );

    let generated = generate_model(&["LOAN_AMOUNT", "INCOME", "UNKNOWN"], &paths).unwrap();

    assert_eq!(
        generated.model,
        doc("tables:\n  - name: t1\n    facts:\n      - name: LOAN_AMOUNT\n        description: amount\n      - name: INCOME\n        description: income\n")
    );
    assert_eq!(generated.resolution.missing, vec!["UNKNOWN".to_string()]);
    assert_eq!(generated.placement, Some(FactsPlacement::Attached { count: 2 }));
}

#[test]
fn passes_other_template_fields_through() {
    let fixture = Fixture::new();
    let paths = fixture.paths(TEMPLATE, CATALOG);

    let generated = generate_model(&["INCOME"], &paths).unwrap();

    assert_eq!(generated.model["name"].as_str(), Some("mortgage_model"));
    assert_eq!(
        generated.model["tables"][0]["base_table"],
        doc("database: DB\nschema: PUBLIC\ntable: LOANS\n")
    );
    assert_eq!(fact_names(&generated.model), vec!["INCOME"]);
}

#[test]
fn writes_output_when_requested() {
    let fixture = Fixture::new();
    let mut paths = fixture.paths(TEMPLATE, CATALOG);
    let output = fixture.dir.path().join("out/generated.yaml");
    paths.output = Some(output.clone());

    let generated = generate_model(&["LOAN_AMOUNT", "INCOME"], &paths).unwrap();

    let written = std::fs::read_to_string(&output).expect("output written");
    assert_eq!(written, generated.to_yaml().unwrap());
    assert_eq!(doc(&written), generated.model);
    assert_eq!(generated.saved_to, Some(output));
}

#[test]
fn failed_save_is_not_reported_as_written() {
    let fixture = Fixture::new();
    let mut paths = fixture.paths(TEMPLATE, CATALOG);
    // An existing directory cannot be written as a file.
    paths.output = Some(fixture.dir.path().to_path_buf());

    let generated = generate_model(&["INCOME"], &paths).unwrap();

    assert_eq!(generated.placement, Some(FactsPlacement::Attached { count: 1 }));
    assert_eq!(generated.saved_to, None);
}

#[test]
fn build_model_uses_the_given_resolution() {
    let fixture = Fixture::new();
    let paths = fixture.paths(TEMPLATE, CATALOG);
    let resolution = resolve(&["LOAN_AMOUNT", "NOPE"], &load_facts(&paths.fact_catalog));

    let generated = build_model(doc(TEMPLATE), resolution.clone(), None).unwrap();

    assert_eq!(fact_names(&generated.model), vec!["LOAN_AMOUNT"]);
    assert_eq!(generated.resolution, resolution);
    assert_eq!(generated.saved_to, None);
}

#[test]
fn load_template_rejects_empty_file() {
    let fixture = Fixture::new();
    let path = fixture.file("base.yaml", "");
    assert!(matches!(
        load_template(&path),
        Err(PipelineError::MissingTemplate { .. })
    ));
    assert_eq!(
        load_template(&fixture.file("other.yaml", TEMPLATE)).unwrap(),
        doc(TEMPLATE)
    );
}

#[test]
fn nothing_resolved_returns_template_unchanged_and_skips_save() {
    let fixture = Fixture::new();
    let mut paths = fixture.paths(TEMPLATE, CATALOG);
    let output = fixture.dir.path().join("never.yaml");
    paths.output = Some(output.clone());

    let generated = generate_model(&["NOPE"], &paths).unwrap();

    assert_eq!(generated.model, doc(TEMPLATE));
    assert_eq!(generated.placement, None);
    assert_eq!(generated.saved_to, None);
    assert!(!output.exists());
}

#[rstest]
#[case::missing_file(None)]
#[case::empty_file(Some(""))]
#[case::malformed(Some("tables: [oops"))]
fn unusable_template_is_fatal(#[case] template: Option<&str>) {
    let fixture = Fixture::new();
    let base_template = match template {
        Some(contents) => fixture.file("base.yaml", contents),
        None => fixture.dir.path().join("base.yaml"),
    };
    let paths = ModelPaths {
        base_template,
        fact_catalog: fixture.file("facts.yaml", CATALOG),
        output: None,
    };

    let err = generate_model(&["INCOME"], &paths).unwrap_err();
    assert!(matches!(err, PipelineError::MissingTemplate { .. }));
}

#[test]
fn template_without_tables_is_returned_as_is() {
    let fixture = Fixture::new();
    let paths = fixture.paths("name: no_tables\n", CATALOG);

    let generated = generate_model(&["INCOME"], &paths).unwrap();

    assert_eq!(generated.model, doc("name: no_tables\n"));
    assert_eq!(generated.placement, Some(FactsPlacement::NoTable));
    assert_eq!(generated.fact_count(), 0);
}

#[test]
fn repeated_generation_is_idempotent() {
    let fixture = Fixture::new();
    let paths = fixture.paths(TEMPLATE, CATALOG);

    let first = generate_model(&["INCOME", "LOAN_AMOUNT"], &paths).unwrap();
    let second = generate_model(&["INCOME", "LOAN_AMOUNT"], &paths).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        std::fs::read_to_string(&paths.base_template).unwrap(),
        TEMPLATE
    );
}

#[rstest]
#[case::bare(CATALOG.to_string())]
#[case::wrapped(format!("facts:\n{}", indent(CATALOG)))]
fn catalog_shapes_resolve_identically(#[case] catalog: String) {
    let fixture = Fixture::new();
    let path = fixture.file("facts.yaml", &catalog);

    let resolution = resolve(&["INCOME", "LOAN_AMOUNT"], &load_facts(&path));

    let values: Vec<_> = resolution.facts.iter().map(FactRecord::to_value).collect();
    assert_eq!(
        values,
        vec![
            doc("name: INCOME\nexpr: income\ndata_type: NUMBER\ndescription: Applicant income\n"),
            doc("name: LOAN_AMOUNT\nexpr: loan_amount\ndata_type: NUMBER\ndescription: Requested loan amount\n"),
        ]
    );
}

#[test]
fn singleton_catalog_resolves() {
    let fixture = Fixture::new();
    let path = fixture.file("facts.yaml", "facts:\n  name: X\n  expr: x\n");

    let resolution = resolve(&["X"], &load_facts(&path));

    assert_eq!(resolution.facts.len(), 1);
    assert_eq!(resolution.facts[0].name(), "X");
}

#[test]
fn lists_available_facts_in_catalog_order() {
    let fixture = Fixture::new();
    let path = fixture.file("facts.yaml", CATALOG);

    assert_eq!(list_available_facts(&path), vec!["LOAN_AMOUNT", "INCOME"]);
    assert!(list_available_facts(&fixture.dir.path().join("missing.yaml")).is_empty());
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {line}\n"))
        .collect()
}
