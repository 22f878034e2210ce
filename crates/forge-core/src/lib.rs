//! # forge-core
//!
//! Semantic model assembly for semforge.
//!
//! A semantic model is a YAML document built by merging a static base template
//! with an ordered subset of named fact definitions taken from a fact catalog.
//! This crate owns the whole local pipeline:
//! - Document loading with explicit outcomes ([`document`])
//! - Fact catalog decoding from either supported shape ([`catalog`])
//! - Ordered first-match resolution of requested fact names ([`resolve`])
//! - Template copy + `tables[0].facts` replacement ([`assemble`])
//! - YAML serialization and best-effort persistence ([`serialize`])
//! - Timestamped artifact names for staging ([`naming`])
//! - Extraction of fact names from tabular query results ([`names`])
//! - The composed generation entry point ([`pipeline`])
//!
//! Network collaborators (SQL execution, staging, Cortex Analyst) live in
//! their own crates and only exchange plain values with this one.

pub mod assemble;
pub mod catalog;
pub mod document;
pub mod error;
pub mod names;
pub mod naming;
pub mod pipeline;
pub mod resolve;
pub mod serialize;

pub use assemble::{Assembly, FactsPlacement, assemble};
pub use catalog::{FactCatalog, FactRecord, load_facts};
pub use document::{Document, empty_document, is_empty_document, load_document, read_document};
pub use error::{AssembleError, DocumentError, PipelineError, SerializeError};
pub use names::{DEFAULT_NAME_COLUMN, ResultSet, extract_names};
pub use naming::{NameGenerator, generate_name, generate_name_at};
pub use pipeline::{
    GeneratedModel, ModelPaths, ModelSummary, build_model, generate_model, list_available_facts,
    load_template,
};
pub use resolve::{Resolution, resolve};
pub use serialize::{save, to_text, to_yaml_string, write_yaml};
