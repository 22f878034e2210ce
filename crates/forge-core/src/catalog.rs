//! Fact catalog: the full set of fact definitions available for selection.
//!
//! A catalog file comes in one of two shapes:
//!
//! ```yaml
//! # bare sequence
//! - name: LOAN_AMOUNT
//!   expr: loan_amount
//! ```
//!
//! ```yaml
//! # wrapped; `facts` may also hold a single mapping
//! facts:
//!   - name: LOAN_AMOUNT
//!     expr: loan_amount
//! ```
//!
//! Anything else decodes to an empty catalog.

use std::hash::{Hash, Hasher};
use std::path::Path;

use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use crate::document::{Document, load_document};

// ── Fact record ────────────────────────────────────────────────────

/// A single fact definition.
///
/// Identity is the `name` field alone: two records with the same name are
/// equal regardless of their other fields.
#[derive(Debug, Clone)]
pub struct FactRecord {
    name: String,
    fields: Mapping,
}

impl FactRecord {
    /// Build a record from a YAML value.
    ///
    /// Returns `None` unless the value is a mapping with a string `name`.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Mapping(fields) = value else {
            return None;
        };
        let name = fields.get("name")?.as_str()?.to_string();
        Some(Self { name, fields })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All fields of the record, `name` included, in source order.
    #[must_use]
    pub const fn fields(&self) -> &Mapping {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.get("description").and_then(Value::as_str)
    }

    /// The record as a YAML mapping, ready to be placed in a model.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Mapping(self.fields.clone())
    }
}

impl PartialEq for FactRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for FactRecord {}

impl Hash for FactRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Serialize for FactRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

// ── Shape decoding ─────────────────────────────────────────────────

/// The recognized layouts of a catalog document.
#[derive(Debug)]
enum CatalogShape {
    /// A top-level sequence of fact mappings.
    Bare(Vec<Value>),
    /// A mapping whose `facts` key holds a sequence or a single fact.
    Wrapped(Value),
    Unrecognized,
}

impl CatalogShape {
    fn classify(document: Document) -> Self {
        match document {
            Value::Sequence(items) => Self::Bare(items),
            Value::Mapping(mut map) => map
                .remove("facts")
                .map_or(Self::Unrecognized, Self::Wrapped),
            _ => Self::Unrecognized,
        }
    }

    fn into_entries(self) -> Vec<Value> {
        match self {
            Self::Bare(items) | Self::Wrapped(Value::Sequence(items)) => items,
            Self::Wrapped(single) => vec![single],
            Self::Unrecognized => Vec::new(),
        }
    }
}

// ── Catalog ────────────────────────────────────────────────────────

/// Ordered, read-only collection of fact records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactCatalog {
    facts: Vec<FactRecord>,
}

impl FactCatalog {
    #[must_use]
    pub const fn new(facts: Vec<FactRecord>) -> Self {
        Self { facts }
    }

    /// Decode a catalog from a loaded document.
    ///
    /// Source order is preserved. Entries that are not mappings with a string
    /// `name` can never be looked up, so they are dropped here.
    #[must_use]
    pub fn from_document(document: Document) -> Self {
        let shape = CatalogShape::classify(document);
        if matches!(shape, CatalogShape::Unrecognized) {
            tracing::debug!("catalog document has no recognizable facts layout");
        }

        let facts = shape
            .into_entries()
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                let record = FactRecord::from_value(entry);
                if record.is_none() {
                    tracing::debug!(index, "dropping catalog entry without a string name");
                }
                record
            })
            .collect();

        Self { facts }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FactRecord> {
        self.facts.iter()
    }

    /// Names of every fact, in catalog order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.facts.iter().map(FactRecord::name).collect()
    }

    /// The first record whose name matches exactly (case-sensitive).
    ///
    /// When the catalog holds duplicate names the earliest one wins.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FactRecord> {
        self.facts.iter().find(|fact| fact.name == name)
    }
}

impl<'a> IntoIterator for &'a FactCatalog {
    type Item = &'a FactRecord;
    type IntoIter = std::slice::Iter<'a, FactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}

/// Load the fact catalog at `path`.
///
/// Never fails: a missing, malformed or unrecognized file yields an empty
/// catalog.
#[must_use]
pub fn load_facts(path: &Path) -> FactCatalog {
    FactCatalog::from_document(load_document(path))
}
