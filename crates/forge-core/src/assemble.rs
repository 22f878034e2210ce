//! Model assembly: a fresh template copy with resolved facts in its first table.

use serde_yaml::{Mapping, Value};

use crate::catalog::FactRecord;
use crate::document::{Document, is_empty_document};
use crate::error::AssembleError;

/// Where the resolved facts ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactsPlacement {
    /// `tables[0].facts` was replaced with `count` facts.
    Attached { count: usize },
    /// The template has no first table to attach to; the copy is unchanged.
    NoTable,
}

/// An assembled semantic model.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub model: Document,
    pub placement: FactsPlacement,
}

/// Assemble a semantic model from `template` and the resolved `facts`.
///
/// The template is only borrowed; the model is an independent deep copy, so
/// assembling twice from the same inputs yields equal documents and leaves the
/// template untouched. `tables[0].facts` is replaced wholesale, never merged.
/// A template without a usable first table is returned as-is with
/// [`FactsPlacement::NoTable`].
///
/// # Errors
///
/// Returns [`AssembleError::EmptyTemplate`] when the template is empty (for
/// instance because loading it fell back to an empty mapping).
pub fn assemble(template: &Document, facts: &[FactRecord]) -> Result<Assembly, AssembleError> {
    if is_empty_document(template) {
        return Err(AssembleError::EmptyTemplate);
    }

    let mut model = template.clone();
    let placement = match first_table_mut(&mut model) {
        Some(table) => {
            let values = facts.iter().map(FactRecord::to_value).collect();
            table.insert(Value::from("facts"), Value::Sequence(values));
            FactsPlacement::Attached { count: facts.len() }
        }
        None => {
            tracing::warn!("no tables found in base model; facts not attached");
            FactsPlacement::NoTable
        }
    };

    Ok(Assembly { model, placement })
}

fn first_table_mut(model: &mut Document) -> Option<&mut Mapping> {
    model
        .get_mut("tables")?
        .as_sequence_mut()?
        .first_mut()?
        .as_mapping_mut()
}
