use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    schema::ResourceSchema,
    value::{self, Inputs, Value},
};

/// The outcome of comparing actual state against desired state for one
/// resource. Produced fresh per call and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeReport {
    /// True when any field differs.
    pub changes: bool,
    /// Every differing field, in desired-state order.
    pub changed: IndexSet<String>,
    /// The subset of differing fields that force a destroy-and-recreate.
    pub replaces: IndexSet<String>,
}

impl ChangeReport {
    /// True when the resource can be brought in line with a single ALTER.
    pub fn updatable_in_place(&self) -> bool {
        self.changes && self.replaces.is_empty()
    }
}

/// Compares old and new field maps field by field.
///
/// Only keys present in `new` are considered: a field that disappears from
/// the desired state entirely is left alone. A key missing from `old` counts
/// as a change only when the new value actually carries something; `0` and
/// `false` carry something, empty strings, lists and maps do not.
pub fn diff(schema: &ResourceSchema, old: &Inputs, new: &Inputs) -> ChangeReport {
    let mut report = ChangeReport::default();

    for (field, new_value) in new {
        let differs = match old.get(field) {
            Some(old_value) => values_differ(old_value, new_value),
            None => !new_value.is_empty(),
        };
        if !differs {
            continue;
        }

        report.changes = true;
        report.changed.insert(field.clone());
        if schema.replaces().contains(field) {
            report.replaces.insert(field.clone());
        }
    }

    report
}

/// Field comparison for the diff. JSON serializers spell whole numbers as
/// either `3` or `3.0`, so integers and integral floats compare equal, at
/// any nesting depth. Everything else compares strictly.
fn values_differ(old: &Value, new: &Value) -> bool {
    match (old, new) {
        (Value::Int(int), Value::Float(float)) | (Value::Float(float), Value::Int(int)) => {
            value::integral_float(*float) != Some(*int)
        }
        (Value::List(old_items), Value::List(new_items)) => {
            old_items.len() != new_items.len()
                || old_items
                    .iter()
                    .zip(new_items)
                    .any(|(old_item, new_item)| values_differ(old_item, new_item))
        }
        (Value::Map(old_entries), Value::Map(new_entries)) => {
            old_entries.len() != new_entries.len()
                || old_entries.iter().any(|(key, old_entry)| {
                    new_entries
                        .get(key)
                        .is_none_or(|new_entry| values_differ(old_entry, new_entry))
                })
        }
        _ => old != new,
    }
}
