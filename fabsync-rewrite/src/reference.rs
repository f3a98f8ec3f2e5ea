//! In-memory reference rewriting.
//!
//! A reference is any object stored under a `linkedService` key:
//!
//! ```text
//! "linkedService": {
//!   "name": "<display name>",
//!   "properties": {
//!     "typeProperties": { ... },   <- replaced wholesale on match
//!     "objectId": "..."            <- updated only if already present
//!   }
//! }
//! ```
//!
//! The walk is depth-first over every object value and array element. It
//! keeps its own work list instead of recursing, so depth is limited only by
//! memory, and references nested inside other references are found too. Nothing outside a matched reference is touched and no key is ever
//! added or removed, apart from `typeProperties` under an existing
//! `properties` object.

use std::collections::HashMap;

use serde_json::{Map, Value};

use fabsync_core::LinkedServiceConfig;

use crate::error::RewriteError;

/// Key that marks a linked-service reference.
pub const LINKED_SERVICE_KEY: &str = "linkedService";

const NAME_KEY: &str = "name";
const PROPERTIES_KEY: &str = "properties";
const TYPE_PROPERTIES_KEY: &str = "typeProperties";
const OBJECT_ID_KEY: &str = "objectId";

#[derive(Debug, Clone)]
struct Replacement {
    type_properties: Value,
    object_id: Option<String>,
}

/// Lookup table pre-rendered into JSON values, ready to be spliced into
/// documents.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<String, Replacement>,
}

impl ReferenceTable {
    pub fn from_config(config: &LinkedServiceConfig) -> Result<Self, RewriteError> {
        let mut entries = HashMap::with_capacity(config.len());
        for (name, entry) in config {
            entries.insert(
                name.clone(),
                Replacement {
                    type_properties: serde_json::to_value(&entry.type_properties)?,
                    object_id: entry.object_id.clone(),
                },
            );
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters from one [`rewrite_value`] pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    /// `linkedService` objects encountered.
    pub references_seen: usize,
    /// References whose name is in the table.
    pub references_matched: usize,
    /// Whether any value in the document actually differs afterwards.
    pub changed: bool,
}

/// Rewrite every matching reference in `document` in place.
pub fn rewrite_value(document: &mut Value, table: &ReferenceTable) -> RewriteStats {
    let mut stats = RewriteStats::default();
    walk(document, table, &mut stats);
    stats
}

fn walk(root: &mut Value, table: &ReferenceTable, stats: &mut RewriteStats) {
    let mut pending = vec![root];
    while let Some(value) = pending.pop() {
        match value {
            Value::Object(map) => {
                if let Some(Value::Object(reference)) = map.get_mut(LINKED_SERVICE_KEY) {
                    stats.references_seen += 1;
                    apply(reference, table, stats);
                }
                // Includes the reference itself: references may nest.
                pending.extend(map.values_mut());
            }
            Value::Array(items) => pending.extend(items.iter_mut()),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }
}

fn apply(reference: &mut Map<String, Value>, table: &ReferenceTable, stats: &mut RewriteStats) {
    let Some(replacement) = reference
        .get(NAME_KEY)
        .and_then(Value::as_str)
        .and_then(|name| table.entries.get(name))
    else {
        return;
    };
    stats.references_matched += 1;

    if let Some(Value::Object(properties)) = reference.get_mut(PROPERTIES_KEY) {
        if properties.get(TYPE_PROPERTIES_KEY) != Some(&replacement.type_properties) {
            properties.insert(
                TYPE_PROPERTIES_KEY.to_string(),
                replacement.type_properties.clone(),
            );
            stats.changed = true;
        }
        if let Some(object_id) = &replacement.object_id {
            stats.changed |= update_existing(properties, OBJECT_ID_KEY, object_id);
        }
    }

    if let Some(object_id) = &replacement.object_id {
        stats.changed |= update_existing(reference, OBJECT_ID_KEY, object_id);
    }
}

/// Overwrite `key` with `value` only if `key` is already present.
fn update_existing(map: &mut Map<String, Value>, key: &str, value: &str) -> bool {
    match map.get_mut(key) {
        Some(slot) if slot.as_str() != Some(value) => {
            *slot = Value::String(value.to_string());
            true
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
