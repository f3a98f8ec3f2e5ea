//! Domain types for linked-service reconfiguration.
//!
//! Inventory records describe analytical resources as they exist in a
//! workspace. The lookup table maps a resource display name to the payload
//! that gets written into every matching `linkedService` reference.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(pub String);

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for WorkspaceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorkspaceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier of an item (warehouse, lakehouse, ...) inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Logical subfolder every lakehouse reference points at.
pub const LAKEHOUSE_ROOT_FOLDER: &str = "Tables";

/// The two resource kinds a linked service can target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    /// Exposes a SQL connection endpoint.
    Warehouse { connection_string: String },
    /// No endpoint; addressed through its `Tables` folder.
    Lakehouse,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Warehouse { .. } => write!(f, "Warehouse"),
            ResourceKind::Lakehouse => write!(f, "Lakehouse"),
        }
    }
}

/// One analytical resource from a workspace inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub kind: ResourceKind,
    pub id: ResourceId,
    /// Join key into the lookup table. Not unique across workspaces.
    pub display_name: String,
    /// Workspace that owns the resource.
    pub workspace_id: WorkspaceId,
}

impl ResourceRecord {
    pub fn warehouse(
        id: impl Into<ResourceId>,
        display_name: impl Into<String>,
        connection_string: impl Into<String>,
        workspace_id: impl Into<WorkspaceId>,
    ) -> Self {
        Self {
            kind: ResourceKind::Warehouse {
                connection_string: connection_string.into(),
            },
            id: id.into(),
            display_name: display_name.into(),
            workspace_id: workspace_id.into(),
        }
    }

    pub fn lakehouse(
        id: impl Into<ResourceId>,
        display_name: impl Into<String>,
        workspace_id: impl Into<WorkspaceId>,
    ) -> Self {
        Self {
            kind: ResourceKind::Lakehouse,
            id: id.into(),
            display_name: display_name.into(),
            workspace_id: workspace_id.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup table
// ---------------------------------------------------------------------------

/// `typeProperties` for a warehouse-backed linked service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct WarehouseProperties {
    pub artifact_id: ResourceId,
    pub endpoint: String,
    pub workspace_id: WorkspaceId,
}

/// `typeProperties` for a lakehouse-backed linked service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LakehouseProperties {
    pub artifact_id: ResourceId,
    pub workspace_id: WorkspaceId,
    pub root_folder: String,
}

/// Replacement value for a reference's `properties.typeProperties`.
///
/// Tables written by hand may carry any object shape; those load as
/// [`TypeProperties::Other`] and are substituted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypeProperties {
    Warehouse(WarehouseProperties),
    Lakehouse(LakehouseProperties),
    Other(Map<String, Value>),
}

impl TypeProperties {
    /// Classify a loaded object.
    ///
    /// A typed variant is chosen only when it serializes back to the same
    /// keys in the same order; anything else is kept as written.
    pub fn from_map(map: Map<String, Value>) -> Self {
        let raw = Value::Object(map.clone());
        let typed = serde_json::from_value(raw.clone())
            .map(TypeProperties::Warehouse)
            .or_else(|_| serde_json::from_value(raw).map(TypeProperties::Lakehouse));

        match typed {
            Ok(typed) if same_key_order(&typed, &map) => typed,
            _ => TypeProperties::Other(map),
        }
    }
}

fn same_key_order(typed: &TypeProperties, original: &Map<String, Value>) -> bool {
    match serde_json::to_value(typed) {
        Ok(Value::Object(rendered)) => rendered.keys().eq(original.keys()),
        _ => false,
    }
}

impl<'de> Deserialize<'de> for TypeProperties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(TypeProperties::from_map)
    }
}

/// A single lookup-table entry, keyed by display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedServiceConfigEntry {
    pub type_properties: TypeProperties,
    /// Present for warehouses only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Display name → entry. Ordered so the persisted table is stable.
pub type LinkedServiceConfig = BTreeMap<String, LinkedServiceConfigEntry>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
