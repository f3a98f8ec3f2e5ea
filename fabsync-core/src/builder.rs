//! Resource config builder.
//!
//! Turns inventory records into the display-name keyed lookup table. Pure:
//! no I/O, inputs are only borrowed.
//!
//! # Collision policy
//!
//! Display names are not unique. Entries are inserted in order and a later
//! insert replaces an earlier one, so within a slice the last record wins and
//! across slices every lakehouse entry beats every warehouse entry.

use crate::types::{
    LakehouseProperties, LinkedServiceConfig, LinkedServiceConfigEntry, ResourceKind,
    ResourceRecord, TypeProperties, WarehouseProperties, LAKEHOUSE_ROOT_FOLDER,
};

/// Lookup-table entry for a single record, shaped by the record's kind.
pub fn entry_for(record: &ResourceRecord) -> LinkedServiceConfigEntry {
    match &record.kind {
        ResourceKind::Warehouse { connection_string } => LinkedServiceConfigEntry {
            type_properties: TypeProperties::Warehouse(WarehouseProperties {
                artifact_id: record.id.clone(),
                endpoint: connection_string.clone(),
                workspace_id: record.workspace_id.clone(),
            }),
            object_id: Some(record.id.0.clone()),
            name: Some(record.display_name.clone()),
        },
        ResourceKind::Lakehouse => LinkedServiceConfigEntry {
            type_properties: TypeProperties::Lakehouse(LakehouseProperties {
                artifact_id: record.id.clone(),
                workspace_id: record.workspace_id.clone(),
                root_folder: LAKEHOUSE_ROOT_FOLDER.to_string(),
            }),
            object_id: None,
            name: Some(record.display_name.clone()),
        },
    }
}

fn table_for(records: &[ResourceRecord]) -> LinkedServiceConfig {
    records
        .iter()
        .map(|r| (r.display_name.clone(), entry_for(r)))
        .collect()
}

/// Build the lookup table from warehouse and lakehouse records.
///
/// Both tables are built independently, then the lakehouse table is applied
/// over the warehouse table: on a shared display name the lakehouse entry is
/// kept.
pub fn build_config(
    warehouses: &[ResourceRecord],
    lakehouses: &[ResourceRecord],
) -> LinkedServiceConfig {
    let mut table = table_for(warehouses);
    table.extend(table_for(lakehouses));
    table
}

/// Partition a mixed inventory by kind, then [`build_config`].
pub fn build_config_from_inventory(records: &[ResourceRecord]) -> LinkedServiceConfig {
    let (warehouses, lakehouses): (Vec<_>, Vec<_>) = records
        .iter()
        .cloned()
        .partition(|r| matches!(r.kind, ResourceKind::Warehouse { .. }));
    build_config(&warehouses, &lakehouses)
}
