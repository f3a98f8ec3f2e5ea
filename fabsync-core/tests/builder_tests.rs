//! Merge-precedence tests for the lookup-table builder.

use fabsync_core::{build_config, ResourceRecord, TypeProperties};
use rstest::rstest;

fn warehouse(name: &str, ws: &str) -> ResourceRecord {
    ResourceRecord::warehouse(format!("wh-{name}-{ws}"), name, format!("{name}.{ws}.dw"), ws)
}

fn lakehouse(name: &str, ws: &str) -> ResourceRecord {
    ResourceRecord::lakehouse(format!("lh-{name}-{ws}"), name, ws)
}

#[rstest]
#[case::single_workspace("ws-a", "ws-a")]
#[case::across_workspaces("ws-a", "ws-b")]
fn lakehouse_shape_wins_on_shared_name(#[case] wh_ws: &str, #[case] lh_ws: &str) {
    let table = build_config(&[warehouse("Shared", wh_ws)], &[lakehouse("Shared", lh_ws)]);

    let value = serde_json::to_value(&table["Shared"]).expect("serialize");
    let props = &value["typeProperties"];
    assert!(props.get("endpoint").is_none(), "endpoint must be gone");
    assert_eq!(props["rootFolder"], "Tables");
    assert_eq!(props["workspaceId"], lh_ws);
    assert!(value.get("objectId").is_none());
}

#[test]
fn last_warehouse_across_workspaces_wins() {
    let table = build_config(&[warehouse("Sales", "ws-a"), warehouse("Sales", "ws-b")], &[]);
    match &table["Sales"].type_properties {
        TypeProperties::Warehouse(p) => assert_eq!(p.workspace_id.0, "ws-b"),
        other => panic!("expected warehouse, got {other:?}"),
    }
}

#[test]
fn inputs_are_left_untouched() {
    let warehouses = vec![warehouse("Sales", "ws-a")];
    let lakehouses = vec![lakehouse("Sales", "ws-a")];
    let before = (warehouses.clone(), lakehouses.clone());
    let _ = build_config(&warehouses, &lakehouses);
    assert_eq!((warehouses, lakehouses), before);
}
