//! Workspace inventory → [`ResourceRecord`]s.

use serde::Deserialize;

use fabsync_core::{ResourceRecord, WorkspaceId};

use crate::error::{decode, http_error, ClientError};
use crate::FabricClient;

/// One entry of `GET /workspaces/{id}/items`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceItem {
    pub id: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub item_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemsPage {
    #[serde(default)]
    value: Vec<WorkspaceItem>,
    continuation_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WarehouseDetails {
    properties: WarehouseDetailProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WarehouseDetailProperties {
    connection_string: String,
}

pub const WAREHOUSE_TYPE: &str = "Warehouse";
pub const LAKEHOUSE_TYPE: &str = "Lakehouse";

impl FabricClient {
    /// Every item in the workspace, following continuation pages.
    pub fn list_items(&self, workspace: &WorkspaceId) -> Result<Vec<WorkspaceItem>, ClientError> {
        let mut items = Vec::new();
        let mut next = Some(self.workspace_url(workspace, "items"));
        while let Some(url) = next {
            let response = self.get(&url)?;
            if response.status() != 200 {
                return Err(http_error(response));
            }
            let page: ItemsPage = decode(response)?;
            items.extend(page.value);
            next = page.continuation_uri;
        }
        Ok(items)
    }

    fn warehouse_connection_string(
        &self,
        workspace: &WorkspaceId,
        warehouse_id: &str,
    ) -> Result<String, ClientError> {
        let url = self.workspace_url(workspace, &format!("warehouses/{warehouse_id}"));
        let response = self.get(&url)?;
        if response.status() != 200 {
            return Err(http_error(response));
        }
        let details: WarehouseDetails = decode(response)?;
        Ok(details.properties.connection_string)
    }

    /// Warehouses and lakehouses of `workspace`, ready for the builder.
    pub fn inventory(&self, workspace: &WorkspaceId) -> Result<Vec<ResourceRecord>, ClientError> {
        let mut records = Vec::new();
        for item in self.list_items(workspace)? {
            match item.item_type.as_str() {
                WAREHOUSE_TYPE => {
                    let endpoint = self.warehouse_connection_string(workspace, &item.id)?;
                    records.push(ResourceRecord::warehouse(
                        item.id,
                        item.display_name,
                        endpoint,
                        workspace.clone(),
                    ));
                }
                LAKEHOUSE_TYPE => records.push(ResourceRecord::lakehouse(
                    item.id,
                    item.display_name,
                    workspace.clone(),
                )),
                _ => {}
            }
        }
        tracing::info!(
            "workspace {workspace}: {} warehouses/lakehouses",
            records.len()
        );
        Ok(records)
    }
}
