//! fabsync core library: domain types, lookup-table builder, table persistence.
//!
//! - [`types`]: inventory records and lookup-table entries
//! - [`builder`]: inventory → [`LinkedServiceConfig`]
//! - [`config_file`]: load / save `linkedservice-config.json`
//! - [`error`]: [`ConfigError`]

pub mod builder;
pub mod config_file;
pub mod error;
pub mod types;

pub use builder::{build_config, build_config_from_inventory, entry_for};
pub use error::ConfigError;
pub use types::{
    LakehouseProperties, LinkedServiceConfig, LinkedServiceConfigEntry, ResourceId, ResourceKind,
    ResourceRecord, TypeProperties, WarehouseProperties, WorkspaceId,
};
