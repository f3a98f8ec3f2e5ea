pub mod commit;
pub mod config;
pub mod connection;
pub mod diff;
pub mod rewrite;
pub mod status;
pub mod update;
