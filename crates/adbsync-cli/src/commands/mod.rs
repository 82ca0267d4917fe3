pub mod common;
pub mod mirror;
pub mod show_config;

pub use common::SyncOptions;
pub use mirror::Mirror;
pub use show_config::ShowConfig;
