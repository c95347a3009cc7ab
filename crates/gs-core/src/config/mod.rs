//! Configuration DTOs.
//!
//! Plain data read from `govservices.toml`. Every section carries its own
//! defaults so a missing file or a partial file still yields a usable config.
//! Loading from disk is the host's job; this module only maps TOML to types.

mod app_config;

pub use app_config::{AppConfig, GeneralConfig, SimulatorConfig, StorageConfig};
