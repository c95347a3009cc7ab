//! Startup sequence: arguments, configuration, tracing, wiring, run loop.

pub mod args;
pub mod config;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use args::HostArgs;
pub use config::load_config;
pub use run::run_app;
pub use wiring::{resolve_data_dir, wire_onboarding, HostContext};
