//! GovServices host.
//!
//! Loads configuration, installs tracing, wires the adapters of `gs-infra`
//! into the orchestrators of `gs-app` and drives the onboarding wizard from a
//! line-oriented terminal.

pub mod bootstrap;
pub mod terminal;
