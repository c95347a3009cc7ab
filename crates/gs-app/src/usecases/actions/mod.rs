//! Non-blocking execution of backend actions.

mod runner;

pub use runner::{ActionRunner, PendingAction};
