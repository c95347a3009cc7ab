//! Application tracking use cases.

mod advance;
mod list;
mod search;
mod submit;
mod track;

pub use advance::AdvanceApplicationStatus;
pub use list::ListApplications;
pub use search::SearchApplications;
pub use submit::SubmitApplication;
pub use track::{TrackApplication, TrackApplicationError};
