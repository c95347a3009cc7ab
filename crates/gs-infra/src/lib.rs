//! GovServices infrastructure adapters.
//!
//! Implementations of the `gs-core` ports: the simulated backend, session
//! result stores, the application repository, the translation catalog and
//! the system clock.

pub mod application_repository;
pub mod session_result;
pub mod simulator;
pub mod time;
pub mod translation;

pub use application_repository::InMemoryApplicationRepository;
pub use session_result::{FileSessionResultStore, InMemorySessionResultStore};
pub use simulator::SimulatedBackend;
pub use time::SystemClock;
pub use translation::TomlTranslationCatalog;
