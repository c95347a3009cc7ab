//! Simulated backend standing in for OTP delivery, identity verification,
//! payment processing and document storage.

mod backend;

pub use backend::SimulatedBackend;
