//! Concrete flows built on the generic wizard.
//!
//! Each flow is a step enum plus a `step_table()` constructor. Guards and
//! required actions are chosen by exhaustive `match` over the enum, so adding
//! a step does not compile until it has both.

pub mod document;
pub mod license;
pub mod onboarding;
pub mod payment;

pub use document::DocumentStep;
pub use license::LicenseStep;
pub use onboarding::OnboardingStep;
pub use payment::PaymentStep;

/// Progress marker for the `index`-th of `count` steps (1-based).
pub(crate) fn progress_for(index: usize, count: usize) -> u8 {
    ((index * 100) / count.max(1)).min(100) as u8
}
