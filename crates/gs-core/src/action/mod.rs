//! Out-of-process actions (send OTP, verify ID, process payment, ...).
//!
//! The domain only describes *what* is requested and how an outcome is
//! judged. Running the request with latency and cancellation is the job of
//! the application and infrastructure layers.

mod accept;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::form::FormAccumulator;
use crate::ids::ActionId;

pub use accept::{AcceptRule, FieldFormat};

/// Kind of backend call a step may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SendOtp,
    VerifyOtp,
    VerifyAadhaar,
    CreateProfile,
    EnrollBiometric,
    ProcessPayment,
    UploadDocument,
    SubmitApplication,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::SendOtp,
        ActionKind::VerifyOtp,
        ActionKind::VerifyAadhaar,
        ActionKind::CreateProfile,
        ActionKind::EnrollBiometric,
        ActionKind::ProcessPayment,
        ActionKind::UploadDocument,
        ActionKind::SubmitApplication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::SendOtp => "send_otp",
            ActionKind::VerifyOtp => "verify_otp",
            ActionKind::VerifyAadhaar => "verify_aadhaar",
            ActionKind::CreateProfile => "create_profile",
            ActionKind::EnrollBiometric => "enroll_biometric",
            ActionKind::ProcessPayment => "process_payment",
            ActionKind::UploadDocument => "upload_document",
            ActionKind::SubmitApplication => "submit_application",
        }
    }

    /// Accumulator flag set to `true` once the action succeeded.
    pub fn completion_field(&self) -> &'static str {
        match self {
            ActionKind::SendOtp => "otp_sent",
            ActionKind::VerifyOtp => "phone_verified",
            ActionKind::VerifyAadhaar => "aadhaar_verified",
            ActionKind::CreateProfile => "profile_created",
            ActionKind::EnrollBiometric => "biometric_enrolled",
            ActionKind::ProcessPayment => "payment_confirmed",
            ActionKind::UploadDocument => "document_uploaded",
            ActionKind::SubmitApplication => "application_submitted",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an action did not succeed.
///
/// `Timeout` is never produced by the simulator but any real backend
/// replacement must be able to report it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AsyncFailure {
    #[error("input has an invalid format")]
    InvalidFormat,
    #[error("request was rejected by the backend")]
    RejectedByBackend,
    #[error("request timed out")]
    Timeout,
}

impl AsyncFailure {
    /// Translation key of the inline message shown to the user.
    pub fn message_key(&self) -> &'static str {
        match self {
            AsyncFailure::InvalidFormat => "error.invalid_format",
            AsyncFailure::RejectedByBackend => "error.rejected",
            AsyncFailure::Timeout => "error.timeout",
        }
    }
}

/// One issued action. Resolves exactly once; a retry is a new request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub id: ActionId,
    pub kind: ActionKind,
    pub payload: FormAccumulator,
    pub latency: Duration,
}

impl ActionRequest {
    pub fn new(kind: ActionKind, payload: FormAccumulator, latency: Duration) -> Self {
        Self {
            id: ActionId::new(),
            kind,
            payload,
            latency,
        }
    }
}

/// `Ok` echoes the submitted payload.
pub type ActionOutcome = Result<FormAccumulator, AsyncFailure>;
