//! Onboarding: phone -> OTP -> Aadhaar -> profile -> biometric.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::form::{validate, FormAccumulator};
use crate::wizard::{ConfigError, StepDefinition, StepId, StepTable};

/// Accumulator keys used by the onboarding flow.
pub mod fields {
    pub const PHONE: &str = "phone";
    pub const OTP: &str = "otp";
    pub const PHONE_VERIFIED: &str = "phone_verified";
    pub const AADHAAR: &str = "aadhaar";
    pub const AADHAAR_VERIFIED: &str = "aadhaar_verified";
    pub const PROFILE: &str = "profile";
    pub const FULL_NAME: &str = "full_name";
    pub const EMAIL: &str = "email";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const ADDRESS: &str = "address";
    pub const BIOMETRIC_METHOD: &str = "biometric_method";
}

pub const BIOMETRIC_METHODS: [&str; 3] = ["fingerprint", "face", "pin"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Phone,
    Otp,
    Aadhaar,
    Profile,
    Biometric,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 5] = [
        OnboardingStep::Phone,
        OnboardingStep::Otp,
        OnboardingStep::Aadhaar,
        OnboardingStep::Profile,
        OnboardingStep::Biometric,
    ];

    fn is_complete(&self, acc: &FormAccumulator) -> bool {
        match self {
            OnboardingStep::Phone => acc.text(fields::PHONE).is_some_and(validate::is_phone),
            OnboardingStep::Otp => acc.flag(fields::PHONE_VERIFIED),
            OnboardingStep::Aadhaar => {
                acc.text(fields::AADHAAR).is_some_and(validate::is_aadhaar)
                    && acc.flag(fields::AADHAAR_VERIFIED)
            }
            OnboardingStep::Profile => profile_is_complete(acc),
            OnboardingStep::Biometric => acc
                .text(fields::BIOMETRIC_METHOD)
                .is_some_and(|method| BIOMETRIC_METHODS.contains(&method)),
        }
    }

    fn action(&self) -> ActionKind {
        match self {
            OnboardingStep::Phone => ActionKind::SendOtp,
            OnboardingStep::Otp => ActionKind::VerifyOtp,
            OnboardingStep::Aadhaar => ActionKind::VerifyAadhaar,
            OnboardingStep::Profile => ActionKind::CreateProfile,
            OnboardingStep::Biometric => ActionKind::EnrollBiometric,
        }
    }
}

fn profile_is_complete(acc: &FormAccumulator) -> bool {
    let non_blank = |attr| {
        acc.nested_text(fields::PROFILE, attr)
            .is_some_and(validate::is_non_blank)
    };
    non_blank(fields::FULL_NAME)
        && acc
            .nested_text(fields::PROFILE, fields::EMAIL)
            .is_some_and(validate::is_email)
        && non_blank(fields::DATE_OF_BIRTH)
        && non_blank(fields::ADDRESS)
}

impl StepId for OnboardingStep {
    const FLOW: &'static str = "onboarding";

    fn as_str(&self) -> &'static str {
        match self {
            OnboardingStep::Phone => "phone",
            OnboardingStep::Otp => "otp",
            OnboardingStep::Aadhaar => "aadhaar",
            OnboardingStep::Profile => "profile",
            OnboardingStep::Biometric => "biometric",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.as_str() == value)
    }
}

pub fn step_table() -> Result<StepTable<OnboardingStep>, ConfigError> {
    let count = OnboardingStep::ALL.len();
    StepTable::new(
        OnboardingStep::ALL
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                let definition = StepDefinition::new(
                    step,
                    index as u32 + 1,
                    super::progress_for(index + 1, count),
                    move |acc| step.is_complete(acc),
                )
                .with_action(step.action());
                match step {
                    OnboardingStep::Otp => definition.with_resend(ActionKind::SendOtp),
                    _ => definition,
                }
            })
            .collect(),
    )
}
