//! The object a completed onboarding hands to the rest of the app.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flows::onboarding::fields;
use crate::form::{validate, FormAccumulator};
use crate::ids::SessionId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionResultError {
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("`{0}` was never verified")]
    Unverified(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub full_name: String,
    pub email: String,
    pub date_of_birth: String,
    pub address: String,
}

/// Verified phone, verified Aadhaar and profile of one finished onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResult {
    pub session_id: SessionId,
    pub phone: String,
    pub aadhaar: String,
    pub profile: ProfileDetails,
    pub biometric_method: String,
    pub completed_at: DateTime<Utc>,
}

impl SessionResult {
    /// Builds the result from the terminal onboarding accumulator. The Aadhaar
    /// number is stored in its 12-digit canonical form.
    pub fn from_accumulator(
        session_id: SessionId,
        acc: &FormAccumulator,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, SessionResultError> {
        let text = |key: &'static str| {
            acc.text(key)
                .map(str::to_string)
                .ok_or(SessionResultError::MissingField(key))
        };
        let profile_text = |attr: &'static str| {
            acc.nested_text(fields::PROFILE, attr)
                .map(str::to_string)
                .ok_or(SessionResultError::MissingField(attr))
        };

        if !acc.flag(fields::PHONE_VERIFIED) {
            return Err(SessionResultError::Unverified(fields::PHONE));
        }
        if !acc.flag(fields::AADHAAR_VERIFIED) {
            return Err(SessionResultError::Unverified(fields::AADHAAR));
        }

        let aadhaar = text(fields::AADHAAR)?;
        Ok(Self {
            session_id,
            phone: text(fields::PHONE)?,
            aadhaar: validate::normalize_aadhaar(&aadhaar).unwrap_or(aadhaar),
            profile: ProfileDetails {
                full_name: profile_text(fields::FULL_NAME)?,
                email: profile_text(fields::EMAIL)?,
                date_of_birth: profile_text(fields::DATE_OF_BIRTH)?,
                address: profile_text(fields::ADDRESS)?,
            },
            biometric_method: text(fields::BIOMETRIC_METHOD)?,
            completed_at,
        })
    }

    /// Last four digits, the only part of the Aadhaar number shown on screen.
    pub fn masked_aadhaar(&self) -> String {
        let tail = self.aadhaar.len().saturating_sub(4);
        format!("XXXX XXXX {}", self.aadhaar.get(tail..).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldValue;

    fn completed() -> FormAccumulator {
        FormAccumulator::new()
            .with("phone", "9876543210")
            .with("phone_verified", true)
            .with("aadhaar", "1234 5678 9012")
            .with("aadhaar_verified", true)
            .with(
                "profile",
                FieldValue::object([
                    ("full_name", "Rahul Sharma"),
                    ("email", "rahul.sharma@example.com"),
                    ("date_of_birth", "1990-04-12"),
                    ("address", "123 Main Street, Sector 15, New Delhi"),
                ]),
            )
            .with("biometric_method", "fingerprint")
    }

    #[test]
    fn builds_from_completed_accumulator() {
        let id = SessionId::new();
        let result = SessionResult::from_accumulator(id.clone(), &completed(), Utc::now()).unwrap();
        assert_eq!(result.session_id, id);
        assert_eq!(result.aadhaar, "123456789012");
        assert_eq!(result.profile.full_name, "Rahul Sharma");
        assert_eq!(result.masked_aadhaar(), "XXXX XXXX 9012");
    }

    #[test]
    fn missing_profile_attribute_is_reported() {
        let acc = completed().with("profile", FieldValue::object([("full_name", "Rahul")]));
        let err = SessionResult::from_accumulator(SessionId::new(), &acc, Utc::now()).unwrap_err();
        assert_eq!(err, SessionResultError::MissingField("email"));
    }

    #[test]
    fn unverified_phone_is_rejected() {
        let acc = completed().with("phone_verified", false);
        let err = SessionResult::from_accumulator(SessionId::new(), &acc, Utc::now()).unwrap_err();
        assert_eq!(err, SessionResultError::Unverified("phone"));
    }
}
