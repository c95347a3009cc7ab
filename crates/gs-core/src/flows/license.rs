//! Driving license application: personal info -> documents -> payment -> review.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::form::{validate, FormAccumulator};
use crate::wizard::{ConfigError, StepDefinition, StepId, StepTable};

pub mod fields {
    pub const FULL_NAME: &str = "full_name";
    pub const FATHER_NAME: &str = "father_name";
    pub const MOTHER_NAME: &str = "mother_name";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const ADDRESS: &str = "address";
    pub const PINCODE: &str = "pincode";
    pub const MOBILE: &str = "mobile";
    pub const LICENSE_TYPE: &str = "license_type";
    pub const DOCUMENTS: &str = "documents";
    pub const PAYMENT_METHOD: &str = "payment_method";
    pub const PAYMENT_CONFIRMED: &str = "payment_confirmed";
}

/// Documents that must be marked uploaded before the application can move on.
pub const REQUIRED_DOCUMENTS: [&str; 3] = ["identity_proof", "address_proof", "photo"];

pub const LICENSE_TYPES: [&str; 4] = ["two_wheeler", "four_wheeler", "commercial", "heavy_vehicle"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStep {
    Personal,
    Documents,
    Payment,
    Review,
}

impl LicenseStep {
    pub const ALL: [LicenseStep; 4] = [
        LicenseStep::Personal,
        LicenseStep::Documents,
        LicenseStep::Payment,
        LicenseStep::Review,
    ];

    fn is_complete(&self, acc: &FormAccumulator) -> bool {
        match self {
            LicenseStep::Personal => {
                let non_blank = |key| acc.text(key).is_some_and(validate::is_non_blank);
                non_blank(fields::FULL_NAME)
                    && non_blank(fields::DATE_OF_BIRTH)
                    && non_blank(fields::ADDRESS)
                    && acc.text(fields::PINCODE).is_some_and(validate::is_pincode)
                    && acc.text(fields::MOBILE).is_some_and(validate::is_phone)
                    && acc
                        .text(fields::LICENSE_TYPE)
                        .map_or(true, |kind| LICENSE_TYPES.contains(&kind))
            }
            LicenseStep::Documents => missing_documents(acc).is_empty(),
            LicenseStep::Payment => acc.flag(fields::PAYMENT_CONFIRMED),
            LicenseStep::Review => true,
        }
    }

    fn action(&self) -> Option<ActionKind> {
        match self {
            LicenseStep::Personal | LicenseStep::Documents => None,
            LicenseStep::Payment => Some(ActionKind::ProcessPayment),
            LicenseStep::Review => Some(ActionKind::SubmitApplication),
        }
    }
}

/// Required documents not yet marked uploaded in the nested `documents` object.
pub fn missing_documents(acc: &FormAccumulator) -> Vec<&'static str> {
    let uploaded = acc.object(fields::DOCUMENTS);
    REQUIRED_DOCUMENTS
        .into_iter()
        .filter(|doc| {
            !uploaded
                .and_then(|map| map.get(*doc))
                .and_then(|value| value.as_bool())
                .unwrap_or(false)
        })
        .collect()
}

impl StepId for LicenseStep {
    const FLOW: &'static str = "license_application";

    fn as_str(&self) -> &'static str {
        match self {
            LicenseStep::Personal => "personal",
            LicenseStep::Documents => "documents",
            LicenseStep::Payment => "payment",
            LicenseStep::Review => "review",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.as_str() == value)
    }
}

pub fn step_table() -> Result<StepTable<LicenseStep>, ConfigError> {
    let count = LicenseStep::ALL.len();
    StepTable::new(
        LicenseStep::ALL
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                let definition = StepDefinition::new(
                    step,
                    index as u32 + 1,
                    super::progress_for(index + 1, count),
                    move |acc| step.is_complete(acc),
                );
                match step.action() {
                    Some(action) => definition.with_action(action),
                    None => definition,
                }
            })
            .collect(),
    )
}
