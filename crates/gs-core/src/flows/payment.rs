//! Fee payment: select method -> enter details -> confirm.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::form::{validate, FormAccumulator};
use crate::wizard::{ConfigError, StepDefinition, StepId, StepTable};

pub mod fields {
    pub const METHOD: &str = "method";
    pub const UPI_ID: &str = "upi_id";
    pub const CARD: &str = "card";
    pub const CARD_NUMBER: &str = "number";
    pub const CARD_EXPIRY: &str = "expiry";
    pub const CARD_CVV: &str = "cvv";
    pub const CARD_HOLDER: &str = "holder";
    pub const BANK: &str = "bank";
    pub const PAYMENT_CONFIRMED: &str = "payment_confirmed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Upi,
    Card,
    NetBanking,
}

impl PaymentMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "upi" => Some(PaymentMethod::Upi),
            "card" => Some(PaymentMethod::Card),
            "netbanking" => Some(PaymentMethod::NetBanking),
            _ => None,
        }
    }

    fn details_complete(&self, acc: &FormAccumulator) -> bool {
        match self {
            PaymentMethod::Upi => acc.text(fields::UPI_ID).is_some_and(validate::is_upi_id),
            PaymentMethod::Card => {
                let card = |attr| acc.nested_text(fields::CARD, attr);
                card(fields::CARD_NUMBER).is_some_and(validate::is_card_number)
                    && card(fields::CARD_EXPIRY).is_some_and(validate::is_expiry)
                    && card(fields::CARD_CVV).is_some_and(validate::is_cvv)
                    && card(fields::CARD_HOLDER).is_some_and(validate::is_non_blank)
            }
            PaymentMethod::NetBanking => acc.text(fields::BANK).is_some_and(validate::is_non_blank),
        }
    }
}

fn selected_method(acc: &FormAccumulator) -> Option<PaymentMethod> {
    acc.text(fields::METHOD).and_then(PaymentMethod::parse)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStep {
    SelectMethod,
    EnterDetails,
    Confirm,
}

impl PaymentStep {
    pub const ALL: [PaymentStep; 3] = [
        PaymentStep::SelectMethod,
        PaymentStep::EnterDetails,
        PaymentStep::Confirm,
    ];

    fn is_complete(&self, acc: &FormAccumulator) -> bool {
        match self {
            PaymentStep::SelectMethod => selected_method(acc).is_some(),
            PaymentStep::EnterDetails => {
                selected_method(acc).is_some_and(|method| method.details_complete(acc))
            }
            PaymentStep::Confirm => acc.flag(fields::PAYMENT_CONFIRMED),
        }
    }

    fn action(&self) -> Option<ActionKind> {
        match self {
            PaymentStep::SelectMethod | PaymentStep::EnterDetails => None,
            PaymentStep::Confirm => Some(ActionKind::ProcessPayment),
        }
    }
}

impl StepId for PaymentStep {
    const FLOW: &'static str = "payment";

    fn as_str(&self) -> &'static str {
        match self {
            PaymentStep::SelectMethod => "select_method",
            PaymentStep::EnterDetails => "enter_details",
            PaymentStep::Confirm => "confirm",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.as_str() == value)
    }
}

pub fn step_table() -> Result<StepTable<PaymentStep>, ConfigError> {
    let count = PaymentStep::ALL.len();
    StepTable::new(
        PaymentStep::ALL
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FieldValue;

    fn details() -> StepDefinition<PaymentStep> {
        step_table()
            .unwrap()
            .get(PaymentStep::EnterDetails)
            .cloned()
            .unwrap()
    }

    #[test]
    fn details_depend_on_selected_method() {
        let step = details();
        let upi = FormAccumulator::new()
            .with("method", "upi")
            .with("upi_id", "rahul@okaxis");
        assert!(step.is_complete(&upi));

        let switched = upi.with("method", "netbanking");
        assert!(!step.is_complete(&switched));
        assert!(step.is_complete(&switched.with("bank", "State Bank of India")));
    }

    #[test]
    fn card_details_are_nested() {
        let step = details();
        let card = FormAccumulator::new().with("method", "card").with(
            "card",
            FieldValue::object([
                ("number", "4111111111111111"),
                ("expiry", "08/27"),
                ("cvv", "123"),
                ("holder", "Rahul Sharma"),
            ]),
        );
        assert!(step.is_complete(&card));
    }

    #[test]
    fn unknown_method_does_not_complete_selection() {
        let table = step_table().unwrap();
        let step = table.get(PaymentStep::SelectMethod).unwrap();
        assert!(!step.is_complete(&FormAccumulator::new().with("method", "cash")));
        assert_eq!(table.terminal().action(), Some(ActionKind::ProcessPayment));
    }
}
