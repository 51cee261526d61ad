use serde::{Deserialize, Serialize};

use super::super::domain::Application;
use super::config::RulePolicy;

/// Affordability figures derived from an application, kept for explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilitySignals {
    pub total_income: f64,
    pub loan_value: f64,
    pub max_loan_allowed: f64,
    /// `None` when the loan term is zero and no installment can be derived.
    pub estimated_emi: Option<f64>,
    pub max_emi_allowed: f64,
}

pub(crate) fn affordability(
    application: &Application,
    policy: &RulePolicy,
) -> AffordabilitySignals {
    let total_income = application.total_income();
    let loan_value = application.loan_amount * policy.loan_amount_unit;
    let estimated_emi = match application.loan_term {
        0 => None,
        months => Some(loan_value / f64::from(months)),
    };

    AffordabilitySignals {
        total_income,
        loan_value,
        max_loan_allowed: total_income * policy.max_loan_to_income_multiple,
        estimated_emi,
        max_emi_allowed: total_income * policy.max_emi_to_income_ratio,
    }
}
