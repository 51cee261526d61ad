use serde::{Deserialize, Serialize};

/// Banking-policy thresholds applied before the classifier is consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulePolicy {
    /// Minimum combined monthly income.
    pub minimum_total_income: f64,
    /// Loan value may not exceed this multiple of combined monthly income.
    pub max_loan_to_income_multiple: f64,
    /// Share of combined monthly income an installment may consume.
    pub max_emi_to_income_ratio: f64,
    /// Currency units per unit of `loan_amount` on the form.
    pub loan_amount_unit: f64,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            minimum_total_income: 15_000.0,
            max_loan_to_income_multiple: 20.0,
            max_emi_to_income_ratio: 0.4,
            loan_amount_unit: 1_000.0,
        }
    }
}
