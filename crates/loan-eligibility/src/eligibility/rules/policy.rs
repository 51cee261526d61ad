use super::super::domain::CreditHistory;
use super::config::RulePolicy;
use super::signals::AffordabilitySignals;
use serde::{Deserialize, Serialize};

pub const RULES_PASSED_REASON: &str = "Rule-based eligibility passed";

/// Result of the rule stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuleDecision {
    Pass,
    Reject(RuleViolation),
}

impl RuleDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, RuleDecision::Pass)
    }

    pub fn reason(&self) -> &'static str {
        match self {
            RuleDecision::Pass => RULES_PASSED_REASON,
            RuleDecision::Reject(violation) => violation.reason(),
        }
    }

    /// The `(eligible, reason)` pair shown to the applicant.
    pub fn as_pair(&self) -> (bool, &'static str) {
        (self.is_eligible(), self.reason())
    }
}

/// First banking rule an application failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleViolation {
    BadCreditHistory,
    IncomeBelowMinimum,
    LoanExceedsIncomeMultiple,
    ZeroLoanTerm,
    EmiExceedsIncomeShare,
}

impl RuleViolation {
    pub const fn reason(self) -> &'static str {
        match self {
            RuleViolation::BadCreditHistory => "Bad credit history",
            RuleViolation::IncomeBelowMinimum => "Income below minimum requirement",
            RuleViolation::LoanExceedsIncomeMultiple => "Loan amount too high compared to income",
            RuleViolation::ZeroLoanTerm => "Loan term must be greater than zero",
            RuleViolation::EmiExceedsIncomeShare => "EMI exceeds 40% of income",
        }
    }

    /// Violations that indicate a malformed request rather than a policy outcome.
    pub const fn is_configuration_error(self) -> bool {
        matches!(self, RuleViolation::ZeroLoanTerm)
    }
}

pub(crate) fn decide_outcome(
    credit_history: CreditHistory,
    policy: &RulePolicy,
    signals: &AffordabilitySignals,
) -> RuleDecision {
    if credit_history == CreditHistory::Bad {
        return RuleDecision::Reject(RuleViolation::BadCreditHistory);
    }

    if signals.total_income < policy.minimum_total_income {
        return RuleDecision::Reject(RuleViolation::IncomeBelowMinimum);
    }

    if signals.loan_value > signals.max_loan_allowed {
        return RuleDecision::Reject(RuleViolation::LoanExceedsIncomeMultiple);
    }

    let Some(estimated_emi) = signals.estimated_emi else {
        return RuleDecision::Reject(RuleViolation::ZeroLoanTerm);
    };

    if estimated_emi > signals.max_emi_allowed {
        return RuleDecision::Reject(RuleViolation::EmiExceedsIncomeShare);
    }

    RuleDecision::Pass
}
