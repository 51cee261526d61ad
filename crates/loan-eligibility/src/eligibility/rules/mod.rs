mod config;
mod policy;
mod signals;

pub use config::RulePolicy;
pub use policy::{RuleDecision, RuleViolation, RULES_PASSED_REASON};
pub use signals::AffordabilitySignals;

use super::domain::Application;
use policy::decide_outcome;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying the banking policy to an application.
///
/// Rules run in a fixed order and the first failure wins: credit history,
/// minimum income, loan-to-income multiple, then installment affordability.
#[derive(Debug, Clone, Default)]
pub struct RuleEvaluator {
    policy: RulePolicy,
}

impl RuleEvaluator {
    pub fn new(policy: RulePolicy) -> Self {
        Self { policy }
    }

    pub fn evaluate(&self, application: &Application) -> RuleOutcome {
        let signals = signals::affordability(application, &self.policy);
        let decision = decide_outcome(application.credit_history, &self.policy, &signals);

        RuleOutcome { decision, signals }
    }
}

/// Rule decision together with the figures it was based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub decision: RuleDecision,
    pub signals: AffordabilitySignals,
}
