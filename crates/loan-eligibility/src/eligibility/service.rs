use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::domain::{Application, ApplicationForm};
use super::encoding::{FeatureEncoder, FeatureVector};
use super::intake::{self, ValidationError};
use super::model::{ClassifierAdapter, ModelError, ModelLabel};
use super::rules::{AffordabilitySignals, RuleDecision, RuleEvaluator, RuleViolation};

/// Engine composing the rule gate, feature encoder and classifier adapter.
///
/// Holds no per-request state; a single instance can serve every submission
/// for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    rules: RuleEvaluator,
    encoder: FeatureEncoder,
    adapter: Arc<ClassifierAdapter>,
}

impl DecisionEngine {
    pub fn new(rules: RuleEvaluator, adapter: Arc<ClassifierAdapter>) -> Self {
        Self {
            rules,
            encoder: FeatureEncoder::default(),
            adapter,
        }
    }

    /// Validate a raw form and decide it.
    pub fn decide(&self, form: &ApplicationForm) -> Result<EligibilityOutcome, DecisionError> {
        let application = intake::validate(form)?;
        self.decide_application(&application)
    }

    /// Decide an already validated application.
    ///
    /// A zero loan term aborts the request before any rule runs.
    pub fn decide_application(
        &self,
        application: &Application,
    ) -> Result<EligibilityOutcome, DecisionError> {
        if application.loan_term == 0 {
            let violation = RuleViolation::ZeroLoanTerm;
            error!(reason = violation.reason(), "loan request misconfigured");
            return Err(DecisionError::LoanConfiguration(violation));
        }

        let rule_outcome = self.rules.evaluate(application);
        let evaluated_at = Utc::now();

        let violation = match rule_outcome.decision {
            RuleDecision::Pass => None,
            RuleDecision::Reject(violation) => Some(violation),
        };

        if let Some(violation) = violation {
            if violation.is_configuration_error() {
                error!(reason = violation.reason(), "loan request misconfigured");
                return Err(DecisionError::LoanConfiguration(violation));
            }

            info!(reason = violation.reason(), "loan rejected by rules");
            return Ok(EligibilityOutcome {
                decision: EligibilityDecision::RuleRejected {
                    reason: violation.reason().to_string(),
                },
                rule_reason: violation.reason().to_string(),
                signals: rule_outcome.signals,
                features: None,
                evaluated_at,
            });
        }

        let features = self.encoder.encode(application);
        let label = self.adapter.predict(&features).map_err(|err| {
            error!(error = %err, "classifier adapter failed");
            DecisionError::Model(err)
        })?;

        let decision = match label {
            ModelLabel::Approved => EligibilityDecision::ModelApproved,
            ModelLabel::Rejected => EligibilityDecision::ModelRejected,
        };
        info!(verdict = ?label, "loan decided by classifier");

        Ok(EligibilityOutcome {
            decision,
            rule_reason: rule_outcome.decision.reason().to_string(),
            signals: rule_outcome.signals,
            features: Some(features),
            evaluated_at,
        })
    }
}

/// The three user-visible outcomes of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EligibilityDecision {
    RuleRejected { reason: String },
    ModelRejected,
    ModelApproved,
}

impl EligibilityDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, EligibilityDecision::ModelApproved)
    }

    pub fn summary(&self) -> String {
        match self {
            EligibilityDecision::RuleRejected { reason } => {
                format!("Loan Rejected (Rule-Based): {reason}")
            }
            EligibilityDecision::ModelRejected => "Loan Rejected (ML Decision)".to_string(),
            EligibilityDecision::ModelApproved => "Loan Approved (ML Decision)".to_string(),
        }
    }
}

/// Decision plus the figures behind it, for display or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityOutcome {
    pub decision: EligibilityDecision,
    pub rule_reason: String,
    pub signals: AffordabilitySignals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureVector>,
    pub evaluated_at: DateTime<Utc>,
}

/// Error raised by the decision engine. Policy rejections are outcomes, not errors.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    #[error("invalid loan configuration: {}", .0.reason())]
    LoanConfiguration(RuleViolation),
    #[error("model configuration error: {0}")]
    Model(#[from] ModelError),
}
