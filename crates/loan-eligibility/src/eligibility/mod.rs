//! Loan eligibility intake, rule gating and classifier-backed decisions.
//!
//! A submission flows through intake validation, the banking rule gate and,
//! when every rule passes, the feature encoder and the frozen scaler and
//! classifier. Nothing here retains applicant data between calls.

pub mod domain;
pub mod encoding;
pub mod intake;
pub mod model;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationForm, CreditHistory, Dependents, Education, Gender, PropertyArea,
    DEFAULT_LOAN_TERM_MONTHS, REQUIRED_FORM_FIELDS,
};
pub use encoding::{FeatureEncoder, FeatureSchema, FeatureVector, FEATURE_COUNT, FEATURE_SCHEMA};
pub use intake::{form_from_json, validate, ValidationError};
pub use model::{
    AdapterSummary, ArtifactError, Classifier, ClassifierAdapter, FeatureScaler, ModelError,
    ModelLabel,
};
pub use rules::{
    AffordabilitySignals, RuleDecision, RuleEvaluator, RuleOutcome, RulePolicy, RuleViolation,
};
pub use service::{DecisionEngine, DecisionError, EligibilityDecision, EligibilityOutcome};
