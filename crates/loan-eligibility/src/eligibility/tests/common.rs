use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::eligibility::domain::{
    Application, ApplicationForm, CreditHistory, Dependents, Education, Gender, PropertyArea,
};
use crate::eligibility::encoding::FEATURE_COUNT;
use crate::eligibility::model::{
    Classifier, ClassifierAdapter, FeatureScaler, LinearClassifier, ModelError, StandardScaler,
};
use crate::eligibility::rules::RuleEvaluator;
use crate::eligibility::service::DecisionEngine;

/// Index of the credit history column in the encoded vector.
pub(super) const CREDIT_HISTORY_FEATURE: usize = 9;

pub(super) fn form() -> ApplicationForm {
    ApplicationForm {
        gender: "Male".to_string(),
        married: "Yes".to_string(),
        dependents: "0".to_string(),
        education: "Graduate".to_string(),
        self_employed: "No".to_string(),
        property_area: "Urban".to_string(),
        applicant_income: 20_000.0,
        coapplicant_income: 0.0,
        loan_amount: 100.0,
        loan_term: 360,
        credit_history: "Good".to_string(),
    }
}

pub(super) fn application() -> Application {
    Application {
        gender: Gender::Male,
        married: true,
        dependents: Dependents::new(0),
        education: Education::Graduate,
        self_employed: false,
        property_area: PropertyArea::Urban,
        applicant_income: 20_000.0,
        coapplicant_income: 0.0,
        loan_amount: 100.0,
        loan_term: 360,
        credit_history: CreditHistory::Good,
    }
}

pub(super) fn identity_scaler() -> Arc<dyn FeatureScaler> {
    Arc::new(
        StandardScaler::new(vec![0.0; FEATURE_COUNT], vec![1.0; FEATURE_COUNT])
            .expect("identity scaler is valid"),
    )
}

/// Linear model that only looks at credit history, shifted by `intercept`.
pub(super) fn credit_weighted_classifier(intercept: f64) -> Arc<dyn Classifier> {
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    coefficients[CREDIT_HISTORY_FEATURE] = 1.0;
    Arc::new(LinearClassifier::new(coefficients, intercept, [0, 1]).expect("valid classifier"))
}

pub(super) fn approving_adapter() -> Arc<ClassifierAdapter> {
    Arc::new(
        ClassifierAdapter::new(identity_scaler(), credit_weighted_classifier(-0.5))
            .expect("adapter dimensions agree"),
    )
}

pub(super) fn rejecting_adapter() -> Arc<ClassifierAdapter> {
    Arc::new(
        ClassifierAdapter::new(identity_scaler(), credit_weighted_classifier(-1.5))
            .expect("adapter dimensions agree"),
    )
}

pub(super) fn engine_with(adapter: Arc<ClassifierAdapter>) -> DecisionEngine {
    DecisionEngine::new(RuleEvaluator::default(), adapter)
}

/// Classifier stub returning a fixed raw label and counting invocations.
#[derive(Debug, Default)]
pub(super) struct RecordingClassifier {
    pub(super) label: i64,
    pub(super) dimension: usize,
    pub(super) calls: AtomicUsize,
}

impl RecordingClassifier {
    pub(super) fn returning(label: i64) -> Arc<Self> {
        Arc::new(Self {
            label,
            dimension: FEATURE_COUNT,
            calls: AtomicUsize::new(0),
        })
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for RecordingClassifier {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn predict(&self, scaled: &[f64]) -> Result<i64, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if scaled.len() != self.dimension {
            return Err(ModelError::DimensionMismatch {
                stage: "classifier",
                expected: self.dimension,
                found: scaled.len(),
            });
        }
        Ok(self.label)
    }

    fn kind(&self) -> &'static str {
        "recording"
    }
}
