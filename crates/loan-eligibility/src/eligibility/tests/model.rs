use std::sync::Arc;

use super::common::*;
use crate::eligibility::encoding::{FeatureEncoder, FEATURE_COUNT};
use crate::eligibility::model::{
    ArtifactError, ClassifierAdapter, LinearClassifier, MinMaxScaler, ModelError, ModelLabel,
};

#[test]
fn adapter_scales_then_classifies() {
    let features = FeatureEncoder::default().encode(&application());

    assert_eq!(
        approving_adapter().predict(&features),
        Ok(ModelLabel::Approved)
    );
    assert_eq!(
        rejecting_adapter().predict(&features),
        Ok(ModelLabel::Rejected)
    );
}

#[test]
fn scaler_output_feeds_classifier() {
    // min_max maps credit history 1.0 to -1.0, flipping the credit-weighted model
    let mut offsets = vec![0.0; FEATURE_COUNT];
    offsets[CREDIT_HISTORY_FEATURE] = -2.0;
    let scaler = Arc::new(MinMaxScaler::new(offsets, vec![1.0; FEATURE_COUNT]).expect("valid"));
    let adapter = ClassifierAdapter::new(scaler, credit_weighted_classifier(0.5))
        .expect("dimensions agree");

    let features = FeatureEncoder::default().encode(&application());

    assert_eq!(adapter.predict(&features), Ok(ModelLabel::Rejected));
}

#[test]
fn adapter_rejects_classifier_with_wrong_dimension() {
    let classifier = Arc::new(
        LinearClassifier::new(vec![1.0; FEATURE_COUNT - 1], 0.0, [0, 1]).expect("valid"),
    );

    match ClassifierAdapter::new(identity_scaler(), classifier) {
        Err(ArtifactError::Dimension {
            artifact,
            expected,
            found,
        }) => {
            assert_eq!(artifact, "classifier");
            assert_eq!(expected, FEATURE_COUNT);
            assert_eq!(found, FEATURE_COUNT - 1);
        }
        other => panic!("expected dimension error, got {other:?}"),
    }
}

#[test]
fn unexpected_class_label_is_a_model_error() {
    let adapter = ClassifierAdapter::new(identity_scaler(), RecordingClassifier::returning(2))
        .expect("dimensions agree");
    let features = FeatureEncoder::default().encode(&application());

    assert_eq!(
        adapter.predict(&features),
        Err(ModelError::UnexpectedLabel(2))
    );
}

#[test]
fn custom_class_labels_are_honoured() {
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    coefficients[CREDIT_HISTORY_FEATURE] = 1.0;
    let inverted = Arc::new(LinearClassifier::new(coefficients, -0.5, [1, 0]).expect("valid"));
    let adapter = ClassifierAdapter::new(identity_scaler(), inverted).expect("dimensions agree");
    let features = FeatureEncoder::default().encode(&application());

    assert_eq!(adapter.predict(&features), Ok(ModelLabel::Rejected));
}

#[test]
fn summary_reports_loaded_kinds() {
    let summary = approving_adapter().summary();

    assert_eq!(summary.schema_version, 1);
    assert_eq!(summary.scaler_kind, "standard");
    assert_eq!(summary.classifier_kind, "linear");
    assert_eq!(summary.feature_names.len(), FEATURE_COUNT);
}
