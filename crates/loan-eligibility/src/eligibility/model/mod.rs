//! Adapter over the externally trained scaler and classifier.

mod artifacts;
mod classifier;
mod scaler;

pub use artifacts::{
    load_artifacts, ArtifactError, ClassifierParameters, ModelArtifact, ScalerArtifact,
    ScalerParameters,
};
pub use classifier::{DecisionTreeClassifier, LinearClassifier, TreeNode};
pub use scaler::{MinMaxScaler, StandardScaler};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::encoding::{FeatureVector, FEATURE_COUNT, FEATURE_SCHEMA};
use crate::config::ArtifactConfig;

/// Frozen feature-scaling transform fit at training time.
pub trait FeatureScaler: Send + Sync + fmt::Debug {
    fn dimension(&self) -> usize;
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError>;
    fn kind(&self) -> &'static str;
}

/// Pre-trained binary classifier returning its raw class label.
pub trait Classifier: Send + Sync + fmt::Debug {
    fn dimension(&self) -> usize;
    fn predict(&self, scaled: &[f64]) -> Result<i64, ModelError>;
    fn kind(&self) -> &'static str;
}

/// Inference-time failures. All of them point at a misconfigured deployment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("{stage} expects {expected} features, received {found}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("classifier produced unexpected label {0} (expected 0 or 1)")]
    UnexpectedLabel(i64),
}

pub(crate) fn check_dimension(
    stage: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), ModelError> {
    if expected == found {
        Ok(())
    } else {
        Err(ModelError::DimensionMismatch {
            stage,
            expected,
            found,
        })
    }
}

/// Verdict label emitted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelLabel {
    Approved,
    Rejected,
}

impl TryFrom<i64> for ModelLabel {
    type Error = ModelError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            1 => Ok(ModelLabel::Approved),
            0 => Ok(ModelLabel::Rejected),
            other => Err(ModelError::UnexpectedLabel(other)),
        }
    }
}

/// Scaler and classifier loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct ClassifierAdapter {
    scaler: Arc<dyn FeatureScaler>,
    classifier: Arc<dyn Classifier>,
}

impl ClassifierAdapter {
    /// Pair a scaler with a classifier, refusing any that disagree with the encoder.
    pub fn new(
        scaler: Arc<dyn FeatureScaler>,
        classifier: Arc<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        for (artifact, found) in [
            ("scaler", scaler.dimension()),
            ("classifier", classifier.dimension()),
        ] {
            if found != FEATURE_COUNT {
                return Err(ArtifactError::Dimension {
                    artifact,
                    expected: FEATURE_COUNT,
                    found,
                });
            }
        }

        Ok(Self { scaler, classifier })
    }

    pub fn load(config: &ArtifactConfig) -> Result<Self, ArtifactError> {
        let (scaler, classifier) = load_artifacts(config)?;
        Self::new(scaler, classifier)
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<ModelLabel, ModelError> {
        let scaled = self.scaler.transform(features.as_slice())?;
        let raw = self.classifier.predict(&scaled)?;
        ModelLabel::try_from(raw)
    }

    pub fn summary(&self) -> AdapterSummary {
        AdapterSummary {
            schema_version: FEATURE_SCHEMA.version,
            feature_names: FEATURE_SCHEMA.feature_names.to_vec(),
            scaler_kind: self.scaler.kind(),
            classifier_kind: self.classifier.kind(),
        }
    }
}

/// Operator-facing description of the loaded artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterSummary {
    pub schema_version: u32,
    pub feature_names: Vec<&'static str>,
    pub scaler_kind: &'static str,
    pub classifier_kind: &'static str,
}
