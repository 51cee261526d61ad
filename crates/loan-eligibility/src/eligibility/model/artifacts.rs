use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::super::encoding::{FEATURE_COUNT, FEATURE_SCHEMA};
use super::classifier::{DecisionTreeClassifier, LinearClassifier, TreeNode};
use super::scaler::{MinMaxScaler, StandardScaler};
use super::{Classifier, FeatureScaler};
use crate::config::ArtifactConfig;

/// Fatal problems with the model or scaler artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact not found at {}", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read artifact {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("artifact {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(
        "{artifact} was fit against feature schema v{found_version} {found_names:?}, expected v{expected_version} {expected_names:?}"
    )]
    SchemaMismatch {
        artifact: &'static str,
        expected_version: u32,
        expected_names: Vec<String>,
        found_version: u32,
        found_names: Vec<String>,
    },
    #[error("{artifact} expects {found} features but the encoder produces {expected}")]
    Dimension {
        artifact: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{artifact} parameter invalid: {detail}")]
    InvalidParameter {
        artifact: &'static str,
        detail: String,
    },
}

/// On-disk scaler document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalerArtifact {
    pub schema_version: u32,
    pub feature_names: Vec<String>,
    pub scaler: ScalerParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerParameters {
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

/// On-disk classifier document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub schema_version: u32,
    pub feature_names: Vec<String>,
    pub classifier: ClassifierParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierParameters {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(default = "default_classes")]
        classes: [i64; 2],
    },
    DecisionTree {
        nodes: Vec<TreeNode>,
    },
}

fn default_classes() -> [i64; 2] {
    [0, 1]
}

impl ScalerArtifact {
    pub fn read(path: &Path) -> Result<Self, ArtifactError> {
        read_json(path)
    }

    pub fn build(self) -> Result<Arc<dyn FeatureScaler>, ArtifactError> {
        check_schema("scaler", self.schema_version, self.feature_names)?;
        let scaler: Arc<dyn FeatureScaler> = match self.scaler {
            ScalerParameters::Standard { mean, scale } => {
                Arc::new(StandardScaler::new(mean, scale)?)
            }
            ScalerParameters::MinMax { min, scale } => Arc::new(MinMaxScaler::new(min, scale)?),
        };
        Ok(scaler)
    }
}

impl ModelArtifact {
    pub fn read(path: &Path) -> Result<Self, ArtifactError> {
        read_json(path)
    }

    pub fn build(self) -> Result<Arc<dyn Classifier>, ArtifactError> {
        check_schema("classifier", self.schema_version, self.feature_names)?;
        let classifier: Arc<dyn Classifier> = match self.classifier {
            ClassifierParameters::Linear {
                coefficients,
                intercept,
                classes,
            } => Arc::new(LinearClassifier::new(coefficients, intercept, classes)?),
            ClassifierParameters::DecisionTree { nodes } => {
                Arc::new(DecisionTreeClassifier::new(nodes, FEATURE_COUNT)?)
            }
        };
        Ok(classifier)
    }
}

/// Read and build both artifacts named by the configuration.
pub fn load_artifacts(
    config: &ArtifactConfig,
) -> Result<(Arc<dyn FeatureScaler>, Arc<dyn Classifier>), ArtifactError> {
    let scaler_path = config.scaler_path();
    let model_path = config.model_path();
    debug!(scaler = %scaler_path.display(), model = %model_path.display(), "loading artifacts");

    let scaler = ScalerArtifact::read(&scaler_path)?.build()?;
    let classifier = ModelArtifact::read(&model_path)?.build()?;

    info!(
        scaler_kind = scaler.kind(),
        classifier_kind = classifier.kind(),
        schema_version = FEATURE_SCHEMA.version,
        "model artifacts loaded"
    );
    Ok((scaler, classifier))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ArtifactError::Missing {
            path: path.to_path_buf(),
        },
        _ => ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn check_schema(
    artifact: &'static str,
    version: u32,
    feature_names: Vec<String>,
) -> Result<(), ArtifactError> {
    if FEATURE_SCHEMA.accepts(version, &feature_names) {
        return Ok(());
    }

    Err(ArtifactError::SchemaMismatch {
        artifact,
        expected_version: FEATURE_SCHEMA.version,
        expected_names: FEATURE_SCHEMA
            .feature_names
            .iter()
            .map(|name| name.to_string())
            .collect(),
        found_version: version,
        found_names: feature_names,
    })
}
