use super::artifacts::ArtifactError;
use super::{check_dimension, FeatureScaler, ModelError};

const ARTIFACT: &str = "scaler";

/// Standardization: `(x - mean) / scale` per feature.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        same_length(mean.len(), scale.len())?;
        all_finite("mean", &mean)?;
        all_finite("scale", &scale)?;
        if let Some(index) = scale.iter().position(|value| *value == 0.0) {
            return Err(ArtifactError::InvalidParameter {
                artifact: ARTIFACT,
                detail: format!("scale[{index}] is zero"),
            });
        }
        Ok(Self { mean, scale })
    }
}

impl FeatureScaler for StandardScaler {
    fn dimension(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_dimension(ARTIFACT, self.dimension(), features.len())?;
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(value, (mean, scale))| (value - mean) / scale)
            .collect())
    }

    fn kind(&self) -> &'static str {
        "standard"
    }
}

/// Range scaling: `x * scale + min` per feature, with fit-time `min`/`scale`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    scale: Vec<f64>,
}

impl MinMaxScaler {
    pub fn new(min: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        same_length(min.len(), scale.len())?;
        all_finite("min", &min)?;
        all_finite("scale", &scale)?;
        Ok(Self { min, scale })
    }
}

impl FeatureScaler for MinMaxScaler {
    fn dimension(&self) -> usize {
        self.min.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_dimension(ARTIFACT, self.dimension(), features.len())?;
        Ok(features
            .iter()
            .zip(self.min.iter().zip(self.scale.iter()))
            .map(|(value, (min, scale))| value * scale + min)
            .collect())
    }

    fn kind(&self) -> &'static str {
        "min_max"
    }
}

fn same_length(offsets: usize, scale: usize) -> Result<(), ArtifactError> {
    if offsets == scale {
        Ok(())
    } else {
        Err(ArtifactError::InvalidParameter {
            artifact: ARTIFACT,
            detail: format!("{offsets} offsets but {scale} scale entries"),
        })
    }
}

fn all_finite(name: &str, values: &[f64]) -> Result<(), ArtifactError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(ArtifactError::InvalidParameter {
            artifact: ARTIFACT,
            detail: format!("{name}[{index}] is not finite"),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scaler_centers_and_scales() {
        let scaler = StandardScaler::new(vec![1.0, 10.0], vec![2.0, 5.0]).expect("valid");
        let scaled = scaler.transform(&[3.0, 0.0]).expect("dimension matches");
        assert_eq!(scaled, vec![1.0, -2.0]);
    }

    #[test]
    fn standard_scaler_rejects_zero_scale() {
        let err = StandardScaler::new(vec![0.0, 0.0], vec![1.0, 0.0]).expect_err("zero scale");
        assert!(err.to_string().contains("scale[1]"));
    }

    #[test]
    fn min_max_scaler_applies_fit_offsets() {
        let scaler = MinMaxScaler::new(vec![-1.0, 0.0], vec![0.5, 0.25]).expect("valid");
        let scaled = scaler.transform(&[4.0, 8.0]).expect("dimension matches");
        assert_eq!(scaled, vec![1.0, 2.0]);
    }

    #[test]
    fn transform_reports_dimension_mismatch() {
        let scaler = MinMaxScaler::new(vec![0.0; 3], vec![1.0; 3]).expect("valid");
        match scaler.transform(&[1.0, 2.0]) {
            Err(ModelError::DimensionMismatch {
                expected, found, ..
            }) => {
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected dimension mismatch, got {other:?}"),
        }
    }
}
