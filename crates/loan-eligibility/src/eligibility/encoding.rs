//! Fixed-order numeric encoding of an application.
//!
//! The order and the categorical codes below are a compatibility contract
//! with the trained classifier. Any change must bump [`FEATURE_SCHEMA_VERSION`]
//! and ship with re-fit artifacts.

use serde::{Deserialize, Serialize};

use super::domain::{Application, CreditHistory, Education, Gender, PropertyArea};

pub const FEATURE_COUNT: usize = 11;
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Versioned feature layout and categorical code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSchema {
    pub version: u32,
    pub feature_names: [&'static str; FEATURE_COUNT],
    pub gender: [(Gender, u8); 2],
    pub education: [(Education, u8); 2],
    pub credit_history: [(CreditHistory, u8); 2],
    pub property_area: [(PropertyArea, u8); 3],
}

pub static FEATURE_SCHEMA: FeatureSchema = FeatureSchema {
    version: FEATURE_SCHEMA_VERSION,
    feature_names: [
        "gender",
        "married",
        "dependents",
        "education",
        "self_employed",
        "applicant_income",
        "coapplicant_income",
        "loan_amount",
        "loan_term",
        "credit_history",
        "property_area",
    ],
    gender: [(Gender::Male, 1), (Gender::Female, 0)],
    education: [(Education::Graduate, 1), (Education::NotGraduate, 0)],
    credit_history: [(CreditHistory::Good, 1), (CreditHistory::Bad, 0)],
    property_area: [
        (PropertyArea::Urban, 2),
        (PropertyArea::Semiurban, 1),
        (PropertyArea::Rural, 0),
    ],
};

fn lookup<K: PartialEq + Copy, const N: usize>(table: &[(K, u8); N], key: K) -> f64 {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, code)| f64::from(*code))
        // every table covers all variants of its enum
        .unwrap_or_default()
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl FeatureSchema {
    /// True when an artifact's declared layout matches this schema.
    pub fn accepts(&self, version: u32, feature_names: &[String]) -> bool {
        version == self.version
            && feature_names.len() == FEATURE_COUNT
            && feature_names
                .iter()
                .zip(self.feature_names.iter())
                .all(|(declared, expected)| declared == expected)
    }
}

/// Ordered feature vector fed to the scaler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_SCHEMA
            .feature_names
            .iter()
            .copied()
            .zip(self.0.iter().copied())
    }
}

/// Encodes applications using a fixed [`FeatureSchema`].
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder {
    schema: &'static FeatureSchema,
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self {
            schema: &FEATURE_SCHEMA,
        }
    }
}

impl FeatureEncoder {
    pub fn encode(&self, application: &Application) -> FeatureVector {
        let schema = self.schema;
        FeatureVector([
            lookup(&schema.gender, application.gender),
            flag(application.married),
            f64::from(application.dependents.count()),
            lookup(&schema.education, application.education),
            flag(application.self_employed),
            application.applicant_income,
            application.coapplicant_income,
            application.loan_amount,
            f64::from(application.loan_term),
            lookup(&schema.credit_history, application.credit_history),
            lookup(&schema.property_area, application.property_area),
        ])
    }
}
