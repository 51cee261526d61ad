use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

pub const DEFAULT_LOAN_TERM_MONTHS: u32 = 360;

/// Largest dependents count the form distinguishes; anything above reads as "3+".
pub const MAX_DEPENDENTS: u8 = 3;

/// Form fields a submission must carry; `loan_term` falls back to its default.
pub const REQUIRED_FORM_FIELDS: [&str; 10] = [
    "gender",
    "married",
    "dependents",
    "education",
    "self_employed",
    "property_area",
    "applicant_income",
    "coapplicant_income",
    "loan_amount",
    "credit_history",
];

/// Raw form submission as entered by the applicant.
///
/// Categorical fields hold the option labels shown on the form so that
/// intake can report unknown options as invalid input rather than failing
/// deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub gender: String,
    pub married: String,
    pub dependents: String,
    pub education: String,
    pub self_employed: String,
    pub property_area: String,
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    pub loan_amount: f64,
    #[serde(default = "default_loan_term", deserialize_with = "deserialize_loan_term")]
    pub loan_term: i64,
    pub credit_history: String,
}

fn default_loan_term() -> i64 {
    i64::from(DEFAULT_LOAN_TERM_MONTHS)
}

/// Accepts whole months written either as an integer or as an integral float (`360.0`).
fn deserialize_loan_term<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Months {
        Whole(i64),
        Float(f64),
    }

    match Months::deserialize(deserializer)? {
        Months::Whole(months) => Ok(months),
        Months::Float(months)
            if months.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&months) =>
        {
            Ok(months as i64)
        }
        Months::Float(months) => Err(de::Error::custom(format!(
            "loan term must be a whole number of months (found {months})"
        ))),
    }
}

/// Validated applicant attributes consumed by the rule evaluator and encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub gender: Gender,
    pub married: bool,
    pub dependents: Dependents,
    pub education: Education,
    pub self_employed: bool,
    pub property_area: PropertyArea,
    /// Monthly income in currency units.
    pub applicant_income: f64,
    pub coapplicant_income: f64,
    /// Requested principal in thousands of currency units.
    pub loan_amount: f64,
    /// Repayment term in months.
    pub loan_term: u32,
    pub credit_history: CreditHistory,
}

impl Application {
    pub fn total_income(&self) -> f64 {
        self.applicant_income + self.coapplicant_income
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Education {
    Graduate,
    NotGraduate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyArea {
    Urban,
    Semiurban,
    Rural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditHistory {
    Good,
    Bad,
}

/// Number of dependents, saturating at [`MAX_DEPENDENTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dependents(u8);

impl Dependents {
    pub fn new(count: u32) -> Self {
        Self(count.min(u32::from(MAX_DEPENDENTS)) as u8)
    }

    pub const fn count(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Dependents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 >= MAX_DEPENDENTS {
            write!(f, "{}+", MAX_DEPENDENTS)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Unrecognised form option; intake turns this into a validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption(pub String);

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised option '{}'", self.0)
    }
}

impl std::error::Error for UnknownOption {}

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(['-', '_'], " ")
}

impl FromStr for Gender {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            _ => Err(UnknownOption(raw.to_string())),
        }
    }
}

impl FromStr for Education {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "graduate" => Ok(Self::Graduate),
            "not graduate" | "notgraduate" => Ok(Self::NotGraduate),
            _ => Err(UnknownOption(raw.to_string())),
        }
    }
}

impl FromStr for PropertyArea {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "urban" => Ok(Self::Urban),
            "semiurban" | "semi urban" => Ok(Self::Semiurban),
            "rural" => Ok(Self::Rural),
            _ => Err(UnknownOption(raw.to_string())),
        }
    }
}

impl FromStr for CreditHistory {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match normalize(raw).as_str() {
            "good" | "1" => Ok(Self::Good),
            "bad" | "0" => Ok(Self::Bad),
            _ => Err(UnknownOption(raw.to_string())),
        }
    }
}

impl FromStr for Dependents {
    type Err = UnknownOption;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_suffix('+').unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map(Self::new)
            .map_err(|_| UnknownOption(raw.to_string()))
    }
}

/// Parse the Yes/No selections used for marital and employment status.
pub fn parse_yes_no(raw: &str) -> Result<bool, UnknownOption> {
    match normalize(raw).as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        _ => Err(UnknownOption(raw.to_string())),
    }
}
