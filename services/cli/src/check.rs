use crate::infra::{load_engine, load_settings, read_form};
use clap::Args;
use loan_eligibility::eligibility::{
    ApplicationForm, DecisionError, EligibilityOutcome, ValidationError, DEFAULT_LOAN_TERM_MONTHS,
};
use loan_eligibility::error::AppError;
use std::path::PathBuf;

const FORM_FIELDS: [&str; 11] = [
    "gender",
    "married",
    "dependents",
    "education",
    "self_employed",
    "property_area",
    "applicant_income",
    "coapplicant_income",
    "loan_amount",
    "loan_term",
    "credit_history",
];

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Read the whole application form from a JSON file instead of flags
    #[arg(long, conflicts_with_all = FORM_FIELDS)]
    pub(crate) form: Option<PathBuf>,
    /// Applicant gender (Male, Female)
    #[arg(long, required_unless_present = "form")]
    pub(crate) gender: Option<String>,
    /// Married (Yes, No)
    #[arg(long, required_unless_present = "form")]
    pub(crate) married: Option<String>,
    /// Number of dependents (0, 1, 2, 3+)
    #[arg(long, required_unless_present = "form")]
    pub(crate) dependents: Option<String>,
    /// Education (Graduate, Not Graduate)
    #[arg(long, required_unless_present = "form")]
    pub(crate) education: Option<String>,
    /// Self employed (Yes, No)
    #[arg(long, required_unless_present = "form")]
    pub(crate) self_employed: Option<String>,
    /// Property area (Urban, Semiurban, Rural)
    #[arg(long, required_unless_present = "form")]
    pub(crate) property_area: Option<String>,
    /// Applicant monthly income
    #[arg(long, required_unless_present = "form", allow_negative_numbers = true)]
    pub(crate) applicant_income: Option<f64>,
    /// Coapplicant monthly income
    #[arg(long, required_unless_present = "form", allow_negative_numbers = true)]
    pub(crate) coapplicant_income: Option<f64>,
    /// Loan amount in thousands
    #[arg(long, required_unless_present = "form", allow_negative_numbers = true)]
    pub(crate) loan_amount: Option<f64>,
    /// Loan term in months
    #[arg(
        long,
        default_value_t = i64::from(DEFAULT_LOAN_TERM_MONTHS),
        allow_negative_numbers = true
    )]
    pub(crate) loan_term: i64,
    /// Credit history (Good, Bad)
    #[arg(long, required_unless_present = "form")]
    pub(crate) credit_history: Option<String>,
    /// Directory holding loan_model.json and scaler.json (overrides LOAN_ARTIFACT_DIR)
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
    /// Print the full outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Include the affordability figures and encoded features behind the verdict
    #[arg(long)]
    pub(crate) explain: bool,
}

impl CheckArgs {
    pub(crate) fn form_from_flags(&self) -> Result<ApplicationForm, ValidationError> {
        Ok(ApplicationForm {
            gender: required("gender", &self.gender)?,
            married: required("married", &self.married)?,
            dependents: required("dependents", &self.dependents)?,
            education: required("education", &self.education)?,
            self_employed: required("self_employed", &self.self_employed)?,
            property_area: required("property_area", &self.property_area)?,
            applicant_income: required("applicant_income", &self.applicant_income)?,
            coapplicant_income: required("coapplicant_income", &self.coapplicant_income)?,
            loan_amount: required("loan_amount", &self.loan_amount)?,
            loan_term: self.loan_term,
            credit_history: required("credit_history", &self.credit_history)?,
        })
    }
}

fn required<T: Clone>(field: &'static str, value: &Option<T>) -> Result<T, ValidationError> {
    value.clone().ok_or(ValidationError::MissingField(field))
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let settings = load_settings(args.artifact_dir.clone())?;
    let engine = load_engine(&settings)?;

    let form = match &args.form {
        Some(path) => read_form(path)?,
        None => args.form_from_flags().map_err(DecisionError::from)?,
    };

    let outcome = engine.decide(&form)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for line in render_outcome(&outcome, args.explain) {
            println!("{line}");
        }
    }

    Ok(())
}

pub(crate) fn render_outcome(outcome: &EligibilityOutcome, explain: bool) -> Vec<String> {
    let mut lines = vec![outcome.decision.summary()];
    if !explain {
        return lines;
    }

    let signals = &outcome.signals;
    lines.push(format!("Rule check: {}", outcome.rule_reason));
    lines.push(format!("- Combined monthly income: {:.2}", signals.total_income));
    lines.push(format!(
        "- Loan value: {:.2} (max allowed {:.2})",
        signals.loan_value, signals.max_loan_allowed
    ));
    match signals.estimated_emi {
        Some(emi) => lines.push(format!(
            "- Estimated EMI: {:.2} (max allowed {:.2})",
            emi, signals.max_emi_allowed
        )),
        None => lines.push("- Estimated EMI: unavailable (zero loan term)".to_string()),
    }

    if let Some(features) = &outcome.features {
        lines.push("Encoded features:".to_string());
        for (name, value) in features.named() {
            lines.push(format!("  - {name}: {value}"));
        }
    }

    lines
}
