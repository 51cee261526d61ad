use std::str::FromStr;

use tracing::warn;

use super::domain::{
    parse_yes_no, Application, ApplicationForm, CreditHistory, Dependents, Education, Gender,
    PropertyArea, UnknownOption, REQUIRED_FORM_FIELDS,
};

/// Out-of-domain form input, reported before any evaluation runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("application form is malformed: {0}")]
    MalformedForm(String),
    #[error("{field}: unrecognised option '{value}'")]
    UnknownOption { field: &'static str, value: String },
    #[error("{field} must be a finite number")]
    NonFiniteAmount { field: &'static str },
    #[error("{field} must not be negative (found {value})")]
    NegativeAmount { field: &'static str, value: f64 },
    #[error("loan term must not be negative (found {0} months)")]
    NegativeLoanTerm(i64),
    #[error("loan term of {0} months is out of range")]
    LoanTermOutOfRange(i64),
}

/// Convert a raw form into a fully populated [`Application`].
///
/// Fields are checked in form order and the first failure is returned. A
/// zero loan term passes through; the rule evaluator owns that guard.
pub fn validate(form: &ApplicationForm) -> Result<Application, ValidationError> {
    let application = build(form);
    if let Err(err) = &application {
        warn!(error = %err, "application form rejected as invalid input");
    }
    application
}

/// Read a form from a JSON document.
///
/// Absent or null fields are reported as [`ValidationError::MissingField`];
/// values of the wrong type as [`ValidationError::MalformedForm`].
pub fn form_from_json(document: serde_json::Value) -> Result<ApplicationForm, ValidationError> {
    let form = parse_form(document);
    if let Err(err) = &form {
        warn!(error = %err, "application form rejected as invalid input");
    }
    form
}

fn parse_form(document: serde_json::Value) -> Result<ApplicationForm, ValidationError> {
    let Some(fields) = document.as_object() else {
        return Err(ValidationError::MalformedForm(
            "expected a JSON object of form fields".to_string(),
        ));
    };

    if let Some(field) = REQUIRED_FORM_FIELDS
        .iter()
        .find(|field| fields.get(**field).map_or(true, serde_json::Value::is_null))
    {
        return Err(ValidationError::MissingField(*field));
    }

    serde_json::from_value(document)
        .map_err(|err| ValidationError::MalformedForm(err.to_string()))
}

fn build(form: &ApplicationForm) -> Result<Application, ValidationError> {
    let gender = option::<Gender>("gender", &form.gender)?;
    let married = yes_no("married", &form.married)?;
    let dependents = option::<Dependents>("dependents", &form.dependents)?;
    let education = option::<Education>("education", &form.education)?;
    let self_employed = yes_no("self_employed", &form.self_employed)?;
    let property_area = option::<PropertyArea>("property_area", &form.property_area)?;

    let applicant_income = amount("applicant_income", form.applicant_income)?;
    let coapplicant_income = amount("coapplicant_income", form.coapplicant_income)?;
    let loan_amount = amount("loan_amount", form.loan_amount)?;
    let loan_term = loan_term(form.loan_term)?;

    let credit_history = option::<CreditHistory>("credit_history", &form.credit_history)?;

    Ok(Application {
        gender,
        married,
        dependents,
        education,
        self_employed,
        property_area,
        applicant_income,
        coapplicant_income,
        loan_amount,
        loan_term,
        credit_history,
    })
}

fn option<T>(field: &'static str, raw: &str) -> Result<T, ValidationError>
where
    T: FromStr<Err = UnknownOption>,
{
    raw.parse::<T>()
        .map_err(|UnknownOption(value)| ValidationError::UnknownOption { field, value })
}

fn yes_no(field: &'static str, raw: &str) -> Result<bool, ValidationError> {
    parse_yes_no(raw)
        .map_err(|UnknownOption(value)| ValidationError::UnknownOption { field, value })
}

fn amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteAmount { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(value)
}

fn loan_term(months: i64) -> Result<u32, ValidationError> {
    if months < 0 {
        return Err(ValidationError::NegativeLoanTerm(months));
    }
    u32::try_from(months).map_err(|_| ValidationError::LoanTermOutOfRange(months))
}
