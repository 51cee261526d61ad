use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use loan_eligibility::config::AppConfig;
use loan_eligibility::eligibility::{
    form_from_json, ApplicationForm, ClassifierAdapter, DecisionEngine, DecisionError,
    RuleEvaluator,
};
use loan_eligibility::error::AppError;
use loan_eligibility::telemetry;
use tracing::info;

/// Load configuration, apply the command-line artifact directory and start tracing.
pub(crate) fn load_settings(artifact_dir: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(directory) = artifact_dir {
        config.artifacts.directory = directory;
    }
    telemetry::init(&config.telemetry)?;
    info!(
        environment = ?config.environment,
        artifacts = %config.artifacts.directory.display(),
        "configuration loaded"
    );
    Ok(config)
}

pub(crate) fn load_adapter(config: &AppConfig) -> Result<ClassifierAdapter, AppError> {
    Ok(ClassifierAdapter::load(&config.artifacts)?)
}

pub(crate) fn load_engine(config: &AppConfig) -> Result<DecisionEngine, AppError> {
    let adapter = load_adapter(config)?;
    Ok(DecisionEngine::new(RuleEvaluator::default(), Arc::new(adapter)))
}

/// Read a `--form` file. Unreadable or syntactically broken files are io and json
/// errors; absent or mistyped fields are invalid input like their flag counterparts.
pub(crate) fn read_form(path: &Path) -> Result<ApplicationForm, AppError> {
    let file = File::open(path)?;
    let document: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
    Ok(form_from_json(document).map_err(DecisionError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_eligibility::eligibility::ValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_form(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write form");
        file
    }

    #[test]
    fn form_file_defaults_loan_term() {
        let file = write_form(
            r#"{
                "gender": "Male",
                "married": "Yes",
                "dependents": "1",
                "education": "Graduate",
                "self_employed": "No",
                "property_area": "Urban",
                "applicant_income": 25000,
                "coapplicant_income": 5000,
                "loan_amount": 100,
                "credit_history": "Good"
            }"#,
        );

        let form = read_form(file.path()).expect("form parses");
        assert_eq!(form.loan_term, 360);
        assert_eq!(form.applicant_income, 25_000.0);
    }

    #[test]
    fn incomplete_form_file_is_invalid_input() {
        let file = write_form(r#"{"gender": "Male"}"#);
        let err = read_form(file.path()).expect_err("missing fields rejected");

        assert!(err.is_invalid_input());
        assert!(matches!(
            err,
            AppError::Decision(DecisionError::InvalidInput(ValidationError::MissingField(
                "married"
            )))
        ));
        assert_eq!(err.to_string(), "invalid input: married is required");
    }

    #[test]
    fn mistyped_form_file_is_invalid_input() {
        let file = write_form(
            r#"{
                "gender": "Male",
                "married": "Yes",
                "dependents": "1",
                "education": "Graduate",
                "self_employed": "No",
                "property_area": "Urban",
                "applicant_income": "lots",
                "coapplicant_income": 5000,
                "loan_amount": 100,
                "credit_history": "Good"
            }"#,
        );

        let err = read_form(file.path()).expect_err("string income rejected");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn broken_json_stays_a_json_error() {
        let file = write_form("{\"gender\": ");
        let err = read_form(file.path()).expect_err("truncated document");
        assert!(matches!(err, AppError::Json(_)));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn missing_form_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = read_form(&dir.path().join("absent.json")).expect_err("no such file");
        assert!(matches!(err, AppError::Io(_)));
    }
}
