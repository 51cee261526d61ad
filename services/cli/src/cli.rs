use crate::artifacts::{run_artifacts, ArtifactArgs};
use crate::check::{run_check, CheckArgs};
use clap::{Parser, Subcommand};
use loan_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Eligibility Checker",
    about = "Check loan eligibility with banking rules and a pre-trained classifier",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit applicant details and print the eligibility verdict
    Check(CheckArgs),
    /// Load the model and scaler artifacts and describe them
    Artifacts(ArtifactArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => run_check(args),
        Command::Artifacts(args) => run_artifacts(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn check_accepts_form_flags() {
        let cli = Cli::try_parse_from([
            "loan-eligibility",
            "check",
            "--gender",
            "Female",
            "--married",
            "No",
            "--dependents",
            "3+",
            "--education",
            "Not Graduate",
            "--self-employed",
            "No",
            "--property-area",
            "Semiurban",
            "--applicant-income",
            "18000",
            "--coapplicant-income",
            "-1",
            "--loan-amount",
            "120",
            "--credit-history",
            "Good",
        ])
        .expect("flags parse");

        match cli.command {
            Command::Check(args) => {
                let form = args.form_from_flags().expect("all fields supplied");
                assert_eq!(form.dependents, "3+");
                assert_eq!(form.coapplicant_income, -1.0);
                assert_eq!(form.loan_term, 360);
            }
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn check_requires_fields_without_form_file() {
        let result = Cli::try_parse_from(["loan-eligibility", "check", "--gender", "Male"]);
        assert!(result.is_err());
    }
}
