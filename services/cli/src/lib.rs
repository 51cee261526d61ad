mod artifacts;
mod check;
mod cli;
mod infra;

use loan_eligibility::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
