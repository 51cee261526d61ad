use loan_eligibility_cli::run;

fn main() {
    if let Err(err) = run() {
        eprintln!("application error: {err}");
        if err.is_invalid_input() {
            eprintln!("run `loan-eligibility check --help` for the accepted options");
        }
        std::process::exit(1);
    }
}
