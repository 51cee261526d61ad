use crate::infra::{load_adapter, load_settings};
use clap::Args;
use loan_eligibility::eligibility::AdapterSummary;
use loan_eligibility::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ArtifactArgs {
    /// Directory holding loan_model.json and scaler.json (overrides LOAN_ARTIFACT_DIR)
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
    /// Print the summary as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_artifacts(args: ArtifactArgs) -> Result<(), AppError> {
    let settings = load_settings(args.artifact_dir)?;
    let adapter = load_adapter(&settings)?;
    let summary = adapter.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Model artifacts: {}", settings.artifacts.directory.display());
        for line in render_summary(&summary) {
            println!("{line}");
        }
    }

    Ok(())
}

fn render_summary(summary: &AdapterSummary) -> Vec<String> {
    let mut lines = vec![
        format!("- Feature schema version: {}", summary.schema_version),
        format!("- Scaler: {}", summary.scaler_kind),
        format!("- Classifier: {}", summary.classifier_kind),
        format!("Features ({}):", summary.feature_names.len()),
    ];
    lines.extend(
        summary
            .feature_names
            .iter()
            .enumerate()
            .map(|(index, name)| format!("  {index:>2}. {name}")),
    );
    lines
}
