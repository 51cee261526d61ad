use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";
pub const DEFAULT_MODEL_FILE: &str = "loan_model.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub artifacts: ArtifactConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let directory = PathBuf::from(
            env::var("LOAN_ARTIFACT_DIR").unwrap_or_else(|_| DEFAULT_ARTIFACT_DIR.to_string()),
        );
        let model_file = file_name_var("LOAN_MODEL_FILE", DEFAULT_MODEL_FILE)?;
        let scaler_file = file_name_var("LOAN_SCALER_FILE", DEFAULT_SCALER_FILE)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            artifacts: ArtifactConfig {
                directory,
                model_file,
                scaler_file,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn file_name_var(name: &'static str, default: &str) -> Result<String, ConfigError> {
    let value = env::var(name).unwrap_or_else(|_| default.to_string());
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.contains(['/', '\\']) {
        return Err(ConfigError::InvalidFileName {
            variable: name,
            value,
        });
    }
    Ok(trimmed.to_string())
}

/// Location of the frozen model and scaler artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub directory: PathBuf,
    pub model_file: String,
    pub scaler_file: String,
}

impl ArtifactConfig {
    pub fn in_directory(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            scaler_file: DEFAULT_SCALER_FILE.to_string(),
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.directory.join(&self.model_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.directory.join(&self.scaler_file)
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self::in_directory(DEFAULT_ARTIFACT_DIR)
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFileName {
        variable: &'static str,
        value: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFileName { variable, value } => write!(
                f,
                "{variable} must be a bare file name inside the artifact directory (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("LOAN_ARTIFACT_DIR");
        env::remove_var("LOAN_MODEL_FILE");
        env::remove_var("LOAN_SCALER_FILE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.artifacts, ArtifactConfig::default());
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn artifact_paths_join_directory_and_file_names() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LOAN_ARTIFACT_DIR", "/opt/loan");
        env::set_var("LOAN_MODEL_FILE", "model-v2.json");
        env::set_var("APP_ENV", "production");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(
            config.artifacts.model_path(),
            PathBuf::from("/opt/loan/model-v2.json")
        );
        assert_eq!(
            config.artifacts.scaler_path(),
            PathBuf::from("/opt/loan/scaler.json")
        );
        reset_env();
    }

    #[test]
    fn rejects_file_names_with_separators() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LOAN_SCALER_FILE", "../scaler.json");
        let err = AppConfig::load().expect_err("path traversal rejected");
        assert!(err.to_string().contains("LOAN_SCALER_FILE"));
        reset_env();
    }
}
