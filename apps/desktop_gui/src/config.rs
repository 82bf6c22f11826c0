use std::{fs, path::Path};

use serde::Deserialize;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";
pub const CONFIG_FILE_NAME: &str = "policy_gen.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_url: String,
    pub log_filter: String,
    pub example_prompts: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.into(),
            log_filter: "info".into(),
            example_prompts: default_example_prompts(),
        }
    }
}

fn default_example_prompts() -> Vec<String> {
    [
        "Give EC2 read-only access to S3",
        "Allow Lambda to write to DynamoDB table 'orders'",
        "Let developers manage CloudWatch logs but not delete them",
        "Grant an IAM user full access to a single S3 bucket named 'reports'",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    service_url: Option<String>,
    log_filter: Option<String>,
    example_prompts: Option<Vec<String>>,
}

/// Defaults, then the config file, then the environment.
///
/// Problems with the file are returned as warnings rather than errors because
/// logging is not initialised yet when this runs.
pub fn load_settings(explicit_path: Option<&Path>) -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    let path = explicit_path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));
    match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => apply_file_settings(&mut settings, file_cfg),
            Err(err) => warnings.push(format!(
                "ignoring config file '{}': {err}",
                path.display()
            )),
        },
        // Only a file the user named is worth complaining about.
        Err(err) if explicit_path.is_some() => warnings.push(format!(
            "could not read config file '{}': {err}",
            path.display()
        )),
        Err(_) => {}
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    (settings, warnings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) {
    if let Some(v) = file_cfg.service_url {
        settings.service_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if let Some(v) = file_cfg.example_prompts {
        settings.example_prompts = v;
    }
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("POLICY_SERVICE_URL") {
        settings.service_url = v;
    }
    if let Some(v) = lookup("APP__SERVICE_URL") {
        settings.service_url = v;
    }

    if let Some(v) = lookup("RUST_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
