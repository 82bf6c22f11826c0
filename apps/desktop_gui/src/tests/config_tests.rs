use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;

fn temp_config(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("policy_gen_config_test_{suffix}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    let file_cfg: FileSettings = toml::from_str(
        r#"
service_url = "https://policies.internal/api/"
example_prompts = ["Read-only S3"]
"#,
    )
    .expect("parse");

    apply_file_settings(&mut settings, file_cfg);

    assert_eq!(settings.service_url, "https://policies.internal/api/");
    assert_eq!(settings.log_filter, "info");
    assert_eq!(settings.example_prompts, vec!["Read-only S3".to_string()]);
}

#[test]
fn prefixed_env_wins_over_plain_env() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("POLICY_SERVICE_URL", "http://plain:5000"),
        ("APP__SERVICE_URL", "http://prefixed:5000"),
        ("RUST_LOG", "debug"),
    ]);
    let mut settings = Settings::default();

    apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.service_url, "http://prefixed:5000");
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparsable_file_is_reported_and_ignored() {
    let path = temp_config("service_url = [not a string");

    let (settings, warnings) = load_settings(Some(&path));

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("ignoring config file"));
    assert_eq!(settings.example_prompts, default_example_prompts());
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(toml::from_str::<FileSettings>("bind_addr = \"0.0.0.0:80\"").is_err());
}

#[test]
fn missing_explicit_file_is_reported() {
    let path = env::temp_dir().join("policy_gen_config_test_does_not_exist.toml");

    let (_, warnings) = load_settings(Some(&path));

    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("could not read config file"));
}
