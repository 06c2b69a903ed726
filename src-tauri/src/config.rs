//! Configuration loading
//!
//! Priority (highest first): environment variables, `intake.json` in the
//! app config directory, compiled defaults.

use std::path::Path;

use intake_core::IntakeConfig;

pub const CONFIG_FILE_NAME: &str = "intake.json";

pub const ENV_WEBHOOK_URL: &str = "INTAKE_WEBHOOK_URL";
pub const ENV_DUPLICATE_LOOKUP_URL: &str = "INTAKE_DUPLICATE_LOOKUP_URL";
pub const ENV_DASHBOARD_URL: &str = "INTAKE_DASHBOARD_URL";
pub const ENV_SUBMITTED_BY: &str = "INTAKE_SUBMITTED_BY";

/// Resolves the intake config from `config_dir` and the process environment
pub fn load_config(config_dir: &Path) -> IntakeConfig {
    let base = read_config_file(config_dir).unwrap_or_default();
    apply_env(base, |key| std::env::var(key).ok())
}

/// Reads `intake.json`; a missing or malformed file yields `None`
pub fn read_config_file(config_dir: &Path) -> Option<IntakeConfig> {
    let path = config_dir.join(CONFIG_FILE_NAME);
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}

/// Overlays non-blank environment values
pub fn apply_env<F>(mut config: IntakeConfig, lookup: F) -> IntakeConfig
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(url) = var(ENV_WEBHOOK_URL) {
        config.webhook_url = Some(url);
    }
    if let Some(url) = var(ENV_DUPLICATE_LOOKUP_URL) {
        config.duplicate_lookup_url = Some(url);
    }
    if let Some(url) = var(ENV_DASHBOARD_URL) {
        config.dashboard_url = Some(url);
    }
    if let Some(who) = var(ENV_SUBMITTED_BY) {
        config.submitted_by = who;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"webhook_url":"https://file.example.com/hook","dashboard_url":"https://sheet.example.com"}"#,
        )
        .unwrap();

        let base = read_config_file(dir.path()).unwrap();
        let config = apply_env(base, env(&[(ENV_WEBHOOK_URL, "https://env.example.com/hook")]));

        assert_eq!(config.webhook_url.as_deref(), Some("https://env.example.com/hook"));
        assert_eq!(config.dashboard_url.as_deref(), Some("https://sheet.example.com"));
        assert_eq!(config.submitted_by, "staff_user");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let base = IntakeConfig {
            webhook_url: Some("https://file.example.com/hook".to_string()),
            ..Default::default()
        };
        let config = apply_env(base, env(&[(ENV_WEBHOOK_URL, "  "), (ENV_SUBMITTED_BY, "")]));
        assert_eq!(config.webhook_url.as_deref(), Some("https://file.example.com/hook"));
        assert_eq!(config.submitted_by, "staff_user");
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_config_file(dir.path()), None);
    }

    #[test]
    fn test_malformed_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ webhook_url: ").unwrap();
        assert_eq!(read_config_file(dir.path()), None);
    }

    #[test]
    fn test_no_sources_means_unconfigured() {
        let config = apply_env(IntakeConfig::default(), env(&[]));
        assert_eq!(config.webhook_endpoint(), None);
        assert_eq!(config.duplicate_lookup_endpoint(), None);
    }
}
