//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMCHECK_DEBUG` | `debug` |
//! | `FORMCHECK_LOG_LEVEL` | `log_level` |
//! | `FORMCHECK_VALID_CLASS` | `valid_class` |
//! | `FORMCHECK_INVALID_CLASS` | `invalid_class` |
//! | `FORMCHECK_SUBMIT_ERROR_LABEL` | `submit_error_label` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formcheck_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("formcheck.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::FormCheckError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormCheckError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormCheckError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormCheckError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormCheckError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormCheckError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormCheckError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormCheckError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormCheckError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `FORMCHECK_*` environment variable overrides to a settings struct.
///
/// `FORMCHECK_DEBUG` accepts "true", "1" or "yes" (case-insensitive) as true;
/// anything else is false.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("FORMCHECK_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("FORMCHECK_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("FORMCHECK_VALID_CLASS") {
        settings.valid_class = val;
    }

    if let Ok(val) = std::env::var("FORMCHECK_INVALID_CLASS") {
        settings.invalid_class = val;
    }

    if let Ok(val) = std::env::var("FORMCHECK_SUBMIT_ERROR_LABEL") {
        settings.submit_error_label = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, FormCheckError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormCheckError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, FormCheckError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormCheckError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormCheckError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
pub fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = true
            submit_error_label = "Fix the highlighted fields"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(settings.debug);
        assert_eq!(settings.submit_error_label, "Fix the highlighted fields");
        // Defaults preserved
        assert_eq!(settings.valid_class, "is-valid");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert!(matches!(result, Err(FormCheckError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("debug = \"sometimes\"");
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{
            "invalid_class": "has-error",
            "log_level": "debug"
        }"#;

        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.invalid_class, "has-error");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.feedback_suffix, "-feedback");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{invalid json").is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("formcheck_test_toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(&path, "valid_class = \"ok\"\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.valid_class, "ok");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_json_file() {
        let dir = std::env::temp_dir().join("formcheck_test_json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, r#"{"default_submit_label": "Sign up"}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert_eq!(settings.default_submit_label, "Sign up");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    #[test]
    fn test_from_file_missing() {
        assert!(from_toml_file("/nonexistent/path/formcheck.toml").is_err());
        assert!(from_json_file("/nonexistent/path/formcheck.json").is_err());
    }

    // ── Environment variable overrides ──────────────────────────────
    // Each test owns a distinct variable so parallel runs do not collide.

    #[test]
    fn test_apply_env_overrides_debug() {
        let mut settings = Settings::default();
        std::env::set_var("FORMCHECK_DEBUG", "YES");
        apply_env_overrides(&mut settings);
        assert!(settings.debug);
        std::env::remove_var("FORMCHECK_DEBUG");
    }

    #[test]
    fn test_apply_env_overrides_log_level() {
        let mut settings = Settings::default();
        std::env::set_var("FORMCHECK_LOG_LEVEL", "trace");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.log_level, "trace");
        std::env::remove_var("FORMCHECK_LOG_LEVEL");
    }

    #[test]
    fn test_apply_env_overrides_classes() {
        let mut settings = Settings::default();
        std::env::set_var("FORMCHECK_VALID_CLASS", "good");
        std::env::set_var("FORMCHECK_INVALID_CLASS", "bad");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.valid_class, "good");
        assert_eq!(settings.invalid_class, "bad");
        std::env::remove_var("FORMCHECK_VALID_CLASS");
        std::env::remove_var("FORMCHECK_INVALID_CLASS");
    }

    #[test]
    fn test_toml_with_env_override() {
        let dir = std::env::temp_dir().join("formcheck_test_toml_env");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings_env.toml");
        std::fs::write(&path, "submit_error_label = \"from toml\"\n").unwrap();

        std::env::set_var("FORMCHECK_SUBMIT_ERROR_LABEL", "from env");
        let settings = from_toml_file_with_env(&path).unwrap();
        assert_eq!(settings.submit_error_label, "from env");

        std::env::remove_var("FORMCHECK_SUBMIT_ERROR_LABEL");
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(&dir).ok();
    }

    // ── merge helpers ───────────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"outer": {"a": 1, "b": 2}});
        let over = serde_json::json!({"outer": {"b": 3}});
        let merged = merge_json(base, over);
        assert_eq!(merged["outer"]["a"], 1);
        assert_eq!(merged["outer"]["b"], 3);
    }

    #[test]
    fn test_toml_to_json() {
        let toml_val: toml::Value = toml::from_str(
            r#"
            name = "signup"
            items = ["a", "b"]
            [nested]
            key = "value"
        "#,
        )
        .unwrap();

        let json = toml_to_json(toml_val);
        assert_eq!(json["name"], "signup");
        assert_eq!(json["items"], serde_json::json!(["a", "b"]));
        assert_eq!(json["nested"]["key"], "value");
    }
}
