use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::args::ScanArgs;
use crate::llms::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct MemsentryConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct AnalysisConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Characters of each file forwarded to the model; unset sends the whole file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_file_chars: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PathsConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BatchConfig {
    /// Keep going after a completion or write failure instead of aborting the run.
    #[serde(default = "default_isolate_failures")]
    pub isolate_failures: bool,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_isolate_failures() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_file_chars: None,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            isolate_failures: default_isolate_failures(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value in {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One configuration source (a TOML file) before defaults are applied.
///
/// Every key is optional so that a later source can set any value, including
/// one equal to the built-in default.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigLayer {
    #[serde(default)]
    pub analysis: AnalysisLayer,
    #[serde(default)]
    pub api: ApiLayer,
    #[serde(default)]
    pub paths: PathsLayer,
    #[serde(default)]
    pub batch: BatchLayer,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AnalysisLayer {
    pub model: Option<String>,
    pub max_file_chars: Option<usize>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct ApiLayer {
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PathsLayer {
    pub output_dir: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BatchLayer {
    pub isolate_failures: Option<bool>,
}

impl ConfigLayer {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl MemsentryConfig {
    /// Apply every key the layer sets; unset keys keep their current value.
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(model) = &layer.analysis.model {
            self.analysis.model = model.clone();
        }
        if let Some(max_chars) = layer.analysis.max_file_chars {
            self.analysis.max_file_chars = Some(max_chars);
        }

        if let Some(base_url) = &layer.api.base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(api_key_env) = &layer.api.api_key_env {
            self.api.api_key_env = api_key_env.clone();
        }
        if let Some(timeout_secs) = layer.api.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }

        if let Some(output_dir) = &layer.paths.output_dir {
            self.paths.output_dir = output_dir.clone();
        }

        if let Some(isolate_failures) = layer.batch.isolate_failures {
            self.batch.isolate_failures = isolate_failures;
        }
    }

    pub fn generate_default_config() -> String {
        let default_config = Self::default();
        toml::to_string_pretty(&default_config).unwrap_or_else(|_| {
            r#"# memsentry configuration file

[analysis]
model = "gpt-4o-mini"
# max_file_chars = 200000

[api]
base_url = "https://api.openai.com/v1"
api_key_env = "OPENAI_API_KEY"
timeout_secs = 300

[paths]
output_dir = "."

[batch]
isolate_failures = true
"#
            .to_string()
        })
    }

    /// Defaults overlaid with a single file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.merge(&ConfigLayer::load_from_file(path)?);
        Ok(config)
    }

    /// Get the user config file path (~/.config/memsentry/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/memsentry/config.toml"))
    }

    /// Get the current directory config file path (./memsentry.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./memsentry.toml")
    }

    /// Load and merge configs from all sources with priority:
    /// 1. User config (~/.config/memsentry/config.toml) - lowest priority (base)
    /// 2. Current directory (./memsentry.toml)
    pub fn load_with_merged_configs() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_path) = Self::get_user_config_path() {
            if user_path.exists() {
                match ConfigLayer::load_from_file(&user_path) {
                    Ok(user_layer) => {
                        config.merge(&user_layer);
                        tracing::debug!("Loaded user config from: {}", user_path.display());
                    }
                    Err(e) => tracing::warn!("Ignoring user config {}: {}", user_path.display(), e),
                }
            }
        }

        let current_path = Self::get_current_config_path();
        if current_path.exists() {
            let current_layer = ConfigLayer::load_from_file(&current_path)?;
            config.merge(&current_layer);
            tracing::debug!("Loaded current directory config from: {}", current_path.display());
        }

        Ok(config)
    }

    pub fn apply_env_vars(&mut self, env_vars: &HashMap<String, String>) -> Result<()> {
        for (key, value) in env_vars {
            if let Some(config_key) = key.strip_prefix("MEMSENTRY_") {
                match config_key {
                    "ANALYSIS_MODEL" => self.analysis.model = value.clone(),
                    "ANALYSIS_MAX_FILE_CHARS" => {
                        self.analysis.max_file_chars = Some(value.parse()
                            .map_err(|_| anyhow!("Invalid max_file_chars value: {}", value))?);
                    }
                    "API_BASE_URL" => self.api.base_url = value.clone(),
                    "API_KEY_ENV" => self.api.api_key_env = value.clone(),
                    "API_TIMEOUT_SECS" => {
                        self.api.timeout_secs = value.parse()
                            .map_err(|_| anyhow!("Invalid timeout_secs value: {}", value))?;
                    }
                    "PATHS_OUTPUT_DIR" => self.paths.output_dir = PathBuf::from(value),
                    "BATCH_ISOLATE_FAILURES" => {
                        self.batch.isolate_failures = value.parse()
                            .map_err(|_| anyhow!("Invalid isolate_failures value: {}", value))?;
                    }
                    _ => {} // Ignore unknown environment variables
                }
            }
        }
        Ok(())
    }

    pub fn apply_scan_args(&mut self, args: &ScanArgs) {
        if let Some(ref model) = args.model {
            self.analysis.model = model.clone();
        }
        if let Some(max_chars) = args.max_file_chars {
            self.analysis.max_file_chars = Some(max_chars);
        }
        if let Some(ref base_url) = args.api_base_url {
            self.api.base_url = base_url.clone();
        }
        if let Some(ref output_dir) = args.output_dir {
            self.paths.output_dir = output_dir.clone();
        }
        if args.fail_fast {
            self.batch.isolate_failures = false;
        }
    }

    /// Load configuration with full precedence chain:
    /// 1. Default values (lowest)
    /// 2. User config (~/.config/memsentry/config.toml)
    /// 3. Current directory (./memsentry.toml)
    /// 4. Explicit --config file
    /// 5. Environment variables (MEMSENTRY_*)
    /// 6. CLI arguments (highest)
    pub fn load_with_precedence(
        config_path: Option<&Path>,
        cli_args: &ScanArgs,
        env_vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut config = Self::load_with_merged_configs()?;

        if let Some(path) = config_path {
            let explicit_layer = ConfigLayer::load_from_file(path)
                .map_err(|e| anyhow!("Failed to load config file {}: {}", path.display(), e))?;
            config.merge(&explicit_layer);
        }

        config.apply_env_vars(env_vars)?;
        config.apply_scan_args(cli_args);
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "analysis.model".to_string(),
                value: String::new(),
                reason: "model must not be empty".to_string(),
            });
        }

        if self.analysis.max_file_chars == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_file_chars".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1; leave unset to send whole files".to_string(),
            });
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.api.api_key_env.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.api_key_env".to_string(),
                value: String::new(),
                reason: "environment variable name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Look up the API key named by `api.api_key_env`.
    pub fn resolve_api_key(&self, env_vars: &HashMap<String, String>) -> Result<String, ConfigError> {
        env_vars
            .get(&self.api.api_key_env)
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ConfigError::MissingCredential {
                var: self.api.api_key_env.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = MemsentryConfig::default();
        assert_eq!(config.analysis.model, "gpt-4o-mini");
        assert_eq!(config.analysis.max_file_chars, None);
        assert_eq!(config.api.base_url, "https://api.openai.com/v1");
        assert_eq!(config.api.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.api.timeout_secs, 300);
        assert_eq!(config.paths.output_dir, PathBuf::from("."));
        assert!(config.batch.isolate_failures);
    }

    #[test]
    fn test_toml_parsing() {
        let toml_content = r#"
[analysis]
model = "gpt-4o"
max_file_chars = 120000

[paths]
output_dir = "reports"

[batch]
isolate_failures = false
"#;

        let config: MemsentryConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.analysis.model, "gpt-4o");
        assert_eq!(config.analysis.max_file_chars, Some(120000));
        assert_eq!(config.paths.output_dir, PathBuf::from("reports"));
        assert!(!config.batch.isolate_failures);
        // untouched sections fall back to defaults
        assert_eq!(config.api.timeout_secs, 300);
    }

    #[test]
    fn test_env_var_application() {
        let mut config = MemsentryConfig::default();
        let mut env_vars = HashMap::new();
        env_vars.insert("MEMSENTRY_ANALYSIS_MODEL".to_string(), "local-model".to_string());
        env_vars.insert("MEMSENTRY_API_BASE_URL".to_string(), "http://localhost:11434/v1".to_string());
        env_vars.insert("MEMSENTRY_BATCH_ISOLATE_FAILURES".to_string(), "false".to_string());
        env_vars.insert("UNRELATED".to_string(), "ignored".to_string());

        config.apply_env_vars(&env_vars).unwrap();

        assert_eq!(config.analysis.model, "local-model");
        assert_eq!(config.api.base_url, "http://localhost:11434/v1");
        assert!(!config.batch.isolate_failures);
    }

    #[test]
    fn test_env_var_rejects_bad_number() {
        let mut config = MemsentryConfig::default();
        let mut env_vars = HashMap::new();
        env_vars.insert("MEMSENTRY_API_TIMEOUT_SECS".to_string(), "soon".to_string());

        assert!(config.apply_env_vars(&env_vars).is_err());
    }

    #[test]
    fn test_config_file_loading() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"
[analysis]
model = "gpt-4.1"

[api]
api_key_env = "AZURE_OPENAI_KEY"
"#).unwrap();

        let config = MemsentryConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.analysis.model, "gpt-4.1");
        assert_eq!(config.api.api_key_env, "AZURE_OPENAI_KEY");
    }

    #[test]
    fn test_generate_default_config_round_trips() {
        let config_string = MemsentryConfig::generate_default_config();
        assert!(config_string.contains("[analysis]"));
        assert!(config_string.contains("model = \"gpt-4o-mini\""));
        assert!(config_string.contains("isolate_failures = true"));

        let parsed: MemsentryConfig = toml::from_str(&config_string).unwrap();
        assert_eq!(parsed.api.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_validation() {
        let mut config = MemsentryConfig::default();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.api.timeout_secs = 30;
        config.analysis.max_file_chars = Some(0);
        assert!(config.validate().is_err());

        config.analysis.max_file_chars = Some(1000);
        config.analysis.model = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_merge_priority() {
        let mut config = MemsentryConfig::default();

        let user_layer: ConfigLayer = toml::from_str(r#"
[analysis]
model = "user-model"

[api]
timeout_secs = 60
"#).unwrap();
        config.merge(&user_layer);

        let current_layer: ConfigLayer = toml::from_str(r#"
[analysis]
model = "project-model"
"#).unwrap();
        config.merge(&current_layer);

        assert_eq!(config.analysis.model, "project-model");
        assert_eq!(config.api.timeout_secs, 60);
        assert!(config.batch.isolate_failures);
    }

    #[test]
    fn test_later_layer_can_restore_default() {
        let mut config = MemsentryConfig::default();

        let user_layer: ConfigLayer = toml::from_str(r#"
[analysis]
model = "gpt-4o"

[api]
timeout_secs = 60

[paths]
output_dir = "reports"

[batch]
isolate_failures = false
"#).unwrap();
        config.merge(&user_layer);

        let project_layer: ConfigLayer = toml::from_str(r#"
[analysis]
model = "gpt-4o-mini"

[api]
timeout_secs = 300

[paths]
output_dir = "."

[batch]
isolate_failures = true
"#).unwrap();
        config.merge(&project_layer);

        assert_eq!(config.analysis.model, "gpt-4o-mini");
        assert_eq!(config.api.timeout_secs, 300);
        assert_eq!(config.paths.output_dir, PathBuf::from("."));
        assert!(config.batch.isolate_failures);
    }

    #[test]
    fn test_empty_layer_changes_nothing() {
        let mut config = MemsentryConfig::default();
        config.batch.isolate_failures = false;
        config.analysis.model = "local-model".to_string();

        config.merge(&toml::from_str::<ConfigLayer>("").unwrap());

        assert!(!config.batch.isolate_failures);
        assert_eq!(config.analysis.model, "local-model");
    }

    #[test]
    fn test_scan_args_override() {
        let mut config = MemsentryConfig::default();
        let args = ScanArgs {
            model: Some("cli-model".to_string()),
            output_dir: Some(PathBuf::from("out")),
            fail_fast: true,
            ..ScanArgs::default()
        };

        config.apply_scan_args(&args);

        assert_eq!(config.analysis.model, "cli-model");
        assert_eq!(config.paths.output_dir, PathBuf::from("out"));
        assert!(!config.batch.isolate_failures);
        assert_eq!(config.api.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_resolve_api_key() {
        let config = MemsentryConfig::default();

        let mut env_vars = HashMap::new();
        let err = config.resolve_api_key(&env_vars).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential { ref var } if var == "OPENAI_API_KEY"));

        env_vars.insert("OPENAI_API_KEY".to_string(), "   ".to_string());
        assert!(config.resolve_api_key(&env_vars).is_err());

        env_vars.insert("OPENAI_API_KEY".to_string(), "sk-123".to_string());
        assert_eq!(config.resolve_api_key(&env_vars).unwrap(), "sk-123");
    }

    #[test]
    fn test_get_user_config_path() {
        if let Some(path) = MemsentryConfig::get_user_config_path() {
            assert!(path.ends_with(".config/memsentry/config.toml"));
        }
    }
}
