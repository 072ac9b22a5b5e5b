use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::enums::provider_kind::ProviderKind;
use crate::enums::report_format::ReportFormat;
use crate::errors::{LungLensError, LungLensResult, ResultExt};
use crate::structs::config::config::Config;

const SAMPLE_CONFIG: &str = r#"# LungLens Configuration

# AI Configuration
[ai]
# "gemini", "openai" or "anthropic"
provider = "gemini"
# Leave unset to use the provider's default vision model
# model = "gemini-2.0-flash"
max_tokens = 1024
temperature = 0.0
# Defaults to GEMINI_API_KEY / OPENAI_API_KEY / ANTHROPIC_API_KEY
# api_key_env = "GEMINI_API_KEY"

# Web front-end
[server]
host = "127.0.0.1"
port = 9002

# Report export
[output]
output_dir = "./lunglens-reports"
# "markdown", "html" or "json"
report_format = "markdown"
# Also write every report downloaded from the web front-end to output_dir
save_reports = false
"#;

pub struct ConfigManager;

impl ConfigManager {

    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_default()
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn load() -> LungLensResult<Config> {
        Self::load_from(&Self::default_path())
    }

    /// Missing files yield the default configuration.
    pub fn load_from(path: &Path) -> LungLensResult<Config> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        log::info!("📋 Loading config from: {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| LungLensError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn create_sample_config() -> LungLensResult<PathBuf> {
        let path = Self::default_path();
        Self::create_sample_config_at(&path)?;
        Ok(path)
    }

    pub fn create_sample_config_at(path: &Path) -> LungLensResult<()> {
        if path.exists() {
            return Err(LungLensError::config_error(
                "Configuration file already exists",
                None,
                Some(&format!("Edit {} or remove it first", path.display())),
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_operation("create config directory")?;
        }
        fs::write(path, SAMPLE_CONFIG).with_operation("write sample config")?;
        log::info!("✅ Created sample config at: {}", path.display());
        Ok(())
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Err(e) = config.ai.provider.parse::<ProviderKind>() {
            errors.push(format!("[ai].provider: {}", e));
        }

        if config.ai.max_tokens == 0 {
            errors.push("[ai].max_tokens must be greater than 0".to_string());
        }

        if !(0.0..=2.0).contains(&config.ai.temperature) {
            errors.push(format!("[ai].temperature must be within [0, 2], found {}", config.ai.temperature));
        }

        if config.ai.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            errors.push("[ai].model must not be empty when set".to_string());
        }

        if config.server.port == 0 {
            errors.push("[server].port must not be 0".to_string());
        }

        if config.server.host.trim().is_empty() {
            errors.push("[server].host must not be empty".to_string());
        }

        if let Err(e) = config.output.report_format.parse::<ReportFormat>() {
            errors.push(format!("[output].report_format: {}", e));
        }

        if config.output.output_dir.trim().is_empty() {
            errors.push("[output].output_dir must not be empty".to_string());
        }

        if config.ai.api_key_env.as_deref().is_some_and(|env| env.trim().is_empty()) {
            errors.push("[ai].api_key_env must name an environment variable".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
