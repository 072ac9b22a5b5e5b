use crate::config::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_provider() -> String {
        "gemini".to_string()
    }

    pub fn default_max_tokens() -> u32 {
        1024
    }

    pub fn default_temperature() -> f32 {
        0.0
    }

    pub fn default_host() -> String {
        DEFAULT_SERVER_HOST.to_string()
    }

    pub fn default_port() -> u16 {
        DEFAULT_SERVER_PORT
    }

    pub fn default_output_dir() -> String {
        DEFAULT_OUTPUT_DIR.to_string()
    }

    pub fn default_report_format() -> String {
        "markdown".to_string()
    }
}
