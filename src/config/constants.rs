pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 9002;
pub const SESSION_COOKIE_NAME: &str = "lunglens_session";
pub const MAX_SESSION_ID_LENGTH: usize = 64;
pub const MAX_UPLOAD_BYTES: u64 = 25 * 1024 * 1024;

pub const CONFIG_DIR_NAME: &str = "lunglens";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "./lunglens-reports";

pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";

pub const DICOM_EXTENSION: &str = "dcm";
pub const DICOM_MIME_TYPE: &str = "application/dicom";

pub const NO_OUTPUT_MESSAGE: &str = "AI failed to provide an output.";
pub const SUMMARY_FAILED_MESSAGE: &str = "Could not summarize the image. Please try again.";
pub const DEGRADED_EXPLANATION: &str = "AI output was not in the expected format. Some details might be missing. Please review the image manually or try again.";
pub const ERROR_EXPLANATION_PREFIX: &str = "Error during analysis";
pub const ERROR_EXPLANATION: &str = "Error during analysis. Could not generate prediction.";
pub const DISCLAIMER: &str = "Disclaimer: This AI prediction is for informational purposes only and not a substitute for professional medical advice. Consult with a qualified healthcare provider for any health concerns or before making any decisions related to your health or treatment.";

/// Probability sums further than this from 1.0 are logged, never corrected.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 0.05;
