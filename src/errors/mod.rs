use std::error::Error as StdError;
use std::fmt;
use crate::config::constants::NO_OUTPUT_MESSAGE;
use crate::enums::ai_provider_error::AiProviderError;

#[derive(Debug, Clone)]
pub enum LungLensError {
    // The external model answered with nothing at all
    NoOutput {
        provider: String,
    },

    // Transport or API failures from a hosted model
    ProviderError {
        provider: String,
        source: AiProviderError,
    },

    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
        context: Option<String>,
    },

    // Validation errors
    ValidationError {
        field: String,
        value: String,
        constraint: String,
        suggestion: Option<String>,
    },

    // Session errors
    SessionNotFound {
        session_id: String,
    },
    AnalysisInProgress {
        session_id: String,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },

    // User input errors
    UserInputError {
        input: String,
        expected: String,
        suggestion: String,
    },
}

impl LungLensError {
    pub fn no_output(provider: &str) -> Self {
        Self::NoOutput {
            provider: provider.to_string(),
        }
    }

    pub fn provider_error(provider: &str, source: AiProviderError) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            source,
        }
    }

    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, line_number: Option<usize>, reason: &str, context: Option<&str>) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            line_number,
            reason: reason.to_string(),
            context: context.map(|s| s.to_string()),
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str, suggestion: Option<&str>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn user_input_error(input: &str, expected: &str, suggestion: &str) -> Self {
        Self::UserInputError {
            input: input.to_string(),
            expected: expected.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NoOutput { .. } => true,
            Self::ProviderError { source, .. } => !matches!(source, AiProviderError::AuthenticationError(_)),
            Self::AnalysisInProgress { .. } => true,
            Self::UserInputError { .. } => true,
            Self::ValidationError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::SessionNotFound { .. } => true,
            Self::SystemError { .. } => false,
            _ => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::FileOperationError { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::NoOutput { .. } => ErrorSeverity::High,
            Self::ProviderError { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::SessionNotFound { .. } => ErrorSeverity::Low,
            Self::AnalysisInProgress { .. } => ErrorSeverity::Low,
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::UserInputError { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::NoOutput { provider } => {
                format!("{} (provider: {})", NO_OUTPUT_MESSAGE, provider)
            }
            Self::ProviderError { provider, source } => {
                let mut msg = format!("Request to '{}' failed: {}", provider, source);
                if let AiProviderError::AuthenticationError(_) = source {
                    msg.push_str("\n💡 Check the API key environment variable configured under [ai]");
                }
                msg
            }
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}\n💡 Check file permissions and path", operation, file_path, reason)
            }
            Self::ParseError { content_type, line_number, reason, context } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                if let Some(ctx) = context {
                    msg.push_str(&format!("\nContext: {}", ctx));
                }
                msg
            }
            Self::ValidationError { field, value, constraint, suggestion } => {
                let mut msg = format!("Validation error for field '{}': value '{}' violates constraint '{}'", field, value, constraint);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::SessionNotFound { session_id } => {
                format!("Session '{}' not found\n💡 Log in again to start a new session", session_id)
            }
            Self::AnalysisInProgress { session_id } => {
                format!("An analysis is already running for session '{}'", session_id)
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
            Self::UserInputError { input, expected, suggestion } => {
                format!("Invalid input '{}': expected {}\n💡 {}", input, expected, suggestion)
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for LungLensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for LungLensError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::ProviderError { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for lunglens operations
pub type LungLensResult<T> = Result<T, LungLensError>;

pub struct ErrorHandler;

impl ErrorHandler {
    /// Log the technical details and print the user-facing message
    pub fn handle_error(error: &LungLensError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

/// Extension trait for Result to name the failing operation
pub trait ResultExt<T> {
    fn with_operation(self, operation: &str) -> LungLensResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<LungLensError>,
{
    fn with_operation(self, operation: &str) -> LungLensResult<T> {
        self.map_err(|e| match e.into() {
            LungLensError::SystemError { reason, .. } => LungLensError::SystemError {
                operation: operation.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl From<std::io::Error> for LungLensError {
    fn from(error: std::io::Error) -> Self {
        LungLensError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LungLensError {
    fn from(error: serde_json::Error) -> Self {
        LungLensError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
            context: None,
        }
    }
}

impl From<toml::de::Error> for LungLensError {
    fn from(error: toml::de::Error) -> Self {
        LungLensError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
            context: None,
        }
    }
}

impl From<base64::DecodeError> for LungLensError {
    fn from(error: base64::DecodeError) -> Self {
        LungLensError::ParseError {
            content_type: "base64".to_string(),
            line_number: None,
            reason: error.to_string(),
            context: None,
        }
    }
}
