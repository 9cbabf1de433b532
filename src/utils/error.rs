use thiserror::Error;

/// 契約檢查失敗的具體原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("expected status 200, got {status}")]
    UnexpectedStatus { status: u16 },

    #[error("response body is null or empty")]
    NullBody,

    #[error("response body is a JSON {kind}, expected a string")]
    NotAString { kind: String },
}

#[derive(Error, Debug)]
pub enum CounterError {
    #[error("Request to counter endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Counter endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("Could not decode count: {message}")]
    Decode { message: String },

    #[error("Contract check failed: {0}")]
    Contract(#[from] ContractViolation),

    #[error("Display update failed for element '{element_id}': {message}")]
    Display { element_id: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Payload,
    Contract,
    Display,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CounterError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn display(element_id: &str, message: impl Into<String>) -> Self {
        Self::Display {
            element_id: element_id.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Transport(_) | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::Decode { .. } => ErrorCategory::Payload,
            Self::Contract(_) => ErrorCategory::Contract,
            Self::Display { .. } => ErrorCategory::Display,
            Self::IoError(_) => ErrorCategory::System,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 端點暫時不可用，稍後再試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Payload | ErrorCategory::Contract | ErrorCategory::Display => {
                ErrorSeverity::High
            }
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for the CLI, by severity.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Transport(e) if e.is_timeout() => {
                "The endpoint did not answer in time; raise --timeout-secs or retry later"
            }
            Self::Transport(_) => "Check network connectivity and that the endpoint URL is reachable",
            Self::HttpStatus { .. } => "Verify the endpoint URL and the health of the counter API",
            Self::Decode { .. } => "The endpoint must return a JSON value, e.g. \"42\" or 42",
            Self::Contract(_) => "The counter API no longer honours its contract; inspect its response",
            Self::Display { .. } => "Check that the HTML file exists and contains the target element id",
            Self::IoError(_) => "Check file permissions and available disk space",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the command line flags and the TOML config file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the visitor counter ({})", self),
            ErrorCategory::Payload => format!("The visitor counter sent an unreadable value ({})", self),
            ErrorCategory::Contract => format!("The visitor counter API broke its contract ({})", self),
            ErrorCategory::Display => format!("Could not show the count ({})", self),
            ErrorCategory::Configuration => format!("Invalid configuration ({})", self),
            ErrorCategory::System => format!("System error ({})", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CounterError>;
