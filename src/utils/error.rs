use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvisionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Branch record is incomplete, missing: {}", .missing.join(", "))]
    IncompleteBranch { missing: Vec<String> },

    #[error("Duplicate IP addresses in workstation list: {}", .addresses.join(", "))]
    DuplicateIpAddress { addresses: Vec<String> },

    #[error("Failed to run admin command '{command}': {source}")]
    AdminCommandError {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ProvisionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Io,
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IncompleteBranch { .. } | Self::DuplicateIpAddress { .. } => ErrorCategory::Data,
            Self::AdminCommandError { .. } => ErrorCategory::External,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::External => ErrorSeverity::Medium,
        }
    }

    /// Process exit code for a run aborted by this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium | ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::CsvError(_) | Self::SerializationError(_) => {
                "Check that the report path is writable".to_string()
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags".to_string()
            }
            Self::IncompleteBranch { missing } => format!(
                "Add the missing branch fields to the model file: {}",
                missing.join(", ")
            ),
            Self::DuplicateIpAddress { .. } => {
                "Give every workstation a unique ipAddress, or pass --allow-duplicate-ips"
                    .to_string()
            }
            Self::AdminCommandError { .. } => {
                "Check the admin command path (--admin-command) and its permissions".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::IncompleteBranch { missing } => format!(
                "The branch description is incomplete (missing {}); nothing was provisioned",
                missing.join(", ")
            ),
            Self::DuplicateIpAddress { addresses } => format!(
                "Several workstations share the same IP address ({}); nothing was provisioned",
                addresses.join(", ")
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
