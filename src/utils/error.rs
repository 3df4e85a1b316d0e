use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Field '{field}' is missing the {capability} capability")]
    MissingCapability { field: String, capability: String },

    #[error("Operation not implemented: {operation}")]
    Unimplemented { operation: String },

    #[error("Duplicate field in schema: {name}")]
    DuplicateField { name: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Rendering,
    Io,
    NotImplemented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScaffoldError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScaffoldError::MissingCapability { .. } | ScaffoldError::DuplicateField { .. } => {
                ErrorCategory::Rendering
            }
            ScaffoldError::Unimplemented { .. } => ErrorCategory::NotImplemented,
            ScaffoldError::IoError(_) => ErrorCategory::Io,
            ScaffoldError::SerializationError(_)
            | ScaffoldError::ConfigError { .. }
            | ScaffoldError::MissingConfigError { .. }
            | ScaffoldError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Rendering => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::NotImplemented => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScaffoldError::MissingCapability { field, .. } => {
                format!("Field '{}' cannot be rendered as HTML", field)
            }
            ScaffoldError::Unimplemented { operation } => {
                format!("'{}' has no implementation yet", operation)
            }
            ScaffoldError::DuplicateField { name } => {
                format!("The schema declares field '{}' more than once", name)
            }
            ScaffoldError::IoError(e) => format!("Could not read or write a file: {}", e),
            ScaffoldError::SerializationError(e) => format!("Schema file is not valid JSON: {}", e),
            ScaffoldError::ConfigError { message } => message.clone(),
            ScaffoldError::MissingConfigError { field } => {
                format!("Required setting '{}' is missing", field)
            }
            ScaffoldError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScaffoldError::MissingCapability { .. } => {
                "Use a supported field kind: text, number, email, password, hidden, date, checkbox, textarea, select, submit"
            }
            ScaffoldError::Unimplemented { .. } => {
                "Provide a concrete Endpoint implementation for this operation"
            }
            ScaffoldError::DuplicateField { .. } => "Rename or remove the repeated field",
            ScaffoldError::IoError(_) => "Check that the path exists and is writable",
            ScaffoldError::SerializationError(_) | ScaffoldError::ConfigError { .. } => {
                "Check the schema file syntax"
            }
            ScaffoldError::MissingConfigError { .. } => "Add the missing setting to the schema file",
            ScaffoldError::InvalidConfigValueError { .. } => "Fix the value and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
