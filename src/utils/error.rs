use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("Duplicate key in shaped record: {key}")]
    DuplicateKey { key: String },

    #[error("Failed to read property '{property}': {message}")]
    PropertyAccess { property: String, message: String },

    #[error("Failed to convert property '{property}': {message}")]
    Conversion { property: String, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Shaping,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 命令列結束碼，失敗一律非零
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 1,
            ErrorSeverity::High => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ShapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShapeError::DuplicateKey { .. }
            | ShapeError::PropertyAccess { .. }
            | ShapeError::Conversion { .. } => ErrorCategory::Shaping,
            ShapeError::SerializationError(_)
            | ShapeError::CsvError(_)
            | ShapeError::InvalidInput { .. } => ErrorCategory::Data,
            ShapeError::ConfigValidationError { .. }
            | ShapeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ShapeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Shaping | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ShapeError::DuplicateKey { key } => {
                format!("Field '{}' was requested more than once", key)
            }
            ShapeError::PropertyAccess { property, .. } => {
                format!("Could not read field '{}' from the input", property)
            }
            ShapeError::Conversion { property, .. } => {
                format!("Could not convert the value of field '{}'", property)
            }
            ShapeError::SerializationError(_) | ShapeError::InvalidInput { .. } => {
                "The input is not a JSON object or an array of JSON objects".to_string()
            }
            ShapeError::CsvError(_) => "Failed to write CSV output".to_string(),
            ShapeError::IoError(e) => format!("File operation failed: {}", e),
            ShapeError::ConfigValidationError { field, .. }
            | ShapeError::InvalidConfigValueError { field, .. } => {
                format!("Invalid configuration for '{}'", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ShapeError::DuplicateKey { .. } => {
                "Remove repeated names from the field list, or pass --case-sensitive if the input has fields differing only by case"
            }
            ShapeError::PropertyAccess { .. } | ShapeError::Conversion { .. } => {
                "Check the input values of the reported field or drop the converter for it"
            }
            ShapeError::SerializationError(_) | ShapeError::InvalidInput { .. } => {
                "Validate the input file with a JSON linter"
            }
            ShapeError::CsvError(_) => "Try --format json",
            ShapeError::IoError(_) => "Check that the file exists and is readable/writable",
            ShapeError::ConfigValidationError { .. }
            | ShapeError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or the matching command line flag"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;
