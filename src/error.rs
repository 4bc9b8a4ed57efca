//! Error handling for domain-sift

use thiserror::Error;

/// Main error type for domain-sift
#[derive(Error, Debug, Clone)]
pub enum DomainSiftError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Dictionary error ({path}): {message}")]
    Dictionary { path: String, message: String },

    #[error("Archive error: {message}")]
    Archive { message: String },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainSiftError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a dictionary load error
    pub fn dictionary(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dictionary {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an archive error
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the run must stop before any scanning happens
    pub fn is_fatal_startup(&self) -> bool {
        matches!(self, Self::Dictionary { .. } | Self::Config { .. })
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your flags, settings file or .env", message)
            }
            Self::Dictionary { path, message } => {
                format!("❌ Word list '{}' could not be loaded: {}\n💡 Pass --wordlist or set DOMAIN_SIFT_WORDLIST", path, message)
            }
            Self::Archive { message } => {
                format!("❌ Archive could not be read: {}\n💡 Re-create the zip or upload the .csv/.txt files directly", message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 Check the file format", message)
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<zip::result::ZipError> for DomainSiftError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::archive(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainSiftError>;

/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::DomainSiftError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainSiftError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::DomainSiftError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainSiftError::validation(format!($fmt, $($arg)*))
    };
}
