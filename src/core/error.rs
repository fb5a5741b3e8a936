//! Error handling and error types for the data sanity engine.
//!
//! Checks never fail on their own; they return booleans. The only errors a
//! sanity check surfaces are an unsupported task type, raised before any data
//! is touched, and a validation failure, raised once every check has been
//! evaluated and combined.

use crate::core::constants::VALIDATION_FAILURE_HEADER;
use std::fmt;
use std::io;
use thiserror::Error;

/// Main error type for the data sanity library.
#[derive(Error, Debug)]
pub enum SanityError {
    /// Task type has no validator set
    #[error("Unsupported task type: {task}")]
    UnsupportedTaskType { task: String },

    /// One or more checks failed somewhere in the validated data
    #[error("{}", FailureReport(.messages))]
    ValidationFailure { messages: Vec<String> },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Data loading and parsing errors
    #[error("Data loading error: {message}")]
    DataLoading { message: String },

    /// Thread pool construction errors
    #[error("Threading error: {message}")]
    Threading { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },
}

/// Renders the header and one message per line.
struct FailureReport<'a>(&'a [String]);

impl fmt::Display for FailureReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(VALIDATION_FAILURE_HEADER)?;
        for message in self.0 {
            write!(f, "\n{}", message)?;
        }
        Ok(())
    }
}

/// Type alias for Results using SanityError
pub type Result<T> = std::result::Result<T, SanityError>;

impl SanityError {
    /// Create an unsupported task type error
    pub fn unsupported_task_type<S: Into<String>>(task: S) -> Self {
        SanityError::UnsupportedTaskType { task: task.into() }
    }

    /// Create a validation failure carrying every failing check's message
    pub fn validation_failure<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SanityError::ValidationFailure {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        SanityError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        SanityError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        SanityError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a data loading error
    pub fn data_loading<S: Into<String>>(message: S) -> Self {
        SanityError::DataLoading {
            message: message.into(),
        }
    }

    /// Create a threading error
    pub fn threading<S: Into<String>>(message: S) -> Self {
        SanityError::Threading {
            message: message.into(),
        }
    }

    /// Messages of a validation failure; empty for every other error.
    pub fn messages(&self) -> &[String] {
        match self {
            SanityError::ValidationFailure { messages } => messages,
            _ => &[],
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SanityError::UnsupportedTaskType { .. } => false,
            SanityError::ValidationFailure { .. } => false,
            SanityError::Config { .. } => false,
            SanityError::InvalidParameter { .. } => false,
            SanityError::DimensionMismatch { .. } => false,
            SanityError::DataLoading { .. } => false,
            SanityError::Threading { .. } => true,
            SanityError::IO { .. } => false,
            SanityError::Csv { .. } => false,
            SanityError::Json { .. } => false,
            SanityError::Toml { .. } => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            SanityError::UnsupportedTaskType { .. } => "unsupported_task_type",
            SanityError::ValidationFailure { .. } => "validation_failure",
            SanityError::Config { .. } => "config",
            SanityError::InvalidParameter { .. } => "invalid_parameter",
            SanityError::DimensionMismatch { .. } => "dimension_mismatch",
            SanityError::DataLoading { .. } => "data_loading",
            SanityError::Threading { .. } => "threading",
            SanityError::IO { .. } => "io",
            SanityError::Csv { .. } => "csv",
            SanityError::Json { .. } => "json",
            SanityError::Toml { .. } => "toml",
        }
    }
}

/// Convenience macros for error creation
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::core::error::SanityError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::core::error::SanityError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}
