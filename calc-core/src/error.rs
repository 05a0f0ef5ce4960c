//! Structured errors
//!
//! Every failure the calculator can hit is a value of one of these types.
//! None of them is fatal: the REPL reports them and keeps reading input.

use std::path::PathBuf;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const VALIDATION: &str = "VALIDATION";
    pub const UNSUPPORTED_OPERATION: &str = "UNSUPPORTED_OPERATION";
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const HISTORY_IO: &str = "HISTORY_IO";
    pub const IO: &str = "IO";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Error raised while computing or running a command
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("{operation}() requires at least one operand")]
    MissingOperands { operation: String },

    #[error("Invalid operand '{value}': expected a finite number")]
    InvalidOperand { value: String },

    #[error("Unsupported operation: {name}")]
    UnsupportedOperation { name: String, similar: Vec<String> },

    #[error("Cannot divide by zero.")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    Domain(String),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A failure nobody anticipated, e.g. a panicking operation.
    /// The message is kept verbatim.
    #[error("{0}")]
    Internal(String),
}

impl CalcError {
    pub fn missing_operands(operation: &str) -> Self {
        Self::MissingOperands { operation: operation.to_string() }
    }

    pub fn invalid_operand(value: impl Into<String>) -> Self {
        Self::InvalidOperand { value: value.into() }
    }

    pub fn unsupported(name: &str) -> Self {
        Self::UnsupportedOperation { name: name.to_string(), similar: Vec::new() }
    }

    /// Builder: attach similar operation names to an unsupported-operation error
    pub fn with_similar(self, names: Vec<String>) -> Self {
        match self {
            Self::UnsupportedOperation { name, .. } => Self::UnsupportedOperation { name, similar: names },
            other => other,
        }
    }

    pub fn domain(details: impl Into<String>) -> Self {
        Self::Domain(details.into())
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal(details.into())
    }

    /// Machine-readable code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingOperands { .. } => codes::ARG_COUNT,
            Self::InvalidOperand { .. } => codes::VALIDATION,
            Self::UnsupportedOperation { .. } => codes::UNSUPPORTED_OPERATION,
            Self::DivisionByZero => codes::DIV_ZERO,
            Self::Domain(_) => codes::DOMAIN_ERROR,
            Self::History(_) => codes::HISTORY_IO,
            Self::Io(_) => codes::IO,
            Self::Internal(_) => codes::INTERNAL,
        }
    }

    /// True for bad user input (wrong operand count or non-numeric operand)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingOperands { .. } | Self::InvalidOperand { .. })
    }

    /// Suggestion for fixing the error, if one applies
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::MissingOperands { operation } => {
                Some(format!("Usage: {} <num1> <num2>", operation))
            }
            Self::InvalidOperand { .. } => Some("Enter numeric values, e.g. addition 5 5".to_string()),
            Self::UnsupportedOperation { similar, .. } if !similar.is_empty() => {
                Some(format!("Did you mean: {}?", similar.join(", ")))
            }
            Self::DivisionByZero => Some("Ensure divisor is not zero".to_string()),
            _ => None,
        }
    }
}

/// Error raised by the history store
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Failed to access history file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read history file '{}': {message}", path.display())]
    Format { path: PathBuf, message: String },

    #[error("Failed to write history file '{}': {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("Malformed history row {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("Invalid index {index}. Use 'history show' to see available entries.")]
    IndexOutOfRange { index: usize, len: usize },
}

impl HistoryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn format(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Format { path: path.into(), message: message.to_string() }
    }

    pub fn write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Write { path: path.into(), message: message.to_string() }
    }

    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRow { line, reason: reason.into() }
    }
}
