//! Error types and exit codes for frm
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (remote store, IO)
//! - 2: Usage error (bad flags/args, malformed duration or date)
//! - 3: Data error (contact not found, invalid config)

use std::path::PathBuf;

use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing contact, bad config (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during frm operations
#[derive(Error, Debug)]
pub enum FrmError {
    // Usage errors (exit code 2)
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error("invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("{0}")]
    UsageError(String),

    // Data errors (exit code 3)
    #[error("contact {name:?} not found")]
    NotFound { name: String },

    #[error("invalid config {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },

    // Generic failures (exit code 1)
    #[error("account {account} unavailable while trying to {operation}: {reason}")]
    AccountUnavailable {
        account: String,
        operation: String,
        reason: String,
    },

    #[error("failed to {operation} in account {account}: {reason}")]
    Remote {
        account: String,
        operation: String,
        reason: String,
    },

    #[error(
        "write failed on {failed} after succeeding on [{}]: {reason} (applied changes were kept)",
        .succeeded.join(", ")
    )]
    PartialWriteFailure {
        succeeded: Vec<String>,
        failed: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl FrmError {
    /// Create an error for a malformed duration string
    pub fn invalid_duration(input: &str, reason: impl std::fmt::Display) -> Self {
        FrmError::InvalidDuration {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a malformed date expression
    pub fn invalid_date(input: &str, reason: impl std::fmt::Display) -> Self {
        FrmError::InvalidDate {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a name that matched nothing in any account
    pub fn not_found(name: &str) -> Self {
        FrmError::NotFound {
            name: name.to_string(),
        }
    }

    /// Create an error for an account that could not be reached or queried
    pub fn account_unavailable(
        account: &str,
        operation: &str,
        error: impl std::fmt::Display,
    ) -> Self {
        FrmError::AccountUnavailable {
            account: account.to_string(),
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed remote operation other than reachability
    pub fn remote(account: &str, operation: &str, error: impl std::fmt::Display) -> Self {
        FrmError::Remote {
            account: account.to_string(),
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        FrmError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        FrmError::Config {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FrmError::InvalidDuration { .. }
            | FrmError::InvalidDate { .. }
            | FrmError::UsageError(_) => ExitCode::Usage,

            FrmError::NotFound { .. } | FrmError::Config { .. } => ExitCode::Data,

            FrmError::AccountUnavailable { .. }
            | FrmError::Remote { .. }
            | FrmError::PartialWriteFailure { .. }
            | FrmError::Io(_)
            | FrmError::Json(_)
            | FrmError::Toml(_)
            | FrmError::FailedOperationWithTarget { .. }
            | FrmError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            FrmError::InvalidDuration { .. } => "invalid_duration",
            FrmError::InvalidDate { .. } => "invalid_date",
            FrmError::UsageError(_) => "usage_error",
            FrmError::NotFound { .. } => "not_found",
            FrmError::Config { .. } => "config_error",
            FrmError::AccountUnavailable { .. } => "account_unavailable",
            FrmError::Remote { .. } => "remote_error",
            FrmError::PartialWriteFailure { .. } => "partial_write_failure",
            FrmError::Io(_) => "io_error",
            FrmError::Json(_) => "json_error",
            FrmError::Toml(_) => "toml_error",
            FrmError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            FrmError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        let mut error_obj = serde_json::json!({
            "code": self.exit_code() as i32,
            "type": self.error_type(),
            "message": self.to_string(),
        });

        match self {
            FrmError::AccountUnavailable {
                account, operation, ..
            }
            | FrmError::Remote {
                account, operation, ..
            } => {
                error_obj["account"] = serde_json::json!(account);
                error_obj["operation"] = serde_json::json!(operation);
            }
            FrmError::PartialWriteFailure {
                succeeded, failed, ..
            } => {
                error_obj["succeeded"] = serde_json::json!(succeeded);
                error_obj["failed"] = serde_json::json!(failed);
            }
            _ => {}
        }

        serde_json::json!({ "error": error_obj })
    }
}

/// Result type alias for frm operations
pub type Result<T> = std::result::Result<T, FrmError>;
