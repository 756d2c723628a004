use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::misc::SubscriptionStatus;

pub type Res<T> = std::result::Result<T, AppError>;

/// A single rejected field of a candidate record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every field that failed validation, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // === APPLICATION ERRORS ===
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Derivation error: {0}")]
    Derivation(String),

    #[error("Invalid status transition: {from} -> {to}")]
    StatusTransition {
        from: SubscriptionStatus,
        to: SubscriptionStatus,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Errors caused by the caller's input rather than by the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::Derivation(_)
                | AppError::StatusTransition { .. }
                | AppError::NotFound(_)
                | AppError::Json(_)
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "error": err_msg })
            } else {
                serde_json::json!({ "error": "Internal error" })
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Database(error) => {
                log::error!("Database error: {}", error);
                to_internal_json(&error.to_string())
            }
            AppError::Migration(error) => {
                log::error!("Migration error: {}", error);
                to_internal_json(&error.to_string())
            }
            AppError::Io(error) => {
                log::error!("IO error: {}", error);
                to_internal_json(&error.to_string())
            }
            AppError::Json(_) => serde_json::json!({ "error": self.to_string() }),

            // === APPLICATION ERRORS ===
            AppError::Validation(errors) => {
                serde_json::json!({ "error": self.to_string(), "fields": errors })
            }
            AppError::Derivation(_) | AppError::StatusTransition { .. } | AppError::NotFound(_) => {
                serde_json::json!({ "error": self.to_string() })
            }

            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                to_internal_json(error)
            }
        }
    }
}
