// src/application/error_handling.rs
//
// Error Handling for the Console
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly messages
// - Never exposes SQL or connection details on screen
// - Logs errors for debugging

use crate::domain::DomainError;
use crate::error::AppError;

/// What the console shows for a failed operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Invalid input; ask again
    Validation,

    /// Record not found
    NotFound,

    /// Database/persistence error
    Database,

    /// Memory and storage disagree
    Consistency,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: &AppError) -> Self {
        match error {
            AppError::Domain(domain_error) => Self {
                error_type: ErrorType::Validation,
                message: retry_message(domain_error),
                details: None,
            },

            AppError::NotFound => Self {
                error_type: ErrorType::NotFound,
                message: "That battle no longer exists.".to_string(),
                details: None,
            },

            AppError::Unsaved(name) => Self {
                error_type: ErrorType::Internal,
                message: format!("The Battle of {} has not been saved yet.", name),
                details: None,
            },

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);

                Self {
                    error_type: ErrorType::Database,
                    message: "Database operation failed".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);

                Self {
                    error_type: ErrorType::Database,
                    message: "Database connection failed".to_string(),
                    details: None,
                }
            }

            AppError::Consistency(message) => {
                log::error!("Consistency error: {}", message);

                Self {
                    error_type: ErrorType::Consistency,
                    message: "Could not find battle in the battle list.".to_string(),
                    details: Some(message.clone()),
                }
            }

            AppError::Serialization(_) | AppError::Io(_) | AppError::InputClosed => {
                log::error!("{}", error);

                Self {
                    error_type: ErrorType::Internal,
                    message: error.to_string(),
                    details: None,
                }
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);

                Self {
                    error_type: ErrorType::Internal,
                    message: message.clone(),
                    details: None,
                }
            }
        }
    }
}

/// Prompt text for rejected input
///
/// Negative numbers and non-numbers get different wording so the user knows
/// which rule was broken.
pub fn retry_message(error: &DomainError) -> String {
    match error {
        DomainError::NegativeValue(_) => "Value must be zero or greater.".to_string(),
        DomainError::NotAWholeNumber(_) => "Invalid input. Please enter a whole number.".to_string(),
        DomainError::InvalidDate(_) => {
            "Error: The date was entered in the wrong format. Please use YYYY-MM-DD.".to_string()
        }
        DomainError::InvalidMenuChoice(_) => {
            "Entry not valid. Please choose a menu option.".to_string()
        }
        DomainError::ValueOutOfRange(_) | DomainError::InvariantViolation(_) => error.to_string(),
    }
}
