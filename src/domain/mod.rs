// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod battle;
pub mod statistics;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Battle Domain
pub use battle::{
    format_date, parse_count, parse_date, title_case, validate_new_battle, Battle, BattleField,
    BattleId, FieldEdit, DATE_FORMAT,
};

// Statistics Domain (Derived Data)
pub use statistics::{CollectionSummary, ElapsedTime};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent rejected input and violated invariants. All of them are
/// recoverable by asking the user again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("The date '{0}' was entered in the wrong format. Please use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("'{0}' is not a whole number.")]
    NotAWholeNumber(String),

    #[error("Value must be zero or greater (got {0}).")]
    NegativeValue(i64),

    #[error("Value {0} is too large.")]
    ValueOutOfRange(i64),

    #[error("'{0}' is not a menu option.")]
    InvalidMenuChoice(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
