// src/lib.rs
// Battle Manager - Local-first console manager for historical battle records
//
// Architecture:
// - Domain-centric: validation and normalization live in the domain
// - Explicit: No implicit behavior, no magic
// - Local-first: every change is written to SQLite before memory
// - Application Layer: terminal boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    format_date,
    parse_count,
    parse_date,
    title_case,
    validate_new_battle,
    // Battle
    Battle,
    BattleField,
    BattleId,
    // Statistics
    CollectionSummary,
    DomainError,
    DomainResult,
    ElapsedTime,
    FieldEdit,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration & Database
// ============================================================================

pub use config::AppConfig;
pub use db::{
    create_connection_pool, create_memory_pool, get_database_stats, initialize_database,
    verify_database_integrity, ConnectionPool, DatabaseStats,
};

// ============================================================================
// PUBLIC API - Repositories & Services
// ============================================================================

pub use repositories::{BattleRepository, SqliteBattleRepository};
pub use services::{BattleService, SortOrder};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{Console, ErrorResponse, ErrorType, MenuOption};
