// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - One statement per call, each in its own transaction
// - Explicit SQL only

pub mod battle_repository;

pub use battle_repository::{BattleRepository, SqliteBattleRepository};

#[cfg(test)]
pub use battle_repository::MockBattleRepository;
