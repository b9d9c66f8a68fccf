// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod battle_service;


pub use battle_service::{BattleService, SortOrder};
