pub mod entity;
pub mod fields;
pub mod invariants;

pub use entity::{Battle, BattleId};
pub use fields::{title_case, BattleField, FieldEdit};
pub use invariants::{format_date, parse_count, parse_date, validate_new_battle, DATE_FORMAT};
