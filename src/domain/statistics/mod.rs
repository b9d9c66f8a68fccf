// Statistics Domain
//
// Derived data only: nothing here is stored, everything is recomputed from
// the battles on demand.

pub mod entity;

pub use entity::{CollectionSummary, ElapsedTime};
