use chrono::NaiveDate;
use std::fmt;

use super::fields::{title_case, BattleField, FieldEdit};
use super::invariants::format_date;

/// Store-assigned row identity
///
/// Only the store hands these out, once per record, at first insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BattleId(i64);

impl BattleId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BattleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded historical battle
/// This is the only entity of the system; one instance maps to one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Battle {
    /// Row identity, `None` until the store has inserted the record
    pub id: Option<BattleId>,

    pub name: String,

    /// Calendar date of the battle (no time of day, no zone)
    pub date: NaiveDate,

    pub countries_involved: String,
    pub winner: String,
    pub loser: String,

    pub victor_forces: u32,
    pub vanquished_forces: u32,
    pub total_victor_deaths: u32,
    pub total_vanquished_deaths: u32,

    /// Significant figures present at the battle
    pub notable_figures: String,
    pub notable_deaths: String,
}

impl Battle {
    /// Create an unsaved battle with empty text fields and zero counts
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            date,
            countries_involved: String::new(),
            winner: String::new(),
            loser: String::new(),
            victor_forces: 0,
            vanquished_forces: 0,
            total_victor_deaths: 0,
            total_vanquished_deaths: 0,
            notable_figures: String::new(),
            notable_deaths: String::new(),
        }
    }

    /// Victor deaths plus vanquished deaths, summed on every call
    pub fn total_deaths(&self) -> u64 {
        u64::from(self.total_victor_deaths) + u64::from(self.total_vanquished_deaths)
    }

    /// Title-case the name, winner and loser so lookups match regardless of
    /// how they were typed
    pub fn normalize_names(&mut self) {
        self.name = title_case(&self.name);
        self.winner = title_case(&self.winner);
        self.loser = title_case(&self.loser);
    }

    /// Current value of `field` as shown to the user
    pub fn display_value(&self, field: BattleField) -> String {
        match field {
            BattleField::Name => self.name.clone(),
            BattleField::Date => format_date(self.date),
            BattleField::CountriesInvolved => self.countries_involved.clone(),
            BattleField::Winner => self.winner.clone(),
            BattleField::Loser => self.loser.clone(),
            BattleField::VictorForces => self.victor_forces.to_string(),
            BattleField::VanquishedForces => self.vanquished_forces.to_string(),
            BattleField::TotalVictorDeaths => self.total_victor_deaths.to_string(),
            BattleField::TotalVanquishedDeaths => self.total_vanquished_deaths.to_string(),
            BattleField::NotableFigures => self.notable_figures.clone(),
            BattleField::NotableDeaths => self.notable_deaths.clone(),
        }
    }

    /// Replace exactly one field. The identity is never touched.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Name(value) => self.name = value,
            FieldEdit::Date(value) => self.date = value,
            FieldEdit::CountriesInvolved(value) => self.countries_involved = value,
            FieldEdit::Winner(value) => self.winner = value,
            FieldEdit::Loser(value) => self.loser = value,
            FieldEdit::VictorForces(value) => self.victor_forces = value,
            FieldEdit::VanquishedForces(value) => self.vanquished_forces = value,
            FieldEdit::TotalVictorDeaths(value) => self.total_victor_deaths = value,
            FieldEdit::TotalVanquishedDeaths(value) => self.total_vanquished_deaths = value,
            FieldEdit::NotableFigures(value) => self.notable_figures = value,
            FieldEdit::NotableDeaths(value) => self.notable_deaths = value,
        }
    }
}
