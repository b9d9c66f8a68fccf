use chrono::NaiveDate;
use std::fmt;

use super::invariants::{format_date, parse_count, parse_date};
use crate::domain::DomainResult;

/// Every editable attribute of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattleField {
    Name,
    Date,
    CountriesInvolved,
    Winner,
    Loser,
    VictorForces,
    VanquishedForces,
    TotalVictorDeaths,
    TotalVanquishedDeaths,
    NotableFigures,
    NotableDeaths,
}

impl BattleField {
    /// Fields in edit-menu order (menu number = index + 1)
    pub const ALL: [BattleField; 11] = [
        BattleField::Name,
        BattleField::Date,
        BattleField::CountriesInvolved,
        BattleField::Winner,
        BattleField::Loser,
        BattleField::VictorForces,
        BattleField::VanquishedForces,
        BattleField::TotalVictorDeaths,
        BattleField::TotalVanquishedDeaths,
        BattleField::NotableFigures,
        BattleField::NotableDeaths,
    ];

    pub fn from_menu_number(number: u32) -> Option<Self> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    pub fn menu_number(self) -> u32 {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .map_or(0, |index| index as u32 + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            BattleField::Name => "Battle Name",
            BattleField::Date => "Date",
            BattleField::CountriesInvolved => "Countries Involved",
            BattleField::Winner => "Winner",
            BattleField::Loser => "Loser",
            BattleField::VictorForces => "Victor Forces",
            BattleField::VanquishedForces => "Vanquished Forces",
            BattleField::TotalVictorDeaths => "Total Victor Deaths",
            BattleField::TotalVanquishedDeaths => "Total Vanquished Deaths",
            BattleField::NotableFigures => "Significant Figures Present",
            BattleField::NotableDeaths => "Notable Deaths",
        }
    }
}

impl fmt::Display for BattleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated replacement value for exactly one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Name(String),
    Date(NaiveDate),
    CountriesInvolved(String),
    Winner(String),
    Loser(String),
    VictorForces(u32),
    VanquishedForces(u32),
    TotalVictorDeaths(u32),
    TotalVanquishedDeaths(u32),
    NotableFigures(String),
    NotableDeaths(String),
}

impl FieldEdit {
    /// Validate `raw` for `field` and build the typed edit
    pub fn parse(field: BattleField, raw: &str) -> DomainResult<Self> {
        let edit = match field {
            BattleField::Name => FieldEdit::Name(title_case(raw)),
            BattleField::Date => FieldEdit::Date(parse_date(raw)?),
            BattleField::CountriesInvolved => FieldEdit::CountriesInvolved(raw.to_string()),
            BattleField::Winner => FieldEdit::Winner(title_case(raw)),
            BattleField::Loser => FieldEdit::Loser(title_case(raw)),
            BattleField::VictorForces => FieldEdit::VictorForces(parse_count(raw)?),
            BattleField::VanquishedForces => FieldEdit::VanquishedForces(parse_count(raw)?),
            BattleField::TotalVictorDeaths => FieldEdit::TotalVictorDeaths(parse_count(raw)?),
            BattleField::TotalVanquishedDeaths => {
                FieldEdit::TotalVanquishedDeaths(parse_count(raw)?)
            }
            BattleField::NotableFigures => FieldEdit::NotableFigures(raw.to_string()),
            BattleField::NotableDeaths => FieldEdit::NotableDeaths(raw.to_string()),
        };
        Ok(edit)
    }

    pub fn field(&self) -> BattleField {
        match self {
            FieldEdit::Name(_) => BattleField::Name,
            FieldEdit::Date(_) => BattleField::Date,
            FieldEdit::CountriesInvolved(_) => BattleField::CountriesInvolved,
            FieldEdit::Winner(_) => BattleField::Winner,
            FieldEdit::Loser(_) => BattleField::Loser,
            FieldEdit::VictorForces(_) => BattleField::VictorForces,
            FieldEdit::VanquishedForces(_) => BattleField::VanquishedForces,
            FieldEdit::TotalVictorDeaths(_) => BattleField::TotalVictorDeaths,
            FieldEdit::TotalVanquishedDeaths(_) => BattleField::TotalVanquishedDeaths,
            FieldEdit::NotableFigures(_) => BattleField::NotableFigures,
            FieldEdit::NotableDeaths(_) => BattleField::NotableDeaths,
        }
    }
}

impl fmt::Display for FieldEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldEdit::Date(date) => f.write_str(&format_date(*date)),
            FieldEdit::VictorForces(n)
            | FieldEdit::VanquishedForces(n)
            | FieldEdit::TotalVictorDeaths(n)
            | FieldEdit::TotalVanquishedDeaths(n) => write!(f, "{}", n),
            FieldEdit::Name(s)
            | FieldEdit::CountriesInvolved(s)
            | FieldEdit::Winner(s)
            | FieldEdit::Loser(s)
            | FieldEdit::NotableFigures(s)
            | FieldEdit::NotableDeaths(s) => f.write_str(s),
        }
    }
}

/// Canonical case form used for names: the first cased character of every
/// word is upper case, the rest lower case. A word starts after any uncased
/// character, so "anglo-saxon" becomes "Anglo-Saxon".
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_cased = false;

    for ch in input.chars() {
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        previous_cased = ch.is_lowercase() || ch.is_uppercase();
    }

    out
}
