use chrono::{Datelike, Months, NaiveDate};

use crate::domain::Battle;

/// Calendar time between a battle and a later day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    /// Whole days between the two dates
    pub total_days: i64,

    /// Completed anniversaries
    pub years: u32,

    /// Days since the last anniversary
    pub days: i64,
}

impl ElapsedTime {
    /// Time from `since` to `today`, or `None` if `since` is in the future
    pub fn between(since: NaiveDate, today: NaiveDate) -> Option<Self> {
        if since > today {
            return None;
        }

        // Feb 29 anniversaries fall on Feb 28 in common years
        let anniversary_after = |years: u32| -> Option<NaiveDate> {
            since.checked_add_months(Months::new(years.checked_mul(12)?))
        };

        let mut years = u32::try_from(today.year() - since.year()).ok()?;
        let mut anniversary = anniversary_after(years)?;
        if anniversary > today {
            years -= 1;
            anniversary = anniversary_after(years)?;
        }

        Some(Self {
            total_days: (today - since).num_days(),
            years,
            days: (today - anniversary).num_days(),
        })
    }
}

/// Totals over a set of battles, shown under the full listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionSummary {
    pub battle_count: usize,
    pub total_deaths: u64,
}

impl CollectionSummary {
    pub fn from_battles<'a>(battles: impl IntoIterator<Item = &'a Battle>) -> Self {
        battles
            .into_iter()
            .fold(Self::default(), |summary, battle| Self {
                battle_count: summary.battle_count + 1,
                total_deaths: summary.total_deaths + battle.total_deaths(),
            })
    }
}
