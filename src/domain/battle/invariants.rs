use chrono::NaiveDate;

use super::entity::Battle;
use crate::domain::{DomainError, DomainResult};

/// Calendar-date text format used in storage and at the prompt
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A battle handed to the store for insertion must not carry an identity
pub fn validate_new_battle(battle: &Battle) -> DomainResult<()> {
    if let Some(id) = battle.id {
        return Err(DomainError::InvariantViolation(format!(
            "Battle '{}' already has identity {}",
            battle.name, id
        )));
    }
    Ok(())
}

/// Parse `YYYY-MM-DD` into a calendar date
pub fn parse_date(raw: &str) -> DomainResult<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(trimmed.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a non-negative whole number (forces and death counts)
///
/// Non-numeric input and negative numbers fail with different errors so the
/// caller can word its retry prompt accordingly.
pub fn parse_count(raw: &str) -> DomainResult<u32> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| DomainError::NotAWholeNumber(trimmed.to_string()))?;

    if value < 0 {
        return Err(DomainError::NegativeValue(value));
    }

    u32::try_from(value).map_err(|_| DomainError::ValueOutOfRange(value))
}

/// Invariants that must hold true for the Battle domain:
///
/// 1. Identity is assigned by the store, once, at first insert
/// 2. Identity never changes afterwards
/// 3. Force and death counts are never negative
/// 4. Dates are calendar dates without time of day
/// 5. Duplicate names are allowed
/// 6. Total deaths is derived, never stored

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::battle::BattleId;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("1066-10-14").unwrap(),
            NaiveDate::from_ymd_opt(1066, 10, 14).unwrap()
        );
        assert_eq!(
            parse_date(" 2020-02-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_date_rejects_malformed() {
        for raw in ["", "yesterday", "2021-02-29", "2020-13-01", "14/10/1066"] {
            assert!(
                matches!(parse_date(raw), Err(DomainError::InvalidDate(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_date_pads_early_years() {
        let date = NaiveDate::from_ymd_opt(732, 10, 10).unwrap();
        assert_eq!(format_date(date), "0732-10-10");
        assert_eq!(parse_date(&format_date(date)).unwrap(), date);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("0"), Ok(0));
        assert_eq!(parse_count(" 7000 "), Ok(7000));
    }

    #[test]
    fn test_parse_count_rejects_negative() {
        assert_eq!(parse_count("-5"), Err(DomainError::NegativeValue(-5)));
    }

    #[test]
    fn test_parse_count_rejects_non_numeric() {
        assert_eq!(
            parse_count("12.5"),
            Err(DomainError::NotAWholeNumber("12.5".to_string()))
        );
        assert_eq!(
            parse_count("lots"),
            Err(DomainError::NotAWholeNumber("lots".to_string()))
        );
    }

    #[test]
    fn test_parse_count_rejects_overflow() {
        assert_eq!(
            parse_count("5000000000"),
            Err(DomainError::ValueOutOfRange(5_000_000_000))
        );
    }

    #[test]
    fn test_validate_new_battle() {
        let mut battle = Battle::new("Hastings", NaiveDate::from_ymd_opt(1066, 10, 14).unwrap());
        assert!(validate_new_battle(&battle).is_ok());

        battle.id = Some(BattleId::new(1));
        assert!(validate_new_battle(&battle).is_err());
    }
}
