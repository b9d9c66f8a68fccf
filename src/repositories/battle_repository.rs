// src/repositories/battle_repository.rs
//
// Battle persistence

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Row};
use std::sync::Arc;

use crate::db::{get_connection, ConnectionPool};
use crate::domain::{format_date, Battle, BattleId, DATE_FORMAT};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait BattleRepository: Send + Sync {
    /// Insert a new row and return the identity SQLite assigned to it
    fn create(&self, battle: &Battle) -> AppResult<BattleId>;
    /// Overwrite every column of the row `id`
    fn update(&self, id: BattleId, battle: &Battle) -> AppResult<()>;
    fn delete(&self, id: BattleId) -> AppResult<()>;
    /// All rows, in insertion order
    fn list_all(&self) -> AppResult<Vec<Battle>>;
}

const SELECT_COLUMNS: &str = "SELECT id, battleName, date, countriesInvolved, winner, loser,
        victorForces, vanquishedForces, totalVictorDeaths, totalVanquishedDeaths,
        significantFiguresPresent, notableDeaths
     FROM battles";

pub struct SqliteBattleRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteBattleRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Battle - returns rusqlite::Error for query_map compatibility
    fn row_to_battle(row: &Row) -> Result<Battle, rusqlite::Error> {
        let date_str: String = row.get("date")?;
        let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;

        Ok(Battle {
            id: Some(BattleId::new(row.get("id")?)),
            name: row.get("battleName")?,
            date,
            countries_involved: row.get("countriesInvolved")?,
            winner: row.get("winner")?,
            loser: row.get("loser")?,
            victor_forces: row.get("victorForces")?,
            vanquished_forces: row.get("vanquishedForces")?,
            total_victor_deaths: row.get("totalVictorDeaths")?,
            total_vanquished_deaths: row.get("totalVanquishedDeaths")?,
            notable_figures: row.get("significantFiguresPresent")?,
            notable_deaths: row.get("notableDeaths")?,
        })
    }
}

impl BattleRepository for SqliteBattleRepository {
    fn create(&self, battle: &Battle) -> AppResult<BattleId> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO battles (
                battleName, date, countriesInvolved, winner, loser, victorForces,
                vanquishedForces, totalVictorDeaths, totalVanquishedDeaths,
                significantFiguresPresent, notableDeaths
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                battle.name,
                format_date(battle.date),
                battle.countries_involved,
                battle.winner,
                battle.loser,
                battle.victor_forces,
                battle.vanquished_forces,
                battle.total_victor_deaths,
                battle.total_vanquished_deaths,
                battle.notable_figures,
                battle.notable_deaths,
            ],
        )?;
        let id = BattleId::new(tx.last_insert_rowid());
        tx.commit()?;

        log::debug!("Inserted battle '{}' as row {}", battle.name, id);
        Ok(id)
    }

    fn update(&self, id: BattleId, battle: &Battle) -> AppResult<()> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        let changed = tx.execute(
            "UPDATE battles SET
                battleName = ?1, date = ?2, countriesInvolved = ?3, winner = ?4,
                loser = ?5, victorForces = ?6, vanquishedForces = ?7,
                totalVictorDeaths = ?8, totalVanquishedDeaths = ?9,
                significantFiguresPresent = ?10, notableDeaths = ?11
             WHERE id = ?12",
            params![
                battle.name,
                format_date(battle.date),
                battle.countries_involved,
                battle.winner,
                battle.loser,
                battle.victor_forces,
                battle.vanquished_forces,
                battle.total_victor_deaths,
                battle.total_vanquished_deaths,
                battle.notable_figures,
                battle.notable_deaths,
                id.value(),
            ],
        )?;

        if changed == 0 {
            // dropping the transaction rolls it back
            return Err(AppError::NotFound);
        }
        tx.commit()?;

        log::debug!("Updated battle row {}", id);
        Ok(())
    }

    fn delete(&self, id: BattleId) -> AppResult<()> {
        let mut conn = get_connection(&self.pool)?;
        let tx = conn.transaction()?;

        let changed = tx.execute("DELETE FROM battles WHERE id = ?1", params![id.value()])?;
        if changed == 0 {
            return Err(AppError::NotFound);
        }
        tx.commit()?;

        log::debug!("Deleted battle row {}", id);
        Ok(())
    }

    fn list_all(&self) -> AppResult<Vec<Battle>> {
        let conn = get_connection(&self.pool)?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let battles: Vec<Battle> = stmt
            .query_map([], Self::row_to_battle)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(battles)
    }
}
