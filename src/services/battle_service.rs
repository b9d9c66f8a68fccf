// src/services/battle_service.rs
//
// In-memory battle collection, kept in lockstep with the store.
// Every mutation hits the store first and touches memory only once the
// store call has succeeded.

use std::sync::Arc;

use crate::domain::{
    title_case, validate_new_battle, Battle, BattleField, BattleId, CollectionSummary, FieldEdit,
};
use crate::error::{AppError, AppResult};
use crate::repositories::BattleRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest to most recent
    Ascending,
    /// Most recent to oldest
    Descending,
}

pub struct BattleService {
    battle_repo: Arc<dyn BattleRepository>,
    battles: Vec<Battle>,
}

impl BattleService {
    /// Start with an empty collection
    pub fn new(battle_repo: Arc<dyn BattleRepository>) -> Self {
        Self {
            battle_repo,
            battles: Vec::new(),
        }
    }

    /// Mirror every stored battle into memory
    pub fn load(battle_repo: Arc<dyn BattleRepository>) -> AppResult<Self> {
        let battles = battle_repo.list_all()?;
        log::info!("Loaded {} battles", battles.len());
        Ok(Self {
            battle_repo,
            battles,
        })
    }

    pub fn battles(&self) -> &[Battle] {
        &self.battles
    }

    pub fn len(&self) -> usize {
        self.battles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.battles.is_empty()
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary::from_battles(&self.battles)
    }

    /// First battle whose name matches `name`, ignoring case
    ///
    /// Both sides are title-cased before comparing, so a row stored as
    /// "the ALAMO" is still found by "The Alamo". Duplicates are allowed;
    /// the earliest one wins.
    pub fn lookup(&self, name: &str) -> Option<&Battle> {
        let wanted = title_case(name);
        self.battles
            .iter()
            .find(|battle| title_case(&battle.name) == wanted)
    }

    /// Persist a new battle and append it to the collection
    pub fn add(&mut self, mut battle: Battle) -> AppResult<BattleId> {
        validate_new_battle(&battle)?;
        battle.normalize_names();

        let id = self.battle_repo.create(&battle)?;
        battle.id = Some(id);

        log::info!("Added battle '{}' ({})", battle.name, id);
        self.battles.push(battle);
        Ok(id)
    }

    /// Validate `raw` for `field`, then replace that one field on `target`
    /// in storage and in memory. Returns the updated battle.
    pub fn edit(&mut self, target: &Battle, field: BattleField, raw: &str) -> AppResult<Battle> {
        let edit = FieldEdit::parse(field, raw).map_err(|e| {
            log::warn!("Rejected value for {}: {}", field, e);
            AppError::Domain(e)
        })?;
        self.apply_edit(target, edit)
    }

    /// Apply an already-validated edit
    pub fn apply_edit(&mut self, target: &Battle, edit: FieldEdit) -> AppResult<Battle> {
        let id = target
            .id
            .ok_or_else(|| AppError::Unsaved(target.name.clone()))?;
        let index = self.position_of_id(id).ok_or(AppError::NotFound)?;

        let field = edit.field();
        let mut updated = self.battles[index].clone();
        updated.apply(edit);

        self.battle_repo.update(id, &updated)?;
        self.battles[index] = updated.clone();

        log::info!("Updated {} of battle {}", field, id);
        Ok(updated)
    }

    /// Delete `target` from storage (when it has been saved) and from memory
    ///
    /// A battle the store deleted but memory does not hold is reported as
    /// `AppError::Consistency`.
    pub fn remove(&mut self, target: &Battle) -> AppResult<Battle> {
        if let Some(id) = target.id {
            self.battle_repo.delete(id)?;
        }

        let position = match target.id {
            Some(id) => self.position_of_id(id),
            None => self.battles.iter().position(|battle| battle == target),
        };

        match position {
            Some(index) => {
                let removed = self.battles.remove(index);
                log::info!("Removed battle '{}'", removed.name);
                Ok(removed)
            }
            None => {
                let message = format!(
                    "battle '{}' was deleted from storage but is not in the collection",
                    target.name
                );
                log::error!("{}", message);
                Err(AppError::Consistency(message))
            }
        }
    }

    /// Battles ordered by date; equal dates keep collection order
    pub fn sort_by_date(&self, order: SortOrder) -> Vec<&Battle> {
        let mut sorted: Vec<&Battle> = self.battles.iter().collect();
        match order {
            SortOrder::Ascending => sorted.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::Descending => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        sorted
    }

    fn position_of_id(&self, id: BattleId) -> Option<usize> {
        self.battles.iter().position(|battle| battle.id == Some(id))
    }
}
