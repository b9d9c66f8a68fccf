// src/application/menu.rs
//
// Main menu options

use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    DisplayAll,
    Add,
    Edit,
    Delete,
    SortOldestFirst,
    SortNewestFirst,
    LookUp,
    TimeSince,
    ShowMenu,
    Exit,
}

impl MenuOption {
    /// Options in menu order (menu number = index + 1)
    pub const ALL: [MenuOption; 10] = [
        MenuOption::DisplayAll,
        MenuOption::Add,
        MenuOption::Edit,
        MenuOption::Delete,
        MenuOption::SortOldestFirst,
        MenuOption::SortNewestFirst,
        MenuOption::LookUp,
        MenuOption::TimeSince,
        MenuOption::ShowMenu,
        MenuOption::Exit,
    ];

    /// Parse what the user typed at the menu prompt
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| DomainError::InvalidMenuChoice(trimmed.to_string()))
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::DisplayAll => "Display All Battles",
            MenuOption::Add => "Add Battle",
            MenuOption::Edit => "Edit Battle",
            MenuOption::Delete => "Delete Battle",
            MenuOption::SortOldestFirst => "Show Battles from Oldest to Most Recent",
            MenuOption::SortNewestFirst => "Show Battles from Most Recent to Oldest",
            MenuOption::LookUp => "Look up Battle",
            MenuOption::TimeSince => "Time Since Battle Occurred",
            MenuOption::ShowMenu => "Display Menu",
            MenuOption::Exit => "Exit",
        }
    }
}
