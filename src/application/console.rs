// src/application/console.rs
//
// Interactive console
//
// RULES:
// - Collect input, call the collection, print results
// - Never contain business logic
// - A failed operation never ends the session

use chrono::NaiveDate;
use std::io::{BufRead, Write};

use super::error_handling::{retry_message, ErrorResponse};
use super::menu::MenuOption;
use super::prompt::Prompter;
use crate::domain::{format_date, title_case, Battle, BattleField, ElapsedTime};
use crate::error::{AppError, AppResult};
use crate::services::{BattleService, SortOrder};

const RULE_WIDTH: usize = 100;

pub struct Console<R, W> {
    io: Prompter<R, W>,
    service: BattleService,
    today: fn() -> NaiveDate,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(service: BattleService, input: R, output: W) -> Self {
        Self {
            io: Prompter::new(input, output),
            service,
            today: local_today,
        }
    }

    /// Replace the clock used for "time since battle"
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn service(&self) -> &BattleService {
        &self.service
    }

    pub fn into_parts(self) -> (BattleService, W) {
        (self.service, self.io.into_output())
    }

    /// Run the menu loop until the user exits or input ends
    pub fn run(&mut self) -> AppResult<()> {
        match self.welcome() {
            Ok(()) => {}
            Err(AppError::InputClosed) => return Ok(()),
            Err(e) => return Err(e),
        }
        self.show_menu()?;

        loop {
            let raw = match self.io.ask("Menu Option: ") {
                Ok(raw) => raw,
                Err(AppError::InputClosed) => break,
                Err(e) => return Err(e),
            };
            self.rule('-')?;

            let option = match MenuOption::parse(&raw) {
                Ok(option) => option,
                Err(e) => {
                    self.io.say(retry_message(&e))?;
                    continue;
                }
            };

            if option == MenuOption::Exit {
                self.io.say("Initiating program exit... Program now terminated.")?;
                break;
            }

            match self.dispatch(option) {
                Ok(()) => {}
                Err(AppError::InputClosed) => break,
                Err(e) => {
                    let response = ErrorResponse::from_app_error(&e);
                    log::error!("{:?} failed: {}", option, e);
                    self.io
                        .say(format!("\nAn unexpected error occurred: {}", response.message))?;
                    if let Some(details) = &response.details {
                        self.io.say(format!("Details: {}", details))?;
                    }
                    self.io.say("Please select a menu option again.")?;
                }
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, option: MenuOption) -> AppResult<()> {
        match option {
            MenuOption::DisplayAll => self.display_all(),
            MenuOption::Add => self.add_battle(),
            MenuOption::Edit => self.edit_battle(),
            MenuOption::Delete => self.delete_battle(),
            MenuOption::SortOldestFirst => self.show_sorted(SortOrder::Ascending),
            MenuOption::SortNewestFirst => self.show_sorted(SortOrder::Descending),
            MenuOption::LookUp => self.look_up(),
            MenuOption::TimeSince => self.time_since(),
            MenuOption::ShowMenu => self.show_menu(),
            MenuOption::Exit => Ok(()),
        }
    }

    fn welcome(&mut self) -> AppResult<()> {
        self.rule('=')?;
        self.io.say("WELCOME TO THE BATTLE MANAGER")?;
        self.rule('-')?;
        self.io.ask("Press ENTER to witness history!")?;
        Ok(())
    }

    fn show_menu(&mut self) -> AppResult<()> {
        self.rule('=')?;
        self.io.say("BATTLE MANAGER\n")?;
        for (index, option) in MenuOption::ALL.iter().enumerate() {
            self.io.say(format!("{:>2} - {}", index + 1, option.label()))?;
        }
        self.io.say("\nSelect an Option!")?;
        Ok(())
    }

    fn display_all(&mut self) -> AppResult<()> {
        self.io.say("\nBATTLE RECORDS")?;

        if self.service.is_empty() {
            self.io.say("\nNo battles recorded.")?;
            return Ok(());
        }

        self.rule('=')?;
        self.io.say(format!(
            "{:<4} {:<28} {:<12} {:<24} {:>12} {:>12} {:>12}",
            "ID", "BATTLE NAME", "DATE", "COUNTRIES", "VIC. FORCES", "VANQ. FORCES", "DEATHS"
        ))?;

        let mut lines = Vec::new();
        for (index, battle) in self.service.battles().iter().enumerate() {
            lines.push("-".repeat(RULE_WIDTH));
            lines.push(format!(
                "{:<4} {:<28} {:<12} {:<24} {:>12} {:>12} {:>12}",
                index + 1,
                battle.name,
                format_date(battle.date),
                battle.countries_involved,
                group_thousands(u64::from(battle.victor_forces)),
                group_thousands(u64::from(battle.vanquished_forces)),
                group_thousands(battle.total_deaths()),
            ));
            lines.extend(battle_notes(battle));
        }
        for line in lines {
            self.io.say(line)?;
        }

        let summary = self.service.summary();
        self.rule('=')?;
        self.io.say(format!(
            "Battles recorded: {} | Total deaths: {}",
            summary.battle_count,
            group_thousands(summary.total_deaths)
        ))?;
        Ok(())
    }

    fn add_battle(&mut self) -> AppResult<()> {
        self.io.say("\nADD NEW BATTLE")?;
        self.rule('-')?;

        let name = self.io.ask("Battle Name: ")?;
        let date = self.io.ask_date("Date of Battle YYYY-MM-DD: ")?;
        let countries_involved = self.io.ask("Countries Involved: ")?;
        let winner = self.io.ask("Winner: ")?;
        let loser = self.io.ask("Loser: ")?;
        let victor_forces = self.io.ask_count("Victor Forces: ")?;
        let vanquished_forces = self.io.ask_count("Vanquished Forces: ")?;
        let total_victor_deaths = self.io.ask_count("Total Victor Deaths: ")?;
        let total_vanquished_deaths = self.io.ask_count("Total Vanquished Deaths: ")?;
        let notable_figures = self.io.ask("Significant Figures Present: ")?;
        let notable_deaths = self.io.ask("Notable Deaths: ")?;

        self.service.add(Battle {
            countries_involved,
            winner,
            loser,
            victor_forces,
            vanquished_forces,
            total_victor_deaths,
            total_vanquished_deaths,
            notable_figures,
            notable_deaths,
            ..Battle::new(name, date)
        })?;

        self.io.say("\nBattle successfully added to the list!")?;
        self.io
            .say(format!("Total battles saved: {}", self.service.len()))?;
        Ok(())
    }

    fn edit_battle(&mut self) -> AppResult<()> {
        self.io.say("\nEDIT BATTLE")?;
        self.rule('-')?;

        let Some(mut current) = self.find_battle()? else {
            return Ok(());
        };

        loop {
            self.io.say("\nCURRENT BATTLE DATA\n")?;
            for field in BattleField::ALL {
                self.io
                    .say(format!("{}: {}", field.label(), current.display_value(field)))?;
            }
            self.rule('-')?;

            self.io.say("\nWhich attribute would you like to edit?\n")?;
            for field in BattleField::ALL {
                self.io
                    .say(format!("{:>2}. {}", field.menu_number(), field.label()))?;
            }

            let raw = self
                .io
                .ask("\nEnter number to edit or 0 to finish editing: ")?;
            let number = match raw.trim().parse::<u32>() {
                Ok(number) => number,
                Err(_) => {
                    self.io.say("Invalid input. Returning to main menu.")?;
                    break;
                }
            };

            if number == 0 {
                self.io.say("Edit finished. Returning to menu.")?;
                break;
            }

            let Some(field) = BattleField::from_menu_number(number) else {
                self.io.say("Invalid option number. Please try again.")?;
                continue;
            };

            current = self.edit_field(&current, field)?;
            self.io.say(format!("\nSuccessfully updated '{}'.", field))?;
            self.io
                .say(format!("New value: {}", current.display_value(field)))?;
        }

        self.show_menu()
    }

    /// Ask for a new value until the collection accepts it
    fn edit_field(&mut self, current: &Battle, field: BattleField) -> AppResult<Battle> {
        let label = format!("Enter new value for {}: ", field);
        loop {
            let raw = self.io.ask(&label)?;
            match self.service.edit(current, field, &raw) {
                Ok(updated) => return Ok(updated),
                Err(AppError::Domain(e)) => self.io.say(retry_message(&e))?,
                Err(e) => return Err(e),
            }
        }
    }

    fn delete_battle(&mut self) -> AppResult<()> {
        self.io.say("\nDELETE BATTLE")?;

        let Some(target) = self.find_battle()? else {
            return Ok(());
        };

        self.io.say(format!(
            "\nAre you sure you want to delete the Battle of {}?\n",
            target.name
        ))?;
        let confirmation = self.io.ask("1 - Yes\n2 - No\n\nEnter: ")?;

        match confirmation.trim() {
            "1" => {
                let removed = self.service.remove(&target)?;
                self.io.say(format!(
                    "\nSuccessfully deleted the Battle of {}.",
                    removed.name
                ))?;
            }
            "2" => self.io.say("\nDeletion Cancelled.")?,
            _ => self.io.say("\nInvalid Choice. Deletion Cancelled.")?,
        }

        self.rule('-')
    }

    fn show_sorted(&mut self, order: SortOrder) -> AppResult<()> {
        let title = match order {
            SortOrder::Ascending => "Battles - Oldest to Most Recent",
            SortOrder::Descending => "Battles - Most Recent to Oldest",
        };
        self.io.say(format!("\n{}\n", title))?;

        if self.service.is_empty() {
            self.io.say("No battles recorded to sort.")?;
            return Ok(());
        }

        let rows: Vec<String> = self
            .service
            .sort_by_date(order)
            .into_iter()
            .map(|battle| format!("{:<50} {:<25}", battle.name, format_date(battle.date)))
            .collect();

        self.rule('=')?;
        self.io.say(format!("{:<50} {:<25}", "BATTLE NAME", "DATE"))?;
        self.rule('-')?;
        for row in rows {
            self.io.say(row)?;
        }
        Ok(())
    }

    fn look_up(&mut self) -> AppResult<()> {
        let Some(battle) = self.find_battle()? else {
            return Ok(());
        };

        self.rule('-')?;
        self.io.say("BATTLE DETAILS\n")?;
        for field in BattleField::ALL {
            self.io
                .say(format!("{}: {}", field.label(), battle.display_value(field)))?;
        }
        self.io
            .say(format!("Total Deaths: {}", group_thousands(battle.total_deaths())))?;
        self.rule('=')
    }

    fn time_since(&mut self) -> AppResult<()> {
        self.io.say("\nTime since this battle occurred.")?;
        self.rule('-')?;

        let Some(battle) = self.find_battle()? else {
            return Ok(());
        };
        let today = (self.today)();

        self.io.say(format!("\nBATTLE NAME: {}", battle.name))?;
        self.io.say(format!("BATTLE DATE: {}", format_date(battle.date)))?;
        self.io.say(format!("TODAY'S DATE: {}", format_date(today)))?;

        match ElapsedTime::between(battle.date, today) {
            Some(elapsed) => {
                self.io.say(format!(
                    "TIME ELAPSED: {} years and {} days.",
                    elapsed.years, elapsed.days
                ))?;
                self.io.say(format!("TOTAL DAYS: {}", elapsed.total_days))?;
            }
            None => self.io.say("This battle is dated after today.")?,
        }

        self.rule('-')
    }

    /// Ask for a battle name; prints the not-found message on a miss
    fn find_battle(&mut self) -> AppResult<Option<Battle>> {
        let name = self.io.ask("\nEnter name of battle: ")?;

        let found = self.service.lookup(&name).cloned();
        if found.is_none() {
            self.io.say(format!(
                "\nError: Battle '{}' not found.",
                title_case(&name)
            ))?;
        }
        Ok(found)
    }

    fn rule(&mut self, ch: char) -> AppResult<()> {
        self.io.say(ch.to_string().repeat(RULE_WIDTH))
    }
}

/// Secondary lines printed under a battle in the full listing
fn battle_notes(battle: &Battle) -> Vec<String> {
    let mut notes = Vec::new();

    if !battle.winner.is_empty() && !battle.loser.is_empty() {
        notes.push(format!("\nWINNER/LOSER: {} vs {}", battle.winner, battle.loser));
    }
    if battle.total_victor_deaths > 0 {
        notes.push(format!(
            "Total Deaths of {}: {}",
            battle.winner,
            group_thousands(u64::from(battle.total_victor_deaths))
        ));
    }
    if battle.total_vanquished_deaths > 0 {
        notes.push(format!(
            "Total Deaths of {}: {}",
            battle.loser,
            group_thousands(u64::from(battle.total_vanquished_deaths))
        ));
    }
    if !battle.notable_figures.is_empty() {
        notes.push(format!("\nFIGURES PRESENT:\n{}", battle.notable_figures));
    }
    if !battle.notable_deaths.is_empty() {
        notes.push(format!("\nNOTABLE DEATHS:\n{}", battle.notable_deaths));
    }

    notes
}

/// 1234567 -> "1,234,567"
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    use crate::db::{create_memory_pool, get_connection, initialize_database};
    use crate::repositories::{BattleRepository, MockBattleRepository, SqliteBattleRepository};

    type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn memory_repo() -> Arc<SqliteBattleRepository> {
        let pool = create_memory_pool().unwrap();
        initialize_database(&get_connection(&pool).unwrap()).unwrap();
        Arc::new(SqliteBattleRepository::new(Arc::new(pool)))
    }

    fn hastings() -> Battle {
        Battle {
            winner: "Normans".to_string(),
            loser: "Anglo-Saxons".to_string(),
            victor_forces: 7000,
            vanquished_forces: 7000,
            total_victor_deaths: 2000,
            total_vanquished_deaths: 4000,
            ..Battle::new("Hastings", date(1066, 10, 14))
        }
    }

    fn console(repo: Arc<SqliteBattleRepository>, script: &str) -> TestConsole {
        let service = BattleService::load(repo).unwrap();
        Console::new(service, Cursor::new(script.as_bytes().to_vec()), Vec::new())
    }

    fn run(mut console: TestConsole) -> (BattleService, String) {
        console.run().unwrap();
        let (service, output) = console.into_parts();
        (service, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(6000), "6,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_exit_ends_session() {
        let (_, out) = run(console(memory_repo(), "\n10\n"));
        assert!(out.contains("Program now terminated."));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (_, out) = run(console(memory_repo(), "\n1\n"));
        assert!(out.contains("No battles recorded."));
    }

    #[test]
    fn test_invalid_menu_choice_reprompts() {
        let (_, out) = run(console(memory_repo(), "\n42\nabc\n9\n10\n"));
        assert_eq!(out.matches("Entry not valid. Please choose a menu option.").count(), 2);
        assert_eq!(out.matches("Menu Option: ").count(), 4);
    }

    #[test]
    fn test_add_then_display() {
        let repo = memory_repo();
        let script = "\n2\nbattle of hastings\n1066-10-14\nEngland\nnormans\nanglo-saxons\n\
                      7000\n7000\n2000\n4000\nWilliam, Harold\nHarold Godwinson\n1\n10\n";

        let (service, out) = run(console(repo.clone(), script));

        assert!(out.contains("Battle successfully added to the list!"));
        assert!(out.contains("Battle Of Hastings"));
        assert!(out.contains("WINNER/LOSER: Normans vs Anglo-Saxons"));
        assert!(out.contains("6,000"));
        assert_eq!(service.len(), 1);
        assert_eq!(repo.list_all().unwrap(), service.battles());
    }

    #[test]
    fn test_add_retries_bad_numbers() {
        let repo = memory_repo();
        let script = "\n2\nWaterloo\n18-06-1815\n1815-06-18\nBelgium\nCoalition\nFrance\n\
                      -5\nlots\n118000\n73000\n24000\n41000\n\n\n10\n";

        let (service, out) = run(console(repo, script));

        assert!(out.contains("Please use YYYY-MM-DD."));
        assert!(out.contains("Value must be zero or greater."));
        assert!(out.contains("Invalid input. Please enter a whole number."));
        assert_eq!(service.battles()[0].victor_forces, 118000);
    }

    #[test]
    fn test_edit_session() {
        let repo = memory_repo();
        repo.create(&hastings()).unwrap();
        let script = "\n3\nhastings\n9\n-5\nabc\n5000\n12\n6\n7100\n0\n10\n";

        let (service, out) = run(console(repo.clone(), script));

        assert!(out.contains("Value must be zero or greater."));
        assert!(out.contains("Invalid input. Please enter a whole number."));
        assert!(out.contains("Invalid option number. Please try again."));
        assert!(out.contains("Successfully updated 'Total Vanquished Deaths'."));
        assert!(out.contains("Edit finished. Returning to menu."));

        let stored = repo.list_all().unwrap();
        assert_eq!(stored[0].total_deaths(), 7000);
        assert_eq!(stored[0].victor_forces, 7100);
        assert_eq!(stored.as_slice(), service.battles());
    }

    #[test]
    fn test_edit_non_numeric_choice_returns_to_menu() {
        let repo = memory_repo();
        repo.create(&hastings()).unwrap();

        let (_, out) = run(console(repo, "\n3\nHastings\nname\n10\n"));
        assert!(out.contains("Invalid input. Returning to main menu."));
    }

    #[test]
    fn test_delete_confirmed() {
        let repo = memory_repo();
        repo.create(&hastings()).unwrap();

        let (service, out) = run(console(repo.clone(), "\n4\nHASTINGS\n1\n10\n"));

        assert!(out.contains("Successfully deleted the Battle of Hastings."));
        assert!(service.is_empty());
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_cancelled() {
        let repo = memory_repo();
        repo.create(&hastings()).unwrap();

        let (service, out) = run(console(repo.clone(), "\n4\nhastings\n2\n4\nhastings\nmaybe\n10\n"));

        assert!(out.contains("Deletion Cancelled."));
        assert!(out.contains("Invalid Choice. Deletion Cancelled."));
        assert_eq!(service.len(), 1);
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_look_up() {
        let repo = memory_repo();
        repo.create(&hastings()).unwrap();

        let (_, out) = run(console(repo, "\n7\nhastings\n7\nthe alamo\n10\n"));

        assert!(out.contains("BATTLE DETAILS"));
        assert!(out.contains("Total Deaths: 6,000"));
        assert!(out.contains("Error: Battle 'The Alamo' not found."));
    }

    #[test]
    fn test_sorted_listings() {
        let repo = memory_repo();
        repo.create(&Battle::new("Waterloo", date(1815, 6, 18))).unwrap();
        repo.create(&hastings()).unwrap();
        repo.create(&Battle::new("Agincourt", date(1415, 10, 25))).unwrap();

        let (_, out) = run(console(repo, "\n5\n6\n10\n"));

        let oldest = out.find("Battles - Oldest to Most Recent").unwrap();
        let newest = out.find("Battles - Most Recent to Oldest").unwrap();
        let (asc, desc) = out.split_at(newest);
        let asc = &asc[oldest..];

        assert!(asc.find("Hastings").unwrap() < asc.find("Agincourt").unwrap());
        assert!(asc.find("Agincourt").unwrap() < asc.find("Waterloo").unwrap());
        assert!(desc.find("Waterloo").unwrap() < desc.find("Agincourt").unwrap());
        assert!(desc.find("Agincourt").unwrap() < desc.find("Hastings").unwrap());
    }

    #[test]
    fn test_time_since() {
        let repo = memory_repo();
        repo.create(&hastings()).unwrap();

        let console = console(repo, "\n8\nhastings\n10\n").with_today(|| date(2066, 10, 20));
        let (_, out) = run(console);

        assert!(out.contains("TODAY'S DATE: 2066-10-20"));
        assert!(out.contains("TIME ELAPSED: 1000 years and 6 days."));
        assert!(out.contains("TOTAL DAYS: 365249"));
    }

    #[test]
    fn test_failed_delete_does_not_end_session() {
        let repo = memory_repo();
        repo.create(&hastings()).unwrap();
        let service = BattleService::load(repo.clone()).unwrap();
        // Row vanishes behind the collection's back
        repo.delete(service.battles()[0].id.unwrap()).unwrap();

        let console = Console::new(
            service,
            Cursor::new(b"\n4\nhastings\n1\n10\n".to_vec()),
            Vec::new(),
        );
        let (_, out) = run(console);

        assert!(out.contains("An unexpected error occurred: That battle no longer exists."));
        assert!(out.contains("Program now terminated."));
    }

    #[test]
    fn test_storage_failure_shows_details() {
        let mut mock = MockBattleRepository::new();
        mock.expect_list_all().returning(|| {
            Ok(vec![Battle {
                id: Some(crate::domain::BattleId::new(1)),
                ..hastings()
            }])
        });
        mock.expect_delete()
            .times(1)
            .returning(|_| Err(AppError::Database(rusqlite::Error::QueryReturnedNoRows)));

        let service = BattleService::load(Arc::new(mock)).unwrap();
        let console = Console::new(
            service,
            Cursor::new(b"\n4\nhastings\n1\n10\n".to_vec()),
            Vec::new(),
        );
        let (service, out) = run(console);

        assert!(out.contains("An unexpected error occurred: Database operation failed"));
        assert!(out.contains("Details: Check logs for details"));
        assert!(!out.contains("QueryReturnedNoRows"));
        assert_eq!(service.len(), 1);
    }
}
