// src/application/prompt.rs
//
// Line-oriented prompting over any reader/writer pair.
// Typed prompts re-ask until the input validates; end of input surfaces as
// `AppError::InputClosed` so callers can wind down instead of spinning.

use chrono::NaiveDate;
use std::fmt::Display;
use std::io::{BufRead, Write};

use super::error_handling::retry_message;
use crate::domain::{parse_count, parse_date, DomainResult};
use crate::error::{AppError, AppResult};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line
    pub fn say(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Show `label` and read one line, without its line ending
    pub fn ask(&mut self, label: &str) -> AppResult<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }

        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    /// Ask until `parse` accepts the answer, printing the retry message for
    /// each rejection
    pub fn ask_until<T, F>(&mut self, label: &str, parse: F) -> AppResult<T>
    where
        F: Fn(&str) -> DomainResult<T>,
    {
        loop {
            let raw = self.ask(label)?;
            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(e) => self.say(retry_message(&e))?,
            }
        }
    }

    pub fn ask_date(&mut self, label: &str) -> AppResult<NaiveDate> {
        self.ask_until(label, parse_date)
    }

    pub fn ask_count(&mut self, label: &str) -> AppResult<u32> {
        self.ask_until(label, parse_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(prompter: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(prompter.into_output()).unwrap()
    }

    #[test]
    fn test_ask_strips_line_ending() {
        let mut p = prompter("Waterloo\r\nnext\n");
        assert_eq!(p.ask("Name: ").unwrap(), "Waterloo");
        assert_eq!(p.ask("Name: ").unwrap(), "next");
        assert_eq!(output(p), "Name: Name: ");
    }

    #[test]
    fn test_ask_at_end_of_input() {
        let mut p = prompter("");
        assert!(matches!(p.ask("Name: "), Err(AppError::InputClosed)));
    }

    #[test]
    fn test_ask_count_retries_with_distinct_messages() {
        let mut p = prompter("-5\nmany\n7000\n");

        assert_eq!(p.ask_count("Victor Forces: ").unwrap(), 7000);

        let out = output(p);
        assert!(out.contains("Value must be zero or greater."));
        assert!(out.contains("Invalid input. Please enter a whole number."));
        assert_eq!(out.matches("Victor Forces: ").count(), 3);
    }

    #[test]
    fn test_ask_date_retries() {
        let mut p = prompter("14/10/1066\n1066-10-14\n");

        assert_eq!(
            p.ask_date("Date of Battle YYYY-MM-DD: ").unwrap(),
            NaiveDate::from_ymd_opt(1066, 10, 14).unwrap()
        );
        assert!(output(p).contains("Please use YYYY-MM-DD."));
    }

    #[test]
    fn test_retry_stops_at_end_of_input() {
        let mut p = prompter("-1\n");
        assert!(matches!(p.ask_count("Count: "), Err(AppError::InputClosed)));
    }
}
