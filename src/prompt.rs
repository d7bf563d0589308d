//! Console prompts. Validation lives in [`crate::filters`]; this module only
//! shuttles text between the user and those pure resolvers.

use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use tracing::debug;

use crate::config::CityConfig;
use crate::filters::{Rejection, Selection, resolve_city, resolve_day, resolve_month};
use crate::output::RULE;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `text` to the user-facing stream.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Reads one trimmed line after showing `question`.
    ///
    /// # Errors
    ///
    /// Returns an error once the input stream is exhausted.
    pub fn read_answer(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input stream closed");
        }
        Ok(line.trim().to_string())
    }

    /// Asks until `resolve` accepts the answer, echoing each rejection.
    pub fn ask<T>(
        &mut self,
        question: &str,
        resolve: impl Fn(&str) -> Result<T, Rejection>,
    ) -> Result<T> {
        loop {
            let answer = self.read_answer(question)?;
            match resolve(&answer) {
                Ok(value) => return Ok(value),
                Err(rejection) => {
                    debug!(input = %rejection.input, "Rejected input");
                    self.say(&rejection.to_string())?;
                }
            }
        }
    }

    /// True only for a (case-insensitive) `yes`.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.read_answer(question)?.eq_ignore_ascii_case("yes"))
    }

    /// Asks for city, month and day.
    pub fn get_filters(&mut self, cities: &CityConfig) -> Result<Selection> {
        self.say("Hello! Let's explore some US bikeshare data!")?;

        let city_list = title_case_list(cities.names());
        let city = self.ask(
            &format!("Would you like to see data for {city_list}? "),
            |raw| resolve_city(raw, cities),
        )?;
        let month = self.ask(
            "Which month? January, February, March, April, May, June, or \"all\"? ",
            resolve_month,
        )?;
        let day = self.ask(
            "Which day? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday, or \"all\"? ",
            resolve_day,
        )?;

        self.say(RULE)?;
        Ok(Selection { city, month, day })
    }
}

/// `["chicago", "new york city"]` → `"Chicago, or New York City"`.
fn title_case_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<String> = names
        .map(|name| {
            name.split(' ')
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    match names.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{}, or {last}", rest.join(", ")),
        Some((last, _)) => last.clone(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Month, Period, Weekday};
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_get_filters_reprompts_until_valid() {
        let mut p = prompter("boston\nChicago\njuly\nmarch\nall\n");
        let selection = p.get_filters(&CityConfig::with_data_dir("data")).unwrap();

        assert_eq!(selection.city, "chicago");
        assert_eq!(selection.month, Period::Only(Month::March));
        assert_eq!(selection.day, Period::<Weekday>::All);

        let shown = String::from_utf8(p.output).unwrap();
        assert_eq!(shown.matches("Invalid input.").count(), 2);
        assert!(shown.contains("Chicago, New York City, or Washington?"));
        assert!(shown.contains("one of the following: chicago, new york city, washington"));
    }

    #[test]
    fn test_ask_fails_on_closed_input() {
        let mut p = prompter("boston\n");
        let err = p.get_filters(&CityConfig::with_data_dir("data")).unwrap_err();
        assert_eq!(err.to_string(), "input stream closed");
    }

    #[test]
    fn test_confirm() {
        let mut p = prompter("YES\nno\ny\n");
        assert!(p.confirm("? ").unwrap());
        assert!(!p.confirm("? ").unwrap());
        assert!(!p.confirm("? ").unwrap());
    }

    #[test]
    fn test_title_case_list() {
        assert_eq!(title_case_list(["washington"].into_iter()), "Washington");
        assert_eq!(
            title_case_list(["chicago", "new york city"].into_iter()),
            "Chicago, or New York City"
        );
    }
}
