//! Month navigation: stateless date transforms reported through a callback.

use chrono::{Months, NaiveDate};
use clap::ValueEnum;
use tracing::debug;

use crate::calendar::first_of_month;
use crate::error::{CalendarError, Result};

/// Environment variable that pins "today" (format `YYYY-MM-DD`).
pub const TEST_TIME_ENV: &str = "MONTHVIEW_TEST_TIME";

/// Header button actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NavAction {
    /// Go to the first day of the previous month.
    #[value(alias = "p", alias = "previous")]
    Prev,
    /// Go to the first day of the next month.
    #[value(alias = "n")]
    Next,
    /// Go to the current date.
    #[value(alias = "t")]
    Today,
}

/// First day of the month before the one containing `current`.
pub fn previous_month(current: NaiveDate) -> Result<NaiveDate> {
    first_of_month(current)
        .checked_sub_months(Months::new(1))
        .ok_or(CalendarError::DateOutOfRange)
}

/// First day of the month after the one containing `current`.
pub fn next_month(current: NaiveDate) -> Result<NaiveDate> {
    first_of_month(current)
        .checked_add_months(Months::new(1))
        .ok_or(CalendarError::DateOutOfRange)
}

/// Get today's date, respecting MONTHVIEW_TEST_TIME environment variable for testing.
pub fn today() -> NaiveDate {
    if let Ok(test_time) = std::env::var(TEST_TIME_ENV)
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

/// Compute the date `action` leads to from `current`. `today` is returned as is.
pub fn resolve(action: NavAction, current: NaiveDate, today: NaiveDate) -> Result<NaiveDate> {
    match action {
        NavAction::Prev => previous_month(current),
        NavAction::Next => next_month(current),
        NavAction::Today => Ok(today),
    }
}

/// Turns button presses into new dates for the owner.
///
/// The navigator never stores a date: the owner passes the current one in and
/// receives the result through `on_change`.
pub struct Navigator<'a> {
    today: NaiveDate,
    on_change: Option<Box<dyn FnMut(NaiveDate) + 'a>>,
}

impl<'a> Navigator<'a> {
    pub fn new(today: NaiveDate) -> Self {
        Navigator {
            today,
            on_change: None,
        }
    }

    pub fn on_change(mut self, callback: impl FnMut(NaiveDate) + 'a) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Compute the target of `action` and report it exactly once.
    ///
    /// Without a callback the date is discarded.
    pub fn go(&mut self, action: NavAction, current: NaiveDate) -> Result<()> {
        let target = resolve(action, current, self.today)?;
        match self.on_change.as_mut() {
            Some(callback) => {
                debug!(?action, from = %current, to = %target, "navigate");
                callback(target);
            }
            None => debug!(?action, to = %target, "no change handler, date discarded"),
        }
        Ok(())
    }
}
