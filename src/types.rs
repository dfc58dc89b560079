//! Type definitions and constants for the month view.

use std::collections::BTreeMap;

use chrono::{Locale, NaiveDate};

use crate::error::{CalendarError, Result};

/// Number of week rows shown when nothing else is configured.
pub const DEFAULT_VISIBLE_WEEKS: u32 = 6;
/// Ten years of weeks.
pub const MAX_VISIBLE_WEEKS: u32 = 520;
pub const DAYS_PER_WEEK: usize = 7;
/// Events shown per day cell; the rest are hidden, never dropped from the source.
pub const MAX_VISIBLE_EVENTS: usize = 3;

// Cell width bounds for auto mode; wide enough for "Mar 31", narrow enough for 80 columns.
pub const MIN_CELL_WIDTH: usize = 6;
pub const MAX_CELL_WIDTH: usize = 16;
pub const DEFAULT_CELL_WIDTH: usize = 10;

// Color is enabled by default for better user experience
pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";

/// Number of week rows in the grid, between 1 and `MAX_VISIBLE_WEEKS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWeeks(u32);

impl VisibleWeeks {
    /// # Errors
    /// Returns `CalendarError::InvalidConfiguration` for zero or more than
    /// `MAX_VISIBLE_WEEKS`.
    pub fn new(weeks: u32) -> Result<Self> {
        if !(1..=MAX_VISIBLE_WEEKS).contains(&weeks) {
            return Err(CalendarError::InvalidConfiguration(format!(
                "visible weeks must be between 1 and {}, got {}",
                MAX_VISIBLE_WEEKS, weeks
            )));
        }
        Ok(Self(weeks))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn cell_count(self) -> usize {
        self.0 as usize * DAYS_PER_WEEK
    }
}

impl Default for VisibleWeeks {
    fn default() -> Self {
        Self(DEFAULT_VISIBLE_WEEKS)
    }
}

/// Width of one day cell in terminal columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellWidth {
    /// Fixed number of columns.
    Fixed(usize),
    /// Derive from terminal width.
    Auto,
}

/// View options shared by grid construction and rendering.
#[derive(Clone, Debug)]
pub struct ViewContext {
    pub visible_weeks: VisibleWeeks,
    /// Today's date for highlighting; injected so grids stay reproducible.
    pub today: NaiveDate,
    /// Locale used for month and weekday names.
    pub locale: Locale,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    pub cell_width: CellWidth,
    /// Whether to prefix each week with its US week number.
    pub week_numbers: bool,
}

/// An item attached to a day. Owned by the caller; cells hold copies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Event {
    pub description: Option<String>,
}

impl Event {
    pub fn new(description: impl Into<String>) -> Self {
        Event {
            description: Some(description.into()),
        }
    }

    /// Display text; an event without a description shows as empty.
    pub fn label(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Events keyed by calendar date, in insertion order per day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventBook {
    days: BTreeMap<NaiveDate, Vec<Event>>,
}

impl EventBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, date: NaiveDate, event: Event) {
        self.days.entry(date).or_default().push(event);
    }

    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of events across all days.
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// One date's slot in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// Actual calendar date of the cell.
    pub date: NaiveDate,
    /// Day number within the cell's own month.
    pub day_of_month: u32,
    pub is_weekend: bool,
    pub is_today: bool,
    pub is_in_current_month: bool,
    /// Short month name, present only where a month begins.
    pub month_label: Option<String>,
    pub events: Vec<Event>,
}

/// Seven consecutive days starting on Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow(Vec<DayCell>);

impl WeekRow {
    pub(crate) fn new(days: Vec<DayCell>) -> Self {
        debug_assert_eq!(days.len(), DAYS_PER_WEEK);
        WeekRow(days)
    }

    pub fn days(&self) -> &[DayCell] {
        &self.0
    }
}

/// Day cells for the visible weeks, plus the reference month's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// First day of the reference month.
    pub month_start: NaiveDate,
    /// Full localized month name for the header.
    pub month_name: String,
    pub year: i32,
    pub days_in_month: u32,
    pub weeks: Vec<WeekRow>,
}

impl Grid {
    /// All cells in display order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|w| w.days().iter())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&DayCell> {
        self.weeks.get(row).and_then(|w| w.days().get(col))
    }
}
