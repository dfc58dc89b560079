//! Date-grid computation: which dates fill each cell of the month view.

use chrono::{Datelike, Days, Months, NaiveDate};
use tracing::{debug, trace};

use crate::error::{CalendarError, Result};
use crate::formatter::{get_month_name, get_short_month_name};
use crate::types::{
    CellWidth, DAYS_PER_WEEK, DEFAULT_CELL_WIDTH, DayCell, EventBook, Grid, MAX_CELL_WIDTH,
    MIN_CELL_WIDTH, ViewContext, WeekRow,
};

/// Number of days in `month` of `year`.
///
/// `None` for an invalid month, or for a month whose successor chrono cannot represent.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Weekday column of `date` in a Sunday-first week (0 = Sunday .. 6 = Saturday).
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// US week number: week starts on Sunday, week 1 contains January 1.
pub fn week_number(date: NaiveDate) -> u32 {
    let jan1_weekday = date
        .with_ordinal(1)
        .map(weekday_index)
        .unwrap_or_default();
    (date.ordinal0() + jan1_weekday) / 7 + 1
}

impl ViewContext {
    /// Sunday and Saturday columns.
    pub fn is_weekend_column(&self, column: usize) -> bool {
        column == 0 || column == DAYS_PER_WEEK - 1
    }

    /// Cell width in columns, resolving `Auto` from the terminal.
    pub fn cell_width(&self) -> usize {
        match self.cell_width {
            CellWidth::Fixed(n) => n,
            CellWidth::Auto => {
                let gutter = if self.week_numbers { 3 } else { 0 };
                match get_terminal_width() {
                    // one separator column per cell
                    Some(w) => (w.saturating_sub(gutter) / DAYS_PER_WEEK)
                        .saturating_sub(1)
                        .clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH),
                    None => DEFAULT_CELL_WIDTH,
                }
            }
        }
    }
}

/// Build the grid of `ctx.visible_weeks` rows around the month of `reference`.
///
/// The grid starts on the Sunday on or before the first of the month and
/// covers consecutive dates. Out-of-month cells keep the day number of their
/// own month. Events for each date are copied out of `events`; the book
/// itself is never modified.
///
/// # Errors
/// Returns `CalendarError::DateOutOfRange` when the grid would leave the
/// range of dates chrono can represent. The check runs before any cell is built.
pub fn build_grid(ctx: &ViewContext, reference: NaiveDate, events: &EventBook) -> Result<Grid> {
    let month_start = first_of_month(reference);
    let year = month_start.year();
    let days_in_month =
        days_in_month(year, month_start.month()).ok_or(CalendarError::DateOutOfRange)?;
    let month_start_index = weekday_index(month_start);

    let days_in_prev_month = if month_start_index > 0 {
        let last_of_prev = month_start.pred_opt().ok_or(CalendarError::DateOutOfRange)?;
        self::days_in_month(last_of_prev.year(), last_of_prev.month())
            .ok_or(CalendarError::DateOutOfRange)?
    } else {
        0
    };

    let mut cursor = month_start
        .checked_sub_days(Days::new(u64::from(month_start_index)))
        .ok_or(CalendarError::DateOutOfRange)?;

    let total_cells = ctx.visible_weeks.cell_count();
    // Range check before anything is allocated.
    let last_cell = cursor
        .checked_add_days(Days::new(total_cells as u64 - 1))
        .ok_or(CalendarError::DateOutOfRange)?;

    debug!(
        %month_start,
        weeks = ctx.visible_weeks.get(),
        first_cell = %cursor,
        %last_cell,
        "building month grid"
    );

    let mut weeks = Vec::with_capacity(ctx.visible_weeks.get() as usize);
    let mut days = Vec::with_capacity(DAYS_PER_WEEK);

    for cell_index in 0..total_cells {
        let column = cell_index % DAYS_PER_WEEK;
        let raw = cell_index as i64 - i64::from(month_start_index) + 1;

        let (day_of_month, is_in_current_month) = if raw < 1 {
            ((i64::from(days_in_prev_month) + raw) as u32, false)
        } else if raw > i64::from(days_in_month) {
            // Grids longer than the next month keep counting in the cell's own month.
            (cursor.day(), false)
        } else {
            (raw as u32, true)
        };
        debug_assert_eq!(day_of_month, cursor.day());

        let source = events.events_on(cursor);
        if source.iter().any(|e| e.description.is_none()) {
            debug!(date = %cursor, "event without description");
        }

        days.push(DayCell {
            date: cursor,
            day_of_month,
            is_weekend: ctx.is_weekend_column(column),
            is_today: cursor == ctx.today,
            is_in_current_month,
            month_label: (day_of_month == 1)
                .then(|| get_short_month_name(cursor.month(), ctx.locale)),
            events: source.to_vec(),
        });

        if column == DAYS_PER_WEEK - 1 {
            trace!(week = weeks.len(), starts = %days[0].date, "week complete");
            weeks.push(WeekRow::new(std::mem::replace(
                &mut days,
                Vec::with_capacity(DAYS_PER_WEEK),
            )));
        }

        if cell_index + 1 < total_cells {
            cursor = cursor.succ_opt().ok_or(CalendarError::DateOutOfRange)?;
        }
    }

    Ok(Grid {
        month_start,
        month_name: get_month_name(month_start.month(), ctx.locale),
        year,
        days_in_month,
        weeks,
    })
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}
