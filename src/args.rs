//! Command-line argument parsing using clap.
//!
//! Positional arguments follow util-linux cal convention: `[[day] month] year`

use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, ValueHint};

use crate::config::AppConfig;
use crate::error::{CalendarError, Result};
use crate::formatter::{get_system_locale, parse_locale, parse_month};
use crate::navigation::NavAction;
use crate::types::{
    COLOR_ENABLED_BY_DEFAULT, CellWidth, DEFAULT_VISIBLE_WEEKS, MIN_CELL_WIDTH, ViewContext,
    VisibleWeeks,
};

#[derive(Parser, Debug)]
#[command(name = "monthview")]
#[command(about = "Displays a month view with events and navigation", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Number of week rows to display (default 6).
    #[arg(short = 'w', long = "weeks", help_heading = "Display options", value_name = "num")]
    pub weeks: Option<u32>,

    /// Show US week numbers in front of each week.
    #[arg(short = 'N', long, help_heading = "Display options")]
    pub week_numbers: bool,

    /// Width of a day cell in columns (or "auto" for terminal width).
    #[arg(
        short = 'c',
        long = "cell-width",
        help_heading = "Display options",
        value_name = "width"
    )]
    pub cell_width: Option<String>,

    /// Press a header button before displaying (prev, next, today); repeatable.
    #[arg(
        short = 'g',
        long = "go",
        help_heading = "Navigation",
        value_name = "action"
    )]
    pub go: Vec<NavAction>,

    /// Read navigation commands from standard input.
    #[arg(short = 'i', long, help_heading = "Navigation")]
    pub interactive: bool,

    /// TOML file with [[event]] entries (`date` as 2024-03-05 or "2024-03-05") to show in the grid.
    #[arg(short = 'e', long, help_heading = "Input options", value_name = "file", value_hint = ValueHint::FilePath)]
    pub events: Option<PathBuf>,

    /// Config file (default: <config dir>/monthview/config.toml).
    #[arg(long, help_heading = "Input options", value_name = "file", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub no_color: bool,

    /// Day (1-31) - optional, used with month and year.
    #[arg(index = 1, default_value = None, value_name = "day", value_hint = ValueHint::Other)]
    pub day_arg: Option<String>,

    /// Month (1-12 or name) - optional, used with year.
    #[arg(index = 2, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 3, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display a month view, or page through months.

Without any arguments, display the current month.

Examples:
  monthview                  Display current month
  monthview 3 2024           Display March 2024
  monthview 15 3 2024        Display March 2024, centered on the 15th
  monthview -g next          Display next month
  monthview -w 4 -e ev.toml  Four weeks with events from ev.toml
  monthview -i               Page interactively (p, n, t, pick <row> <col>, q)

Environment:
  MONTHVIEW_LOG        log filter for stderr output (default: warn)
  MONTHVIEW_TEST_TIME  pin today's date (YYYY-MM-DD)";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl ViewContext {
    /// Combine command-line flags with config file values; flags win.
    pub fn new(args: &Args, config: &AppConfig, today: NaiveDate) -> Result<Self> {
        let visible_weeks = VisibleWeeks::new(
            args.weeks
                .or(config.visible_weeks)
                .unwrap_or(DEFAULT_VISIBLE_WEEKS),
        )?;

        let color = !args.no_color
            && config.color.unwrap_or(COLOR_ENABLED_BY_DEFAULT)
            && std::io::stdout().is_terminal();

        let cell_width = match args.cell_width.as_deref() {
            Some("auto") => CellWidth::Auto,
            Some(s) => CellWidth::Fixed(parse_cell_width(s)?),
            None => match config.cell_width {
                Some(n) => CellWidth::Fixed(check_cell_width(n)?),
                None => CellWidth::Auto,
            },
        };

        let locale = match config.locale.as_deref() {
            Some(name) => parse_locale(name).ok_or_else(|| {
                CalendarError::InvalidConfiguration(format!("unknown locale: {}", name))
            })?,
            None => get_system_locale(),
        };

        Ok(ViewContext {
            visible_weeks,
            today,
            locale,
            color,
            cell_width,
            week_numbers: args.week_numbers || config.week_numbers.unwrap_or(false),
        })
    }
}

fn parse_cell_width(s: &str) -> Result<usize> {
    let n = s
        .parse::<usize>()
        .map_err(|_| CalendarError::InvalidConfiguration(format!("invalid cell width: {}", s)))?;
    check_cell_width(n)
}

fn check_cell_width(n: usize) -> Result<usize> {
    if n < MIN_CELL_WIDTH {
        return Err(CalendarError::InvalidConfiguration(format!(
            "cell width must be at least {}, got {}",
            MIN_CELL_WIDTH, n
        )));
    }
    Ok(n)
}

fn parse_year(s: &str) -> Result<i32> {
    let year = s
        .parse::<i32>()
        .map_err(|_| CalendarError::InvalidArgument(format!("invalid year: {}", s)))?;
    if !(1..=9999).contains(&year) {
        return Err(CalendarError::InvalidArgument(format!(
            "invalid year: {} (must be 1-9999)",
            year
        )));
    }
    Ok(year)
}

fn parse_month_arg(s: &str) -> Result<u32> {
    parse_month(s).ok_or_else(|| CalendarError::InvalidArgument(format!("invalid month: {}", s)))
}

fn first_of(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CalendarError::InvalidDate(format!("{}-{:02}-01", year, month)))
}

/// Calculate the reference date from positional arguments.
///
/// Argument patterns:
/// - no args: today
/// - 1 arg: year (4 digits, month kept from today) or month (1-2 digits or name)
/// - 2 args: month year
/// - 3 args: day month year
pub fn get_display_date(args: &Args, today: NaiveDate) -> Result<NaiveDate> {
    match (
        args.day_arg.as_deref(),
        args.month_arg.as_deref(),
        args.year_arg.as_deref(),
    ) {
        (None, None, None) => Ok(today),
        (Some(val), None, None) => {
            if let Ok(num) = val.parse::<i32>()
                && (1000..=9999).contains(&num)
            {
                return first_of(num, today.month());
            }
            match parse_month(val) {
                Some(month) => first_of(today.year(), month),
                None => Err(CalendarError::InvalidArgument(val.to_string())),
            }
        }
        (Some(month), Some(year), None) => first_of(parse_year(year)?, parse_month_arg(month)?),
        (Some(day), Some(month), Some(year)) => {
            let day = day
                .parse::<u32>()
                .map_err(|_| CalendarError::InvalidArgument(format!("invalid day: {}", day)))?;
            let month = parse_month_arg(month)?;
            let year = parse_year(year)?;
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
                CalendarError::InvalidDate(format!("{}-{:02}-{:02}", year, month, day))
            })
        }
        _ => Err(CalendarError::InvalidArgument(
            "invalid argument combination".to_string(),
        )),
    }
}
