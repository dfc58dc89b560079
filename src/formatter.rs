//! Presentation: day cells to renderable days, and renderable days to terminal lines.

use chrono::{Days, Locale, NaiveDate};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::calendar::week_number;
use crate::navigation::NavAction;
use crate::types::{
    COLOR_DIM, COLOR_RED, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL,
    DAYS_PER_WEEK, DayCell, Event, Grid, MAX_VISIBLE_EVENTS, ViewContext, WeekRow,
};

/// Header buttons, left to right.
pub const HEADER_BUTTONS: [(&str, NavAction); 3] = [
    ("[<]", NavAction::Prev),
    ("[Today]", NavAction::Today),
    ("[>]", NavAction::Next),
];

const WEEK_NUMBER_GUTTER: usize = 3;

/// Display states of a day. Independent; any combination may be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayStates {
    pub weekend: bool,
    pub today: bool,
    pub out_of_month: bool,
}

impl DayStates {
    /// ANSI prefix combining every active state, empty when none is set.
    pub fn style(&self) -> String {
        let mut style = String::new();
        if self.out_of_month {
            style.push_str(COLOR_DIM);
        }
        if self.weekend {
            style.push_str(COLOR_RED);
        }
        if self.today {
            style.push_str(COLOR_REVERSE);
        }
        style
    }
}

/// Payload handed to a day click handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayClick {
    pub date: NaiveDate,
    /// Index of the clicked item, if the click landed on one.
    pub item: Option<usize>,
}

/// A day cell ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableDay {
    pub date: NaiveDate,
    pub value: u32,
    pub month_label: Option<String>,
    /// At most `MAX_VISIBLE_EVENTS`, in source order.
    pub items: Vec<Event>,
    pub states: DayStates,
}

impl RenderableDay {
    /// Report a click to `handler` with the day's column. No handler, no effect.
    pub fn click(
        &self,
        item: Option<usize>,
        index_in_week: usize,
        handler: Option<&mut dyn FnMut(&DayClick, usize)>,
    ) {
        if let Some(handler) = handler {
            let click = DayClick {
                date: self.date,
                item: item.filter(|&i| i < self.items.len()),
            };
            handler(&click, index_in_week);
        }
    }
}

/// Map a cell to its renderable form, keeping only the first events.
pub fn to_renderable_day(cell: &DayCell) -> RenderableDay {
    RenderableDay {
        date: cell.date,
        value: cell.day_of_month,
        month_label: cell.month_label.clone(),
        items: cell.events.iter().take(MAX_VISIBLE_EVENTS).cloned().collect(),
        states: DayStates {
            weekend: cell.is_weekend,
            today: cell.is_today,
            out_of_month: !cell.is_in_current_month,
        },
    }
}

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .ok()
        .and_then(|s| parse_locale(&s))
        .unwrap_or(Locale::en_US)
}

/// Parse a POSIX locale string such as `de_DE.UTF-8` or `sr_RS@latin`.
pub fn parse_locale(s: &str) -> Option<Locale> {
    let name = s.split('.').next()?.split('@').next()?;
    name.parse().ok()
}

fn format_month_date(month: u32, pattern: &str, locale: Locale) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|date| date.format_localized(pattern, locale).to_string())
        .unwrap_or_default()
}

/// Get full month name for `locale`.
pub fn get_month_name(month: u32, locale: Locale) -> String {
    format_month_date(month, "%B", locale)
}

/// Get abbreviated month name for `locale`, used for month labels.
pub fn get_short_month_name(month: u32, locale: Locale) -> String {
    format_month_date(month, "%b", locale)
}

/// Weekday abbreviations in grid order, Sunday first.
pub fn get_weekday_short_names(locale: Locale) -> Vec<String> {
    // 2000-01-02 was a Sunday
    let Some(sunday) = NaiveDate::from_ymd_opt(2000, 1, 2) else {
        return Vec::new();
    };
    (0..DAYS_PER_WEEK as u64)
        .filter_map(|offset| sunday.checked_add_days(Days::new(offset)))
        .map(|date| date.format_localized("%a", locale).to_string())
        .collect()
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    let s_lower = s.to_lowercase();
    let month_names: [(&str, u32); 23] = [
        ("january", 1),
        ("february", 2),
        ("march", 3),
        ("april", 4),
        ("may", 5),
        ("june", 6),
        ("july", 7),
        ("august", 8),
        ("september", 9),
        ("october", 10),
        ("november", 11),
        ("december", 12),
        ("jan", 1),
        ("feb", 2),
        ("mar", 3),
        ("apr", 4),
        ("jun", 6),
        ("jul", 7),
        ("aug", 8),
        ("sep", 9),
        ("oct", 10),
        ("nov", 11),
        ("dec", 12),
    ];
    month_names
        .iter()
        .find(|(name, _)| *name == s_lower)
        .map(|(_, num)| *num)
}

/// Truncate `text` to `width` display columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Truncate or right-pad `text` to exactly `width` display columns.
fn fit_left(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Truncate or left-pad `text` to exactly `width` display columns.
fn fit_right(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(padding), text)
}

fn paint(text: &str, style: &str, color: bool) -> String {
    if color && !style.is_empty() {
        format!("{}{}{}", style, text, COLOR_RESET)
    } else {
        text.to_string()
    }
}

/// Width of a full calendar line, gutter included.
pub fn calendar_width(ctx: &ViewContext, cell_width: usize) -> usize {
    let gutter = if ctx.week_numbers {
        WEEK_NUMBER_GUTTER
    } else {
        0
    };
    gutter + DAYS_PER_WEEK * cell_width + (DAYS_PER_WEEK - 1)
}

/// Month and year on the left, navigation buttons on the right.
pub fn format_header(ctx: &ViewContext, grid: &Grid, cell_width: usize) -> String {
    let title = format!("{} {}", grid.month_name, grid.year);
    let buttons = HEADER_BUTTONS
        .iter()
        .map(|(label, _)| *label)
        .collect::<Vec<_>>()
        .join(" ");
    let gap = calendar_width(ctx, cell_width)
        .saturating_sub(title.width() + buttons.width())
        .max(1);
    format!(
        "{}{}{}",
        paint(&title, COLOR_TEAL, ctx.color),
        " ".repeat(gap),
        buttons
    )
}

/// Weekday abbreviations aligned over the day columns.
pub fn format_weekday_headers(ctx: &ViewContext, cell_width: usize) -> String {
    let mut result = String::new();
    if ctx.week_numbers {
        result.push_str(&" ".repeat(WEEK_NUMBER_GUTTER));
    }

    let cells = get_weekday_short_names(ctx.locale)
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let text = fit_right(name, cell_width);
            let style = if ctx.is_weekend_column(i) {
                COLOR_RED
            } else {
                COLOR_SAND_YELLOW
            };
            paint(&text, style, ctx.color)
        })
        .collect::<Vec<_>>();
    result.push_str(&cells.join(" "));
    result
}

/// Badge text: month label on the left, day number on the right.
fn format_badge(day: &RenderableDay, width: usize) -> String {
    let number = day.value.to_string();
    let label_room = width.saturating_sub(number.len() + 1);
    let label = day
        .month_label
        .as_deref()
        .map(|l| truncate_to_width(l, label_room))
        .unwrap_or_default();
    let gap = width.saturating_sub(label.width() + number.len());
    format!("{}{}{}", label, " ".repeat(gap), number)
}

/// Lines for one week: a badge line, then one line per visible item depth.
pub fn format_week(ctx: &ViewContext, week: &WeekRow, cell_width: usize) -> Vec<String> {
    let days: Vec<RenderableDay> = week.days().iter().map(to_renderable_day).collect();
    let depth = days.iter().map(|d| d.items.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(depth + 1);

    let mut badge_line = String::new();
    if ctx.week_numbers {
        // Saturday decides, so the week holding January 1 is week 1
        let number = week.days().last().map(|d| week_number(d.date)).unwrap_or(0);
        badge_line.push_str(&format!("{:>2} ", number));
    }
    let badges = days
        .iter()
        .map(|d| paint(&format_badge(d, cell_width), &d.states.style(), ctx.color))
        .collect::<Vec<_>>();
    badge_line.push_str(&badges.join(" "));
    lines.push(badge_line);

    for row in 0..depth {
        let mut line = String::new();
        if ctx.week_numbers {
            line.push_str(&" ".repeat(WEEK_NUMBER_GUTTER));
        }
        let items = days
            .iter()
            .map(|d| {
                let text = d.items.get(row).map(Event::label).unwrap_or("");
                let style = if d.states.out_of_month { COLOR_DIM } else { "" };
                paint(&fit_left(text, cell_width), style, ctx.color)
            })
            .collect::<Vec<_>>();
        line.push_str(items.join(" ").trim_end());
        lines.push(line);
    }

    lines
}

/// Format the whole widget: header, weekday row and every week.
pub fn format_calendar(ctx: &ViewContext, grid: &Grid) -> Vec<String> {
    let cell_width = ctx.cell_width();
    let mut lines = Vec::with_capacity(2 + grid.weeks.len() * (1 + MAX_VISIBLE_EVENTS));
    lines.push(format_header(ctx, grid, cell_width));
    lines.push(format_weekday_headers(ctx, cell_width));
    for week in &grid.weeks {
        lines.extend(format_week(ctx, week, cell_width));
    }
    lines
}

/// Full event list of one day, for detail output after a pick.
pub fn format_day_details(cell: &DayCell) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} {})",
        cell.date.format("%Y-%m-%d"),
        cell.events.len(),
        if cell.events.len() == 1 { "event" } else { "events" }
    )];
    lines.extend(cell.events.iter().map(|e| format!("  - {}", e.label())));
    lines
}
