//! Line-driven owner of the month view: holds the date, re-renders on change.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use clap::ValueEnum;
use tracing::{debug, info};

use crate::calendar::build_grid;
use crate::error::Result;
use crate::formatter::{
    DayClick, HEADER_BUTTONS, format_calendar, format_day_details, to_renderable_day,
};
use crate::navigation::{NavAction, Navigator};
use crate::types::{EventBook, ViewContext};

const PROMPT_HINT: &str = "commands: p(rev), n(ext), t(oday), pick <row> <col> [item], q(uit)";

/// One line of interactive input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Navigate(NavAction),
    /// Zero-based row and column, optional zero-based item.
    Pick {
        row: usize,
        col: usize,
        item: Option<usize>,
    },
    Help,
    Quit,
}

/// Parse a command line. Rows, columns and items are typed 1-based.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    if let Some((_, action)) = HEADER_BUTTONS
        .iter()
        .find(|(label, _)| label.trim_matches(['[', ']']).eq_ignore_ascii_case(first))
    {
        return Some(Command::Navigate(*action));
    }
    let command = match first {
        "q" | "quit" | "exit" => Command::Quit,
        "?" | "h" | "help" => Command::Help,
        "pick" => {
            let mut index =
                || -> Option<usize> { words.next()?.parse::<usize>().ok()?.checked_sub(1) };
            let row = index()?;
            let col = index()?;
            let item = index();
            Command::Pick { row, col, item }
        }
        word => Command::Navigate(NavAction::from_str(word, true).ok()?),
    };
    Some(command)
}

/// Owns the reference date for an interactive session.
pub struct Shell<'a> {
    ctx: &'a ViewContext,
    events: &'a EventBook,
    date: NaiveDate,
}

impl<'a> Shell<'a> {
    pub fn new(ctx: &'a ViewContext, events: &'a EventBook, date: NaiveDate) -> Self {
        Shell { ctx, events, date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Rebuild the grid from the current date and write it out.
    pub fn render(&self, out: &mut impl Write) -> Result<()> {
        let grid = build_grid(self.ctx, self.date, self.events)?;
        for line in format_calendar(self.ctx, &grid) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Render, then process commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        self.render(out)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Some(Command::Quit) => break,
                Some(command) => self.execute(command, out)?,
                None => writeln!(out, "unknown command: {}\n{}", line.trim(), PROMPT_HINT)?,
            }
        }
        info!(date = %self.date, "session finished");
        Ok(())
    }

    fn execute(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Navigate(action) => {
                let current = self.date;
                Navigator::new(self.ctx.today)
                    .on_change(|date| self.date = date)
                    .go(action, current)?;
                self.render(out)?;
            }
            Command::Pick { row, col, item } => self.pick(row, col, item, out)?,
            Command::Help => writeln!(out, "{}", PROMPT_HINT)?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn pick(
        &self,
        row: usize,
        col: usize,
        item: Option<usize>,
        out: &mut impl Write,
    ) -> Result<()> {
        let grid = build_grid(self.ctx, self.date, self.events)?;
        let Some(cell) = grid.cell(row, col) else {
            writeln!(out, "no day at row {}, column {}", row + 1, col + 1)?;
            return Ok(());
        };

        let mut clicked = None;
        to_renderable_day(cell).click(
            item,
            col,
            Some(&mut |click: &DayClick, index: usize| {
                clicked = Some((click.clone(), index))
            }),
        );

        if let Some((click, index)) = clicked {
            debug!(date = %click.date, item = ?click.item, index, "day picked");
            match click.item {
                Some(i) => writeln!(out, "picked {} item {}", click.date, i + 1)?,
                None => writeln!(out, "picked {}", click.date)?,
            }
        }
        for line in format_day_details(cell) {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}
