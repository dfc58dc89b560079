//! Month view CLI application.
//!
//! # Usage
//! ```ignore
//! monthview              // Current month
//! monthview 3 2024       // March 2024
//! monthview -g next      // Next month
//! monthview -e ev.toml   // With events
//! monthview -i           // Page with p / n / t, quit with q
//! ```

use std::cell::Cell;
use std::io::Write;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use monthview::args::{Args, get_display_date};
use monthview::calendar::build_grid;
use monthview::config::{AppConfig, load_events};
use monthview::error::Result;
use monthview::formatter::format_calendar;
use monthview::navigation::{Navigator, today};
use monthview::shell::Shell;
use monthview::types::{EventBook, ViewContext};

fn main() {
    init_logging();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("monthview: {}", e);
        std::process::exit(1);
    }
}

// Logging to stderr so it doesn't interfere with calendar output
fn init_logging() {
    let filter =
        EnvFilter::try_from_env("MONTHVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args) -> Result<()> {
    let today = today();
    let config = AppConfig::load(args.config.as_deref())?;
    let ctx = ViewContext::new(args, &config, today)?;

    let events = match args.events.as_deref().or(config.events_file.as_deref()) {
        Some(path) => load_events(path)?,
        None => EventBook::new(),
    };

    // Button presses from the command line, applied in order
    let date = Cell::new(get_display_date(args, today)?);
    let mut navigator = Navigator::new(today).on_change(|d| date.set(d));
    for &action in &args.go {
        navigator.go(action, date.get())?;
    }

    tracing::info!(date = %date.get(), weeks = ctx.visible_weeks.get(), "rendering");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.interactive {
        let stdin = std::io::stdin();
        Shell::new(&ctx, &events, date.get()).run(stdin.lock(), &mut out)?;
    } else {
        let grid = build_grid(&ctx, date.get(), &events)?;
        for line in format_calendar(&ctx, &grid) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}
