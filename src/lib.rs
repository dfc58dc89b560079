//! Month-view calendar widget.
//!
//! Features:
//! - Deterministic week grid around any month, with spill-over days
//! - Month labels where each month begins, today and weekend markers
//! - Per-day events, showing the first three
//! - Previous/next/today navigation reported through a callback

pub mod args;
pub mod calendar;
pub mod config;
pub mod error;
pub mod formatter;
pub mod navigation;
pub mod shell;
pub mod types;
