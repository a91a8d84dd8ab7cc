use anyhow::Result;
use chrono::NaiveDateTime;
use evstat_core::DateWindow;
use owo_colors::OwoColorize;

use crate::render::{Render, date_badge};

pub fn run(start: &str, end: Option<&str>, now: NaiveDateTime) -> Result<()> {
    let window = DateWindow::parse(start, end)?;
    let status = window.classify(now);

    println!(
        "{} {}",
        status.render(),
        date_badge(&window, now.date())
    );
    println!(
        "  {}",
        format!(
            "{} .. {} ({} {}), now {}",
            window.start().format("%Y-%m-%d %H:%M:%S"),
            window.end().format("%Y-%m-%d %H:%M:%S%.3f"),
            window.days(),
            if window.days() == 1 { "day" } else { "days" },
            now.format("%Y-%m-%d %H:%M:%S")
        )
        .dimmed()
    );

    Ok(())
}
