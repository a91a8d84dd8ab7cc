//! Terminal rendering for evstat types.
//!
//! Extension traits that add colored output to evstat-core types using
//! owo_colors.

use chrono::NaiveDate;
use evstat_core::{ClassifiedEvent, DateWindow, RejectedEvent, Status, StatusCounts, StatusFilter};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

/// Colorize text according to the status
fn colorize_status(status: Status, text: &str) -> String {
    match status {
        Status::Upcoming => text.cyan().to_string(),
        Status::Ongoing => text.green().bold().to_string(),
        Status::Past => text.dimmed().to_string(),
    }
}

impl Render for Status {
    fn render(&self) -> String {
        colorize_status(*self, &format!("{:<8}", self.as_str()))
    }
}

impl Render for StatusCounts {
    fn render(&self) -> String {
        Status::ALL
            .iter()
            .map(|status| colorize_status(*status, &format!("{} {}", status, self.get(*status))))
            .collect::<Vec<_>>()
            .join("  ")
    }
}

impl Render for RejectedEvent<'_> {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            "!".red(),
            self.event.title,
            format!("[{}] {}", self.event.id, self.error).dimmed()
        )
    }
}

/// Render the listing tabs, highlighting the active filter.
pub fn render_tabs(counts: &StatusCounts, active: StatusFilter) -> String {
    let mut tabs = vec![tab(&format!("all {}", counts.total()), active == StatusFilter::All)];
    for status in Status::ALL {
        let label = format!("{} {}", status, counts.get(status));
        tabs.push(tab(&label, active == StatusFilter::from(status)));
    }
    tabs.join("  ")
}

fn tab(label: &str, active: bool) -> String {
    if active {
        format!("[{}]", label).bold().to_string()
    } else {
        label.dimmed().to_string()
    }
}

/// One listing line: status pill, date badge, optional time, title and location.
pub fn render_event(entry: &ClassifiedEvent, today: NaiveDate) -> String {
    let event = entry.event;
    let mut line = format!(
        "  {} {:<16} {}",
        entry.status.render(),
        date_badge(&entry.window, today),
        event.title
    );

    if let Some(time) = event.start_time.as_deref().filter(|t| !t.is_empty()) {
        line.push_str(&format!(" {}", time.dimmed()));
    }
    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
    }

    line
}

/// Human date label for a window, e.g. "Today", "Tomorrow", "Wed Feb 25" or
/// "Jan 5 - Jan 6".
pub fn date_badge(window: &DateWindow, today: NaiveDate) -> String {
    if window.is_single_day() {
        return day_label(window.start_date(), today);
    }

    format!(
        "{} - {}",
        window.start_date().format("%b %-d"),
        window.end_date().format("%b %-d")
    )
}

fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_badge_relative_days() {
        let today = date(2024, 1, 10);

        let single = |d| DateWindow::new(d, None).unwrap();
        assert_eq!(date_badge(&single(today), today), "Today");
        assert_eq!(date_badge(&single(date(2024, 1, 11)), today), "Tomorrow");
        assert_eq!(date_badge(&single(date(2024, 1, 9)), today), "Yesterday");
        assert_eq!(date_badge(&single(date(2024, 2, 1)), today), "Thu Feb 1");
    }

    #[test]
    fn test_date_badge_range() {
        let window = DateWindow::new(date(2024, 1, 5), Some(date(2024, 1, 6))).unwrap();
        assert_eq!(date_badge(&window, date(2024, 1, 10)), "Jan 5 - Jan 6");
    }
}
