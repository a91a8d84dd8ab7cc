use anyhow::Result;
use chrono::NaiveDateTime;
use evstat_core::{Event, EventQuery, Listing};
use owo_colors::OwoColorize;
use serde_json::Value;

use crate::render::{Render, render_event, render_tabs};

pub fn run(events: &[Event], query: &EventQuery, now: NaiveDateTime, json: bool) -> Result<()> {
    let listing = query.run(events, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&listing_json(&listing)?)?);
        return Ok(());
    }

    println!("{}", render_tabs(&listing.counts, query.status));
    println!();

    if listing.events.is_empty() {
        println!("{}", "No events found".dimmed());
    }

    let today = now.date();
    for entry in &listing.events {
        println!("{}", render_event(entry, today));
    }

    if let Some(hint) = more_hint(&listing, query.offset) {
        println!("  {}", hint.dimmed());
    }

    if !listing.rejected.is_empty() {
        println!();
        println!("{}", "Needs attention:".yellow());
        for rejected in &listing.rejected {
            println!("  {}", rejected.render());
        }
    }

    Ok(())
}

/// The `--json` document: the page, `total`, `has_more` and `counts`.
pub fn listing_json(listing: &Listing) -> serde_json::Result<Value> {
    serde_json::to_value(listing)
}

/// "N more (use --offset M)" when the page stops short of the last match.
fn more_hint(listing: &Listing, offset: usize) -> Option<String> {
    if !listing.has_more {
        return None;
    }

    let shown_until = offset.saturating_add(listing.events.len());
    Some(format!(
        "{} more (use --offset {})",
        listing.total.saturating_sub(shown_until),
        shown_until
    ))
}
