use anyhow::Result;
use chrono::NaiveDateTime;
use evstat_core::{ClassifiedEvent, Event, EventQuery, Listing, Status};
use owo_colors::OwoColorize;
use serde_json::{Value, json};

use crate::render::{Render, render_event};

pub fn run(events: &[Event], now: NaiveDateTime, json: bool) -> Result<()> {
    let listing = EventQuery::default().run(events, now);
    let ongoing = happening_now(&listing);
    let next = next_up(&listing);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary_json(&listing, now))?);
        return Ok(());
    }

    println!("{}", listing.counts.render());

    let today = now.date();
    if !ongoing.is_empty() {
        println!();
        println!("{}", "Happening now:".bold());
        for entry in &ongoing {
            println!("{}", render_event(entry, today));
        }
    }

    println!();
    match next {
        Some(entry) => {
            println!("{}", "Next up:".bold());
            println!("{}", render_event(entry, today));
        }
        None => println!("{}", "Nothing upcoming".dimmed()),
    }

    if !listing.rejected.is_empty() {
        println!();
        println!(
            "{}",
            format!("{} events need attention (run `evstat list` for details)", listing.rejected.len())
                .yellow()
        );
    }

    Ok(())
}

fn happening_now<'l, 'a>(listing: &'l Listing<'a>) -> Vec<&'l ClassifiedEvent<'a>> {
    listing
        .events
        .iter()
        .filter(|c| c.status == Status::Ongoing)
        .collect()
}

fn next_up<'l, 'a>(listing: &'l Listing<'a>) -> Option<&'l ClassifiedEvent<'a>> {
    listing.events.iter().find(|c| c.status == Status::Upcoming)
}

/// The `--json` document: `now`, `counts`, `rejected`, `ongoing` and `next`.
pub fn summary_json(listing: &Listing, now: NaiveDateTime) -> Value {
    json!({
        "now": now.format("%Y-%m-%dT%H:%M:%S").to_string(),
        "counts": listing.counts,
        "rejected": listing.rejected.len(),
        "ongoing": happening_now(listing),
        "next": next_up(listing),
    })
}
