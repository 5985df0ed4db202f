use anyhow::Result;
use caldir_index::event::Event;
use caldir_index::{EventId, EventStore};
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(store: &EventStore<Event>, id: &str) -> Result<()> {
    let Some(details) = store.get_event_details(&EventId::from(id)) else {
        anyhow::bail!("Event '{}' not found", id);
    };

    let event = &details.event;
    println!("{}", event.summary.bold());
    println!("{} {}", "id:".dimmed(), details.id);
    println!("{} {}", "calendar:".dimmed(), details.calendar.render());
    println!("{} {}", "start:".dimmed(), event.start);
    if let Some(end) = &event.end {
        println!("{} {}", "end:".dimmed(), end);
    }
    if let Some(location) = &event.location {
        println!("{} {}", "location:".dimmed(), location);
    }
    match &details.location {
        Some(location) => println!("{} {}", "file:".dimmed(), location.render()),
        None => println!("{} {}", "file:".dimmed(), "(none)".dimmed()),
    }

    Ok(())
}
