//! TUI rendering traits for index types.
//!
//! Extension traits that add colored terminal rendering to caldir-index types
//! using owo_colors.

use caldir_index::event::{Event, EventStatus};
use caldir_index::{CalendarId, EventLocation, StoredEvent};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarId {
    fn render(&self) -> String {
        format!("📅 {}", self)
    }
}

impl Render for EventLocation {
    fn render(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.path, line),
            None => self.path.to_string(),
        }
    }
}

impl Render for StoredEvent<Event> {
    fn render(&self) -> String {
        let summary = match self.event.status {
            EventStatus::Cancelled => self.event.summary.strikethrough().to_string(),
            EventStatus::Tentative => self.event.summary.italic().to_string(),
            EventStatus::Confirmed => self.event.summary.clone(),
        };
        let location = self
            .location
            .as_ref()
            .map(Render::render)
            .unwrap_or_else(|| "(no file)".to_string());

        format!(
            "{} {} {}",
            self.event.start.to_string().cyan(),
            summary,
            location.dimmed()
        )
    }
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}
