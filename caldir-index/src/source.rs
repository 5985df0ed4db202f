//! Feeding the store from a calendar directory.
//!
//! Each non-hidden subdirectory of the root is a calendar; every file in it with
//! a configured extension is parsed for events. File paths are keyed relative to
//! the root so the index doesn't depend on where the directory is mounted.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::IndexConfig;
use crate::error::IndexResult;
use crate::event::Event;
use crate::ics::{ParsedEvent, parse_events};
use crate::ids::{CalendarId, EventId, FilePath};
use crate::store::{EventLocation, EventStore, NewEvent};

/// Counts from a full re-index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSummary {
    pub calendars: usize,
    pub files: usize,
    pub events: usize,
    /// Files that couldn't be read or parsed, plus events with duplicate ids
    pub skipped: usize,
}

pub struct CalendarSource {
    root: PathBuf,
    extensions: Vec<String>,
}

impl CalendarSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        CalendarSource {
            root: root.into(),
            extensions: vec!["ics".to_string()],
        }
    }

    pub fn from_config(config: &IndexConfig) -> Self {
        CalendarSource {
            root: config.data_path(),
            extensions: config.extensions.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discover calendars by scanning the root for non-hidden subdirectories.
    pub fn calendars(&self) -> IndexResult<Vec<CalendarId>> {
        let mut calendars: Vec<CalendarId> = std::fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .filter_map(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .filter(|name| !name.starts_with('.'))
                    .map(CalendarId::from)
            })
            .collect();

        calendars.sort();
        Ok(calendars)
    }

    /// Clear the store and index every calendar under the root.
    pub fn index_all(&self, store: &mut EventStore<Event>) -> IndexResult<IndexSummary> {
        store.clear();
        let mut summary = IndexSummary::default();

        for calendar in self.calendars()? {
            summary.calendars += 1;

            for path in self.event_files(&calendar)? {
                match self.add_file(store, &calendar, &path) {
                    Ok((added, duplicates)) => {
                        summary.files += 1;
                        summary.events += added;
                        summary.skipped += duplicates;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "skipping unreadable event file");
                        summary.skipped += 1;
                    }
                }
            }
        }

        info!(
            calendars = summary.calendars,
            files = summary.files,
            events = summary.events,
            skipped = summary.skipped,
            "indexed calendar directory"
        );
        Ok(summary)
    }

    /// Re-index one file after it changed. Returns how many events it now holds.
    ///
    /// The file is parsed before its old events are dropped, so a file that
    /// can't be read or parsed keeps what was indexed from it before.
    pub fn index_file(
        &self,
        store: &mut EventStore<Event>,
        calendar: &CalendarId,
        path: &Path,
    ) -> IndexResult<usize> {
        let parsed = read_events(path)?;
        let key = self.path_key(path);

        store.delete_events_at_path(&key);
        let (added, duplicates) = add_parsed(store, calendar, &key, parsed);
        if duplicates > 0 {
            warn!(path = %key, duplicates, "re-indexed file with duplicate event ids");
        }

        Ok(added)
    }

    /// Drop everything indexed from a deleted file.
    pub fn remove_file(&self, store: &mut EventStore<Event>, path: &Path) -> BTreeSet<EventId> {
        store.delete_events_at_path(&self.path_key(path))
    }

    pub fn rename_file(
        &self,
        store: &mut EventStore<Event>,
        old: &Path,
        new: &Path,
    ) -> IndexResult<()> {
        store.rename_file_for_events(&self.path_key(old), &self.path_key(new))
    }

    /// Index key for a file: relative to the root, `/`-separated.
    pub fn path_key(&self, path: &Path) -> FilePath {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let parts: Vec<_> = relative
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .map(|c| c.as_os_str().to_string_lossy())
            .collect();
        FilePath::new(parts.join("/"))
    }

    fn event_files(&self, calendar: &CalendarId) -> IndexResult<Vec<PathBuf>> {
        let dir = self.root.join(calendar.as_str());

        let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| self.extensions.iter().any(|ext| ext == e))
            })
            .collect();

        files.sort();
        Ok(files)
    }

    /// Parse a file and add its events. Returns (added, duplicate ids skipped).
    fn add_file(
        &self,
        store: &mut EventStore<Event>,
        calendar: &CalendarId,
        path: &Path,
    ) -> IndexResult<(usize, usize)> {
        let parsed = read_events(path)?;
        Ok(add_parsed(store, calendar, &self.path_key(path), parsed))
    }
}

fn read_events(path: &Path) -> IndexResult<Vec<ParsedEvent>> {
    let content = std::fs::read_to_string(path)?;
    parse_events(&content)
}

fn add_parsed(
    store: &mut EventStore<Event>,
    calendar: &CalendarId,
    key: &FilePath,
    parsed: Vec<ParsedEvent>,
) -> (usize, usize) {
    let mut added = 0;
    let mut duplicates = 0;

    for parsed_event in parsed {
        let new_event = NewEvent {
            calendar: calendar.clone(),
            location: Some(EventLocation::new(key.clone(), parsed_event.line)),
            id: parsed_event.event.unique_id(),
            event: parsed_event.event,
        };

        match store.add(new_event) {
            Ok(()) => added += 1,
            Err(e) => {
                warn!(path = %key, error = %e, "skipping event");
                duplicates += 1;
            }
        }
    }

    debug!(path = %key, added, "indexed file");
    (added, duplicates)
}
