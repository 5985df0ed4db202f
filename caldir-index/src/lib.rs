//! In-memory event index for caldir.
//!
//! Keeps events from a calendar directory in memory and answers "which events
//! belong to this calendar or file" and "where did this event come from"
//! without re-reading the directory:
//! - `store::EventStore` holds events plus calendar and file indexes
//! - `relation::RelationIndex` is the bidirectional one-to-many map behind both
//! - `source::CalendarSource` fills a store from .ics files on disk

pub mod config;
pub mod error;
pub mod event;
pub mod ics;
pub mod ids;
pub mod relation;
pub mod source;
pub mod store;

pub use error::{IndexError, IndexResult};
pub use ids::{CalendarId, EventId, FilePath};
pub use relation::RelationIndex;
pub use store::{EventLocation, EventStore, NewEvent, StoredEvent};
