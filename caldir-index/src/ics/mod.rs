//! ICS file parsing.
//!
//! Reads .ics files according to RFC 5545 into [`crate::event::Event`]s.

mod parse;

pub use parse::{ParsedEvent, parse_events};
