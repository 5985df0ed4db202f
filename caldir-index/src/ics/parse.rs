//! ICS file parsing using the icalendar crate's parser.

use crate::error::{IndexError, IndexResult};
use crate::event::{Event, EventStatus, EventTime};
use icalendar::{
    DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

/// An event read from a file, with the line its VEVENT starts on.
#[derive(Debug, Clone)]
pub struct ParsedEvent {
    pub event: Event,
    /// 1-based line of `BEGIN:VEVENT`
    pub line: Option<usize>,
}

/// Parse every VEVENT in ICS content.
///
/// VEVENTs missing a UID or DTSTART are skipped. Content that isn't valid
/// iCalendar at all is an error.
pub fn parse_events(content: &str) -> IndexResult<Vec<ParsedEvent>> {
    let starts_with_calendar = content
        .trim_start()
        .get(..15)
        .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCALENDAR"));
    if !starts_with_calendar {
        return Err(IndexError::IcsParse("missing BEGIN:VCALENDAR".to_string()));
    }

    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(IndexError::IcsParse)?;

    let mut vevents = Vec::new();
    collect_vevents(&calendar.components, &mut vevents);

    // Unfolding only joins continuation lines, so BEGIN lines keep their order
    let begin_lines: Vec<usize> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.trim_end().eq_ignore_ascii_case("BEGIN:VEVENT"))
        .map(|(n, _)| n + 1)
        .collect();

    let parsed = vevents
        .into_iter()
        .enumerate()
        .filter_map(|(n, vevent)| {
            let event = parse_vevent(vevent)?;
            Some(ParsedEvent {
                event,
                line: begin_lines.get(n).copied(),
            })
        })
        .collect();

    Ok(parsed)
}

fn collect_vevents<'c, 'a>(components: &'c [Component<'a>], out: &mut Vec<&'c Component<'a>>) {
    for component in components {
        if component.name.as_ref().eq_ignore_ascii_case("VEVENT") {
            out.push(component);
        } else {
            collect_vevents(&component.components, out);
        }
    }
}

fn parse_vevent(vevent: &Component) -> Option<Event> {
    // Required fields
    let uid = vevent.find_prop("UID")?.val.to_string();
    let start = to_event_time(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?);

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());
    let end = vevent
        .find_prop("DTEND")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_event_time);
    let description = vevent.find_prop("DESCRIPTION").map(|p| p.val.to_string());
    let location = vevent.find_prop("LOCATION").map(|p| p.val.to_string());

    let status = vevent
        .find_prop("STATUS")
        .map(|p| match p.val.as_ref() {
            "TENTATIVE" => EventStatus::Tentative,
            "CANCELLED" => EventStatus::Cancelled,
            _ => EventStatus::Confirmed,
        })
        .unwrap_or(EventStatus::Confirmed);

    // RECURRENCE-ID for instance overrides
    let recurrence_id = vevent
        .find_prop("RECURRENCE-ID")
        .and_then(|p| DatePerhapsTime::try_from(p).ok())
        .map(to_event_time);

    Some(Event {
        uid,
        summary,
        description,
        location,
        start,
        end,
        status,
        recurrence_id,
    })
}

/// Convert icalendar's DatePerhapsTime to our EventTime, preserving timezone info
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            icalendar::CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            icalendar::CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            icalendar::CalendarDateTime::WithTimezone { date_time, tzid } => {
                EventTime::DateTimeZoned {
                    datetime: date_time,
                    tzid,
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    const TWO_EVENTS: &str = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:standup@caldir
SUMMARY:Team Standup
DTSTART:20250320T150000Z
DTEND:20250320T153000Z
END:VEVENT
BEGIN:VEVENT
UID:standup@caldir
SUMMARY:Team Standup (moved)
DTSTART;VALUE=DATE:20250327
RECURRENCE-ID;VALUE=DATE:20250327
STATUS:TENTATIVE
END:VEVENT
END:VCALENDAR
";

    #[test]
    fn test_parse_events_reads_every_vevent_with_line_numbers() {
        let events = parse_events(TWO_EVENTS).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].line, Some(4));
        assert_eq!(events[1].line, Some(10));

        assert_eq!(events[0].event.summary, "Team Standup");
        assert_eq!(
            events[0].event.start,
            EventTime::DateTimeUtc(Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap())
        );
        assert_eq!(events[1].event.status, EventStatus::Tentative);
        assert_eq!(
            events[1].event.recurrence_id,
            Some(EventTime::Date(NaiveDate::from_ymd_opt(2025, 3, 27).unwrap()))
        );
    }

    #[test]
    fn test_recurrence_override_gets_distinct_id() {
        let events = parse_events(TWO_EVENTS).unwrap();
        assert_ne!(events[0].event.unique_id(), events[1].event.unique_id());
    }

    #[test]
    fn test_parse_events_matches_vevent_case_insensitively() {
        let ics = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
begin:vevent
UID:lower@caldir
DTSTART:20250320T150000Z
end:vevent
BEGIN:VEVENT
UID:upper@caldir
DTSTART:20250321T150000Z
END:VEVENT
END:VCALENDAR
";
        let events = parse_events(ics).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event.uid, "lower@caldir");
        assert_eq!(events[0].line, Some(4));
        assert_eq!(events[1].event.uid, "upper@caldir");
        assert_eq!(events[1].line, Some(8));
    }

    #[test]
    fn test_parse_events_rejects_non_calendar_content() {
        let err = parse_events("this is not ical").unwrap_err();
        assert!(matches!(err, IndexError::IcsParse(_)));
    }

    #[test]
    fn test_parse_events_skips_vevent_without_uid() {
        let ics = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
SUMMARY:No uid here
DTSTART:20250320T150000Z
END:VEVENT
END:VCALENDAR
";
        assert!(parse_events(ics).unwrap().is_empty());
    }

    #[test]
    fn test_parse_events_defaults_missing_summary() {
        let ics = "BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:untitled@caldir
DTSTART;TZID=Europe/Berlin:20250320T093000
END:VEVENT
END:VCALENDAR
";
        let events = parse_events(ics).unwrap();
        assert_eq!(events[0].event.summary, "(No title)");
        assert_eq!(events[0].event.end, None);
        assert!(matches!(
            events[0].event.start,
            EventTime::DateTimeZoned { ref tzid, .. } if tzid == "Europe/Berlin"
        ));
    }
}
