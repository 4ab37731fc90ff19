//! ICS file generation.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::error::CyberEventsResult;
use crate::event::Evento;

const PRODID: &str = "-//CyberEvents//ES";

/// Generate .ics content for a single event.
///
/// Start and end are emitted as UTC timestamps at midnight of the calendar
/// dates; single-day events get a DTEND equal to DTSTART. The display-only
/// `hora` field does not participate.
pub fn generate_ics(evento: &Evento) -> CyberEventsResult<String> {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@cyberevents.com", evento.id));
    ics_event.summary(&evento.titulo);

    // DTSTAMP - required by RFC 5545
    let dtstamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    let start = midnight_utc(evento.fecha_inicio);
    let end = midnight_utc(evento.fecha_fin.unwrap_or(evento.fecha_inicio));
    ics_event.add_property("DTSTART", start.format("%Y%m%dT%H%M%SZ").to_string());
    ics_event.add_property("DTEND", end.format("%Y%m%dT%H%M%SZ").to_string());

    ics_event.description(&format!(
        "{}\n\nMás info: {}",
        evento.descripcion, evento.enlace
    ));
    ics_event.location(&format!("{}, {}", evento.ciudad, evento.pais));
    ics_event.add_property("URL", &evento.enlace);
    ics_event.add_property("STATUS", "CONFIRMED");

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    Ok(rewrite_calendar_header(&cal.to_string()))
}

/// Download filename for an event's .ics attachment: the title with every
/// non-alphanumeric character replaced by an underscore.
pub fn ics_filename(evento: &Evento) -> String {
    let sanitized: String = evento
        .titulo
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}.ics", sanitized)
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Clean up the icalendar crate's output:
/// - replace its PRODID with ours
/// - remove CALSCALE:GREGORIAN (it's the default)
fn rewrite_calendar_header(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
