//! ICS file generation.
//!
//! This module renders a single `Evento` as an RFC 5545 calendar document
//! for the "add to calendar" download.

mod generate;

pub use generate::{generate_ics, ics_filename};
