//! Core types and logic for CyberEvents.
//!
//! This crate provides everything below the HTTP surface:
//! - `Evento` and its closed `Modalidad`/`Nivel` enums
//! - the file-backed `EventStore` with mtime-based cache invalidation
//! - the pure filter & aggregation engine
//! - `.ics` generation for single-event downloads

pub mod error;
pub mod event;
pub mod filter;
pub mod ics;
pub mod store;

pub use error::{CyberEventsError, CyberEventsResult};
pub use event::{Evento, Modalidad, Nivel};
pub use filter::{apply_filters, bucket_by_date, compute_summary, FilterSpec, Summary};
pub use store::EventStore;
