//! Filter & aggregation engine.
//!
//! Pure functions over an in-memory event slice: no I/O, no error paths.
//! The store hands these already-validated data, so every function here is
//! total.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::event::{Evento, Modalidad, Nivel};

/// One user interaction's worth of filter state.
///
/// Every field defaults to "no constraint"; active predicates are combined
/// with logical AND.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Case-insensitive substring over titulo, descripcion and organizador
    pub search: String,
    /// Selected category tags; matches when the event's tag set intersects
    pub tags: Vec<String>,
    pub modalidades: Vec<Modalidad>,
    pub niveles: Vec<Nivel>,
    /// Calendar-day equality against fecha_inicio
    pub fecha: Option<NaiveDate>,
}

impl FilterSpec {
    fn matches(&self, evento: &Evento) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = evento.titulo.to_lowercase().contains(&needle)
                || evento.descripcion.to_lowercase().contains(&needle)
                || evento.organizador.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if !self.tags.is_empty() && !evento.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        if !self.modalidades.is_empty() && !self.modalidades.contains(&evento.modalidad) {
            return false;
        }

        if !self.niveles.is_empty() && !self.niveles.contains(&evento.nivel) {
            return false;
        }

        if let Some(fecha) = self.fecha {
            if evento.fecha_inicio != fecha {
                return false;
            }
        }

        true
    }
}

/// Apply every active predicate and sort the survivors by ascending start
/// date.
pub fn apply_filters(eventos: &[Evento], spec: &FilterSpec) -> Vec<Evento> {
    let mut result: Vec<Evento> = eventos.iter().filter(|e| spec.matches(e)).cloned().collect();
    result.sort_by_key(|e| e.fecha_inicio);
    result
}

/// Partition one calendar month's events by day-of-month.
///
/// Events starting outside the month land in no bucket. A day with several
/// events exposes all of them; "+N more" summarization is a presentation
/// concern.
pub fn bucket_by_date(eventos: &[Evento], year: i32, month: u32) -> BTreeMap<u32, Vec<Evento>> {
    let mut buckets: BTreeMap<u32, Vec<Evento>> = BTreeMap::new();
    for evento in eventos {
        let fecha = evento.fecha_inicio;
        if fecha.year() == year && fecha.month() == month {
            buckets.entry(fecha.day()).or_default().push(evento.clone());
        }
    }
    buckets
}

/// Summary counts shown in the stats section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub distinct_countries: usize,
    pub upcoming_count: usize,
}

/// Derived statistics over the full collection. `upcoming_count` counts
/// events starting on or after the reference date.
pub fn compute_summary(eventos: &[Evento], reference: NaiveDate) -> Summary {
    let distinct_countries = eventos
        .iter()
        .map(|e| e.pais.as_str())
        .collect::<HashSet<_>>()
        .len();
    let upcoming_count = eventos
        .iter()
        .filter(|e| e.fecha_inicio >= reference)
        .count();

    Summary {
        total: eventos.len(),
        distinct_countries,
        upcoming_count,
    }
}
