//! Domain types for cybersecurity events.
//!
//! `Evento` mirrors the JSON wire schema field-for-field. Delivery mode and
//! skill level are closed enums so an unrecognized value fails at parse time
//! instead of slipping through string comparisons downstream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{CyberEventsError, CyberEventsResult};

/// A single cybersecurity conference/CTF/workshop record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evento {
    pub id: String,
    pub titulo: String,
    pub descripcion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion_larga: Option<String>,
    /// ISO 8601 calendar date, no time component
    pub fecha_inicio: NaiveDate,
    /// Absent means a single-day event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<NaiveDate>,
    /// Display-only "HH:MM" start time
    pub hora: String,
    pub pais: String,
    pub ciudad: String,
    pub modalidad: Modalidad,
    pub enlace: String,
    pub organizador: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    pub nivel: Nivel,
    pub tags: Vec<String>,
    /// Marks the event promoted for hero-banner display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destacado: Option<bool>,
}

/// Delivery mode of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modalidad {
    Online,
    Presencial,
    #[serde(rename = "Híbrido")]
    Hibrido,
}

impl Modalidad {
    /// Wire/display form, accents included.
    pub fn as_str(&self) -> &'static str {
        match self {
            Modalidad::Online => "Online",
            Modalidad::Presencial => "Presencial",
            Modalidad::Hibrido => "Híbrido",
        }
    }
}

/// Target skill level of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nivel {
    #[serde(rename = "Básico")]
    Basico,
    Intermedio,
    Avanzado,
}

impl Nivel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Nivel::Basico => "Básico",
            Nivel::Intermedio => "Intermedio",
            Nivel::Avanzado => "Avanzado",
        }
    }
}

impl Evento {
    /// Check record-level invariants the schema alone cannot express.
    pub fn validate(&self) -> CyberEventsResult<()> {
        if let Some(fin) = self.fecha_fin {
            if fin < self.fecha_inicio {
                return Err(CyberEventsError::Validation(format!(
                    "evento '{}': fecha_fin {} precedes fecha_inicio {}",
                    self.id, fin, self.fecha_inicio
                )));
            }
        }
        Ok(())
    }
}

/// Validate a freshly loaded collection: per-record invariants plus id
/// uniqueness across the whole file.
pub fn validate_collection(eventos: &[Evento]) -> CyberEventsResult<()> {
    let mut seen = HashSet::new();
    for evento in eventos {
        evento.validate()?;
        if !seen.insert(evento.id.as_str()) {
            return Err(CyberEventsError::Validation(format!(
                "duplicate evento id '{}'",
                evento.id
            )));
        }
    }
    Ok(())
}
