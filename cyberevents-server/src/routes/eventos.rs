//! Event endpoints: listing with server-side filters, lookup by id, and
//! .ics download.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use cyberevents_core::{ics, Evento};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/eventos", get(list_eventos))
        .route("/api/eventos/{id}", get(get_evento))
        .route("/api/eventos/{id}/ics", get(download_ics))
}

/// Optional server-side filters, each applied independently.
#[derive(Debug, Default, Deserialize)]
pub struct EventosQuery {
    /// Case-insensitive exact match against the delivery mode
    pub modalidad: Option<String>,
    /// Case-insensitive exact match against the skill level
    pub nivel: Option<String>,
    /// Case-insensitive substring of the country
    pub pais: Option<String>,
    /// Case-insensitive substring of any tag
    pub tag: Option<String>,
    /// Case-insensitive substring of titulo, descripcion or organizador
    pub search: Option<String>,
}

impl EventosQuery {
    fn matches(&self, evento: &Evento) -> bool {
        if let Some(ref modalidad) = self.modalidad {
            if evento.modalidad.as_str().to_lowercase() != modalidad.to_lowercase() {
                return false;
            }
        }

        if let Some(ref nivel) = self.nivel {
            if evento.nivel.as_str().to_lowercase() != nivel.to_lowercase() {
                return false;
            }
        }

        if let Some(ref pais) = self.pais {
            if !evento.pais.to_lowercase().contains(&pais.to_lowercase()) {
                return false;
            }
        }

        if let Some(ref tag) = self.tag {
            let needle = tag.to_lowercase();
            if !evento
                .tags
                .iter()
                .any(|t| t.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            let hit = evento.titulo.to_lowercase().contains(&needle)
                || evento.descripcion.to_lowercase().contains(&needle)
                || evento.organizador.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        true
    }
}

/// GET /api/eventos - All events in source order, optionally filtered
async fn list_eventos(
    State(state): State<AppState>,
    Query(query): Query<EventosQuery>,
) -> Result<Json<Vec<Evento>>, AppError> {
    let eventos = state.store().await.get_all().await;

    let filtered: Vec<Evento> = eventos.into_iter().filter(|e| query.matches(e)).collect();

    Ok(Json(filtered))
}

/// GET /api/eventos/:id - Single event or 404
async fn get_evento(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Evento>, AppError> {
    let evento = state
        .store()
        .await
        .get_by_id(&id)
        .await
        .ok_or_else(|| AppError::not_found("Evento no encontrado"))?;

    Ok(Json(evento))
}

/// GET /api/eventos/:id/ics - Calendar file download
async fn download_ics(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(HeaderMap, String), AppError> {
    let evento = state
        .store()
        .await
        .get_by_id(&id)
        .await
        .ok_or_else(|| AppError::not_found("Evento no encontrado"))?;

    let ics = ics::generate_ics(&evento)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/calendar"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            "attachment; filename=\"{}\"",
            ics::ics_filename(&evento)
        ))?,
    );

    Ok((headers, ics))
}
