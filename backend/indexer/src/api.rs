//! Axum REST API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db;
use crate::errors::IndexerError;
use crate::events::{CampaignSummary, EventRecord};

#[derive(Clone)]
pub struct ApiState {
    pub pool: SqlitePool,
}

// ─────────────────────────────────────────────────────────
// Request / response shapes
// ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct EventsQuery {
    /// Restrict to one stored event type, e.g. `?type=debt_repaid`.
    #[serde(rename = "type")]
    pub event_type: Option<String>,
}

#[derive(Serialize)]
pub struct CampaignEventsResponse {
    pub campaign_id: i64,
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct AllEventsResponse {
    pub count: usize,
    pub events: Vec<EventRecord>,
}

#[derive(Serialize)]
pub struct CampaignsResponse {
    pub count: usize,
    pub campaigns: Vec<i64>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn internal_error(e: IndexerError) -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ─────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /campaigns`
///
/// Lists the campaign ids this indexer has seen events for.
pub async fn list_campaigns(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::list_campaigns(&state.pool).await {
        Ok(campaigns) => Json(CampaignsResponse {
            count: campaigns.len(),
            campaigns,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /campaigns/:id/events?type=<event_type>`
///
/// Returns the event log for one campaign in ledger order.
pub async fn get_campaign_events(
    State(state): State<Arc<ApiState>>,
    Path(campaign_id): Path<u64>,
    Query(query): Query<EventsQuery>,
) -> impl IntoResponse {
    let campaign_id = campaign_id as i64;
    match db::get_events_for_campaign(&state.pool, campaign_id, query.event_type.as_deref()).await
    {
        Ok(events) => Json(CampaignEventsResponse {
            campaign_id,
            count: events.len(),
            events,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /campaigns/:id/summary`
///
/// Folds the campaign's event log into lifecycle totals: current period,
/// enrollment counts, invested / withdrawn / repaid amounts.
pub async fn get_campaign_summary(
    State(state): State<Arc<ApiState>>,
    Path(campaign_id): Path<u64>,
) -> impl IntoResponse {
    match db::get_campaign_summary(&state.pool, campaign_id as i64).await {
        Ok(summary) => Json::<CampaignSummary>(summary).into_response(),
        Err(e) => internal_error(e),
    }
}

/// `GET /events`
///
/// Returns all indexed events across all campaigns.
pub async fn get_all_events(State(state): State<Arc<ApiState>>) -> impl IntoResponse {
    match db::get_all_events(&state.pool).await {
        Ok(events) => Json(AllEventsResponse {
            count: events.len(),
            events,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}
