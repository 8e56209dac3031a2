//! Database layer: migrations, event storage, per-campaign queries, and
//! cursor management.

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

use crate::errors::Result;
use crate::events::{CampaignEvent, CampaignSummary, EventRecord};

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");
    Ok(pool)
}

// ─────────────────────────────────────────────────────────
// Cursor helpers
// ─────────────────────────────────────────────────────────

/// Read the last-seen ledger from the cursor row.
/// Returns `0` when no cursor has been persisted yet.
pub async fn get_last_ledger(pool: &SqlitePool) -> Result<i64> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT last_ledger FROM indexer_cursor WHERE id = 1")
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Persist the last-seen ledger (and optionally a pagination cursor string).
pub async fn save_cursor(
    pool: &SqlitePool,
    last_ledger: i64,
    last_cursor: Option<&str>,
) -> Result<()> {
    sqlx::query("UPDATE indexer_cursor SET last_ledger = ?1, last_cursor = ?2 WHERE id = 1")
        .bind(last_ledger)
        .bind(last_cursor)
        .execute(pool)
        .await?;
    Ok(())
}

/// Read back the raw cursor string (used to resume pagination mid-ledger).
pub async fn get_cursor_string(pool: &SqlitePool) -> Result<Option<String>> {
    let row: Option<(Option<String>,)> =
        sqlx::query_as("SELECT last_cursor FROM indexer_cursor WHERE id = 1")
            .fetch_optional(pool)
            .await?;
    Ok(row.and_then(|(v,)| v))
}

// ─────────────────────────────────────────────────────────
// Event writes
// ─────────────────────────────────────────────────────────

/// Persist a batch of decoded events. Re-polled events that hit the
/// uniqueness constraint are silently ignored, so replaying a ledger
/// range is idempotent.
pub async fn insert_events(pool: &SqlitePool, events: &[CampaignEvent]) -> Result<usize> {
    let mut count = 0usize;
    for ev in events {
        let rows_affected = sqlx::query(
            r#"
            INSERT OR IGNORE INTO events
                (event_type, campaign_id, role, enrollee_id, actor, amount,
                 ledger, timestamp, contract_id, tx_hash)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&ev.event_type)
        .bind(ev.campaign_id)
        .bind(&ev.role)
        .bind(ev.enrollee_id)
        .bind(&ev.actor)
        .bind(&ev.amount)
        .bind(ev.ledger)
        .bind(ev.timestamp)
        .bind(&ev.contract_id)
        .bind(&ev.tx_hash)
        .execute(pool)
        .await?
        .rows_affected();

        count += rows_affected as usize;
    }
    Ok(count)
}

// ─────────────────────────────────────────────────────────
// Event reads
// ─────────────────────────────────────────────────────────

const EVENT_COLUMNS: &str = "id, event_type, campaign_id, role, enrollee_id, actor, amount, \
                             ledger, timestamp, contract_id, tx_hash, created_at";

/// Fetch events for one campaign in ledger order, optionally restricted
/// to a single event type.
pub async fn get_events_for_campaign(
    pool: &SqlitePool,
    campaign_id: i64,
    event_type: Option<&str>,
) -> Result<Vec<EventRecord>> {
    let rows = match event_type {
        Some(kind) => {
            sqlx::query_as::<_, EventRecord>(&format!(
                "SELECT {EVENT_COLUMNS} FROM events \
                 WHERE campaign_id = ?1 AND event_type = ?2 \
                 ORDER BY ledger ASC, id ASC"
            ))
            .bind(campaign_id)
            .bind(kind)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, EventRecord>(&format!(
                "SELECT {EVENT_COLUMNS} FROM events \
                 WHERE campaign_id = ?1 \
                 ORDER BY ledger ASC, id ASC"
            ))
            .bind(campaign_id)
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

/// Fetch all events across all campaigns, ordered by ledger ascending.
pub async fn get_all_events(pool: &SqlitePool) -> Result<Vec<EventRecord>> {
    let rows = sqlx::query_as::<_, EventRecord>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events ORDER BY ledger ASC, id ASC"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// List the distinct campaign ids seen so far.
pub async fn list_campaigns(pool: &SqlitePool) -> Result<Vec<i64>> {
    let rows: Vec<(i64,)> = sqlx::query_as(
        "SELECT DISTINCT campaign_id FROM events \
         WHERE campaign_id IS NOT NULL ORDER BY campaign_id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Fold a campaign's event log into lifecycle totals. Amounts are stored
/// as decimal strings (i128 on chain), so the summation happens here
/// rather than in SQL.
pub async fn get_campaign_summary(pool: &SqlitePool, campaign_id: i64) -> Result<CampaignSummary> {
    let events = get_events_for_campaign(pool, campaign_id, None).await?;

    let mut summary = CampaignSummary {
        campaign_id,
        period: "investment".to_string(),
        event_count: events.len() as i64,
        ..CampaignSummary::default()
    };

    for ev in &events {
        let amount = ev
            .amount
            .as_deref()
            .and_then(|a| a.parse::<i128>().ok())
            .unwrap_or(0);

        match ev.event_type.as_str() {
            "enrollee_enrolled" => summary.enrolled += 1,
            "enrollee_removed" => summary.removed += 1,
            "investment_deposited" => summary.total_invested += amount,
            "expenditure_withdrawn" => summary.total_expenditures_withdrawn += amount,
            "debt_repaid" => summary.total_repayments_collected += amount,
            "repayment_withdrawn" => summary.total_repayments_withdrawn += amount,
            "bootcamp_started" => summary.period = "bootcamp".to_string(),
            "bootcamp_finished" => summary.period = "repayment".to_string(),
            _ => {}
        }
    }

    Ok(summary)
}

// ─────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────
