//! Soroban RPC client: polls `getEvents` and decodes campaign events.
//!
//! Transient failures (network errors, rate limits, soft RPC errors) are
//! retried with exponential back-off up to [`MAX_BACKOFF_SECS`] seconds;
//! malformed requests fail immediately.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::errors::{IndexerError, Result};
use crate::events::{CampaignEvent, EventKind};

const MAX_BACKOFF_SECS: u64 = 60;
const INITIAL_BACKOFF_SECS: u64 = 2;

// ─────────────────────────────────────────────────────────
// JSON-RPC response shapes
// ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    pub result: Option<EventsResult>,
    pub error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct EventsResult {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    #[serde(rename = "latestLedger")]
    pub latest_ledger: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(dead_code)]
pub struct RawEvent {
    /// XDR-decoded topic list: `[symbol, campaign_id]` for our contract.
    pub topic: Vec<String>,
    /// XDR-decoded event payload.
    pub value: Value,
    #[serde(rename = "contractId")]
    pub contract_id: Option<String>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    pub id: Option<String>,
    pub ledger: Option<u64>,
    #[serde(rename = "ledgerClosedAt")]
    pub ledger_closed_at: Option<String>,
    #[serde(rename = "inSuccessfulContractCall")]
    pub in_successful_contract_call: Option<bool>,
    #[serde(rename = "pagingToken")]
    pub paging_token: Option<String>,
}

/// What was fetched by one successful `getEvents` page.
pub struct EventsPage {
    pub events: Vec<RawEvent>,
    pub cursor: Option<String>,
    pub latest_ledger: Option<u64>,
}

// ─────────────────────────────────────────────────────────
// Fetching
// ─────────────────────────────────────────────────────────

/// Fetch one page of registry contract events, retrying transient
/// failures with back-off.
///
/// * `start_ledger` — the ledger sequence to scan from (inclusive),
///   ignored when `cursor` is set.
/// * `cursor` — opaque pagination cursor from a previous response.
pub async fn fetch_events(
    client: &Client,
    rpc_url: &str,
    contract_id: &str,
    start_ledger: u32,
    cursor: Option<&str>,
    limit: u32,
) -> Result<EventsPage> {
    let params = build_params(contract_id, start_ledger, cursor, limit);
    let mut backoff = INITIAL_BACKOFF_SECS;

    loop {
        match try_fetch_page(client, rpc_url, &params).await {
            Ok(page) => {
                debug!(
                    "fetched {} events (latest_ledger={:?})",
                    page.events.len(),
                    page.latest_ledger
                );
                return Ok(page);
            }
            Err(Retry::Transient(reason)) => {
                warn!("getEvents failed, retrying in {backoff}s: {reason}");
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff = (backoff * 2).min(MAX_BACKOFF_SECS);
            }
            Err(Retry::Fatal(e)) => return Err(e),
        }
    }
}

enum Retry {
    Transient(String),
    Fatal(IndexerError),
}

async fn try_fetch_page(
    client: &Client,
    rpc_url: &str,
    params: &Value,
) -> std::result::Result<EventsPage, Retry> {
    let response = client
        .post(rpc_url)
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getEvents",
            "params": params,
        }))
        .send()
        .await
        .map_err(|e| Retry::Transient(e.to_string()))?;

    if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(Retry::Transient("rate-limited".to_string()));
    }

    let body: RpcResponse = response
        .json()
        .await
        .map_err(|e| Retry::Transient(e.to_string()))?;

    if let Some(err) = body.error {
        // -32600 (invalid request) and -32601 (unknown method) will never
        // succeed on retry.
        if err.code == -32600 || err.code == -32601 {
            return Err(Retry::Fatal(IndexerError::Rpc(format!(
                "hard error {}: {}",
                err.code, err.message
            ))));
        }
        return Err(Retry::Transient(format!("{} {}", err.code, err.message)));
    }

    let result = body.result.ok_or_else(|| {
        Retry::Fatal(IndexerError::Rpc("empty result from getEvents".to_string()))
    })?;

    Ok(EventsPage {
        events: result.events,
        cursor: result.cursor,
        latest_ledger: result.latest_ledger,
    })
}

fn build_params(contract_id: &str, start_ledger: u32, cursor: Option<&str>, limit: u32) -> Value {
    let mut params = json!({
        "filters": [
            {
                "type": "contract",
                "contractIds": [contract_id]
            }
        ],
        "pagination": {
            "limit": limit
        }
    });

    if let Some(cur) = cursor {
        params["pagination"]["cursor"] = json!(cur);
    } else {
        params["startLedger"] = json!(start_ledger);
    }

    params
}

// ─────────────────────────────────────────────────────────
// Decoding
// ─────────────────────────────────────────────────────────

/// Decode raw RPC events into [`CampaignEvent`]s. Events from reverted
/// contract calls are dropped: the contract state they describe was
/// rolled back.
pub fn decode_events(raw: &[RawEvent], contract_id: &str) -> Vec<CampaignEvent> {
    raw.iter()
        .filter(|e| e.in_successful_contract_call.unwrap_or(true))
        .filter_map(|e| decode_single(e, contract_id))
        .collect()
}

/// The event-specific slice of a decoded payload.
#[derive(Default)]
struct Decoded {
    role: Option<String>,
    enrollee_id: Option<i64>,
    actor: Option<String>,
    amount: Option<String>,
}

fn decode_single(raw: &RawEvent, contract_id: &str) -> Option<CampaignEvent> {
    let kind = EventKind::from_topic(&extract_symbol(raw.topic.first()?));

    // The second topic is the campaign id on every event we emit.
    let campaign_id = raw
        .topic
        .get(1)
        .and_then(|t| extract_u64(t))
        .map(|n| n as i64);

    let decoded = decode_payload(&raw.value, kind);

    Some(CampaignEvent {
        event_type: kind.as_str().to_string(),
        campaign_id,
        role: decoded.role,
        enrollee_id: decoded.enrollee_id,
        actor: decoded.actor,
        amount: decoded.amount,
        ledger: raw.ledger.unwrap_or(0) as i64,
        timestamp: raw
            .ledger_closed_at
            .as_deref()
            .and_then(parse_iso_to_unix)
            .unwrap_or(0),
        contract_id: raw
            .contract_id
            .clone()
            .unwrap_or_else(|| contract_id.to_string()),
        tx_hash: raw.tx_hash.clone(),
    })
}

/// Pull the event-specific fields out of the XDR-decoded payload object.
/// Field names follow the contract's `#[contracttype]` payload structs.
fn decode_payload(value: &Value, kind: EventKind) -> Decoded {
    let enrollment = Decoded {
        role: string_field(value, "role"),
        enrollee_id: int_field(value, "enrollee_id"),
        ..Decoded::default()
    };

    match kind {
        EventKind::CampaignLaunched => Decoded {
            actor: string_field(value, "owner"),
            amount: amount_field(value, "investment_cap"),
            ..Decoded::default()
        },
        EventKind::EnrolleeEnrolled => Decoded {
            actor: string_field(value, "address"),
            amount: amount_field(value, "weekly_expenditure"),
            ..enrollment
        },
        EventKind::EnrolleeRemoved => enrollment,
        EventKind::InvestmentDeposited => Decoded {
            actor: string_field(value, "investor"),
            amount: amount_field(value, "amount"),
            ..Decoded::default()
        },
        EventKind::BootcampStarted => Decoded {
            amount: amount_field(value, "start_time"),
            ..Decoded::default()
        },
        EventKind::BootcampFinished => Decoded {
            amount: amount_field(value, "finish_time"),
            ..Decoded::default()
        },
        EventKind::ExpenditureWithdrawn => Decoded {
            actor: string_field(value, "to"),
            amount: amount_field(value, "amount"),
            ..enrollment
        },
        EventKind::DebtRepaid => Decoded {
            enrollee_id: int_field(value, "enrollee_id"),
            actor: string_field(value, "payer"),
            amount: amount_field(value, "amount"),
            ..Decoded::default()
        },
        EventKind::RepaymentWithdrawn => Decoded {
            actor: string_field(value, "holder"),
            amount: amount_field(value, "amount"),
            ..Decoded::default()
        },
        EventKind::Unknown => Decoded::default(),
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        other => other.as_str().map(String::from),
    }
}

fn int_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Amounts are i128 on chain, so the RPC renders them as strings when
/// they exceed the JSON number range. Keep them as strings in the DB.
fn amount_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extract a Soroban Symbol from an XDR-decoded topic string. The RPC may
/// return `{"type":"symbol","value":"launched"}` or just the raw string.
fn extract_symbol(raw: &str) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        if let Some(s) = v.get("value").and_then(|x| x.as_str()) {
            return s.to_string();
        }
    }
    raw.to_string()
}

/// Extract a u64 topic entry that might be a JSON object, a bare number,
/// or a numeric string.
fn extract_u64(raw: &str) -> Option<u64> {
    if let Ok(v) = serde_json::from_str::<Value>(raw) {
        let inner = v.get("value").unwrap_or(&v);
        if let Some(n) = inner.as_u64() {
            return Some(n);
        }
        if let Some(s) = inner.as_str() {
            return s.parse().ok();
        }
    }
    raw.parse().ok()
}

/// Parse an ISO-8601 timestamp string into a Unix epoch (seconds).
fn parse_iso_to_unix(s: &str) -> Option<i64> {
    use chrono::DateTime;
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.timestamp())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
