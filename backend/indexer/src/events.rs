//! Event model for the campaign contract.
//!
//! Mirrors the payload structs published by
//! `contracts/ewol_campaign/src/events.rs`: every contract event carries
//! the topic pair `(symbol, campaign_id)`, and enrollment-scoped events
//! additionally identify the enrollee by `(role, enrollee_id)`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the campaign contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A new campaign was launched (`launched` topic).
    CampaignLaunched,
    /// A participant or staffer was enrolled (`enrolled` topic).
    EnrolleeEnrolled,
    /// An enrollment record was removed (`removed` topic).
    EnrolleeRemoved,
    /// Currency was invested into the pool (`invested` topic).
    InvestmentDeposited,
    /// The campaign entered its Bootcamp period (`started` topic).
    BootcampStarted,
    /// The campaign entered its Repayment period (`finished` topic).
    BootcampFinished,
    /// An enrollee withdrew accrued stipend (`stipend` topic).
    ExpenditureWithdrawn,
    /// Participant debt was repaid into the pool (`repaid` topic).
    DebtRepaid,
    /// A share holder withdrew their repayment slice (`repay_out` topic).
    RepaymentWithdrawn,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol published by the contract.
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "launched" => Self::CampaignLaunched,
            "enrolled" => Self::EnrolleeEnrolled,
            "removed" => Self::EnrolleeRemoved,
            "invested" => Self::InvestmentDeposited,
            "started" => Self::BootcampStarted,
            "finished" => Self::BootcampFinished,
            "stipend" => Self::ExpenditureWithdrawn,
            "repaid" => Self::DebtRepaid,
            "repay_out" => Self::RepaymentWithdrawn,
            _ => Self::Unknown,
        }
    }

    /// Identifier string stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignLaunched => "campaign_launched",
            Self::EnrolleeEnrolled => "enrollee_enrolled",
            Self::EnrolleeRemoved => "enrollee_removed",
            Self::InvestmentDeposited => "investment_deposited",
            Self::BootcampStarted => "bootcamp_started",
            Self::BootcampFinished => "bootcamp_finished",
            Self::ExpenditureWithdrawn => "expenditure_withdrawn",
            Self::DebtRepaid => "debt_repaid",
            Self::RepaymentWithdrawn => "repayment_withdrawn",
            Self::Unknown => "unknown",
        }
    }
}

/// A fully decoded campaign event, ready to be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignEvent {
    pub event_type: String,
    pub campaign_id: Option<i64>,
    /// Participant / staff role, for enrollment-scoped events.
    pub role: Option<String>,
    /// Per-role enrollee identifier, for enrollment-scoped events.
    pub enrollee_id: Option<i64>,
    /// The address the event is about (owner, investor, payer, holder, ...).
    pub actor: Option<String>,
    /// Stringified i128 amount; event-dependent (invested, repaid, cap, ...).
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event row as read back from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_type: String,
    pub campaign_id: Option<i64>,
    pub role: Option<String>,
    pub enrollee_id: Option<i64>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

/// Per-campaign totals derived by folding the event log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub campaign_id: i64,
    /// "investment", "bootcamp" or "repayment", derived from lifecycle events.
    pub period: String,
    pub enrolled: i64,
    pub removed: i64,
    pub total_invested: i128,
    pub total_expenditures_withdrawn: i128,
    pub total_repayments_collected: i128,
    pub total_repayments_withdrawn: i128,
    pub event_count: i64,
}
