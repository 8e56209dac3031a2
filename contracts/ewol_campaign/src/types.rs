//! # Types
//!
//! Shared data structures used across all modules of the campaign protocol.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A campaign is internally stored as two separate ledger entries:
//!
//! - [`CampaignConfig`] — written once at launch; never mutated.
//! - [`CampaignState`] — written on every deposit, enrollment change,
//!   withdrawal, and period transition.
//!
//! The public API exposes the reconstructed [`Campaign`] struct for
//! convenience.
//!
//! ### Period as a Finite-State Machine
//!
//! [`Period`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Investment ──► Bootcamp ──► Repayment
//! ```
//!
//! There are no backward transitions and no terminal-state exits. Every
//! state-mutating entry point is gated to the period(s) in which it is
//! semantically valid.

use soroban_sdk::{contracttype, Address, String};

/// Lifecycle period of a campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Period {
    /// Accepting investments and enrollment changes.
    Investment,
    /// Training in progress; stipends accrue weekly.
    Bootcamp,
    /// Training done; participants repay debt, holders collect payouts.
    Repayment,
}

/// Enrollment role. Participant and staff ids live in independent
/// namespaces keyed by this discriminant.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Trainee drawing a stipend during Bootcamp and owing debt afterwards.
    Participant,
    /// Personnel drawing a stipend plus a one-time share grant, transfer
    /// locked until Repayment.
    Staff,
}

/// Immutable campaign configuration, written once at launch.
///
/// Stored separately from mutable state so the frequent writes (deposits,
/// withdrawals) only touch the small [`CampaignState`] entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    pub id: u64,
    pub name: String,
    /// Campaign owner; the only address allowed to enroll, remove, and
    /// drive period transitions.
    pub owner: Address,
    pub target_participants: u32,
    /// Investment sought per participant; the cap is this times
    /// `target_participants`.
    pub investment_per_participant: i128,
    /// Debt principal each participant owes on top of withdrawn stipends.
    pub cost_per_participant: i128,
    /// The single currency token accepted for deposits and used for payouts.
    pub currency_token: Address,
    /// Optional yield vault where pooled funds are parked during Bootcamp.
    pub yield_vault: Option<Address>,
    pub weeks_of_training: u32,
}

/// Mutable campaign state, updated by every state-changing operation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    pub period: Period,
    /// Set exactly once, on the transition to Bootcamp.
    pub bootcamp_start: Option<u64>,
    pub total_invested: i128,
    /// Sum of all enrolled participants' and staffers' weekly rates.
    pub total_weekly_expenditure: i128,
    /// Campaign share supply; grows via deposits, staff grants, and the
    /// launch premint.
    pub total_supply: i128,
    pub total_expenditures_withdrawn: i128,
    /// Repayments ever collected; the distribution pot numerator.
    pub total_repayments_collected: i128,
    pub total_repayments_withdrawn: i128,
    /// Currency principal currently parked in the yield vault.
    pub vault_deposited: i128,
}

/// A participant or staffer record.
///
/// Removal deletes the record outright; a removed id reads back as `None`
/// and may be explicitly re-enrolled.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Enrollee {
    pub address: Address,
    pub weekly_expenditure: i128,
    /// Stipend withdrawn so far.
    pub withdrawals: i128,
    /// Debt repaid so far (participants only; stays zero for staff).
    pub repayments: i128,
    /// One-time share grant credited at enrollment (staff only).
    pub mint_on_enroll: i128,
}

/// Full view of a campaign, reconstructed from the split
/// `CampaignConfig` + `CampaignState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub id: u64,
    pub name: String,
    pub owner: Address,
    pub target_participants: u32,
    pub investment_per_participant: i128,
    pub cost_per_participant: i128,
    pub currency_token: Address,
    pub yield_vault: Option<Address>,
    pub weeks_of_training: u32,
    pub period: Period,
    pub bootcamp_start: Option<u64>,
    pub total_invested: i128,
    /// Derived: `investment_per_participant × target_participants`.
    pub investment_cap: i128,
    pub total_weekly_expenditure: i128,
    pub total_supply: i128,
    pub total_expenditures_withdrawn: i128,
    pub total_repayments_collected: i128,
    pub total_repayments_withdrawn: i128,
    /// Currency principal currently parked in the yield vault.
    pub vault_deposited: i128,
}
