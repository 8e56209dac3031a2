//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key             | Type      | Description                          |
//! |-----------------|-----------|--------------------------------------|
//! | `RegistryOwner` | `Address` | Owner allowed to launch campaigns    |
//! | `CampaignCount` | `u64`     | Auto-increment campaign ID counter   |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day
//! remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                      | Type             | Description              |
//! |--------------------------|------------------|--------------------------|
//! | `CampConfig(id)`         | `CampaignConfig` | Immutable configuration  |
//! | `CampState(id)`          | `CampaignState`  | Mutable state            |
//! | `Enrollee(id, role, n)`  | `Enrollee`       | Enrollment record        |
//! | `Balance(id, addr)`      | `i128`           | Campaign share balance   |
//! | `Allowance(id, o, s)`    | `i128`           | Share spend allowance    |
//! | `RepayOut(id, addr)`     | `i128`           | Repayment paid to holder |
//! | `PayoutCorrection(id, addr)` | `i128`       | Signed transfer correction |
//! | `Staff(id, addr)`        | `bool`           | Staff transfer-lock flag |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days
//! remaining.
//!
//! ## Why split Config and State?
//!
//! Deposits and stipend withdrawals are the high-frequency writes. Writing
//! the full campaign record on each of them is wasteful; the mutable
//! [`CampaignState`] entry is a fraction of the size, and the public API
//! still returns the combined [`Campaign`] view.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{Campaign, CampaignConfig, CampaignState, Enrollee, Role};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
///
/// Instance-tier keys (`RegistryOwner`, `CampaignCount`) live as long as
/// the contract. Persistent-tier keys hold per-campaign data with
/// independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Registry owner address (Instance).
    RegistryOwner,
    /// Global auto-increment counter for campaign IDs (Instance).
    CampaignCount,
    /// Immutable campaign configuration keyed by ID (Persistent).
    CampConfig(u64),
    /// Mutable campaign state keyed by ID (Persistent).
    CampState(u64),
    /// Enrollment record keyed by campaign, role, and enrollee ID
    /// (Persistent). Participant and staff ids are separate namespaces.
    Enrollee(u64, Role, u64),
    /// Campaign share balance per holder (Persistent).
    Balance(u64, Address),
    /// Share allowance `(campaign, owner, spender)` (Persistent).
    Allowance(u64, Address, Address),
    /// Cumulative repayment payout per holder (Persistent).
    RepayOut(u64, Address),
    /// Signed payout correction moved alongside share transfers so
    /// already-collected repayments stay with the sender (Persistent).
    PayoutCorrection(u64, Address),
    /// Staff-role marker; set at staff enrollment, never cleared
    /// (Persistent).
    Staff(u64, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn has_registry_owner(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::RegistryOwner)
}

pub fn set_registry_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::RegistryOwner, owner);
    bump_instance(env);
}

/// Retrieve the registry owner. Fails if `init` has not run.
pub fn get_registry_owner(env: &Env) -> Result<Address, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::RegistryOwner)
        .ok_or(Error::Unauthorized)
}

/// Atomically reads, increments, and stores the campaign counter.
/// Returns the ID to use for the *current* campaign (pre-increment value).
pub fn get_and_increment_campaign_id(env: &Env) -> u64 {
    bump_instance(env);
    let current: u64 = env
        .storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0);
    env.storage()
        .instance()
        .set(&DataKey::CampaignCount, &(current + 1));
    current
}

pub fn get_campaign_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save both the immutable config and initial mutable state for a new
/// campaign.
pub fn save_campaign(env: &Env, config: &CampaignConfig, state: &CampaignState) {
    let config_key = DataKey::CampConfig(config.id);
    let state_key = DataKey::CampState(config.id);
    env.storage().persistent().set(&config_key, config);
    env.storage().persistent().set(&state_key, state);
    bump_persistent(env, &config_key);
    bump_persistent(env, &state_key);
}

/// Load only the immutable campaign configuration.
pub fn load_campaign_config(env: &Env, id: u64) -> Result<CampaignConfig, Error> {
    let key = DataKey::CampConfig(id);
    let config: CampaignConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::CampaignNotFound)?;
    bump_persistent(env, &key);
    Ok(config)
}

/// Load only the mutable campaign state.
pub fn load_campaign_state(env: &Env, id: u64) -> Result<CampaignState, Error> {
    let key = DataKey::CampState(id);
    let state: CampaignState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::CampaignNotFound)?;
    bump_persistent(env, &key);
    Ok(state)
}

/// Save only the mutable campaign state (the hot write path).
pub fn save_campaign_state(env: &Env, id: u64, state: &CampaignState) {
    let key = DataKey::CampState(id);
    env.storage().persistent().set(&key, state);
    bump_persistent(env, &key);
}

/// Load the full [`Campaign`] view by combining config and state.
pub fn load_campaign(env: &Env, id: u64) -> Result<Campaign, Error> {
    let config = load_campaign_config(env, id)?;
    let state = load_campaign_state(env, id)?;
    let cap = config.investment_per_participant * config.target_participants as i128;
    Ok(Campaign {
        id: config.id,
        name: config.name,
        owner: config.owner,
        target_participants: config.target_participants,
        investment_per_participant: config.investment_per_participant,
        cost_per_participant: config.cost_per_participant,
        currency_token: config.currency_token,
        yield_vault: config.yield_vault,
        weeks_of_training: config.weeks_of_training,
        period: state.period,
        bootcamp_start: state.bootcamp_start,
        total_invested: state.total_invested,
        investment_cap: cap,
        total_weekly_expenditure: state.total_weekly_expenditure,
        total_supply: state.total_supply,
        total_expenditures_withdrawn: state.total_expenditures_withdrawn,
        total_repayments_collected: state.total_repayments_collected,
        total_repayments_withdrawn: state.total_repayments_withdrawn,
        vault_deposited: state.vault_deposited,
    })
}

// ── Enrollment records ───────────────────────────────────────────────

pub fn get_enrollee(env: &Env, campaign_id: u64, role: Role, id: u64) -> Option<Enrollee> {
    let key = DataKey::Enrollee(campaign_id, role, id);
    let rec: Option<Enrollee> = env.storage().persistent().get(&key);
    if rec.is_some() {
        bump_persistent(env, &key);
    }
    rec
}

/// Load an enrollee or fail with `NotEnrolled`.
pub fn load_enrollee(env: &Env, campaign_id: u64, role: Role, id: u64) -> Result<Enrollee, Error> {
    get_enrollee(env, campaign_id, role, id).ok_or(Error::NotEnrolled)
}

pub fn save_enrollee(env: &Env, campaign_id: u64, role: Role, id: u64, rec: &Enrollee) {
    let key = DataKey::Enrollee(campaign_id, role, id);
    env.storage().persistent().set(&key, rec);
    bump_persistent(env, &key);
}

pub fn remove_enrollee(env: &Env, campaign_id: u64, role: Role, id: u64) {
    env.storage()
        .persistent()
        .remove(&DataKey::Enrollee(campaign_id, role, id));
}

// ── Share ledger entries ─────────────────────────────────────────────

pub fn get_balance(env: &Env, campaign_id: u64, addr: &Address) -> i128 {
    let key = DataKey::Balance(campaign_id, addr.clone());
    let bal: i128 = env.storage().persistent().get(&key).unwrap_or(0);
    if bal != 0 {
        bump_persistent(env, &key);
    }
    bal
}

pub fn set_balance(env: &Env, campaign_id: u64, addr: &Address, amount: i128) {
    let key = DataKey::Balance(campaign_id, addr.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn get_allowance(env: &Env, campaign_id: u64, from: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Allowance(campaign_id, from.clone(), spender.clone()))
        .unwrap_or(0)
}

pub fn set_allowance(
    env: &Env,
    campaign_id: u64,
    from: &Address,
    spender: &Address,
    amount: i128,
) {
    let key = DataKey::Allowance(campaign_id, from.clone(), spender.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn get_repayments_withdrawn(env: &Env, campaign_id: u64, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::RepayOut(campaign_id, holder.clone()))
        .unwrap_or(0)
}

pub fn set_repayments_withdrawn(env: &Env, campaign_id: u64, holder: &Address, amount: i128) {
    let key = DataKey::RepayOut(campaign_id, holder.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn get_payout_correction(env: &Env, campaign_id: u64, holder: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::PayoutCorrection(campaign_id, holder.clone()))
        .unwrap_or(0)
}

pub fn set_payout_correction(env: &Env, campaign_id: u64, holder: &Address, amount: i128) {
    let key = DataKey::PayoutCorrection(campaign_id, holder.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn is_staff(env: &Env, campaign_id: u64, addr: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Staff(campaign_id, addr.clone()))
        .unwrap_or(false)
}

pub fn mark_staff(env: &Env, campaign_id: u64, addr: &Address) {
    let key = DataKey::Staff(campaign_id, addr.clone());
    env.storage().persistent().set(&key, &true);
    bump_persistent(env, &key);
}
