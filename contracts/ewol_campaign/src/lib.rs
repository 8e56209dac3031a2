//! # Ewol Campaign Protocol Contract
//!
//! Income-share financing for training cohorts. It exposes the single
//! Soroban contract `EwolCampaign` whose entry points cover the full
//! campaign lifecycle:
//!
//! | Phase       | Entry Point(s)                                        |
//! |-------------|-------------------------------------------------------|
//! | Bootstrap   | [`EwolCampaign::init`]                                |
//! | Launch      | [`EwolCampaign::launch_campaign`]                     |
//! | Investment  | `enroll_participant`, `enroll_staff`, `remove_*`, `deposit_investment` |
//! | Bootcamp    | `start_bootcamp`, `pending_expenditure`, `withdraw_expenditure` |
//! | Repayment   | `finish_bootcamp`, `repay_debt`, `withdraw_repayment` |
//! | Shares      | `balance_of`, `transfer`, `approve`, `transfer_from`  |
//! | Queries     | `get_campaign`, `debt`, `releasable_repayment`, …     |
//!
//! ## Architecture
//!
//! The registry of the original system is a factory here: one contract
//! hosts any number of independent campaigns keyed by a sequential `u64`.
//! Storage access is fully delegated to [`storage`], share accounting to
//! [`ledger`]. Every storage write is committed before any external token
//! or vault call is issued, so reentrant callers can never observe stale
//! bookkeeping.
//!
//! All fallible entry points return `Result<_, Error>`, putting the error
//! taxonomy on the wire for callers and `try_` clients alike.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env, String};

mod ledger;
mod storage;
mod types;
pub mod events;
pub mod yield_vault;

#[cfg(test)]
mod test_accrual;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_vault;

use types::{CampaignConfig, CampaignState};
use yield_vault::YieldVaultClient;

pub use types::{Campaign, Enrollee, Period, Role};

/// Accrual granularity: stipends vest in whole weeks.
pub const WEEK_IN_SECONDS: u64 = 7 * 24 * 60 * 60;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Caller is not the registry owner / campaign owner.
    Unauthorized = 1,
    /// Operation not valid in the campaign's current period.
    InvalidPeriod = 2,
    AlreadyEnrolled = 3,
    /// Deposit would push `total_invested` past the investment cap.
    CapExceeded = 4,
    /// Deposit token is not the campaign's configured currency.
    UnsupportedToken = 5,
    /// Bootcamp solvency check failed, or a vault redemption fell short.
    InsufficientFunds = 6,
    TrainingNotComplete = 7,
    OverRepayment = 8,
    BootcampNotStarted = 9,
    NotEnrolled = 10,
    CampaignNotFound = 11,
    AlreadyInitialized = 12,
    InvalidAmount = 13,
    /// Staff share transfers are locked until Repayment.
    TransferLocked = 14,
    InsufficientBalance = 15,
    InsufficientAllowance = 16,
    Overflow = 17,
}

#[contract]
pub struct EwolCampaign;

#[contractimpl]
impl EwolCampaign {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Set the registry owner, the only address allowed to launch
    /// campaigns.
    ///
    /// Must be called exactly once after deployment; subsequent calls
    /// fail with `Error::AlreadyInitialized`.
    pub fn init(env: Env, owner: Address) -> Result<(), Error> {
        owner.require_auth();
        if storage::has_registry_owner(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_registry_owner(&env, &owner);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Registry / factory
    // ─────────────────────────────────────────────────────────

    /// Launch a new campaign with frozen economic parameters.
    ///
    /// Assigns the next sequential campaign id (starting at 0), stores
    /// the immutable config and initial state, and premints
    /// `premint_amount` campaign shares to the launcher. The launcher
    /// becomes the campaign owner.
    #[allow(clippy::too_many_arguments)]
    pub fn launch_campaign(
        env: Env,
        caller: Address,
        name: String,
        target_participants: u32,
        investment_per_participant: i128,
        cost_per_participant: i128,
        currency_token: Address,
        yield_vault: Option<Address>,
        weeks_of_training: u32,
        premint_amount: i128,
    ) -> Result<u64, Error> {
        caller.require_auth();
        if caller != storage::get_registry_owner(&env)? {
            return Err(Error::Unauthorized);
        }
        if investment_per_participant < 0 || cost_per_participant < 0 || premint_amount < 0 {
            return Err(Error::InvalidAmount);
        }
        // The cap must be representable; everything later assumes it is.
        let cap = investment_per_participant
            .checked_mul(target_participants as i128)
            .ok_or(Error::Overflow)?;

        let id = storage::get_and_increment_campaign_id(&env);
        let config = CampaignConfig {
            id,
            name,
            owner: caller.clone(),
            target_participants,
            investment_per_participant,
            cost_per_participant,
            currency_token: currency_token.clone(),
            yield_vault,
            weeks_of_training,
        };
        let mut state = CampaignState {
            period: Period::Investment,
            bootcamp_start: None,
            total_invested: 0,
            total_weekly_expenditure: 0,
            total_supply: 0,
            total_expenditures_withdrawn: 0,
            total_repayments_collected: 0,
            total_repayments_withdrawn: 0,
            vault_deposited: 0,
        };
        ledger::mint(&env, id, &mut state, &caller, premint_amount)?;
        storage::save_campaign(&env, &config, &state);

        events::emit_campaign_launched(
            &env,
            events::CampaignLaunched {
                campaign_id: id,
                owner: caller,
                currency_token,
                investment_cap: cap,
            },
        );
        Ok(id)
    }

    /// Number of campaigns launched so far.
    pub fn campaign_count(env: Env) -> u64 {
        storage::get_campaign_count(&env)
    }

    pub fn registry_owner(env: Env) -> Result<Address, Error> {
        storage::get_registry_owner(&env)
    }

    /// Full campaign view, reconstructed from the config/state split.
    pub fn get_campaign(env: Env, campaign_id: u64) -> Result<Campaign, Error> {
        storage::load_campaign(&env, campaign_id)
    }

    /// Maximum total currency the campaign may accept:
    /// `investment_per_participant × target_participants`.
    pub fn investment_cap(env: Env, campaign_id: u64) -> Result<i128, Error> {
        let config = storage::load_campaign_config(&env, campaign_id)?;
        Ok(config.investment_per_participant * config.target_participants as i128)
    }

    // ─────────────────────────────────────────────────────────
    // Enrollment (Investment period, campaign owner only)
    // ─────────────────────────────────────────────────────────

    /// Enroll a participant under `enrollee_id` with a weekly stipend
    /// rate. Fails with `AlreadyEnrolled` when the id holds a record.
    pub fn enroll_participant(
        env: Env,
        caller: Address,
        campaign_id: u64,
        enrollee_id: u64,
        address: Address,
        weekly_expenditure: i128,
    ) -> Result<(), Error> {
        Self::enroll(
            &env,
            caller,
            campaign_id,
            Role::Participant,
            enrollee_id,
            address,
            weekly_expenditure,
            0,
        )
    }

    /// Enroll a staffer. Same uniqueness rule as participants, plus a
    /// one-time share grant of `mint_on_enroll` and the staff transfer
    /// lock on the enrolled address.
    #[allow(clippy::too_many_arguments)]
    pub fn enroll_staff(
        env: Env,
        caller: Address,
        campaign_id: u64,
        enrollee_id: u64,
        address: Address,
        weekly_expenditure: i128,
        mint_on_enroll: i128,
    ) -> Result<(), Error> {
        Self::enroll(
            &env,
            caller,
            campaign_id,
            Role::Staff,
            enrollee_id,
            address,
            weekly_expenditure,
            mint_on_enroll,
        )
    }

    /// Remove a participant. Only valid while the campaign is still in
    /// Investment: accrual must never have begun for the record, so no
    /// pending amount can be stranded. The id becomes re-enrollable.
    pub fn remove_participant(
        env: Env,
        caller: Address,
        campaign_id: u64,
        enrollee_id: u64,
    ) -> Result<(), Error> {
        Self::remove(&env, caller, campaign_id, Role::Participant, enrollee_id)
    }

    /// Remove a staffer. The past `mint_on_enroll` grant is not clawed
    /// back and the address stays transfer-locked until Repayment.
    pub fn remove_staff(
        env: Env,
        caller: Address,
        campaign_id: u64,
        enrollee_id: u64,
    ) -> Result<(), Error> {
        Self::remove(&env, caller, campaign_id, Role::Staff, enrollee_id)
    }

    /// Enrollment record for an id, or `None` if never enrolled or
    /// removed.
    pub fn get_enrollee(
        env: Env,
        campaign_id: u64,
        role: Role,
        enrollee_id: u64,
    ) -> Result<Option<Enrollee>, Error> {
        storage::load_campaign_config(&env, campaign_id)?;
        Ok(storage::get_enrollee(&env, campaign_id, role, enrollee_id))
    }

    // ─────────────────────────────────────────────────────────
    // Investment intake (Investment period)
    // ─────────────────────────────────────────────────────────

    /// Deposit `amount` of the campaign currency, receiving campaign
    /// shares 1:1.
    ///
    /// Rejects any token other than the configured currency and any
    /// amount that would push `total_invested` past the cap.
    pub fn deposit_investment(
        env: Env,
        campaign_id: u64,
        investor: Address,
        token: Address,
        amount: i128,
    ) -> Result<(), Error> {
        investor.require_auth();
        let config = storage::load_campaign_config(&env, campaign_id)?;
        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        require_period(&state, Period::Investment)?;

        if token != config.currency_token {
            return Err(Error::UnsupportedToken);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let cap = config.investment_per_participant * config.target_participants as i128;
        if amount > cap - state.total_invested {
            return Err(Error::CapExceeded);
        }

        state.total_invested = add(state.total_invested, amount)?;
        ledger::mint(&env, campaign_id, &mut state, &investor, amount)?;
        storage::save_campaign_state(&env, campaign_id, &state);

        let token_client = token::Client::new(&env, &config.currency_token);
        token_client.transfer(&investor, &env.current_contract_address(), &amount);

        events::emit_investment_deposited(
            &env,
            events::InvestmentDeposited {
                campaign_id,
                investor,
                amount,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Period transitions (campaign owner only)
    // ─────────────────────────────────────────────────────────

    /// Transition Investment → Bootcamp.
    ///
    /// Requires the pool to cover the whole training window:
    /// `total_invested ≥ total_weekly_expenditure × weeks_of_training`.
    /// Records the start timestamp and, when a vault is configured,
    /// parks the pooled principal there.
    pub fn start_bootcamp(env: Env, caller: Address, campaign_id: u64) -> Result<(), Error> {
        let config = storage::load_campaign_config(&env, campaign_id)?;
        require_campaign_owner(&config, &caller)?;
        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        require_period(&state, Period::Investment)?;

        let required = state
            .total_weekly_expenditure
            .checked_mul(config.weeks_of_training as i128)
            .ok_or(Error::Overflow)?;
        if state.total_invested < required {
            return Err(Error::InsufficientFunds);
        }

        let now = env.ledger().timestamp();
        state.period = Period::Bootcamp;
        state.bootcamp_start = Some(now);
        let parked = if config.yield_vault.is_some() {
            state.total_invested
        } else {
            0
        };
        state.vault_deposited = parked;
        storage::save_campaign_state(&env, campaign_id, &state);

        if let Some(vault) = &config.yield_vault {
            if parked > 0 {
                let contract = env.current_contract_address();
                token::Client::new(&env, &config.currency_token).transfer(
                    &contract, vault, &parked,
                );
                YieldVaultClient::new(&env, vault).deposit(&contract, &parked);
            }
        }

        events::emit_bootcamp_started(
            &env,
            events::BootcampStarted {
                campaign_id,
                start_time: now,
            },
        );
        Ok(())
    }

    /// Transition Bootcamp → Repayment.
    ///
    /// Requires the full training duration to have elapsed. Redeems any
    /// principal still parked in the vault back into currency.
    pub fn finish_bootcamp(env: Env, caller: Address, campaign_id: u64) -> Result<(), Error> {
        let config = storage::load_campaign_config(&env, campaign_id)?;
        require_campaign_owner(&config, &caller)?;
        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        require_period(&state, Period::Bootcamp)?;

        let now = env.ledger().timestamp();
        let start = state.bootcamp_start.ok_or(Error::BootcampNotStarted)?;
        if now - start < config.weeks_of_training as u64 * WEEK_IN_SECONDS {
            return Err(Error::TrainingNotComplete);
        }

        state.period = Period::Repayment;
        let parked = state.vault_deposited;
        state.vault_deposited = 0;
        storage::save_campaign_state(&env, campaign_id, &state);

        if parked > 0 {
            redeem_from_vault(&env, &config, parked)?;
        }

        events::emit_bootcamp_finished(
            &env,
            events::BootcampFinished {
                campaign_id,
                finish_time: now,
            },
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Expenditure accrual & withdrawal
    // ─────────────────────────────────────────────────────────

    /// Stipend accrued but not yet withdrawn:
    /// `weekly_expenditure × floor(elapsed / week) − withdrawals`.
    ///
    /// Fails with `BootcampNotStarted` before the start timestamp is set.
    /// Accrual is purely time-based and keeps running past the training
    /// window until funds are withdrawn.
    pub fn pending_expenditure(
        env: Env,
        campaign_id: u64,
        role: Role,
        enrollee_id: u64,
    ) -> Result<i128, Error> {
        let state = storage::load_campaign_state(&env, campaign_id)?;
        let rec = storage::load_enrollee(&env, campaign_id, role, enrollee_id)?;
        pending_amount(&env, &state, &rec)
    }

    /// Withdraw the full pending stipend to the enrollee's address.
    ///
    /// Valid from Bootcamp onward; requires the enrollee's own auth.
    /// Returns the amount transferred; an immediate second call returns 0.
    pub fn withdraw_expenditure(
        env: Env,
        campaign_id: u64,
        role: Role,
        enrollee_id: u64,
    ) -> Result<i128, Error> {
        let config = storage::load_campaign_config(&env, campaign_id)?;
        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        if state.period == Period::Investment {
            return Err(Error::InvalidPeriod);
        }
        let mut rec = storage::load_enrollee(&env, campaign_id, role, enrollee_id)?;
        rec.address.require_auth();

        let pending = pending_amount(&env, &state, &rec)?;
        if pending == 0 {
            return Ok(0);
        }

        // Commit all bookkeeping before touching other contracts.
        rec.withdrawals = add(rec.withdrawals, pending)?;
        state.total_expenditures_withdrawn =
            add(state.total_expenditures_withdrawn, pending)?;
        let from_vault = pending.min(state.vault_deposited);
        state.vault_deposited -= from_vault;
        storage::save_enrollee(&env, campaign_id, role, enrollee_id, &rec);
        storage::save_campaign_state(&env, campaign_id, &state);

        if from_vault > 0 {
            redeem_from_vault(&env, &config, from_vault)?;
        }
        token::Client::new(&env, &config.currency_token).transfer(
            &env.current_contract_address(),
            &rec.address,
            &pending,
        );

        events::emit_expenditure_withdrawn(
            &env,
            events::ExpenditureWithdrawn {
                campaign_id,
                role,
                enrollee_id,
                to: rec.address,
                amount: pending,
            },
        );
        Ok(pending)
    }

    // ─────────────────────────────────────────────────────────
    // Debt & repayment
    // ─────────────────────────────────────────────────────────

    /// Outstanding participant debt:
    /// `cost_per_participant + withdrawals − repayments`.
    pub fn debt(env: Env, campaign_id: u64, enrollee_id: u64) -> Result<i128, Error> {
        let config = storage::load_campaign_config(&env, campaign_id)?;
        let rec = storage::load_enrollee(&env, campaign_id, Role::Participant, enrollee_id)?;
        debt_amount(&config, &rec)
    }

    /// Repay part of a participant's debt. Any authenticated payer may
    /// pay on the participant's behalf; the repaid currency joins the
    /// pooled distribution pot for share holders.
    pub fn repay_debt(
        env: Env,
        campaign_id: u64,
        payer: Address,
        enrollee_id: u64,
        amount: i128,
    ) -> Result<(), Error> {
        payer.require_auth();
        let config = storage::load_campaign_config(&env, campaign_id)?;
        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        require_period(&state, Period::Repayment)?;
        let mut rec = storage::load_enrollee(&env, campaign_id, Role::Participant, enrollee_id)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if amount > debt_amount(&config, &rec)? {
            return Err(Error::OverRepayment);
        }

        rec.repayments = add(rec.repayments, amount)?;
        state.total_repayments_collected = add(state.total_repayments_collected, amount)?;
        storage::save_enrollee(&env, campaign_id, Role::Participant, enrollee_id, &rec);
        storage::save_campaign_state(&env, campaign_id, &state);

        token::Client::new(&env, &config.currency_token).transfer(
            &payer,
            &env.current_contract_address(),
            &amount,
        );

        events::emit_debt_repaid(
            &env,
            events::DebtRepaid {
                campaign_id,
                enrollee_id,
                payer,
                amount,
            },
        );
        Ok(())
    }

    /// A holder's claimable slice of all repayments collected so far:
    /// `balance × total_repayments_collected / total_supply` adjusted by
    /// the holder's transfer correction, minus what the holder already
    /// withdrew. The floor-division remainder stays in the pool.
    pub fn releasable_repayment(
        env: Env,
        campaign_id: u64,
        holder: Address,
    ) -> Result<i128, Error> {
        let state = storage::load_campaign_state(&env, campaign_id)?;
        releasable_amount(&env, campaign_id, &state, &holder)
    }

    /// Cumulative repayment payout already made to `holder`.
    pub fn repayments_withdrawn(
        env: Env,
        campaign_id: u64,
        holder: Address,
    ) -> Result<i128, Error> {
        storage::load_campaign_config(&env, campaign_id)?;
        Ok(storage::get_repayments_withdrawn(&env, campaign_id, &holder))
    }

    /// Withdraw the holder's releasable repayment share. Returns the
    /// amount transferred (0 when nothing is due).
    pub fn withdraw_repayment(env: Env, campaign_id: u64, holder: Address) -> Result<i128, Error> {
        holder.require_auth();
        let config = storage::load_campaign_config(&env, campaign_id)?;
        let mut state = storage::load_campaign_state(&env, campaign_id)?;
        require_period(&state, Period::Repayment)?;

        let amount = releasable_amount(&env, campaign_id, &state, &holder)?;
        if amount == 0 {
            return Ok(0);
        }

        let already = storage::get_repayments_withdrawn(&env, campaign_id, &holder);
        storage::set_repayments_withdrawn(&env, campaign_id, &holder, add(already, amount)?);
        state.total_repayments_withdrawn = add(state.total_repayments_withdrawn, amount)?;
        storage::save_campaign_state(&env, campaign_id, &state);

        token::Client::new(&env, &config.currency_token).transfer(
            &env.current_contract_address(),
            &holder,
            &amount,
        );

        events::emit_repayment_withdrawn(
            &env,
            events::RepaymentWithdrawn {
                campaign_id,
                holder,
                amount,
            },
        );
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Campaign share ledger
    // ─────────────────────────────────────────────────────────

    pub fn balance_of(env: Env, campaign_id: u64, addr: Address) -> Result<i128, Error> {
        storage::load_campaign_config(&env, campaign_id)?;
        Ok(storage::get_balance(&env, campaign_id, &addr))
    }

    pub fn total_supply(env: Env, campaign_id: u64) -> Result<i128, Error> {
        Ok(storage::load_campaign_state(&env, campaign_id)?.total_supply)
    }

    /// Whether `addr` carries the staff transfer lock.
    pub fn is_staff(env: Env, campaign_id: u64, addr: Address) -> Result<bool, Error> {
        storage::load_campaign_config(&env, campaign_id)?;
        Ok(storage::is_staff(&env, campaign_id, &addr))
    }

    /// Transfer campaign shares. Staff-flagged senders are locked until
    /// the campaign reaches Repayment. Already-collected repayments stay
    /// with the sender; only future collections follow the shares.
    pub fn transfer(
        env: Env,
        campaign_id: u64,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        from.require_auth();
        let state = storage::load_campaign_state(&env, campaign_id)?;
        ledger::transfer_shares(&env, campaign_id, &state, &from, &to, amount)
    }

    pub fn approve(
        env: Env,
        campaign_id: u64,
        from: Address,
        spender: Address,
        amount: i128,
    ) -> Result<(), Error> {
        from.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        storage::load_campaign_config(&env, campaign_id)?;
        storage::set_allowance(&env, campaign_id, &from, &spender, amount);
        Ok(())
    }

    pub fn allowance(env: Env, campaign_id: u64, from: Address, spender: Address) -> i128 {
        storage::get_allowance(&env, campaign_id, &from, &spender)
    }

    /// Allowance-based transfer; the staff lock applies to `from`.
    pub fn transfer_from(
        env: Env,
        campaign_id: u64,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        spender.require_auth();
        let state = storage::load_campaign_state(&env, campaign_id)?;
        ledger::spend_allowance(&env, campaign_id, &from, &spender, amount)?;
        ledger::transfer_shares(&env, campaign_id, &state, &from, &to, amount)
    }
}

// ─────────────────────────────────────────────────────────────
// Internal helpers
// ─────────────────────────────────────────────────────────────

impl EwolCampaign {
    #[allow(clippy::too_many_arguments)]
    fn enroll(
        env: &Env,
        caller: Address,
        campaign_id: u64,
        role: Role,
        enrollee_id: u64,
        address: Address,
        weekly_expenditure: i128,
        mint_on_enroll: i128,
    ) -> Result<(), Error> {
        let config = storage::load_campaign_config(env, campaign_id)?;
        require_campaign_owner(&config, &caller)?;
        let mut state = storage::load_campaign_state(env, campaign_id)?;
        require_period(&state, Period::Investment)?;

        if weekly_expenditure < 0 || mint_on_enroll < 0 {
            return Err(Error::InvalidAmount);
        }
        if storage::get_enrollee(env, campaign_id, role, enrollee_id).is_some() {
            return Err(Error::AlreadyEnrolled);
        }

        let rec = Enrollee {
            address: address.clone(),
            weekly_expenditure,
            withdrawals: 0,
            repayments: 0,
            mint_on_enroll,
        };
        storage::save_enrollee(env, campaign_id, role, enrollee_id, &rec);
        state.total_weekly_expenditure =
            add(state.total_weekly_expenditure, weekly_expenditure)?;
        if role == Role::Staff {
            ledger::mint(env, campaign_id, &mut state, &address, mint_on_enroll)?;
            storage::mark_staff(env, campaign_id, &address);
        }
        storage::save_campaign_state(env, campaign_id, &state);

        events::emit_enrollee_enrolled(
            env,
            events::EnrolleeEnrolled {
                campaign_id,
                role,
                enrollee_id,
                address,
                weekly_expenditure,
            },
        );
        Ok(())
    }

    fn remove(
        env: &Env,
        caller: Address,
        campaign_id: u64,
        role: Role,
        enrollee_id: u64,
    ) -> Result<(), Error> {
        let config = storage::load_campaign_config(env, campaign_id)?;
        require_campaign_owner(&config, &caller)?;
        let mut state = storage::load_campaign_state(env, campaign_id)?;
        require_period(&state, Period::Investment)?;

        let rec = storage::load_enrollee(env, campaign_id, role, enrollee_id)?;
        state.total_weekly_expenditure -= rec.weekly_expenditure;
        storage::remove_enrollee(env, campaign_id, role, enrollee_id);
        storage::save_campaign_state(env, campaign_id, &state);

        events::emit_enrollee_removed(
            env,
            events::EnrolleeRemoved {
                campaign_id,
                role,
                enrollee_id,
            },
        );
        Ok(())
    }
}

fn add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}

fn require_campaign_owner(config: &CampaignConfig, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != config.owner {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

fn require_period(state: &CampaignState, expected: Period) -> Result<(), Error> {
    if state.period != expected {
        return Err(Error::InvalidPeriod);
    }
    Ok(())
}

/// `weekly × floor(elapsed / week) − withdrawn`, monotonic between
/// withdrawals and zero immediately after one.
fn pending_amount(env: &Env, state: &CampaignState, rec: &Enrollee) -> Result<i128, Error> {
    let start = state.bootcamp_start.ok_or(Error::BootcampNotStarted)?;
    let elapsed_weeks = (env.ledger().timestamp() - start) / WEEK_IN_SECONDS;
    let accrued = rec
        .weekly_expenditure
        .checked_mul(elapsed_weeks as i128)
        .ok_or(Error::Overflow)?;
    Ok(accrued - rec.withdrawals)
}

fn debt_amount(config: &CampaignConfig, rec: &Enrollee) -> Result<i128, Error> {
    Ok(add(config.cost_per_participant, rec.withdrawals)? - rec.repayments)
}

/// Pro-rata entitlement minus payouts already made. The transfer
/// correction keeps already-collected repayments with whoever held the
/// shares at collection time; clamped at zero against rounding drift.
fn releasable_amount(
    env: &Env,
    campaign_id: u64,
    state: &CampaignState,
    holder: &Address,
) -> Result<i128, Error> {
    if state.total_supply == 0 {
        return Ok(0);
    }
    let balance = storage::get_balance(env, campaign_id, holder);
    let share = balance
        .checked_mul(state.total_repayments_collected)
        .ok_or(Error::Overflow)?
        / state.total_supply;
    let entitled = add(share, storage::get_payout_correction(env, campaign_id, holder))?;
    let due = entitled - storage::get_repayments_withdrawn(env, campaign_id, holder);
    Ok(due.max(0))
}

/// Pull `amount` of parked principal back from the vault. The vault must
/// return at least the requested principal; surplus yield simply stays in
/// the campaign's currency balance.
fn redeem_from_vault(env: &Env, config: &CampaignConfig, amount: i128) -> Result<(), Error> {
    let vault = config.yield_vault.as_ref().ok_or(Error::InsufficientFunds)?;
    let redeemed =
        YieldVaultClient::new(env, vault).redeem(&env.current_contract_address(), &amount);
    if redeemed < amount {
        return Err(Error::InsufficientFunds);
    }
    Ok(())
}
