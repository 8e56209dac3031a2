//! Campaign share ledger.
//!
//! Each campaign carries its own fungible share balance: 1 share is minted
//! per currency unit invested, staff receive a one-time grant at
//! enrollment, and the launcher may receive a premint. Shares weight the
//! proportional repayment distribution.
//!
//! Transfers out of a staff-flagged address are locked until the campaign
//! reaches Repayment; the flag is set at staff enrollment and survives
//! enrollment removal.
//!
//! Transfers also move a pro-rata payout correction: repayments collected
//! while the sender held the shares remain claimable by the sender and
//! are not claimable again by the recipient. Minting never needs a
//! correction because shares are only created during Investment, before
//! any repayment is collected.

use soroban_sdk::{Address, Env};

use crate::storage;
use crate::types::{CampaignState, Period};
use crate::Error;

fn add(a: i128, b: i128) -> Result<i128, Error> {
    a.checked_add(b).ok_or(Error::Overflow)
}

/// Mint `amount` shares to `to`, growing the campaign supply.
///
/// The caller is responsible for persisting `state` afterwards.
pub fn mint(
    env: &Env,
    campaign_id: u64,
    state: &mut CampaignState,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    let balance = storage::get_balance(env, campaign_id, to);
    storage::set_balance(env, campaign_id, to, add(balance, amount)?);
    state.total_supply = add(state.total_supply, amount)?;
    Ok(())
}

/// Move `amount` shares from `from` to `to`, enforcing the staff lock
/// and carrying the payout correction.
pub fn transfer_shares(
    env: &Env,
    campaign_id: u64,
    state: &CampaignState,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    if amount <= 0 {
        return Err(Error::InvalidAmount);
    }
    if storage::is_staff(env, campaign_id, from) && state.period != Period::Repayment {
        return Err(Error::TransferLocked);
    }
    let from_balance = storage::get_balance(env, campaign_id, from);
    if from_balance < amount {
        return Err(Error::InsufficientBalance);
    }
    let to_balance = storage::get_balance(env, campaign_id, to);
    storage::set_balance(env, campaign_id, from, from_balance - amount);
    storage::set_balance(env, campaign_id, to, add(to_balance, amount)?);

    // The transferred shares' slice of already-collected repayments
    // belongs to the sender. Shift the correction so the recipient's
    // entitlement starts at zero for past collections.
    if state.total_repayments_collected > 0 && state.total_supply > 0 {
        let slice = amount
            .checked_mul(state.total_repayments_collected)
            .ok_or(Error::Overflow)?
            / state.total_supply;
        if slice > 0 {
            let from_corr = storage::get_payout_correction(env, campaign_id, from);
            let to_corr = storage::get_payout_correction(env, campaign_id, to);
            storage::set_payout_correction(env, campaign_id, from, add(from_corr, slice)?);
            storage::set_payout_correction(env, campaign_id, to, to_corr - slice);
        }
    }
    Ok(())
}

/// Consume `amount` from the `(from, spender)` allowance, failing when the
/// allowance does not cover it.
pub fn spend_allowance(
    env: &Env,
    campaign_id: u64,
    from: &Address,
    spender: &Address,
    amount: i128,
) -> Result<(), Error> {
    let allowance = storage::get_allowance(env, campaign_id, from, spender);
    if allowance < amount {
        return Err(Error::InsufficientAllowance);
    }
    storage::set_allowance(env, campaign_id, from, spender, allowance - amount);
    Ok(())
}
