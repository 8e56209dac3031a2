//! Client interface for the optional yield vault collaborator.
//!
//! The vault is a separate contract that wraps idle pooled currency into a
//! yield-bearing position. The campaign pushes currency to the vault's
//! address and then calls [`YieldVault::deposit`] to credit its position;
//! [`YieldVault::redeem`] sends currency back and returns the amount
//! actually transferred, which must be at least the requested principal
//! (any excess is accrued yield and stays with the campaign).

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "YieldVaultClient")]
pub trait YieldVault {
    /// Credit `amount` of already-transferred currency to `from`'s
    /// position.
    fn deposit(env: Env, from: Address, amount: i128);

    /// Redeem `amount` of principal back to `to`. Returns the currency
    /// actually transferred, never less than `amount`.
    fn redeem(env: Env, to: Address, amount: i128) -> i128;

    /// Principal currently held for `addr`.
    fn balance(env: Env, addr: Address) -> i128;
}
