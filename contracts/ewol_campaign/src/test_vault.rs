#![cfg(test)]

extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::test::{advance_time, create_currency, setup, DAY};
use crate::{Error, Role};

use mock_vault::{MockYieldVault, MockYieldVaultClient};
use shortfall_vault::{ShortfallVault, ShortfallVaultClient};

const WEEK: u64 = 7 * DAY;

/// In-memory stand-in for a yield vault: tracks principal per depositor
/// and pays a configurable basis-point bonus on redemption. The bonus is
/// funded by currency minted straight to the vault in test setup.
mod mock_vault {
    use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};

    #[contracttype]
    pub enum VaultKey {
        Currency,
        BonusBps,
        Position(Address),
    }

    #[contract]
    pub struct MockYieldVault;

    #[contractimpl]
    impl MockYieldVault {
        pub fn init(env: Env, currency: Address, bonus_bps: i128) {
            env.storage().instance().set(&VaultKey::Currency, &currency);
            env.storage().instance().set(&VaultKey::BonusBps, &bonus_bps);
        }

        pub fn deposit(env: Env, from: Address, amount: i128) {
            let position: i128 = env
                .storage()
                .instance()
                .get(&VaultKey::Position(from.clone()))
                .unwrap_or(0);
            env.storage()
                .instance()
                .set(&VaultKey::Position(from), &(position + amount));
        }

        pub fn redeem(env: Env, to: Address, amount: i128) -> i128 {
            let position: i128 = env
                .storage()
                .instance()
                .get(&VaultKey::Position(to.clone()))
                .unwrap_or(0);
            env.storage()
                .instance()
                .set(&VaultKey::Position(to.clone()), &(position - amount));

            let bonus_bps: i128 = env.storage().instance().get(&VaultKey::BonusBps).unwrap();
            let payout = amount + amount * bonus_bps / 10_000;
            let currency: Address = env.storage().instance().get(&VaultKey::Currency).unwrap();
            token::Client::new(&env, &currency).transfer(
                &env.current_contract_address(),
                &to,
                &payout,
            );
            payout
        }

        pub fn balance(env: Env, addr: Address) -> i128 {
            env.storage()
                .instance()
                .get(&VaultKey::Position(addr))
                .unwrap_or(0)
        }
    }
}

/// A vault that always returns one unit short of the requested principal.
mod shortfall_vault {
    use soroban_sdk::{contract, contractimpl, contracttype, token, Address, Env};

    #[contracttype]
    pub enum VaultKey {
        Currency,
    }

    #[contract]
    pub struct ShortfallVault;

    #[contractimpl]
    impl ShortfallVault {
        pub fn init(env: Env, currency: Address) {
            env.storage().instance().set(&VaultKey::Currency, &currency);
        }

        pub fn deposit(_env: Env, _from: Address, _amount: i128) {}

        pub fn redeem(env: Env, to: Address, amount: i128) -> i128 {
            let currency: Address = env.storage().instance().get(&VaultKey::Currency).unwrap();
            let short = amount - 1;
            token::Client::new(&env, &currency).transfer(
                &env.current_contract_address(),
                &to,
                &short,
            );
            short
        }

        pub fn balance(_env: Env, _addr: Address) -> i128 {
            0
        }
    }
}

fn launch_with_vault(
    env: &Env,
    client: &crate::EwolCampaignClient,
    owner: &Address,
    currency: &Address,
    vault: &Address,
) -> u64 {
    client.launch_campaign(
        owner,
        &String::from_str(env, "EWOL Cohort 1"),
        &25,
        &2000,
        &2700,
        currency,
        &Some(vault.clone()),
        &10,
        &0,
    )
}

#[test]
fn start_bootcamp_parks_the_pool_in_the_vault() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);

    let vault = env.register(MockYieldVault, ());
    MockYieldVaultClient::new(&env, &vault).init(&currency.address, &0);

    let id = launch_with_vault(&env, &client, &owner, &currency.address, &vault);
    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);

    client.start_bootcamp(&owner, &id);

    assert_eq!(currency.balance(&client.address), 0);
    assert_eq!(currency.balance(&vault), 10_000);
    assert_eq!(
        MockYieldVaultClient::new(&env, &vault).balance(&client.address),
        10_000
    );
    assert_eq!(client.get_campaign(&id).vault_deposited, 10_000);
}

#[test]
fn withdrawal_redeems_just_enough_principal() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);

    let vault = env.register(MockYieldVault, ());
    MockYieldVaultClient::new(&env, &vault).init(&currency.address, &0);

    let id = launch_with_vault(&env, &client, &owner, &currency.address, &vault);
    let participant = Address::generate(&env);
    client.enroll_participant(&owner, &id, &1, &participant, &750);
    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);
    client.start_bootcamp(&owner, &id);

    advance_time(&env, 2 * WEEK);
    assert_eq!(client.withdraw_expenditure(&id, &Role::Participant, &1), 1500);

    assert_eq!(currency.balance(&participant), 1500);
    assert_eq!(currency.balance(&vault), 8_500);
    assert_eq!(client.get_campaign(&id).vault_deposited, 8_500);
}

#[test]
fn finish_bootcamp_redeems_principal_and_keeps_yield() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);

    // 5% bonus, pre-funded so the vault can pay it out.
    let vault = env.register(MockYieldVault, ());
    MockYieldVaultClient::new(&env, &vault).init(&currency.address, &500);
    sac.mint(&vault, &1_000);

    let id = launch_with_vault(&env, &client, &owner, &currency.address, &vault);
    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);
    client.start_bootcamp(&owner, &id);

    advance_time(&env, 10 * WEEK);
    client.finish_bootcamp(&owner, &id);

    // 10_000 principal + 500 yield back in the campaign.
    assert_eq!(currency.balance(&client.address), 10_500);
    assert_eq!(client.get_campaign(&id).vault_deposited, 0);
}

#[test]
fn short_redemption_aborts_the_transition() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);

    let vault = env.register(ShortfallVault, ());
    ShortfallVaultClient::new(&env, &vault).init(&currency.address);

    let id = launch_with_vault(&env, &client, &owner, &currency.address, &vault);
    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);
    client.start_bootcamp(&owner, &id);

    advance_time(&env, 10 * WEEK);
    assert_eq!(
        client.try_finish_bootcamp(&owner, &id),
        Err(Ok(Error::InsufficientFunds))
    );
}
