#![cfg(test)]

extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    Address, IntoVal, TryFromVal,
};

use crate::events::{
    BootcampStarted, CampaignLaunched, DebtRepaid, ExpenditureWithdrawn, InvestmentDeposited,
};
use crate::test::{advance_time, create_currency, launch_default, setup, DAY};
use crate::Role;

#[test]
fn launch_emits_launched_event() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, _sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let events = env.events().all();
    let (contract, topics, data) = events.last().unwrap();
    assert_eq!(contract, client.address);
    assert_eq!(topics, (symbol_short!("launched"), id).into_val(&env));

    let payload = CampaignLaunched::try_from_val(&env, &data).unwrap();
    assert_eq!(
        payload,
        CampaignLaunched {
            campaign_id: id,
            owner,
            currency_token: currency.address.clone(),
            investment_cap: 50_000,
        }
    );
}

#[test]
fn deposit_emits_invested_event() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let investor = Address::generate(&env);
    sac.mint(&investor, &2_000);
    client.deposit_investment(&id, &investor, &currency.address, &2_000);

    let events = env.events().all();
    let (contract, topics, data) = events.last().unwrap();
    assert_eq!(contract, client.address);
    assert_eq!(topics, (symbol_short!("invested"), id).into_val(&env));

    let payload = InvestmentDeposited::try_from_val(&env, &data).unwrap();
    assert_eq!(
        payload,
        InvestmentDeposited {
            campaign_id: id,
            investor,
            amount: 2_000,
        }
    );
}

#[test]
fn start_bootcamp_emits_started_event_with_timestamp() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);
    client.start_bootcamp(&owner, &id);

    let events = env.events().all();
    let (contract, topics, data) = events.last().unwrap();
    assert_eq!(contract, client.address);
    assert_eq!(topics, (symbol_short!("started"), id).into_val(&env));

    let payload = BootcampStarted::try_from_val(&env, &data).unwrap();
    assert_eq!(payload.campaign_id, id);
    assert_eq!(payload.start_time, env.ledger().timestamp());
}

#[test]
fn withdrawal_emits_stipend_event() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let participant = Address::generate(&env);
    client.enroll_participant(&owner, &id, &1, &participant, &750);
    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);
    client.start_bootcamp(&owner, &id);

    advance_time(&env, 7 * DAY);
    client.withdraw_expenditure(&id, &Role::Participant, &1);

    let events = env.events().all();
    let (contract, topics, data) = events.last().unwrap();
    assert_eq!(contract, client.address);
    assert_eq!(topics, (symbol_short!("stipend"), id).into_val(&env));

    let payload = ExpenditureWithdrawn::try_from_val(&env, &data).unwrap();
    assert_eq!(
        payload,
        ExpenditureWithdrawn {
            campaign_id: id,
            role: Role::Participant,
            enrollee_id: 1,
            to: participant,
            amount: 750,
        }
    );
}

#[test]
fn repayment_emits_repaid_event() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let participant = Address::generate(&env);
    client.enroll_participant(&owner, &id, &1, &participant, &0);
    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);
    client.start_bootcamp(&owner, &id);
    advance_time(&env, 10 * 7 * DAY);
    client.finish_bootcamp(&owner, &id);

    let payer = Address::generate(&env);
    sac.mint(&payer, &500);
    client.repay_debt(&id, &payer, &1, &500);

    let events = env.events().all();
    let (contract, topics, data) = events.last().unwrap();
    assert_eq!(contract, client.address);
    assert_eq!(topics, (symbol_short!("repaid"), id).into_val(&env));

    let payload = DebtRepaid::try_from_val(&env, &data).unwrap();
    assert_eq!(
        payload,
        DebtRepaid {
            campaign_id: id,
            enrollee_id: 1,
            payer,
            amount: 500,
        }
    );
}
