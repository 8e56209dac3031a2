#![cfg(test)]

extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::test::{advance_time, create_currency, launch_default, setup, DAY};
use crate::{invariants, Error, Period, Role};

const WEEK: u64 = 7 * DAY;

/// Scenario C boundary: the pool must cover
/// `total_weekly_expenditure × weeks_of_training` to the unit.
#[test]
fn start_bootcamp_checks_solvency_exactly() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let participant = Address::generate(&env);
    client.enroll_participant(&owner, &id, &1, &participant, &500);

    // Needs 500 × 10 = 5000; one unit short must fail.
    let investor = Address::generate(&env);
    sac.mint(&investor, &5000);
    client.deposit_investment(&id, &investor, &currency.address, &4999);
    let res = client.try_start_bootcamp(&owner, &id);
    assert_eq!(res, Err(Ok(Error::InsufficientFunds)));
    assert_eq!(client.get_campaign(&id).period, Period::Investment);

    client.deposit_investment(&id, &investor, &currency.address, &1);
    client.start_bootcamp(&owner, &id);

    let campaign = client.get_campaign(&id);
    assert_eq!(campaign.period, Period::Bootcamp);
    assert_eq!(campaign.bootcamp_start, Some(env.ledger().timestamp()));
}

#[test]
fn start_bootcamp_is_owner_only_and_single_shot() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, _sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let outsider = Address::generate(&env);
    assert_eq!(
        client.try_start_bootcamp(&outsider, &id),
        Err(Ok(Error::Unauthorized))
    );

    client.start_bootcamp(&owner, &id);
    assert_eq!(
        client.try_start_bootcamp(&owner, &id),
        Err(Ok(Error::InvalidPeriod))
    );
}

#[test]
fn pending_requires_bootcamp_start() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, _sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let participant = Address::generate(&env);
    client.enroll_participant(&owner, &id, &1, &participant, &750);

    let res = client.try_pending_expenditure(&id, &Role::Participant, &1);
    assert_eq!(res, Err(Ok(Error::BootcampNotStarted)));
}

/// Scenario A: 750/week accrues 750 after 7 days and 1500 after 14,
/// and a withdrawal at day 14 zeroes the pending amount.
#[test]
fn weekly_accrual_matches_scenario() {
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

    assert_eq!(client.pending_expenditure(&id, &Role::Participant, &1), 0);

    advance_time(&env, 7 * DAY);
    assert_eq!(client.pending_expenditure(&id, &Role::Participant, &1), 750);

    advance_time(&env, 7 * DAY);
    assert_eq!(client.pending_expenditure(&id, &Role::Participant, &1), 1500);

    let withdrawn = client.withdraw_expenditure(&id, &Role::Participant, &1);
    assert_eq!(withdrawn, 1500);
    assert_eq!(client.pending_expenditure(&id, &Role::Participant, &1), 0);
    assert_eq!(currency.balance(&participant), 1500);

    let campaign = client.get_campaign(&id);
    assert_eq!(campaign.total_expenditures_withdrawn, 1500);
    let rec = client.get_enrollee(&id, &Role::Participant, &1).unwrap();
    invariants::assert_expenditure_books_balance(&campaign, &[rec]);
}

#[test]
fn partial_weeks_do_not_accrue() {
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

    advance_time(&env, 6 * DAY + 86_399);
    assert_eq!(client.pending_expenditure(&id, &Role::Participant, &1), 0);
    advance_time(&env, 1);
    assert_eq!(client.pending_expenditure(&id, &Role::Participant, &1), 750);
}

#[test]
fn withdrawal_is_idempotent() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let staffer = Address::generate(&env);
    client.enroll_staff(&owner, &id, &1, &staffer, &400, &0);
    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);
    client.start_bootcamp(&owner, &id);

    advance_time(&env, 3 * 7 * DAY);
    assert_eq!(client.withdraw_expenditure(&id, &Role::Staff, &1), 1200);
    assert_eq!(client.withdraw_expenditure(&id, &Role::Staff, &1), 0);
    assert_eq!(currency.balance(&staffer), 1200);
}

#[test]
fn pending_is_monotonic_between_withdrawals() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let participant = Address::generate(&env);
    client.enroll_participant(&owner, &id, &1, &participant, &300);
    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);
    client.start_bootcamp(&owner, &id);

    let mut last = 0i128;
    for _ in 0..12 {
        advance_time(&env, 3 * DAY);
        let pending = client.pending_expenditure(&id, &Role::Participant, &1);
        assert!(pending >= last);
        last = pending;
    }
}

#[test]
fn withdrawal_is_closed_during_investment() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, _sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let participant = Address::generate(&env);
    client.enroll_participant(&owner, &id, &1, &participant, &750);

    let res = client.try_withdraw_expenditure(&id, &Role::Participant, &1);
    assert_eq!(res, Err(Ok(Error::InvalidPeriod)));
}

#[test]
fn finish_bootcamp_requires_elapsed_training() {
    let (env, client, owner) = setup();
    let token_admin = Address::generate(&env);
    let (currency, sac) = create_currency(&env, &token_admin);
    let id = launch_default(&env, &client, &owner, &currency.address, 0);

    let investor = Address::generate(&env);
    sac.mint(&investor, &10_000);
    client.deposit_investment(&id, &investor, &currency.address, &10_000);

    assert_eq!(
        client.try_finish_bootcamp(&owner, &id),
        Err(Ok(Error::InvalidPeriod))
    );

    client.start_bootcamp(&owner, &id);
    advance_time(&env, 10 * WEEK - 1);
    assert_eq!(
        client.try_finish_bootcamp(&owner, &id),
        Err(Ok(Error::TrainingNotComplete))
    );

    advance_time(&env, 1);
    client.finish_bootcamp(&owner, &id);
    assert_eq!(client.get_campaign(&id).period, Period::Repayment);
}

/// Accrual is deliberately uncapped: stipends keep vesting after the
/// training window until withdrawn.
#[test]
fn accrual_continues_past_training_window() {
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

    advance_time(&env, 11 * WEEK);
    client.finish_bootcamp(&owner, &id);
    assert_eq!(
        client.pending_expenditure(&id, &Role::Participant, &1),
        11 * 750
    );

    // Withdrawal stays open in Repayment.
    assert_eq!(
        client.withdraw_expenditure(&id, &Role::Participant, &1),
        8250
    );
}
