//! Contract events.
//!
//! Every event publishes on the topic pair `(symbol, campaign_id)` so an
//! off-chain indexer can filter per campaign, with a `#[contracttype]`
//! payload struct as the data. The indexer in `backend/indexer` mirrors
//! these shapes.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::Role;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignLaunched {
    pub campaign_id: u64,
    pub owner: Address,
    pub currency_token: Address,
    pub investment_cap: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnrolleeEnrolled {
    pub campaign_id: u64,
    pub role: Role,
    pub enrollee_id: u64,
    pub address: Address,
    pub weekly_expenditure: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EnrolleeRemoved {
    pub campaign_id: u64,
    pub role: Role,
    pub enrollee_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvestmentDeposited {
    pub campaign_id: u64,
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BootcampStarted {
    pub campaign_id: u64,
    pub start_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BootcampFinished {
    pub campaign_id: u64,
    pub finish_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpenditureWithdrawn {
    pub campaign_id: u64,
    pub role: Role,
    pub enrollee_id: u64,
    pub to: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DebtRepaid {
    pub campaign_id: u64,
    pub enrollee_id: u64,
    pub payer: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RepaymentWithdrawn {
    pub campaign_id: u64,
    pub holder: Address,
    pub amount: i128,
}

pub fn emit_campaign_launched(env: &Env, event: CampaignLaunched) {
    env.events()
        .publish((symbol_short!("launched"), event.campaign_id), event);
}

pub fn emit_enrollee_enrolled(env: &Env, event: EnrolleeEnrolled) {
    env.events()
        .publish((symbol_short!("enrolled"), event.campaign_id), event);
}

pub fn emit_enrollee_removed(env: &Env, event: EnrolleeRemoved) {
    env.events()
        .publish((symbol_short!("removed"), event.campaign_id), event);
}

pub fn emit_investment_deposited(env: &Env, event: InvestmentDeposited) {
    env.events()
        .publish((symbol_short!("invested"), event.campaign_id), event);
}

pub fn emit_bootcamp_started(env: &Env, event: BootcampStarted) {
    env.events()
        .publish((symbol_short!("started"), event.campaign_id), event);
}

pub fn emit_bootcamp_finished(env: &Env, event: BootcampFinished) {
    env.events()
        .publish((symbol_short!("finished"), event.campaign_id), event);
}

pub fn emit_expenditure_withdrawn(env: &Env, event: ExpenditureWithdrawn) {
    env.events()
        .publish((symbol_short!("stipend"), event.campaign_id), event);
}

pub fn emit_debt_repaid(env: &Env, event: DebtRepaid) {
    env.events()
        .publish((symbol_short!("repaid"), event.campaign_id), event);
}

pub fn emit_repayment_withdrawn(env: &Env, event: RepaymentWithdrawn) {
    env.events()
        .publish((symbol_short!("repay_out"), event.campaign_id), event);
}
