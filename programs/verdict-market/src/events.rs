use anchor_lang::prelude::*;
use crate::state::market::{MarketStatus, Outcome};
use crate::state::oracle::Role;

#[event]
pub struct OracleInitialized {
    pub oracle: Pubkey,
    pub admin: Pubkey,
    pub slot: u64,
}

#[event]
pub struct RoleUpdated {
    pub oracle: Pubkey,
    pub identity: Pubkey,
    pub role: Role,
    pub enabled: bool,
    pub admin: Pubkey,
    pub slot: u64,
}

#[event]
pub struct MarketInitialized {
    pub market_id: [u8; 32],
    pub admin: Pubkey,
    pub oracle: Pubkey,
    pub question: String,
    pub category: String,
    pub fee_bps: u16,
    pub ends_at: u64,
    pub slot: u64,
}

#[event]
pub struct Staked {
    pub market_id: [u8; 32],
    pub user: Pubkey,
    pub side: Outcome,
    pub amount: u64,
    pub new_total_pool: u64,
    pub slot: u64,
}

#[event]
pub struct MarketLocked {
    pub market_id: [u8; 32],
    pub total_pool: u64,
    pub slot: u64,
}

#[event]
pub struct MarketStatusSynced {
    pub market_id: [u8; 32],
    pub status: MarketStatus,
    pub slot: u64,
}

#[event]
pub struct MarketResolved {
    pub market_id: [u8; 32],
    pub winning_side: Outcome,
    pub total_pool: u64,
    pub fee_amount: u64,
    pub distributable_amount: u64,
    pub slot: u64,
}

#[event]
pub struct Claimed {
    pub market_id: [u8; 32],
    pub user: Pubkey,
    pub payout: u64,
    pub shares_burned: u64,
    pub slot: u64,
}

#[event]
pub struct StakeRefunded {
    pub market_id: [u8; 32],
    pub user: Pubkey,
    pub amount: u64,
    pub slot: u64,
}

#[event]
pub struct FeesCollected {
    pub market_id: [u8; 32],
    pub treasury: Pubkey,
    pub amount: u64,
    pub slot: u64,
}

#[event]
pub struct MarketCanceled {
    pub market_id: [u8; 32],
    pub admin: Pubkey,
    pub reason: String,
    pub previous_status: MarketStatus,
    pub slot: u64,
}

#[event]
pub struct ResolutionVoted {
    pub market_id: [u8; 32],
    pub signer: Pubkey,
    pub verdict: Outcome,
    pub votes_for_verdict: u64,
    pub slot: u64,
}

#[event]
pub struct ResolutionProposed {
    pub market_id: [u8; 32],
    pub verdict: Outcome,
    pub proposer: Pubkey,
    pub challenge_deadline: u64,
    pub slot: u64,
}

#[event]
pub struct ResolutionChallenged {
    pub market_id: [u8; 32],
    pub challenger: Pubkey,
    pub reason: String,
    pub slot: u64,
}

#[event]
pub struct ResolutionFinalized {
    pub market_id: [u8; 32],
    pub verdict: Outcome,
    pub slot: u64,
}

#[event]
pub struct AdminResolution {
    pub market_id: [u8; 32],
    pub verdict: Outcome,
    pub admin: Pubkey,
    pub slot: u64,
}
