use anchor_lang::prelude::*;

pub mod constants;
pub mod state;
pub mod instructions;
pub mod errors;
pub mod events;
pub mod utils;

use instructions::*;
use state::{MarketParams, Outcome, Role};

declare_id!("82niX8W2h9gpN8X2XjaxfbYdzKzEFnxXHLQkbqvExVho");

#[program]
pub mod verdict_market {
    use super::*;

    // Resolution protocol setup

    pub fn init_oracle(ctx: Context<InitOracle>) -> Result<()> {
        instructions::admin::init_oracle::process_init_oracle(ctx)
    }

    pub fn set_role(ctx: Context<SetRole>, identity: Pubkey, role: Role, enabled: bool) -> Result<()> {
        instructions::admin::set_role::process_set_role(ctx, identity, role, enabled)
    }

    // Market ledger

    pub fn create_market(
        ctx: Context<CreateMarket>,
        market_id: [u8; 32],
        admin: Pubkey,
        params: MarketParams,
    ) -> Result<()> {
        instructions::admin::create_market::process_create_market(ctx, market_id, admin, params)
    }

    pub fn stake(ctx: Context<PlaceStake>, side: Outcome, amount: u64) -> Result<()> {
        instructions::betting::stake::process_stake(ctx, side, amount)
    }

    pub fn lock_market(ctx: Context<LockMarket>) -> Result<()> {
        instructions::lifecycle::lock_market::process_lock_market(ctx)
    }

    pub fn track_resolution(ctx: Context<TrackResolution>) -> Result<()> {
        instructions::lifecycle::track_resolution::process_track_resolution(ctx)
    }

    pub fn resolve_market(ctx: Context<ResolveMarket>) -> Result<()> {
        instructions::oracle::resolve_market::process_resolve_market(ctx)
    }

    pub fn claim_payout(ctx: Context<ClaimPayout>) -> Result<()> {
        instructions::betting::claim_payout::process_claim_payout(ctx)
    }

    pub fn refund_stake(ctx: Context<RefundStake>) -> Result<()> {
        instructions::betting::refund_stake::process_refund_stake(ctx)
    }

    pub fn collect_fees(ctx: Context<CollectFees>) -> Result<()> {
        instructions::admin::collect_fees::process_collect_fees(ctx)
    }

    pub fn cancel_market(ctx: Context<CancelMarket>, reason: String) -> Result<()> {
        instructions::admin::cancel_market::process_cancel_market(ctx, reason)
    }

    // Voting, challenge and finalization

    pub fn submit_vote(
        ctx: Context<SubmitVote>,
        market_id: [u8; 32],
        verdict: Outcome,
        nonce: [u8; 32],
    ) -> Result<()> {
        instructions::oracle::submit_vote::process_submit_vote(ctx, market_id, verdict, nonce)
    }

    pub fn challenge_resolution(ctx: Context<ChallengeResolution>, market_id: [u8; 32], reason: String) -> Result<()> {
        instructions::dispute::challenge_resolution::process_challenge_resolution(ctx, market_id, reason)
    }

    pub fn finalize_resolution(ctx: Context<FinalizeResolution>, market_id: [u8; 32]) -> Result<()> {
        instructions::oracle::finalize_resolution::process_finalize_resolution(ctx, market_id)
    }

    pub fn admin_override(ctx: Context<AdminOverride>, market_id: [u8; 32], verdict: Outcome) -> Result<()> {
        instructions::oracle::admin_override::process_admin_override(ctx, market_id, verdict)
    }
}
