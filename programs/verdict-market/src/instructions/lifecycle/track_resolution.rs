use anchor_lang::prelude::*;
use crate::constants::{MARKET_SEED, RESOLUTION_SEED};
use crate::state::{Market, ResolutionRecord};
use crate::events::MarketStatusSynced;

#[derive(Accounts)]
pub struct TrackResolution<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// CHECK: Resolution record of the bound oracle for this market, read-only.
    #[account(
        seeds = [RESOLUTION_SEED, market.oracle.as_ref(), market.market_id.as_ref()],
        bump,
    )]
    pub resolution: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}

pub fn process_track_resolution(ctx: Context<TrackResolution>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let market = &mut ctx.accounts.market;
    let record = ResolutionRecord::load_or_empty(
        &ctx.accounts.resolution.to_account_info(),
        market.oracle,
        market.market_id,
    )?;

    let status = market.track_resolution(&record)?;

    emit!(MarketStatusSynced {
        market_id: market.market_id,
        status,
        slot,
    });

    Ok(())
}
