use anchor_lang::prelude::*;
use crate::constants::{MARKET_SEED, RESOLUTION_SEED};
use crate::state::{Market, ResolutionRecord};
use crate::events::MarketResolved;

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// CHECK: Resolution record of the bound oracle for this market. Read-only;
    /// a record that does not exist yet reads as not finalized.
    #[account(
        seeds = [RESOLUTION_SEED, market.oracle.as_ref(), market.market_id.as_ref()],
        bump,
    )]
    pub resolution: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}

pub fn process_resolve_market(ctx: Context<ResolveMarket>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let market = &mut ctx.accounts.market;
    let record = ResolutionRecord::load_or_empty(
        &ctx.accounts.resolution.to_account_info(),
        market.oracle,
        market.market_id,
    )?;

    let winning_side = market.resolve(&record, slot)?;

    msg!(
        "Market resolved: {:?}, pool {}, fee {}, distributable {}",
        winning_side, market.total_pool(), market.fee_amount, market.distributable_amount
    );

    emit!(MarketResolved {
        market_id: market.market_id,
        winning_side,
        total_pool: market.total_pool(),
        fee_amount: market.fee_amount,
        distributable_amount: market.distributable_amount,
        slot,
    });

    Ok(())
}
