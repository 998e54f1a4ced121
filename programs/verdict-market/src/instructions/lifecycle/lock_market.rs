use anchor_lang::prelude::*;
use crate::constants::MARKET_SEED;
use crate::state::Market;
use crate::events::MarketLocked;

#[derive(Accounts)]
pub struct LockMarket<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    pub caller: Signer<'info>,
}

pub fn process_lock_market(ctx: Context<LockMarket>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let market = &mut ctx.accounts.market;

    market.lock(slot)?;

    emit!(MarketLocked {
        market_id: market.market_id,
        total_pool: market.total_pool(),
        slot,
    });

    Ok(())
}
