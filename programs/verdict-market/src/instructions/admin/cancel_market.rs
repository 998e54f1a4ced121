use anchor_lang::prelude::*;
use crate::constants::{MARKET_SEED, MAX_REASON_LEN};
use crate::state::Market;
use crate::events::MarketCanceled;
use crate::errors::VerdictError;

#[derive(Accounts)]
pub struct CancelMarket<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    pub admin: Signer<'info>,
}

pub fn process_cancel_market(ctx: Context<CancelMarket>, reason: String) -> Result<()> {
    let slot = Clock::get()?.slot;
    let admin = ctx.accounts.admin.key();
    let market = &mut ctx.accounts.market;

    let previous_status = market.cancel(admin)?;
    require!(reason.len() <= MAX_REASON_LEN, VerdictError::ReasonTooLong);

    msg!("Market canceled from {:?}: {}", previous_status, reason);

    emit!(MarketCanceled {
        market_id: market.market_id,
        admin,
        reason,
        previous_status,
        slot,
    });

    Ok(())
}
