use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{MARKET_SEED, VAULT_SEED};
use crate::state::Market;
use crate::events::FeesCollected;
use crate::errors::VerdictError;
use crate::utils::{Endpoint, SplTokenPort};

#[derive(Accounts)]
pub struct CollectFees<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.as_ref()],
        bump = market.bump,
        has_one = admin @ VerdictError::Unauthorized,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump,
        constraint = vault.key() == market.vault,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury.key() == market.treasury @ VerdictError::UnknownTransferRoute,
    )]
    pub treasury: Account<'info, TokenAccount>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_collect_fees(ctx: Context<CollectFees>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let market_info = ctx.accounts.market.to_account_info();
    let market_id = ctx.accounts.market.market_id;
    let bump = [ctx.accounts.market.bump];
    let seeds: [&[u8]; 3] = [MARKET_SEED, &market_id, &bump];

    let mut port = SplTokenPort::new(
        ctx.accounts.token_program.to_account_info(),
        Endpoint::signer(ctx.accounts.vault.key(), ctx.accounts.vault.to_account_info(), market_info),
        &seeds,
    )
    .with_party(Endpoint::receiver(
        ctx.accounts.treasury.key(),
        ctx.accounts.treasury.to_account_info(),
    ));

    let market = &mut ctx.accounts.market;
    let amount = market.collect_fees(&mut port)?;

    emit!(FeesCollected {
        market_id,
        treasury: market.treasury,
        amount,
        slot,
    });

    Ok(())
}
