use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{Market, UserPosition};
use crate::events::StakeRefunded;
use crate::errors::VerdictError;
use crate::utils::{Endpoint, SplTokenPort};

#[derive(Accounts)]
pub struct RefundStake<'info> {
    #[account(
        mut,
        seeds = [MARKET_SEED, market.market_id.as_ref()],
        bump = market.bump,
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
        seeds = [POSITION_SEED, market.key().as_ref(), user.key().as_ref()],
        bump = user_position.bump,
        has_one = user @ VerdictError::Unauthorized,
    )]
    pub user_position: Account<'info, UserPosition>,

    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = user,
    )]
    pub user_token: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn process_refund_stake(ctx: Context<RefundStake>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let user = ctx.accounts.user.key();
    let market_info = ctx.accounts.market.to_account_info();
    let market_id = ctx.accounts.market.market_id;
    let bump = [ctx.accounts.market.bump];
    let seeds: [&[u8]; 3] = [MARKET_SEED, &market_id, &bump];

    let mut port = SplTokenPort::new(
        ctx.accounts.token_program.to_account_info(),
        Endpoint::signer(ctx.accounts.vault.key(), ctx.accounts.vault.to_account_info(), market_info),
        &seeds,
    )
    .with_party(Endpoint::receiver(user, ctx.accounts.user_token.to_account_info()));

    let market = &mut ctx.accounts.market;
    let amount = market.refund(&mut ctx.accounts.user_position, user, &mut port)?;

    emit!(StakeRefunded {
        market_id,
        user,
        amount,
        slot,
    });

    Ok(())
}
