use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};
use crate::constants::{MARKET_SEED, POSITION_SEED, VAULT_SEED};
use crate::state::{Market, Outcome, UserPosition};
use crate::events::Staked;
use crate::utils::{Endpoint, SplTokenPort};

#[derive(Accounts)]
pub struct PlaceStake<'info> {
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
        init_if_needed,
        seeds = [POSITION_SEED, market.key().as_ref(), user.key().as_ref()],
        bump,
        payer = user,
        space = UserPosition::LEN
    )]
    pub user_position: Account<'info, UserPosition>,

    #[account(
        mut,
        token::mint = market.collateral_mint,
        token::authority = user,
    )]
    pub user_token: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn process_stake(ctx: Context<PlaceStake>, side: Outcome, amount: u64) -> Result<()> {
    let slot = Clock::get()?.slot;
    let user = ctx.accounts.user.key();
    let market_key = ctx.accounts.market.key();
    let market_id = ctx.accounts.market.market_id;
    let bump = [ctx.accounts.market.bump];
    let seeds: [&[u8]; 3] = [MARKET_SEED, &market_id, &bump];

    // Stake only flows user -> vault; the vault endpoint never signs here
    let mut port = SplTokenPort::new(
        ctx.accounts.token_program.to_account_info(),
        Endpoint::receiver(ctx.accounts.vault.key(), ctx.accounts.vault.to_account_info()),
        &seeds,
    )
    .with_party(Endpoint::signer(
        user,
        ctx.accounts.user_token.to_account_info(),
        ctx.accounts.user.to_account_info(),
    ));

    let position = &mut ctx.accounts.user_position;
    if !position.is_initialized() {
        position.user = user;
        position.market = market_key;
        position.bump = ctx.bumps.user_position;
    }

    let market = &mut ctx.accounts.market;
    let new_total_pool = market.stake(position, user, side, amount, slot, &mut port)?;

    emit!(Staked {
        market_id,
        user,
        side,
        amount,
        new_total_pool,
        slot,
    });

    Ok(())
}
