use anchor_lang::prelude::*;
use anchor_spl::token::{Token, Mint, TokenAccount};
use crate::constants::{MARKET_SEED, VAULT_SEED};
use crate::state::{Market, MarketBindings, MarketParams, OracleConfig};
use crate::events::MarketInitialized;

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])] // market_id is the opaque key the market PDA derives from
pub struct CreateMarket<'info> {
    #[account(
        init,
        seeds = [MARKET_SEED, market_id.as_ref()],
        bump,
        payer = payer,
        space = Market::LEN
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        init,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump,
        payer = payer,
        token::mint = collateral_mint,
        token::authority = market,
    )]
    pub vault: Account<'info, TokenAccount>,

    /// Resolution protocol instance the market reads its verdict from
    pub oracle: Account<'info, OracleConfig>,

    #[account(token::mint = collateral_mint)]
    pub treasury: Account<'info, TokenAccount>,

    /// Registry or operator funding the accounts; not necessarily the admin
    #[account(mut)]
    pub payer: Signer<'info>,

    pub collateral_mint: Account<'info, Mint>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn process_create_market(
    ctx: Context<CreateMarket>,
    market_id: [u8; 32],
    admin: Pubkey,
    params: MarketParams,
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let bindings = MarketBindings {
        admin,
        oracle: ctx.accounts.oracle.key(),
        collateral_mint: ctx.accounts.collateral_mint.key(),
        vault: ctx.accounts.vault.key(),
        treasury: ctx.accounts.treasury.key(),
    };

    let market = &mut ctx.accounts.market;
    market.initialize(market_id, bindings, params, slot, ctx.bumps.market)?;

    emit!(MarketInitialized {
        market_id,
        admin: market.admin,
        oracle: market.oracle,
        question: market.question.clone(),
        category: market.category.clone(),
        fee_bps: market.fee_bps,
        ends_at: market.ends_at,
        slot,
    });

    Ok(())
}
