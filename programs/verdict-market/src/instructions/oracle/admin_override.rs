use anchor_lang::prelude::*;
use crate::constants::{ORACLE_SEED, RESOLUTION_SEED, ROLE_SEED};
use crate::state::{OracleConfig, Outcome, ResolutionRecord, RoleGrant};
use crate::events::{AdminResolution, ResolutionFinalized};

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct AdminOverride<'info> {
    #[account(
        seeds = [ORACLE_SEED, oracle.authority.as_ref()],
        bump = oracle.bump,
    )]
    pub oracle: Account<'info, OracleConfig>,

    /// CHECK: The caller's grant PDA. It may not exist; read in the handler.
    #[account(
        seeds = [ROLE_SEED, oracle.key().as_ref(), admin.key().as_ref()],
        bump,
    )]
    pub admin_role: UncheckedAccount<'info>,

    // Override may land before any vote was cast
    #[account(
        init_if_needed,
        seeds = [RESOLUTION_SEED, oracle.key().as_ref(), market_id.as_ref()],
        bump,
        payer = admin,
        space = ResolutionRecord::LEN
    )]
    pub resolution: Box<Account<'info, ResolutionRecord>>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_admin_override(
    ctx: Context<AdminOverride>,
    market_id: [u8; 32],
    verdict: Outcome,
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let admin = ctx.accounts.admin.key();
    let oracle = ctx.accounts.oracle.key();
    let admin_role = RoleGrant::load(&ctx.accounts.admin_role.to_account_info());

    let resolution = &mut ctx.accounts.resolution;
    if !resolution.is_initialized() {
        resolution.oracle = oracle;
        resolution.market_id = market_id;
        resolution.bump = ctx.bumps.resolution;
    }

    let was_challenged = resolution.challenged;
    resolution.admin_override(admin_role.as_ref(), admin, verdict, slot)?;

    msg!(
        "Admin {} resolved market as {:?} (challenged: {})",
        admin, verdict, was_challenged
    );

    emit!(AdminResolution {
        market_id,
        verdict,
        admin,
        slot,
    });
    emit!(ResolutionFinalized {
        market_id,
        verdict,
        slot,
    });

    Ok(())
}
