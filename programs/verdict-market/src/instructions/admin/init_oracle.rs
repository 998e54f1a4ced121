use anchor_lang::prelude::*;
use crate::constants::{ORACLE_SEED, ROLE_SEED};
use crate::state::{OracleConfig, RoleGrant};
use crate::events::OracleInitialized;

#[derive(Accounts)]
pub struct InitOracle<'info> {
    #[account(
        init,
        seeds = [ORACLE_SEED, authority.key().as_ref()],
        bump,
        payer = authority,
        space = OracleConfig::LEN
    )]
    pub oracle: Account<'info, OracleConfig>,

    #[account(
        init,
        seeds = [ROLE_SEED, oracle.key().as_ref(), authority.key().as_ref()],
        bump,
        payer = authority,
        space = RoleGrant::LEN
    )]
    pub authority_role: Account<'info, RoleGrant>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_init_oracle(ctx: Context<InitOracle>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let authority = ctx.accounts.authority.key();

    let oracle = &mut ctx.accounts.oracle;
    oracle.authority = authority;
    oracle.admin_count = 1;
    oracle.resolver_count = 1;
    oracle.signer_count = 0;
    oracle.bump = ctx.bumps.oracle;

    // The creator starts as the only admin and may vote
    let role = &mut ctx.accounts.authority_role;
    role.oracle = oracle.key();
    role.identity = authority;
    role.is_admin = true;
    role.is_resolver = true;
    role.is_signer = false;
    role.bump = ctx.bumps.authority_role;

    emit!(OracleInitialized {
        oracle: oracle.key(),
        admin: authority,
        slot,
    });

    Ok(())
}
