use anchor_lang::prelude::*;
use crate::constants::{ORACLE_SEED, ROLE_SEED};
use crate::state::{OracleConfig, Role, RoleGrant};
use crate::events::RoleUpdated;

#[derive(Accounts)]
#[instruction(identity: Pubkey)]
pub struct SetRole<'info> {
    #[account(
        mut,
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

    #[account(
        init_if_needed,
        seeds = [ROLE_SEED, oracle.key().as_ref(), identity.as_ref()],
        bump,
        payer = admin,
        space = RoleGrant::LEN
    )]
    pub grant: Account<'info, RoleGrant>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_set_role(
    ctx: Context<SetRole>,
    identity: Pubkey,
    role: Role,
    enabled: bool,
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let admin = ctx.accounts.admin.key();
    // read before `grant` is touched; the two are the same account on self-edits
    let caller_role = RoleGrant::load(&ctx.accounts.admin_role.to_account_info());

    let oracle = &mut ctx.accounts.oracle;
    let grant = &mut ctx.accounts.grant;
    if grant.oracle == Pubkey::default() {
        grant.oracle = oracle.key();
        grant.identity = identity;
        grant.bump = ctx.bumps.grant;
    }

    let changed = oracle.set_role(admin, caller_role.as_ref(), grant, role, enabled)?;
    if !changed {
        msg!("Role {:?} for {} already {}", role, identity, enabled);
        return Ok(());
    }

    emit!(RoleUpdated {
        oracle: oracle.key(),
        identity,
        role,
        enabled,
        admin,
        slot,
    });

    Ok(())
}
