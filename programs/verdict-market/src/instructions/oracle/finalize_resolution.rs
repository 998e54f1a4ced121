use anchor_lang::prelude::*;
use crate::constants::{ORACLE_SEED, RESOLUTION_SEED};
use crate::state::{OracleConfig, ResolutionRecord};
use crate::events::ResolutionFinalized;

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct FinalizeResolution<'info> {
    #[account(
        seeds = [ORACLE_SEED, oracle.authority.as_ref()],
        bump = oracle.bump,
    )]
    pub oracle: Account<'info, OracleConfig>,

    #[account(
        mut,
        seeds = [RESOLUTION_SEED, oracle.key().as_ref(), market_id.as_ref()],
        bump = resolution.bump,
    )]
    pub resolution: Box<Account<'info, ResolutionRecord>>,

    /// Anyone may pull finalization once the window has passed
    pub caller: Signer<'info>,
}

pub fn process_finalize_resolution(ctx: Context<FinalizeResolution>, market_id: [u8; 32]) -> Result<()> {
    let slot = Clock::get()?.slot;
    let resolution = &mut ctx.accounts.resolution;

    let verdict = resolution.finalize(slot)?;

    emit!(ResolutionFinalized {
        market_id,
        verdict,
        slot,
    });

    Ok(())
}
