use anchor_lang::prelude::*;
use crate::constants::{ORACLE_SEED, RESOLUTION_SEED};
use crate::state::{OracleConfig, ResolutionRecord};
use crate::events::ResolutionChallenged;

#[derive(Accounts)]
#[instruction(market_id: [u8; 32])]
pub struct ChallengeResolution<'info> {
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

    // Any identity may dispute a live proposal
    pub challenger: Signer<'info>,
}

pub fn process_challenge_resolution(
    ctx: Context<ChallengeResolution>,
    market_id: [u8; 32],
    reason: String,
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let challenger = ctx.accounts.challenger.key();
    let resolution = &mut ctx.accounts.resolution;

    resolution.challenge(challenger, reason.clone(), slot)?;

    msg!("Resolution challenged by {}: {}", challenger, reason);

    emit!(ResolutionChallenged {
        market_id,
        challenger,
        reason,
        slot,
    });

    Ok(())
}
