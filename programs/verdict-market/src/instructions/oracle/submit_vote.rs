use anchor_lang::prelude::*;
use crate::constants::{NONCE_SEED, ORACLE_SEED, RESOLUTION_SEED, ROLE_SEED, VOTE_SEED};
use crate::state::{NonceRecord, OracleConfig, Outcome, ResolutionRecord, RoleGrant, VoteRecord};
use crate::events::{ResolutionProposed, ResolutionVoted};

#[derive(Accounts)]
#[instruction(market_id: [u8; 32], verdict: Outcome, nonce: [u8; 32])]
pub struct SubmitVote<'info> {
    #[account(
        seeds = [ORACLE_SEED, oracle.authority.as_ref()],
        bump = oracle.bump,
    )]
    pub oracle: Account<'info, OracleConfig>,

    /// CHECK: The voter's grant PDA. It may not exist; read in the handler.
    #[account(
        seeds = [ROLE_SEED, oracle.key().as_ref(), voter.key().as_ref()],
        bump,
    )]
    pub voter_role: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        seeds = [NONCE_SEED, oracle.key().as_ref(), nonce.as_ref()],
        bump,
        payer = voter,
        space = NonceRecord::LEN
    )]
    pub nonce_record: Account<'info, NonceRecord>,

    #[account(
        init_if_needed,
        seeds = [VOTE_SEED, oracle.key().as_ref(), market_id.as_ref(), voter.key().as_ref()],
        bump,
        payer = voter,
        space = VoteRecord::LEN
    )]
    pub vote_record: Account<'info, VoteRecord>,

    #[account(
        init_if_needed,
        seeds = [RESOLUTION_SEED, oracle.key().as_ref(), market_id.as_ref()],
        bump,
        payer = voter,
        space = ResolutionRecord::LEN
    )]
    pub resolution: Box<Account<'info, ResolutionRecord>>,

    #[account(mut)]
    pub voter: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn process_submit_vote(
    ctx: Context<SubmitVote>,
    market_id: [u8; 32],
    verdict: Outcome,
    nonce: [u8; 32],
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let voter = ctx.accounts.voter.key();
    let oracle = ctx.accounts.oracle.key();
    let voter_role = RoleGrant::load(&ctx.accounts.voter_role.to_account_info());

    let resolution = &mut ctx.accounts.resolution;
    if !resolution.is_initialized() {
        resolution.oracle = oracle;
        resolution.market_id = market_id;
        resolution.bump = ctx.bumps.resolution;
    }

    let nonce_record = &mut ctx.accounts.nonce_record;
    if nonce_record.oracle == Pubkey::default() {
        nonce_record.oracle = oracle;
        nonce_record.nonce = nonce;
        nonce_record.bump = ctx.bumps.nonce_record;
    }

    let ballot = &mut ctx.accounts.vote_record;
    if ballot.oracle == Pubkey::default() {
        ballot.oracle = oracle;
        ballot.market_id = market_id;
        ballot.bump = ctx.bumps.vote_record;
    }

    let receipt = resolution.submit_vote(nonce_record, ballot, voter_role.as_ref(), voter, verdict, slot)?;

    emit!(ResolutionVoted {
        market_id,
        signer: voter,
        verdict,
        votes_for_verdict: receipt.votes_for_verdict,
        slot,
    });

    if let Some(challenge_deadline) = receipt.proposed_deadline {
        msg!(
            "Resolution proposed: {:?} with {} votes, challenge window until slot {}",
            verdict, receipt.votes_for_verdict, challenge_deadline
        );
        emit!(ResolutionProposed {
            market_id,
            verdict,
            proposer: voter,
            challenge_deadline,
            slot,
        });
    }

    Ok(())
}
