use anchor_lang::prelude::*;
use crate::constants::{MAX_CATEGORY_LEN, MAX_FEE_BPS, MAX_QUESTION_LEN};
use crate::errors::VerdictError;
use crate::state::position::UserPosition;
use crate::state::resolution::{ResolutionRecord, ResolutionStatus, VerdictSource};
use crate::utils::math::{pro_rata_payout, split_fee};
use crate::utils::transfer::ValueTransfer;

#[account]
#[derive(Default)]
pub struct Market {
    pub market_id: [u8; 32],
    pub admin: Pubkey,
    pub oracle: Pubkey,             // OracleConfig this market resolves against
    pub collateral_mint: Pubkey,
    pub vault: Pubkey,              // custody token account
    pub treasury: Pubkey,           // fee destination token account
    pub question: String,           // max 256 chars
    pub category: String,           // max 32 chars
    pub status: MarketStatus,
    pub yes_pool: u64,
    pub no_pool: u64,
    pub max_stake: u64,             // per user, per side
    pub max_pool: u64,
    pub fee_bps: u16,
    pub created_at: u64,            // slot
    pub ends_at: u64,               // slot; no stakes at or after this
    pub winning_side: Option<Outcome>,
    pub fee_amount: u64,
    pub distributable_amount: u64,
    pub total_claimed: u64,
    pub fee_collected: bool,
    pub resolved_at: Option<u64>,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct MarketParams {
    pub question: String,
    pub category: String,
    pub ends_at: u64,
    pub fee_bps: u16,
    pub max_stake: u64,
    pub max_pool: u64,
}

/// Accounts a market is bound to at creation.
#[derive(Clone, Copy)]
pub struct MarketBindings {
    pub admin: Pubkey,
    pub oracle: Pubkey,
    pub collateral_mint: Pubkey,
    pub vault: Pubkey,
    pub treasury: Pubkey,
}

impl Market {
    // 8 (discriminator)
    // 32 (market_id)
    // 32 * 5 (admin, oracle, collateral_mint, vault, treasury)
    // 4 + 256 (question) + 4 + 32 (category)
    // 1 (status)
    // 8 * 4 (yes_pool, no_pool, max_stake, max_pool) + 2 (fee_bps)
    // 8 * 2 (created_at, ends_at)
    // 1+1 (winning_side option)
    // 8 * 3 (fee_amount, distributable_amount, total_claimed) + 1 (fee_collected)
    // 1+8 (resolved_at option)
    // 1 (bump)
    pub const LEN: usize = 8 + 32 + 32 * 5 + (4 + MAX_QUESTION_LEN) + (4 + MAX_CATEGORY_LEN) + 1
        + 8 * 4 + 2 + 8 * 2 + 2 + 8 * 3 + 1 + 9 + 1;

    pub fn initialize(
        &mut self,
        market_id: [u8; 32],
        bindings: MarketBindings,
        params: MarketParams,
        slot: u64,
        bump: u8,
    ) -> Result<()> {
        require!(params.ends_at > slot, VerdictError::InvalidEndHeight);
        require!(params.fee_bps <= MAX_FEE_BPS, VerdictError::FeeExceedsMax);
        require!(params.question.len() <= MAX_QUESTION_LEN, VerdictError::QuestionTooLong);
        require!(params.category.len() <= MAX_CATEGORY_LEN, VerdictError::CategoryTooLong);

        self.market_id = market_id;
        self.admin = bindings.admin;
        self.oracle = bindings.oracle;
        self.collateral_mint = bindings.collateral_mint;
        self.vault = bindings.vault;
        self.treasury = bindings.treasury;
        self.question = params.question;
        self.category = params.category;
        self.status = MarketStatus::Active;
        self.yes_pool = 0;
        self.no_pool = 0;
        self.max_stake = params.max_stake;
        self.max_pool = params.max_pool;
        self.fee_bps = params.fee_bps;
        self.created_at = slot;
        self.ends_at = params.ends_at;
        self.winning_side = None;
        self.fee_amount = 0;
        self.distributable_amount = 0;
        self.total_claimed = 0;
        self.fee_collected = false;
        self.resolved_at = None;
        self.bump = bump;
        Ok(())
    }

    pub fn total_pool(&self) -> u64 {
        // bounded by max_pool on every stake
        self.yes_pool.saturating_add(self.no_pool)
    }

    pub fn pool_for(&self, side: Outcome) -> u64 {
        match side {
            Outcome::Yes => self.yes_pool,
            Outcome::No => self.no_pool,
            Outcome::Invalid => 0,
        }
    }

    /// Moves `amount` into custody and credits it to `side`.
    ///
    /// The transfer is the first fallible side effect; nothing is recorded
    /// unless it succeeds. Returns the new total pool.
    pub fn stake<P: ValueTransfer>(
        &mut self,
        position: &mut UserPosition,
        user: Pubkey,
        side: Outcome,
        amount: u64,
        slot: u64,
        port: &mut P,
    ) -> Result<u64> {
        require!(self.status == MarketStatus::Active, VerdictError::MarketNotActive);
        require!(slot < self.ends_at, VerdictError::MarketEnded);
        require!(side.is_binary(), VerdictError::InvalidSide);
        require!(amount > 0, VerdictError::ZeroAmount);

        let user_stake = position
            .stake_on(side)
            .checked_add(amount)
            .ok_or(VerdictError::MathOverflow)?;
        require!(user_stake <= self.max_stake, VerdictError::StakeLimitExceeded);
        let new_total = self
            .total_pool()
            .checked_add(amount)
            .ok_or(VerdictError::MathOverflow)?;
        require!(new_total <= self.max_pool, VerdictError::PoolLimitExceeded);

        port.transfer(amount, user, self.vault)?;

        match side {
            Outcome::Yes => self.yes_pool += amount,
            _ => self.no_pool += amount,
        }
        position.credit(side, amount)?;
        position.last_stake_slot = slot;
        Ok(new_total)
    }

    pub fn lock(&mut self, slot: u64) -> Result<()> {
        require!(slot >= self.ends_at, VerdictError::MarketNotEnded);
        require!(self.status != MarketStatus::Locked, VerdictError::AlreadyLocked);
        require!(self.status == MarketStatus::Active, VerdictError::MarketNotActive);
        self.status = MarketStatus::Locked;
        Ok(())
    }

    fn require_awaiting_verdict(&self) -> Result<()> {
        match self.status {
            MarketStatus::Locked | MarketStatus::Resolving | MarketStatus::Disputed => Ok(()),
            MarketStatus::Resolved => err!(VerdictError::AlreadyResolved),
            MarketStatus::Canceled => err!(VerdictError::MarketCanceled),
            MarketStatus::Active => err!(VerdictError::MarketNotLocked),
        }
    }

    /// Mirrors the oracle's progress into the lifecycle: a live proposal puts
    /// the market in `Resolving`, an open challenge in `Disputed`.
    pub fn track_resolution(&mut self, record: &ResolutionRecord) -> Result<MarketStatus> {
        self.require_awaiting_verdict()?;
        require!(record.market_id == self.market_id, VerdictError::OracleMismatch);

        self.status = match record.status() {
            ResolutionStatus::NoProposal => return err!(VerdictError::NoProposal),
            ResolutionStatus::Challenged => MarketStatus::Disputed,
            ResolutionStatus::Proposed | ResolutionStatus::Finalized => MarketStatus::Resolving,
        };
        Ok(self.status)
    }

    /// Settles the market against the oracle's finalized verdict and fixes
    /// the fee / distributable split.
    pub fn resolve<V: VerdictSource>(&mut self, source: &V, slot: u64) -> Result<Outcome> {
        self.require_awaiting_verdict()?;
        require!(slot >= self.ends_at, VerdictError::MarketNotEnded);

        let verdict = source.get_verdict(&self.market_id)?;
        require!(verdict.is_binary(), VerdictError::InvalidVerdict);
        let (fee, distributable) =
            split_fee(self.total_pool(), self.fee_bps).ok_or(VerdictError::MathOverflow)?;

        self.status = MarketStatus::Resolved;
        self.winning_side = Some(verdict);
        self.fee_amount = fee;
        self.distributable_amount = distributable;
        self.resolved_at = Some(slot);
        Ok(verdict)
    }

    /// Pays the caller's pro-rata share of the distributable pool.
    /// Integer division leaves dust in custody.
    pub fn claim<P: ValueTransfer>(
        &mut self,
        position: &mut UserPosition,
        user: Pubkey,
        port: &mut P,
    ) -> Result<u64> {
        require!(self.status == MarketStatus::Resolved, VerdictError::MarketNotResolved);
        require!(!position.claimed, VerdictError::AlreadyClaimed);
        let winning_side = self.winning_side.ok_or(VerdictError::MarketNotResolved)?;
        let stake = position.stake_on(winning_side);
        require!(stake > 0, VerdictError::NoStake);
        let winning_pool = self.pool_for(winning_side);
        require!(winning_pool > 0, VerdictError::NoStake);

        let payout = pro_rata_payout(stake, self.distributable_amount, winning_pool)
            .ok_or(VerdictError::MathOverflow)?;
        let total_claimed = self
            .total_claimed
            .checked_add(payout)
            .ok_or(VerdictError::MathOverflow)?;

        self.pay_out(payout, user, port)?;

        position.claimed = true;
        position.claimed_amount = payout;
        position.burn(winning_side, stake)?;
        self.total_claimed = total_claimed;
        Ok(payout)
    }

    /// Returns the caller's full stake on both sides after a cancellation.
    pub fn refund<P: ValueTransfer>(
        &mut self,
        position: &mut UserPosition,
        user: Pubkey,
        port: &mut P,
    ) -> Result<u64> {
        require!(self.status == MarketStatus::Canceled, VerdictError::MarketNotCanceled);
        require!(!position.claimed, VerdictError::AlreadyClaimed);
        let amount = position.total_stake().ok_or(VerdictError::MathOverflow)?;
        require!(amount > 0, VerdictError::NoStake);
        let total_claimed = self
            .total_claimed
            .checked_add(amount)
            .ok_or(VerdictError::MathOverflow)?;

        self.pay_out(amount, user, port)?;

        position.claimed = true;
        position.claimed_amount = amount;
        position.burn(Outcome::Yes, position.yes_stake)?;
        position.burn(Outcome::No, position.no_stake)?;
        self.total_claimed = total_claimed;
        Ok(amount)
    }

    /// Sweeps the resolution fee to the treasury, once.
    pub fn collect_fees<P: ValueTransfer>(&mut self, port: &mut P) -> Result<u64> {
        require!(self.status == MarketStatus::Resolved, VerdictError::MarketNotResolved);
        require!(!self.fee_collected, VerdictError::FeesAlreadyCollected);

        let treasury = self.treasury;
        self.pay_out(self.fee_amount, treasury, port)?;
        self.fee_collected = true;
        Ok(self.fee_amount)
    }

    pub fn cancel(&mut self, caller: Pubkey) -> Result<MarketStatus> {
        require!(caller == self.admin, VerdictError::Unauthorized);
        require!(self.status != MarketStatus::Resolved, VerdictError::AlreadyResolved);
        require!(self.status != MarketStatus::Canceled, VerdictError::AlreadyCanceled);

        let previous = self.status;
        self.status = MarketStatus::Canceled;
        Ok(previous)
    }

    fn pay_out<P: ValueTransfer>(&self, amount: u64, to: Pubkey, port: &mut P) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        require!(port.balance_of(self.vault)? >= amount, VerdictError::InsufficientCustody);
        port.transfer(amount, self.vault, to)
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default, InitSpace)]
pub enum MarketStatus {
    #[default]
    Active,
    Locked,
    Resolving,
    Resolved,
    Disputed,
    Canceled,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, InitSpace)]
pub enum Outcome {
    Yes,
    No,
    /// Never a valid side or verdict; rejected wherever one is expected
    Invalid,
}

impl Outcome {
    pub fn is_binary(&self) -> bool {
        matches!(self, Outcome::Yes | Outcome::No)
    }
}
