use anchor_lang::prelude::*;
use crate::errors::VerdictError;
use crate::state::market::Outcome;

/// A user's stake in one market. `*_balance` is the claimable position that
/// mirrors `*_stake` until it is burned at claim or refund.
#[account]
#[derive(Default)]
pub struct UserPosition {
    pub user: Pubkey,
    pub market: Pubkey,
    pub yes_stake: u64,
    pub no_stake: u64,
    pub yes_balance: u64,
    pub no_balance: u64,
    pub claimed: bool,
    pub claimed_amount: u64,
    pub last_stake_slot: u64,
    pub bump: u8,
}

impl UserPosition {
    pub const LEN: usize = 8 + 32 + 32 + 8 * 4 + 1 + 8 + 8 + 1;

    pub fn is_initialized(&self) -> bool {
        self.user != Pubkey::default()
    }

    pub fn stake_on(&self, side: Outcome) -> u64 {
        match side {
            Outcome::Yes => self.yes_stake,
            Outcome::No => self.no_stake,
            Outcome::Invalid => 0,
        }
    }

    pub fn balance_on(&self, side: Outcome) -> u64 {
        match side {
            Outcome::Yes => self.yes_balance,
            Outcome::No => self.no_balance,
            Outcome::Invalid => 0,
        }
    }

    pub fn total_stake(&self) -> Option<u64> {
        self.yes_stake.checked_add(self.no_stake)
    }

    pub(crate) fn credit(&mut self, side: Outcome, amount: u64) -> Result<()> {
        let (stake, balance) = match side {
            Outcome::Yes => (&mut self.yes_stake, &mut self.yes_balance),
            Outcome::No => (&mut self.no_stake, &mut self.no_balance),
            Outcome::Invalid => return err!(VerdictError::InvalidSide),
        };
        *stake = stake.checked_add(amount).ok_or(VerdictError::MathOverflow)?;
        *balance = balance.checked_add(amount).ok_or(VerdictError::MathOverflow)?;
        Ok(())
    }

    pub(crate) fn burn(&mut self, side: Outcome, amount: u64) -> Result<()> {
        let balance = match side {
            Outcome::Yes => &mut self.yes_balance,
            Outcome::No => &mut self.no_balance,
            Outcome::Invalid => return err!(VerdictError::InvalidSide),
        };
        *balance = balance.checked_sub(amount).ok_or(VerdictError::MathOverflow)?;
        Ok(())
    }
}
