use anchor_lang::prelude::*;
use anchor_spl::token::{self, TokenAccount, Transfer};
use crate::errors::VerdictError;

/// Narrow value-movement contract the market ledger depends on.
pub trait ValueTransfer {
    fn transfer(&mut self, amount: u64, from: Pubkey, to: Pubkey) -> Result<()>;
    fn balance_of(&self, owner: Pubkey) -> Result<u64>;
}

/// A party the SPL port can move tokens to or from.
pub struct Endpoint<'info> {
    pub owner: Pubkey,
    pub token_account: AccountInfo<'info>,
    /// Required only when tokens leave this endpoint
    pub authority: Option<AccountInfo<'info>>,
}

impl<'info> Endpoint<'info> {
    pub fn signer(owner: Pubkey, token_account: AccountInfo<'info>, authority: AccountInfo<'info>) -> Self {
        Self { owner, token_account, authority: Some(authority) }
    }

    pub fn receiver(owner: Pubkey, token_account: AccountInfo<'info>) -> Self {
        Self { owner, token_account, authority: None }
    }
}

/// SPL token implementation of [`ValueTransfer`].
///
/// Transfers out of custody are signed with the market PDA seeds; transfers
/// from any other endpoint are signed by that endpoint's authority.
pub struct SplTokenPort<'a, 'info> {
    token_program: AccountInfo<'info>,
    custody: Endpoint<'info>,
    custody_seeds: &'a [&'a [u8]],
    parties: Vec<Endpoint<'info>>,
}

impl<'a, 'info> SplTokenPort<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        custody: Endpoint<'info>,
        custody_seeds: &'a [&'a [u8]],
    ) -> Self {
        Self {
            token_program,
            custody,
            custody_seeds,
            parties: Vec::new(),
        }
    }

    pub fn with_party(mut self, party: Endpoint<'info>) -> Self {
        self.parties.push(party);
        self
    }

    fn endpoint(&self, owner: Pubkey) -> Option<&Endpoint<'info>> {
        if self.custody.owner == owner {
            return Some(&self.custody);
        }
        self.parties.iter().find(|p| p.owner == owner)
    }
}

impl<'a, 'info> ValueTransfer for SplTokenPort<'a, 'info> {
    fn transfer(&mut self, amount: u64, from: Pubkey, to: Pubkey) -> Result<()> {
        let source = self.endpoint(from).ok_or(VerdictError::UnknownTransferRoute)?;
        let destination = self.endpoint(to).ok_or(VerdictError::UnknownTransferRoute)?;
        let authority = source
            .authority
            .clone()
            .ok_or(VerdictError::UnknownTransferRoute)?;

        let accounts = Transfer {
            from: source.token_account.clone(),
            to: destination.token_account.clone(),
            authority,
        };

        if from == self.custody.owner {
            let signer = &[self.custody_seeds];
            token::transfer(
                CpiContext::new_with_signer(self.token_program.clone(), accounts, signer),
                amount,
            )
        } else {
            token::transfer(CpiContext::new(self.token_program.clone(), accounts), amount)
        }
    }

    fn balance_of(&self, owner: Pubkey) -> Result<u64> {
        let endpoint = self.endpoint(owner).ok_or(VerdictError::UnknownTransferRoute)?;
        let data = endpoint.token_account.try_borrow_data()?;
        let account = TokenAccount::try_deserialize(&mut &data[..])?;
        Ok(account.amount)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spl_balance_rejects_unknown_or_corrupt_accounts() {
        let program_key = anchor_spl::token::ID;
        let mut program_lamports = 1;
        let mut program_data: Vec<u8> = Vec::new();
        let loader = Pubkey::new_unique();
        let token_program = AccountInfo::new(
            &program_key, false, false, &mut program_lamports, &mut program_data, &loader, true, 0,
        );

        let vault = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = vec![0xAB; 165];
        let token_account = AccountInfo::new(
            &vault, false, true, &mut lamports, &mut data, &program_key, false, 0,
        );

        let seeds: [&[u8]; 0] = [];
        let port = SplTokenPort::new(token_program, Endpoint::receiver(vault, token_account), &seeds);

        let err = port.balance_of(Pubkey::new_unique()).unwrap_err();
        assert_eq!(err, VerdictError::UnknownTransferRoute.into());
        assert!(port.balance_of(vault).is_err());
    }
}
