use anchor_lang::prelude::*;
use crate::constants::{CHALLENGE_PERIOD, MAX_REASON_LEN, REQUIRED_CONFIRMATIONS};
use crate::errors::VerdictError;
use crate::state::market::Outcome;
use crate::state::oracle::{Role, RoleGrant};

/// Per-market resolution state owned by the oracle: vote counters, the
/// optimistic proposal and the irreversible finalization flag.
#[account]
#[derive(Default)]
pub struct ResolutionRecord {
    pub oracle: Pubkey,
    pub market_id: [u8; 32],
    pub yes_votes: u64,
    pub no_votes: u64,
    pub proposed_verdict: Option<Outcome>,
    pub proposal_slot: u64,
    pub challenge_deadline: u64,
    pub proposer: Pubkey,
    pub challenged: bool,
    pub challenger: Option<Pubkey>,
    pub challenge_reason: String,   // max 256 chars
    pub finalized: bool,
    pub finalized_at: Option<u64>,
    pub overridden: bool,
    pub bump: u8,
}

/// One signer's ballot on one market.
#[account]
#[derive(Default)]
pub struct VoteRecord {
    pub oracle: Pubkey,
    pub market_id: [u8; 32],
    pub signer: Pubkey,
    pub verdict: Option<Outcome>,
    pub cast_at: u64,
    pub bump: u8,
}

/// Membership entry of the anti-replay set. The nonce is chosen by the
/// caller and must be fresh for every submission attempt.
#[account]
#[derive(Default)]
pub struct NonceRecord {
    pub oracle: Pubkey,
    pub nonce: [u8; 32],
    pub used_by: Pubkey,
    pub used_at: u64,
    pub consumed: bool,
    pub bump: u8,
}

impl VoteRecord {
    pub const LEN: usize = 8 + 32 + 32 + 32 + 2 + 8 + 1;
}

impl NonceRecord {
    pub const LEN: usize = 8 + 32 + 32 + 32 + 8 + 1 + 1;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStatus {
    NoProposal,
    Proposed,
    Challenged,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteReceipt {
    pub votes_for_verdict: u64,
    /// Set only on the vote that created the proposal
    pub proposed_deadline: Option<u64>,
}

/// Read-only view the market ledger uses to learn the outcome.
pub trait VerdictSource {
    fn is_finalized(&self, market_id: &[u8; 32]) -> bool;
    fn get_verdict(&self, market_id: &[u8; 32]) -> Result<Outcome>;
}

impl ResolutionRecord {
    // 8 (discriminator)
    // 32 (oracle) + 32 (market_id)
    // 8 (yes_votes) + 8 (no_votes)
    // 1+1 (proposed_verdict option) + 8 (proposal_slot) + 8 (challenge_deadline)
    // 32 (proposer) + 1 (challenged) + 1+32 (challenger option)
    // 4 + 256 (challenge_reason)
    // 1 (finalized) + 1+8 (finalized_at option) + 1 (overridden)
    // 1 (bump)
    pub const LEN: usize = 8 + 32 + 32 + 8 * 2 + 2 + 8 * 2 + 32 + 1 + 33 + (4 + MAX_REASON_LEN) + 1 + 9 + 1 + 1;

    pub fn is_initialized(&self) -> bool {
        self.oracle != Pubkey::default()
    }

    /// Reads the record for a market the committee may not have touched yet.
    /// A record that does not exist yet reads as an empty one bound to `market_id`;
    /// an existing one must deserialize.
    pub fn load_or_empty(info: &AccountInfo, oracle: Pubkey, market_id: [u8; 32]) -> Result<ResolutionRecord> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Ok(ResolutionRecord { oracle, market_id, ..Default::default() });
        }
        let data = info.try_borrow_data()?;
        ResolutionRecord::try_deserialize(&mut &data[..])
    }

    pub fn status(&self) -> ResolutionStatus {
        if self.finalized {
            ResolutionStatus::Finalized
        } else if self.proposed_verdict.is_none() {
            ResolutionStatus::NoProposal
        } else if self.challenged {
            ResolutionStatus::Challenged
        } else {
            ResolutionStatus::Proposed
        }
    }

    pub fn votes_for(&self, verdict: Outcome) -> u64 {
        match verdict {
            Outcome::Yes => self.yes_votes,
            Outcome::No => self.no_votes,
            Outcome::Invalid => 0,
        }
    }

    /// Records one signer's vote and proposes the verdict once it has
    /// `REQUIRED_CONFIRMATIONS` votes. An existing proposal is never touched.
    pub fn submit_vote(
        &mut self,
        nonce: &mut NonceRecord,
        ballot: &mut VoteRecord,
        voter_role: Option<&RoleGrant>,
        voter: Pubkey,
        verdict: Outcome,
        slot: u64,
    ) -> Result<VoteReceipt> {
        require!(!self.finalized, VerdictError::AlreadyFinalized);
        require!(verdict.is_binary(), VerdictError::InvalidVerdict);
        require!(!nonce.consumed, VerdictError::NonceAlreadyUsed);
        require!(ballot.verdict.is_none(), VerdictError::AlreadyVoted);
        let authorized = voter_role.map_or(false, |r| {
            r.identity == voter && r.oracle == self.oracle && r.can_vote()
        });
        require!(authorized, VerdictError::Unauthorized);

        nonce.consumed = true;
        nonce.used_by = voter;
        nonce.used_at = slot;

        ballot.signer = voter;
        ballot.verdict = Some(verdict);
        ballot.cast_at = slot;

        let counter = match verdict {
            Outcome::Yes => &mut self.yes_votes,
            _ => &mut self.no_votes,
        };
        *counter = counter.checked_add(1).ok_or(VerdictError::MathOverflow)?;
        let votes_for_verdict = *counter;

        let mut proposed_deadline = None;
        if votes_for_verdict >= REQUIRED_CONFIRMATIONS && self.proposed_verdict.is_none() {
            let deadline = slot.checked_add(CHALLENGE_PERIOD).ok_or(VerdictError::MathOverflow)?;
            self.proposed_verdict = Some(verdict);
            self.proposal_slot = slot;
            self.challenge_deadline = deadline;
            self.proposer = voter;
            proposed_deadline = Some(deadline);
        }

        Ok(VoteReceipt { votes_for_verdict, proposed_deadline })
    }

    /// Flags the proposal as disputed. Re-challenging only re-asserts the flag
    /// and leaves the first challenger and reason in place.
    pub fn challenge(&mut self, challenger: Pubkey, reason: String, slot: u64) -> Result<()> {
        require!(self.proposed_verdict.is_some(), VerdictError::NoProposal);
        require!(slot < self.challenge_deadline, VerdictError::ChallengeExpired);
        require!(!self.finalized, VerdictError::AlreadyFinalized);
        require!(reason.len() <= MAX_REASON_LEN, VerdictError::ReasonTooLong);

        // the first challenge is the one on record
        if !self.challenged {
            self.challenger = Some(challenger);
            self.challenge_reason = reason;
        }
        self.challenged = true;
        Ok(())
    }

    /// Optimistic finalization once the challenge window has passed unchallenged.
    pub fn finalize(&mut self, slot: u64) -> Result<Outcome> {
        let verdict = self.proposed_verdict.ok_or(VerdictError::NoProposal)?;
        require!(!self.finalized, VerdictError::AlreadyFinalized);
        require!(slot >= self.challenge_deadline, VerdictError::ChallengeWindowOpen);
        require!(!self.challenged, VerdictError::ProposalChallenged);

        self.finalized = true;
        self.finalized_at = Some(slot);
        Ok(verdict)
    }

    /// Governance path: overwrites the proposal and finalizes it immediately.
    /// The only way out of a challenged proposal.
    pub fn admin_override(
        &mut self,
        admin_role: Option<&RoleGrant>,
        admin: Pubkey,
        verdict: Outcome,
        slot: u64,
    ) -> Result<()> {
        let authorized = admin_role.map_or(false, |r| {
            r.identity == admin && r.oracle == self.oracle && r.has(Role::Admin)
        });
        require!(authorized, VerdictError::Unauthorized);
        require!(verdict.is_binary(), VerdictError::InvalidVerdict);

        self.proposed_verdict = Some(verdict);
        self.proposal_slot = slot;
        self.challenge_deadline = slot;
        self.proposer = admin;
        self.challenged = false;
        self.overridden = true;
        self.finalized = true;
        self.finalized_at = Some(slot);
        Ok(())
    }
}

impl VerdictSource for ResolutionRecord {
    fn is_finalized(&self, market_id: &[u8; 32]) -> bool {
        self.market_id == *market_id && self.finalized
    }

    fn get_verdict(&self, market_id: &[u8; 32]) -> Result<Outcome> {
        require!(self.is_finalized(market_id), VerdictError::NotFinalized);
        self.proposed_verdict
            .ok_or_else(|| error!(VerdictError::NotFinalized))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Committee {
        oracle: Pubkey,
        admin: RoleGrant,
        resolvers: Vec<RoleGrant>,
    }

    impl Committee {
        fn new(size: usize) -> Self {
            let oracle = Pubkey::new_unique();
            let admin = RoleGrant {
                oracle,
                identity: Pubkey::new_unique(),
                is_admin: true,
                ..Default::default()
            };
            let resolvers = (0..size)
                .map(|_| RoleGrant {
                    oracle,
                    identity: Pubkey::new_unique(),
                    is_resolver: true,
                    ..Default::default()
                })
                .collect();
            Self { oracle, admin, resolvers }
        }

        fn record(&self, market_id: [u8; 32]) -> ResolutionRecord {
            ResolutionRecord { oracle: self.oracle, market_id, ..Default::default() }
        }
    }

    fn vote(
        record: &mut ResolutionRecord,
        role: &RoleGrant,
        verdict: Outcome,
        slot: u64,
    ) -> Result<VoteReceipt> {
        let mut nonce = NonceRecord::default();
        let mut ballot = VoteRecord::default();
        record.submit_vote(&mut nonce, &mut ballot, Some(role), role.identity, verdict, slot)
    }

    #[test]
    fn third_vote_proposes_with_deadline() {
        let c = Committee::new(4);
        let mut record = c.record([1; 32]);

        assert_eq!(vote(&mut record, &c.resolvers[0], Outcome::Yes, 10).unwrap().proposed_deadline, None);
        assert_eq!(vote(&mut record, &c.resolvers[1], Outcome::Yes, 11).unwrap().proposed_deadline, None);
        let receipt = vote(&mut record, &c.resolvers[2], Outcome::Yes, 12).unwrap();
        assert_eq!(receipt.votes_for_verdict, 3);
        assert_eq!(receipt.proposed_deadline, Some(12 + CHALLENGE_PERIOD));
        assert_eq!(record.proposed_verdict, Some(Outcome::Yes));
        assert_eq!(record.challenge_deadline, 156);
        assert_eq!(record.proposer, c.resolvers[2].identity);
        assert_eq!(record.status(), ResolutionStatus::Proposed);

        // a fourth vote counts but leaves the proposal alone
        let receipt = vote(&mut record, &c.resolvers[3], Outcome::Yes, 40).unwrap();
        assert_eq!(receipt.votes_for_verdict, 4);
        assert_eq!(receipt.proposed_deadline, None);
        assert_eq!(record.challenge_deadline, 156);
    }

    #[test]
    fn opposing_votes_do_not_retract_proposal() {
        let c = Committee::new(6);
        let mut record = c.record([2; 32]);
        for r in &c.resolvers[..3] {
            vote(&mut record, r, Outcome::No, 5).unwrap();
        }
        for r in &c.resolvers[3..] {
            vote(&mut record, r, Outcome::Yes, 6).unwrap();
        }
        assert_eq!(record.yes_votes, 3);
        assert_eq!(record.no_votes, 3);
        assert_eq!(record.proposed_verdict, Some(Outcome::No));
        assert_eq!(record.challenge_deadline, 5 + CHALLENGE_PERIOD);
    }

    #[test]
    fn nonce_replay_is_rejected_across_markets() {
        let c = Committee::new(2);
        let mut first = c.record([3; 32]);
        let mut second = c.record([4; 32]);
        let mut nonce = NonceRecord::default();

        let mut ballot = VoteRecord::default();
        let r = &c.resolvers[0];
        first.submit_vote(&mut nonce, &mut ballot, Some(r), r.identity, Outcome::Yes, 1).unwrap();

        let mut ballot = VoteRecord::default();
        let r = &c.resolvers[1];
        let err = second
            .submit_vote(&mut nonce, &mut ballot, Some(r), r.identity, Outcome::No, 2)
            .unwrap_err();
        assert_eq!(err, VerdictError::NonceAlreadyUsed.into());
        assert_eq!(second.no_votes, 0);
        assert!(ballot.verdict.is_none());
    }

    #[test]
    fn signer_cannot_vote_twice_with_fresh_nonce() {
        let c = Committee::new(1);
        let r = &c.resolvers[0];
        let mut record = c.record([5; 32]);
        let mut ballot = VoteRecord::default();

        let mut nonce = NonceRecord::default();
        record.submit_vote(&mut nonce, &mut ballot, Some(r), r.identity, Outcome::Yes, 1).unwrap();

        let mut fresh = NonceRecord::default();
        let err = record
            .submit_vote(&mut fresh, &mut ballot, Some(r), r.identity, Outcome::No, 2)
            .unwrap_err();
        assert_eq!(err, VerdictError::AlreadyVoted.into());
        assert!(!fresh.consumed);
        assert_eq!(record.yes_votes, 1);
        assert_eq!(record.no_votes, 0);
    }

    #[test]
    fn vote_preconditions_fire_in_order() {
        let c = Committee::new(1);
        let outsider = RoleGrant { oracle: c.oracle, identity: Pubkey::new_unique(), ..Default::default() };
        let mut record = c.record([6; 32]);

        // bad verdict is reported before the missing role
        let err = vote(&mut record, &outsider, Outcome::Invalid, 1).unwrap_err();
        assert_eq!(err, VerdictError::InvalidVerdict.into());

        let mut nonce = NonceRecord::default();
        let mut ballot = VoteRecord::default();
        let err = record
            .submit_vote(&mut nonce, &mut ballot, Some(&outsider), outsider.identity, Outcome::Yes, 1)
            .unwrap_err();
        assert_eq!(err, VerdictError::Unauthorized.into());
        assert!(!nonce.consumed);

        let err = record
            .submit_vote(&mut nonce, &mut ballot, None, outsider.identity, Outcome::Yes, 1)
            .unwrap_err();
        assert_eq!(err, VerdictError::Unauthorized.into());

        // finalized wins over everything
        record.admin_override(Some(&c.admin), c.admin.identity, Outcome::No, 2).unwrap();
        let err = vote(&mut record, &outsider, Outcome::Invalid, 3).unwrap_err();
        assert_eq!(err, VerdictError::AlreadyFinalized.into());
    }

    #[test]
    fn admin_may_vote() {
        let c = Committee::new(0);
        let mut record = c.record([7; 32]);
        assert_eq!(vote(&mut record, &c.admin, Outcome::Yes, 1).unwrap().votes_for_verdict, 1);
    }

    #[test]
    fn role_from_another_oracle_is_rejected() {
        let c = Committee::new(1);
        let other = Committee::new(1);
        let mut record = c.record([8; 32]);
        let err = vote(&mut record, &other.resolvers[0], Outcome::Yes, 1).unwrap_err();
        assert_eq!(err, VerdictError::Unauthorized.into());
    }

    fn proposed(c: &Committee, verdict: Outcome, slot: u64) -> ResolutionRecord {
        let mut record = c.record([9; 32]);
        for r in &c.resolvers[..3] {
            vote(&mut record, r, verdict, slot).unwrap();
        }
        record
    }

    #[test]
    fn challenge_window_boundary() {
        let c = Committee::new(3);
        let mut record = proposed(&c, Outcome::Yes, 100);
        let deadline = record.challenge_deadline;

        let err = record.clone().challenge(Pubkey::new_unique(), String::new(), deadline).unwrap_err();
        assert_eq!(err, VerdictError::ChallengeExpired.into());

        let first = Pubkey::new_unique();
        record.challenge(first, "wrong source".to_string(), deadline - 1).unwrap();
        assert!(record.challenged);
        assert_eq!(record.status(), ResolutionStatus::Challenged);

        // second challenge only re-asserts the flag
        record.challenge(Pubkey::new_unique(), String::new(), deadline - 1).unwrap();
        assert!(record.challenged);
        assert_eq!(record.challenger, Some(first));
        assert_eq!(record.challenge_reason, "wrong source");
    }

    #[test]
    fn corrupt_record_is_not_read_as_empty() {
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000;
        let mut data = vec![0xAB; ResolutionRecord::LEN];
        let owner = crate::ID;
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);
        assert!(ResolutionRecord::load_or_empty(&info, Pubkey::new_unique(), [1; 32]).is_err());

        let mut lamports = 0;
        let mut empty: Vec<u8> = Vec::new();
        let system = anchor_lang::system_program::ID;
        let info = AccountInfo::new(&key, false, false, &mut lamports, &mut empty, &system, false, 0);
        let record = ResolutionRecord::load_or_empty(&info, key, [1; 32]).unwrap();
        assert_eq!(record.market_id, [1; 32]);
        assert_eq!(record.status(), ResolutionStatus::NoProposal);
    }

    #[test]
    fn challenge_needs_proposal() {
        let c = Committee::new(0);
        let mut record = c.record([10; 32]);
        let err = record.challenge(Pubkey::new_unique(), String::new(), 0).unwrap_err();
        assert_eq!(err, VerdictError::NoProposal.into());
    }

    #[test]
    fn challenge_rejects_long_reason() {
        let c = Committee::new(3);
        let mut record = proposed(&c, Outcome::Yes, 0);
        let err = record
            .challenge(Pubkey::new_unique(), "x".repeat(MAX_REASON_LEN + 1), 1)
            .unwrap_err();
        assert_eq!(err, VerdictError::ReasonTooLong.into());
        assert!(!record.challenged);
    }

    #[test]
    fn finalize_after_window() {
        let c = Committee::new(3);
        let mut record = proposed(&c, Outcome::No, 50);

        let err = record.finalize(50 + CHALLENGE_PERIOD - 1).unwrap_err();
        assert_eq!(err, VerdictError::ChallengeWindowOpen.into());
        assert!(!record.is_finalized(&[9; 32]));

        assert_eq!(record.finalize(50 + CHALLENGE_PERIOD).unwrap(), Outcome::No);
        assert!(record.is_finalized(&[9; 32]));
        assert_eq!(record.get_verdict(&[9; 32]).unwrap(), Outcome::No);

        let err = record.finalize(500).unwrap_err();
        assert_eq!(err, VerdictError::AlreadyFinalized.into());
    }

    #[test]
    fn finalize_without_proposal() {
        let c = Committee::new(0);
        let mut record = c.record([11; 32]);
        assert_eq!(record.finalize(1_000).unwrap_err(), VerdictError::NoProposal.into());
    }

    #[test]
    fn challenged_proposal_needs_override() {
        let c = Committee::new(3);
        let mut record = proposed(&c, Outcome::Yes, 0);
        record.challenge(Pubkey::new_unique(), "stale data".to_string(), 10).unwrap();

        let err = record.finalize(10_000).unwrap_err();
        assert_eq!(err, VerdictError::ProposalChallenged.into());

        record.admin_override(Some(&c.admin), c.admin.identity, Outcome::No, 10_001).unwrap();
        assert_eq!(record.status(), ResolutionStatus::Finalized);
        assert!(!record.challenged);
        assert!(record.overridden);
        assert_eq!(record.challenge_deadline, 10_001);
        assert_eq!(record.get_verdict(&[9; 32]).unwrap(), Outcome::No);

        // expired deadline: no further challenge
        let err = record.challenge(Pubkey::new_unique(), String::new(), 10_001).unwrap_err();
        assert_eq!(err, VerdictError::ChallengeExpired.into());
    }

    #[test]
    fn override_requires_admin_and_binary_verdict() {
        let c = Committee::new(1);
        let mut record = c.record([12; 32]);
        let resolver = &c.resolvers[0];

        let err = record
            .admin_override(Some(resolver), resolver.identity, Outcome::Yes, 1)
            .unwrap_err();
        assert_eq!(err, VerdictError::Unauthorized.into());

        let err = record
            .admin_override(Some(&c.admin), c.admin.identity, Outcome::Invalid, 1)
            .unwrap_err();
        assert_eq!(err, VerdictError::InvalidVerdict.into());
        assert!(!record.finalized);
    }

    #[test]
    fn verdict_is_scoped_to_market() {
        let c = Committee::new(0);
        let mut record = c.record([13; 32]);
        assert_eq!(record.get_verdict(&[13; 32]).unwrap_err(), VerdictError::NotFinalized.into());

        record.admin_override(Some(&c.admin), c.admin.identity, Outcome::Yes, 1).unwrap();
        assert!(!record.is_finalized(&[14; 32]));
        assert_eq!(record.get_verdict(&[14; 32]).unwrap_err(), VerdictError::NotFinalized.into());
    }
}
