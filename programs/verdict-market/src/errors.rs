use anchor_lang::prelude::*;

#[error_code]
pub enum VerdictError {
    // Authorization
    #[msg("Unauthorized")]
    Unauthorized,

    // Lifecycle state
    #[msg("Market is not active")]
    MarketNotActive,
    #[msg("Staking period has ended")]
    MarketEnded,
    #[msg("Market end height not reached")]
    MarketNotEnded,
    #[msg("Market is already locked")]
    AlreadyLocked,
    #[msg("Market is not locked")]
    MarketNotLocked,
    #[msg("Market is not resolved")]
    MarketNotResolved,
    #[msg("Market is not canceled")]
    MarketNotCanceled,
    #[msg("Market is canceled")]
    MarketCanceled,
    #[msg("Challenge window has expired")]
    ChallengeExpired,
    #[msg("Challenge window is still open")]
    ChallengeWindowOpen,
    #[msg("Proposal is challenged and needs an admin override")]
    ProposalChallenged,

    // Validation
    #[msg("Side must be Yes or No")]
    InvalidSide,
    #[msg("Verdict must be Yes or No")]
    InvalidVerdict,
    #[msg("Amount must be greater than 0")]
    ZeroAmount,
    #[msg("Stake exceeds per-user limit")]
    StakeLimitExceeded,
    #[msg("Stake exceeds total pool limit")]
    PoolLimitExceeded,
    #[msg("Fee exceeds maximum (10%)")]
    FeeExceedsMax,
    #[msg("End height must be in the future")]
    InvalidEndHeight,
    #[msg("Question too long (max 256)")]
    QuestionTooLong,
    #[msg("Category too long (max 32)")]
    CategoryTooLong,
    #[msg("Reason too long (max 256)")]
    ReasonTooLong,
    #[msg("Nonce already used")]
    NonceAlreadyUsed,
    #[msg("Resolution record belongs to another oracle")]
    OracleMismatch,
    #[msg("Cannot revoke the last admin")]
    LastAdmin,
    #[msg("No transfer route between these parties")]
    UnknownTransferRoute,
    #[msg("Custody balance insufficient")]
    InsufficientCustody,
    #[msg("Arithmetic overflow")]
    MathOverflow,

    // Not found
    #[msg("No resolution proposal")]
    NoProposal,
    #[msg("Resolution not finalized")]
    NotFinalized,
    #[msg("No stake on the winning side")]
    NoStake,

    // Already done
    #[msg("Signer already voted on this market")]
    AlreadyVoted,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Resolution already finalized")]
    AlreadyFinalized,
    #[msg("Market already resolved")]
    AlreadyResolved,
    #[msg("Market already canceled")]
    AlreadyCanceled,
    #[msg("Fees already collected")]
    FeesAlreadyCollected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authorization,
    State,
    Validation,
    NotFound,
    AlreadyDone,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authorization => "authorization",
            ErrorCategory::State => "state",
            ErrorCategory::Validation => "validation",
            ErrorCategory::NotFound => "not-found",
            ErrorCategory::AlreadyDone => "already-done",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VerdictError {
    pub fn category(&self) -> ErrorCategory {
        use VerdictError::*;
        match self {
            Unauthorized => ErrorCategory::Authorization,
            MarketNotActive | MarketEnded | MarketNotEnded | AlreadyLocked | MarketNotLocked
            | MarketNotResolved | MarketNotCanceled | MarketCanceled | ChallengeExpired
            | ChallengeWindowOpen | ProposalChallenged => ErrorCategory::State,
            InvalidSide | InvalidVerdict | ZeroAmount | StakeLimitExceeded | PoolLimitExceeded
            | FeeExceedsMax | InvalidEndHeight | QuestionTooLong | CategoryTooLong
            | ReasonTooLong | NonceAlreadyUsed | OracleMismatch | LastAdmin
            | UnknownTransferRoute | InsufficientCustody | MathOverflow => ErrorCategory::Validation,
            NoProposal | NotFinalized | NoStake => ErrorCategory::NotFound,
            AlreadyVoted | AlreadyClaimed | AlreadyFinalized | AlreadyResolved | AlreadyCanceled
            | FeesAlreadyCollected => ErrorCategory::AlreadyDone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotency_violations_are_already_done() {
        for e in [
            VerdictError::AlreadyVoted,
            VerdictError::AlreadyClaimed,
            VerdictError::AlreadyFinalized,
        ] {
            assert_eq!(e.category(), ErrorCategory::AlreadyDone);
        }
    }

    #[test]
    fn categories_render_lowercase() {
        assert_eq!(VerdictError::Unauthorized.category().to_string(), "authorization");
        assert_eq!(VerdictError::NoProposal.category().to_string(), "not-found");
        assert_eq!(VerdictError::MarketEnded.category().as_str(), "state");
    }
}
