pub const MARKET_SEED: &[u8] = b"market";
pub const VAULT_SEED: &[u8] = b"vault";
pub const POSITION_SEED: &[u8] = b"position";
pub const ORACLE_SEED: &[u8] = b"oracle";
pub const ROLE_SEED: &[u8] = b"role";
pub const NONCE_SEED: &[u8] = b"nonce";
pub const VOTE_SEED: &[u8] = b"vote";
pub const RESOLUTION_SEED: &[u8] = b"resolution";

/// Votes for a single verdict needed before a resolution is proposed.
pub const REQUIRED_CONFIRMATIONS: u64 = 3;

/// Slots between a proposal and the earliest optimistic finalization.
pub const CHALLENGE_PERIOD: u64 = 144;

/// Fee cap (10%)
pub const MAX_FEE_BPS: u16 = 1000;
pub const BPS_DENOMINATOR: u64 = 10_000;

pub const MAX_QUESTION_LEN: usize = 256;
pub const MAX_CATEGORY_LEN: usize = 32;
pub const MAX_REASON_LEN: usize = 256;
