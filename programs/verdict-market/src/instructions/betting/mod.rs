pub mod stake;
pub mod claim_payout;
pub mod refund_stake;

pub use stake::*;
pub use claim_payout::*;
pub use refund_stake::*;
