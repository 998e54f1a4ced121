pub mod init_oracle;
pub mod set_role;
pub mod create_market;
pub mod cancel_market;
pub mod collect_fees;

pub use init_oracle::*;
pub use set_role::*;
pub use create_market::*;
pub use cancel_market::*;
pub use collect_fees::*;
