pub mod submit_vote;
pub mod finalize_resolution;
pub mod admin_override;
pub mod resolve_market;

pub use submit_vote::*;
pub use finalize_resolution::*;
pub use admin_override::*;
pub use resolve_market::*;
