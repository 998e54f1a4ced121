pub mod lock_market;
pub mod track_resolution;

pub use lock_market::*;
pub use track_resolution::*;
