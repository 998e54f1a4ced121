pub mod math;
pub mod transfer;

pub use math::*;
pub use transfer::*;
