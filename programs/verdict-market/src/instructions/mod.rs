pub mod admin;
pub mod betting;
pub mod lifecycle;
pub mod oracle;
pub mod dispute;

pub use admin::*;
pub use betting::*;
pub use lifecycle::*;
pub use oracle::*;
pub use dispute::*;
