pub mod market;
pub mod position;
pub mod oracle;
pub mod resolution;

pub use market::*;
pub use position::*;
pub use oracle::*;
pub use resolution::*;
