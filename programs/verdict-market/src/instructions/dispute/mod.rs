pub mod challenge_resolution;

pub use challenge_resolution::*;
