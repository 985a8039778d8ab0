//! Weight engine for the superhero selection wheel
//!
//! This crate provides the pure logic behind the selection tournament:
//! - Adjusting lottery weights after each round (winners drop, losers rise)
//! - Scoring predictions against the actual winner
//! - Deriving probability snapshots and the discrete lottery population
//!
//! It performs no terminal or file I/O; the `wheel` crate drives it.

mod adjust;
mod error;
mod odds;
mod roster;
mod tuning;

pub use adjust::*;
pub use error::*;
pub use odds::*;
pub use roster::*;
pub use tuning::*;
