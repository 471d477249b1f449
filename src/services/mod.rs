//! Services layer: everything that talks to the outside world.

pub mod ledger;
pub use ledger::*;
