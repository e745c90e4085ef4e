//! Ledger module (net pairwise obligations and debt simplification).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod ledger;
pub mod simplify;

pub use ledger::{Ledger, Obligation};
pub use simplify::{NetScore, Settlement, net_scores, simplify};
