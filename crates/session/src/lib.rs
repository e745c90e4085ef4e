//! `billsplit-session`: one group's registry, ledger and expense history.
//!
//! Every operation is synchronous and either fully applies or leaves the
//! session untouched.

pub mod config;
pub mod session;
pub mod statement;

pub use config::SessionConfig;
pub use session::{ExpenseReceipt, SharedSession, SplitSession};
pub use statement::{BalanceLine, GroupStatement, NO_BALANCES, ParticipantStatement};
