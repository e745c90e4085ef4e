//! Expenses domain module (equal/unequal splits, validated expense records).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod allocator;
pub mod builder;
pub mod expense;

pub use allocator::allocate_equal;
pub use builder::ExpenseBuilder;
pub use expense::{Expense, NewExpense, Share, ShareRequest, SplitKind, SplitPlan};
