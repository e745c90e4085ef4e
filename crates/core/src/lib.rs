//! `billsplit-core`: shared building blocks for the bill split ledger.
//!
//! This crate contains **pure domain** primitives (no IO, no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod handle;
pub mod id;
pub mod money;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, SplitViolation};
pub use handle::ParticipantHandle;
pub use id::ExpenseId;
pub use money::Money;
pub use value_object::ValueObject;
