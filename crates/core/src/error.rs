//! Domain error model.

use thiserror::Error;

use crate::handle::ParticipantHandle;
use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every kind renders a fixed message so callers can surface it verbatim.
/// The payload carries the offending value for logs and tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A participant with the same handle is already registered.
    #[error("participant already exists")]
    DuplicateParticipant(ParticipantHandle),

    /// The payer or a share target is not registered.
    #[error("participant is not registered")]
    UnknownParticipant(ParticipantHandle),

    /// Shares do not describe a valid split of the expense amount.
    #[error("invalid split")]
    InvalidSplit(SplitViolation),

    /// A participant handle is malformed.
    #[error("invalid handle format")]
    InvalidHandleFormat(String),

    /// An amount is not a positive value with at most two decimals.
    #[error("invalid amount")]
    InvalidAmount(String),

    /// A value failed validation (e.g. blank name).
    #[error("validation failed")]
    Validation(String),

    /// The registry reached its configured capacity.
    #[error("participant limit reached")]
    ParticipantLimit { limit: usize },

    /// A domain invariant was violated.
    #[error("invariant violated")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        Self::InvalidAmount(msg.into())
    }

    pub fn invalid_split(violation: SplitViolation) -> Self {
        Self::InvalidSplit(violation)
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            DomainError::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            DomainError::InvalidSplit(_) => "INVALID_SPLIT",
            DomainError::InvalidHandleFormat(_) => "INVALID_HANDLE_FORMAT",
            DomainError::InvalidAmount(_) => "INVALID_AMOUNT",
            DomainError::Validation(_) => "VALIDATION_FAILED",
            DomainError::ParticipantLimit { .. } => "PARTICIPANT_LIMIT",
            DomainError::InvariantViolation(_) => "INVARIANT_VIOLATION",
        }
    }
}

/// Why a split was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitViolation {
    /// Declared participant count is missing, out of range, or differs from
    /// the number of supplied shares.
    CountMismatch {
        declared: Option<usize>,
        supplied: usize,
        registered: usize,
    },
    /// Shares do not add up to the expense amount.
    SumMismatch { expected: Money, actual: Money },
    /// A share amount is zero or negative.
    NonPositiveShare(ParticipantHandle),
    /// The equal split did not produce one share per participant summing to
    /// the amount.
    AllocationDrift {
        participants: usize,
        allocated: usize,
    },
}

impl core::fmt::Display for SplitViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SplitViolation::CountMismatch {
                declared,
                supplied,
                registered,
            } => write!(
                f,
                "declared count {declared:?} does not match {supplied} shares ({registered} registered)"
            ),
            SplitViolation::SumMismatch { expected, actual } => {
                write!(f, "shares sum to {actual}, expected {expected}")
            }
            SplitViolation::NonPositiveShare(handle) => {
                write!(f, "share for {handle} must be positive")
            }
            SplitViolation::AllocationDrift {
                participants,
                allocated,
            } => write!(
                f,
                "equal split over {participants} participants produced {allocated} shares"
            ),
        }
    }
}
