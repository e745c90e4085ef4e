use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use billsplit_core::{ExpenseId, Money, ParticipantHandle, ValueObject};

/// How an expense is divided among participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SplitKind {
    /// Divided evenly across every registered participant.
    Equal,
    /// Divided by explicit per-participant amounts.
    Unequal,
}

/// One participant's portion of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub participant: ParticipantHandle,
    pub amount: Money,
}

impl ValueObject for Share {}

/// Caller-supplied share for an unequal split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRequest {
    pub participant: ParticipantHandle,
    pub amount: Money,
}

/// Split plan: the tag decides which rule produces the shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitPlan {
    Equal,
    Unequal {
        /// Number of participants the caller claims to split between.
        declared_count: Option<usize>,
        shares: Vec<ShareRequest>,
    },
}

impl SplitPlan {
    pub fn kind(&self) -> SplitKind {
        match self {
            SplitPlan::Equal => SplitKind::Equal,
            SplitPlan::Unequal { .. } => SplitKind::Unequal,
        }
    }
}

/// Request to record an expense (not yet validated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    pub description: String,
    pub payer: ParticipantHandle,
    pub amount: Money,
    pub plan: SplitPlan,
}

/// An accepted expense (immutable).
///
/// Shares always sum to `amount`; the builder is the only constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    amount: Money,
    description: String,
    payer: ParticipantHandle,
    kind: SplitKind,
    shares: Vec<Share>,
    recorded_at: DateTime<Utc>,
}

impl Expense {
    pub(crate) fn new(
        amount: Money,
        description: String,
        payer: ParticipantHandle,
        kind: SplitKind,
        shares: Vec<Share>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            description,
            payer,
            kind,
            shares,
            recorded_at,
        }
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn payer(&self) -> &ParticipantHandle {
        &self.payer
    }

    pub fn kind(&self) -> SplitKind {
        self.kind
    }

    pub fn shares(&self) -> &[Share] {
        &self.shares
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
