//! Human-readable balance statements.

use core::fmt;

use serde::Serialize;

use billsplit_core::{Money, ParticipantHandle};

/// Rendered in place of lines when nothing is owed.
pub const NO_BALANCES: &str = "No Balances";

/// "`debtor` owes `creditor`: `amount`", by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceLine {
    pub debtor: String,
    pub creditor: String,
    pub amount: Money,
}

impl fmt::Display for BalanceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owes {}: {}", self.debtor, self.creditor, self.amount)
    }
}

fn render(lines: &[BalanceLine]) -> Vec<String> {
    if lines.is_empty() {
        return vec![NO_BALANCES.to_string()];
    }
    lines.iter().map(ToString::to_string).collect()
}

/// Balances as seen from one participant's row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParticipantStatement {
    /// `None` when the handle is not registered.
    pub name: Option<String>,
    pub handle: ParticipantHandle,
    pub lines: Vec<BalanceLine>,
    /// Positive when the participant owes more than they are owed.
    pub total: Money,
}

impl ParticipantStatement {
    pub fn rendered_lines(&self) -> Vec<String> {
        render(&self.lines)
    }

    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => format!("Balances for {name} ({})", self.handle),
            None => format!("Balances for {}", self.handle),
        }
    }
}

/// Every outstanding obligation in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupStatement {
    pub lines: Vec<BalanceLine>,
    pub total_group_spend: Money,
}

impl GroupStatement {
    pub fn rendered_lines(&self) -> Vec<String> {
        render(&self.lines)
    }
}
