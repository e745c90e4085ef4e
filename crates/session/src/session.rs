use std::sync::{Arc, Mutex};

use serde::Serialize;

use billsplit_core::{DomainResult, ExpenseId, Money, ParticipantHandle};
use billsplit_expenses::{Expense, ExpenseBuilder, NewExpense};
use billsplit_ledger::{Ledger, Settlement};
use billsplit_participants::{Participant, ParticipantRegistry};

use crate::config::SessionConfig;
use crate::statement::{BalanceLine, GroupStatement, ParticipantStatement};

/// One lock per ledger; the whole apply-and-simplify sequence runs under it.
pub type SharedSession = Arc<Mutex<SplitSession>>;

/// Acknowledgment for an accepted expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseReceipt {
    pub expense_id: ExpenseId,
    /// Settlement list the ledger now holds.
    pub settlements: Vec<Settlement>,
}

/// A group's registry, ledger and expense history.
#[derive(Debug, Clone, Default)]
pub struct SplitSession {
    registry: ParticipantRegistry,
    ledger: Ledger,
    expenses: Vec<Expense>,
}

impl SplitSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &SessionConfig) -> Self {
        let registry = match config.max_participants {
            Some(limit) => ParticipantRegistry::with_capacity_limit(limit),
            None => ParticipantRegistry::new(),
        };
        Self {
            registry,
            ledger: Ledger::new(),
            expenses: Vec::new(),
        }
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn register_participant(
        &mut self,
        name: impl Into<String>,
        handle: ParticipantHandle,
    ) -> DomainResult<Participant> {
        let participant = self.registry.register(name, handle)?.clone();
        self.ledger.open_row(participant.handle().clone());
        Ok(participant)
    }

    /// Validate, apply and simplify one expense.
    ///
    /// The ledger is staged on a copy and committed together with the history
    /// entry, so any failure leaves the session as it was.
    pub fn add_expense(&mut self, request: NewExpense) -> DomainResult<ExpenseReceipt> {
        let expense = ExpenseBuilder::new(&self.registry).build(request)?;

        let mut staged = self.ledger.clone();
        staged.apply_expense(&expense)?;
        let settlements = staged.simplify()?;

        self.ledger = staged;
        tracing::info!(
            expense_id = %expense.id(),
            payer = %expense.payer(),
            amount = %expense.amount(),
            kind = ?expense.kind(),
            settlements = settlements.len(),
            "expense recorded"
        );

        let receipt = ExpenseReceipt {
            expense_id: expense.id(),
            settlements,
        };
        self.expenses.push(expense);
        Ok(receipt)
    }

    /// Statement drawn from the participant's own ledger row.
    ///
    /// Only a malformed handle fails; an unregistered one has no row and gets an
    /// empty statement without a name.
    pub fn balance(&self, handle: &str) -> DomainResult<ParticipantStatement> {
        let handle = ParticipantHandle::parse(handle)?;
        let name = self.registry.name_of(&handle).map(str::to_string);

        let mut lines = Vec::new();
        let mut net = Money::ZERO;
        for (other, amount) in self.ledger.row(&handle).into_iter().flatten() {
            if amount.is_zero() {
                continue;
            }
            net += *amount;
            if let Some(line) = self.line(&handle, other, *amount) {
                lines.push(line);
            }
        }

        Ok(ParticipantStatement {
            name,
            handle,
            lines,
            total: -net,
        })
    }

    /// Every positive cell across all rows, in row order.
    pub fn balances(&self) -> GroupStatement {
        let lines = self
            .ledger
            .rows()
            .flat_map(|(holder, row)| {
                row.iter()
                    .filter(|(_, amount)| amount.is_positive())
                    .filter_map(move |(other, amount)| self.line(holder, other, *amount))
            })
            .collect();

        GroupStatement {
            lines,
            total_group_spend: self.ledger.total_spend(),
        }
    }

    /// Render the cell `rows[holder][other]`; `None` if either side has no
    /// registered name.
    fn line(
        &self,
        holder: &ParticipantHandle,
        other: &ParticipantHandle,
        amount: Money,
    ) -> Option<BalanceLine> {
        let holder_name = self.registry.name_of(holder)?.to_string();
        let other_name = self.registry.name_of(other)?.to_string();
        let (debtor, creditor) = if amount.is_negative() {
            (holder_name, other_name)
        } else {
            (other_name, holder_name)
        };
        Some(BalanceLine {
            debtor,
            creditor,
            amount: amount.abs(),
        })
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.registry.iter()
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}
