use chrono::Utc;

use billsplit_core::{DomainError, DomainResult, Money, SplitViolation};
use billsplit_participants::ParticipantRegistry;

use crate::allocator::allocate_equal;
use crate::expense::{Expense, NewExpense, Share, ShareRequest, SplitPlan};

/// Validates expense requests against the registry and produces immutable
/// expense records.
///
/// Building never mutates anything: either a complete `Expense` comes back or
/// an error does.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseBuilder<'a> {
    registry: &'a ParticipantRegistry,
}

impl<'a> ExpenseBuilder<'a> {
    pub fn new(registry: &'a ParticipantRegistry) -> Self {
        Self { registry }
    }

    pub fn build(&self, request: NewExpense) -> DomainResult<Expense> {
        let NewExpense {
            description,
            payer,
            amount,
            plan,
        } = request;

        if !amount.is_positive() {
            return Err(DomainError::invalid_amount("expense amount must be positive"));
        }
        if description.trim().is_empty() {
            return Err(DomainError::validation("expense name cannot be empty"));
        }
        self.registry.lookup(&payer)?;

        let kind = plan.kind();
        let shares = match plan {
            SplitPlan::Equal => self.equal_shares(amount)?,
            SplitPlan::Unequal {
                declared_count,
                shares,
            } => self.unequal_shares(amount, declared_count, shares)?,
        };

        tracing::debug!(%payer, %amount, ?kind, shares = shares.len(), "expense built");
        Ok(Expense::new(
            amount,
            description,
            payer,
            kind,
            shares,
            Utc::now(),
        ))
    }

    /// Equal split across every registered participant, in registration order.
    fn equal_shares(&self, amount: Money) -> DomainResult<Vec<Share>> {
        let participants = self.registry.len();
        let amounts = allocate_equal(amount, participants);

        let total: Money = amounts.iter().sum();
        if amounts.len() != participants || total != amount {
            return Err(DomainError::invalid_split(SplitViolation::AllocationDrift {
                participants,
                allocated: amounts.len(),
            }));
        }

        Ok(self
            .registry
            .handles()
            .zip(amounts)
            .map(|(handle, amount)| Share {
                participant: handle.clone(),
                amount,
            })
            .collect())
    }

    fn unequal_shares(
        &self,
        amount: Money,
        declared_count: Option<usize>,
        requested: Vec<ShareRequest>,
    ) -> DomainResult<Vec<Share>> {
        let registered = self.registry.len();
        let count_ok = matches!(
            declared_count,
            Some(n) if n > 0 && n <= registered && n == requested.len()
        );
        if !count_ok {
            return Err(DomainError::invalid_split(SplitViolation::CountMismatch {
                declared: declared_count,
                supplied: requested.len(),
                registered,
            }));
        }

        for share in &requested {
            self.registry.lookup(&share.participant)?;
            if !share.amount.is_positive() {
                return Err(DomainError::invalid_split(SplitViolation::NonPositiveShare(
                    share.participant.clone(),
                )));
            }
        }

        let total = requested
            .iter()
            .try_fold(Money::ZERO, |acc, s| acc.checked_add(s.amount))
            .ok_or_else(|| DomainError::invalid_amount("share amounts overflow"))?;
        if total != amount {
            return Err(DomainError::invalid_split(SplitViolation::SumMismatch {
                expected: amount,
                actual: total,
            }));
        }

        Ok(requested
            .into_iter()
            .map(|s| Share {
                participant: s.participant,
                amount: s.amount,
            })
            .collect())
    }
}
