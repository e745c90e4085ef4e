use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use billsplit_core::{DomainError, DomainResult, Money, ParticipantHandle};
use billsplit_expenses::Expense;

use crate::simplify::{self, Settlement};

/// One participant's cells, keyed by counterpart in first-seen order.
pub type Row = IndexMap<ParticipantHandle, Money>;

/// A single positive cell read as "debtor owes creditor".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    pub debtor: ParticipantHandle,
    pub creditor: ParticipantHandle,
    pub amount: Money,
}

/// Pairwise balance matrix plus running group spend.
///
/// `rows[a][b] > 0` means `b` owes `a`. After a simplification every pair is
/// stored twice, positive on the creditor's row and negative on the debtor's.
/// Negative cells are views only and are pruned before the next expense lands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    rows: IndexMap<ParticipantHandle, Row>,
    total_spend: Money,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `holder` has a row.
    pub fn open_row(&mut self, holder: ParticipantHandle) {
        self.rows.entry(holder).or_default();
    }

    /// Drop every negative cell; positive cells keep their order.
    pub fn prune_negative_cells(&mut self) {
        for row in self.rows.values_mut() {
            row.retain(|_, amount| !amount.is_negative());
        }
    }

    /// Credit the payer with every share that someone else owes.
    ///
    /// The payer's own share creates no cell. Fails before touching anything if
    /// the group total would overflow.
    pub fn apply_expense(&mut self, expense: &Expense) -> DomainResult<()> {
        let total_spend = self
            .total_spend
            .checked_add(expense.amount())
            .ok_or_else(|| DomainError::invalid_amount("group total overflows"))?;
        self.prune_negative_cells();

        let row = self.rows.entry(expense.payer().clone()).or_default();
        for share in expense.shares() {
            if &share.participant == expense.payer() {
                continue;
            }
            // Positive cells sum to at most the group total, so this cannot overflow.
            *row.entry(share.participant.clone()).or_default() += share.amount;
        }
        self.total_spend = total_spend;
        Ok(())
    }

    /// Positive cells as obligations, row by row.
    pub fn obligations(&self) -> Vec<Obligation> {
        self.rows
            .iter()
            .flat_map(|(creditor, row)| {
                row.iter()
                    .filter(|(_, amount)| amount.is_positive())
                    .map(move |(debtor, amount)| Obligation {
                        debtor: debtor.clone(),
                        creditor: creditor.clone(),
                        amount: *amount,
                    })
            })
            .collect()
    }

    /// Owed-to minus owed-by, counting positive cells only.
    pub fn net_position(&self, participant: &ParticipantHandle) -> Money {
        self.obligations()
            .iter()
            .map(|o| {
                if &o.creditor == participant {
                    o.amount
                } else if &o.debtor == participant {
                    -o.amount
                } else {
                    Money::ZERO
                }
            })
            .sum()
    }

    /// Replace the matrix with the mirrored form of `settlements`.
    ///
    /// Rows of participants with nothing outstanding are dropped; a later
    /// expense reopens the payer's row at the end.
    pub fn rebuild(&mut self, settlements: &[Settlement]) {
        let mut rows: IndexMap<ParticipantHandle, Row> = IndexMap::new();
        for s in settlements {
            rows.entry(s.to.clone()).or_default().insert(s.from.clone(), s.amount);
            rows.entry(s.from.clone()).or_default().insert(s.to.clone(), -s.amount);
        }
        self.rows = rows;
    }

    /// Collapse the matrix to its simplified settlements and store them back.
    ///
    /// On error the ledger is left untouched.
    pub fn simplify(&mut self) -> DomainResult<Vec<Settlement>> {
        let settlements = simplify::simplify(&self.obligations())?;
        self.rebuild(&settlements);
        Ok(settlements)
    }

    pub fn row(&self, holder: &ParticipantHandle) -> Option<&Row> {
        self.rows.get(holder)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&ParticipantHandle, &Row)> {
        self.rows.iter()
    }

    pub fn total_spend(&self) -> Money {
        self.total_spend
    }

    /// True when no positive cell remains.
    pub fn is_settled(&self) -> bool {
        self.rows
            .values()
            .all(|row| row.values().all(|amount| !amount.is_positive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billsplit_expenses::{ExpenseBuilder, NewExpense, ShareRequest, SplitPlan};
    use billsplit_participants::ParticipantRegistry;
    use proptest::prelude::*;

    const USERS: [&str; 3] = ["user1@example.com", "user2@example.com", "user3@example.com"];

    fn handle(s: &str) -> ParticipantHandle {
        ParticipantHandle::parse(s).unwrap()
    }

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn registry_of(handles: &[&str]) -> ParticipantRegistry {
        let mut registry = ParticipantRegistry::new();
        for h in handles {
            registry.register(*h, handle(h)).unwrap();
        }
        registry
    }

    fn ledger_for(registry: &ParticipantRegistry) -> Ledger {
        let mut ledger = Ledger::new();
        for h in registry.handles() {
            ledger.open_row(h.clone());
        }
        ledger
    }

    fn equal(registry: &ParticipantRegistry, payer: &str, amount: &str) -> Expense {
        ExpenseBuilder::new(registry)
            .build(NewExpense {
                description: "Equal Expense".to_string(),
                payer: handle(payer),
                amount: m(amount),
                plan: SplitPlan::Equal,
            })
            .unwrap()
    }

    #[test]
    fn unequal_expense_credits_the_payer_row() {
        let registry = registry_of(&USERS);
        let mut ledger = ledger_for(&registry);
        let expense = ExpenseBuilder::new(&registry)
            .build(NewExpense {
                description: "Unequal Expense".to_string(),
                payer: handle(USERS[0]),
                amount: m("200"),
                plan: SplitPlan::Unequal {
                    declared_count: Some(2),
                    shares: vec![
                        ShareRequest { participant: handle(USERS[1]), amount: m("50") },
                        ShareRequest { participant: handle(USERS[2]), amount: m("150") },
                    ],
                },
            })
            .unwrap();

        ledger.apply_expense(&expense).unwrap();

        let row = ledger.row(&handle(USERS[0])).unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(&handle(USERS[1])), Some(&m("50")));
        assert_eq!(row.get(&handle(USERS[2])), Some(&m("150")));
        assert_eq!(ledger.total_spend(), m("200"));
    }

    #[test]
    fn payer_share_creates_no_cell() {
        let registry = registry_of(&USERS);
        let mut ledger = ledger_for(&registry);
        ledger.apply_expense(&equal(&registry, USERS[0], "100")).unwrap();

        let row = ledger.row(&handle(USERS[0])).unwrap();
        assert!(!row.contains_key(&handle(USERS[0])));
        assert_eq!(ledger.net_position(&handle(USERS[0])), m("66.67"));
        assert_eq!(ledger.net_position(&handle(USERS[1])), m("-33.33"));
        assert_eq!(ledger.net_position(&handle(USERS[2])), m("-33.34"));
    }

    #[test]
    fn rebuild_mirrors_each_settlement() {
        let mut ledger = Ledger::new();
        for h in USERS {
            ledger.open_row(handle(h));
        }
        ledger.rebuild(&[Settlement {
            from: handle(USERS[1]),
            to: handle(USERS[0]),
            amount: m("33.33"),
        }]);

        assert_eq!(ledger.row(&handle(USERS[0])).unwrap().get(&handle(USERS[1])), Some(&m("33.33")));
        assert_eq!(ledger.row(&handle(USERS[1])).unwrap().get(&handle(USERS[0])), Some(&m("-33.33")));
        assert!(ledger.row(&handle(USERS[2])).is_none());
        assert_eq!(ledger.obligations().len(), 1);
    }

    #[test]
    fn negative_cells_are_pruned_before_the_next_expense() {
        let registry = registry_of(&USERS);
        let mut ledger = ledger_for(&registry);
        ledger.apply_expense(&equal(&registry, USERS[0], "100")).unwrap();
        ledger.simplify().unwrap();
        assert!(ledger.row(&handle(USERS[1])).unwrap().values().any(|a| a.is_negative()));

        ledger.apply_expense(&equal(&registry, USERS[1], "100")).unwrap();
        let negatives = ledger
            .rows()
            .flat_map(|(_, row)| row.values())
            .filter(|a| a.is_negative())
            .count();
        assert_eq!(negatives, 0);
    }

    #[test]
    fn two_equal_expenses_simplify_to_the_expected_transfers() {
        let registry = registry_of(&USERS);
        let mut ledger = ledger_for(&registry);

        ledger.apply_expense(&equal(&registry, USERS[0], "100")).unwrap();
        let first = ledger.simplify().unwrap();
        assert_eq!(
            first,
            vec![
                Settlement { from: handle(USERS[1]), to: handle(USERS[0]), amount: m("33.33") },
                Settlement { from: handle(USERS[2]), to: handle(USERS[0]), amount: m("33.34") },
            ]
        );

        ledger.apply_expense(&equal(&registry, USERS[1], "100")).unwrap();
        let second = ledger.simplify().unwrap();
        assert_eq!(
            second,
            vec![
                Settlement { from: handle(USERS[2]), to: handle(USERS[1]), amount: m("33.34") },
                Settlement { from: handle(USERS[2]), to: handle(USERS[0]), amount: m("33.34") },
            ]
        );
        assert_eq!(ledger.total_spend(), m("200"));
    }

    #[test]
    fn overflowing_group_total_is_rejected_untouched() {
        let registry = registry_of(&USERS);
        let mut ledger = ledger_for(&registry);
        ledger.apply_expense(&equal(&registry, USERS[0], "100")).unwrap();
        ledger.simplify().unwrap();
        ledger.total_spend = Money::from_minor(i64::MAX - 1);
        let before = ledger.clone();

        let err = ledger
            .apply_expense(&equal(&registry, USERS[1], "100"))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn empty_ledger_is_settled() {
        let ledger = Ledger::new();
        assert!(ledger.is_settled());
        assert!(ledger.obligations().is_empty());
        assert_eq!(ledger.total_spend(), Money::ZERO);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: net positions sum to zero and total spend matches the
        /// recorded expenses, before and after every simplification.
        #[test]
        fn ledger_conserves_money(expenses in prop::collection::vec((0usize..3, 600i64..100_000i64), 1..6)) {
            let registry = registry_of(&USERS);
            let mut ledger = ledger_for(&registry);
            let mut spent = Money::ZERO;

            for (payer, minor) in expenses {
                let amount = Money::from_minor(minor);
                let expense = ExpenseBuilder::new(&registry)
                    .build(NewExpense {
                        description: "Shared".to_string(),
                        payer: handle(USERS[payer]),
                        amount,
                        plan: SplitPlan::Equal,
                    })
                    .unwrap();
                spent += amount;

                ledger.apply_expense(&expense).unwrap();
                prop_assert_eq!(USERS.iter().map(|h| ledger_position(&ledger, h)).sum::<Money>(), Money::ZERO);

                let applied: Vec<Money> = USERS.iter().map(|h| ledger_position(&ledger, h)).collect();
                ledger.simplify().unwrap();
                let simplified: Vec<Money> = USERS.iter().map(|h| ledger_position(&ledger, h)).collect();
                prop_assert_eq!(applied, simplified);
            }
            prop_assert_eq!(ledger.total_spend(), spent);
        }
    }

    fn ledger_position(ledger: &Ledger, h: &str) -> Money {
        ledger.net_position(&handle(h))
    }
}
