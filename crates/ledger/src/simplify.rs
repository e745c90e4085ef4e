//! Debt simplification.
//!
//! Net scores are recomputed from the whole ledger and matched debtor against
//! creditor by an exhaustive search over counterpart choice. The debtor under
//! consideration is always the head of the negatives list, so the result is
//! the shortest list reachable under that strategy, not a proven global
//! minimum. Cost is exponential in group size.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use billsplit_core::{DomainError, DomainResult, Money, ParticipantHandle, ValueObject};

use crate::ledger::Obligation;

/// A proposed payment that zeroes out part of the net scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: ParticipantHandle,
    pub to: ParticipantHandle,
    pub amount: Money,
}

impl ValueObject for Settlement {}

impl From<Settlement> for Obligation {
    fn from(s: Settlement) -> Self {
        Obligation {
            debtor: s.from,
            creditor: s.to,
            amount: s.amount,
        }
    }
}

/// Owed-to minus owed-by for one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetScore {
    pub participant: ParticipantHandle,
    pub score: Money,
}

/// Net score per participant, in first-seen order (debtor before creditor).
///
/// Participants whose score cancels out are kept with a zero score.
pub fn net_scores<'a, I>(obligations: I) -> Vec<NetScore>
where
    I: IntoIterator<Item = &'a Obligation>,
{
    let mut scores: IndexMap<ParticipantHandle, Money> = IndexMap::new();
    for o in obligations {
        *scores.entry(o.debtor.clone()).or_default() -= o.amount;
        *scores.entry(o.creditor.clone()).or_default() += o.amount;
    }
    scores
        .into_iter()
        .map(|(participant, score)| NetScore { participant, score })
        .collect()
}

/// Collapse `obligations` into the shortest settlement list the search finds.
///
/// Fails with an invariant violation if the scores do not balance.
pub fn simplify(obligations: &[Obligation]) -> DomainResult<Vec<Settlement>> {
    let (positives, negatives): (Vec<NetScore>, Vec<NetScore>) = net_scores(obligations)
        .into_iter()
        .filter(|s| !s.score.is_zero())
        .partition(|s| s.score.is_positive());

    let settlements = search(&positives, &negatives)
        .ok_or_else(|| DomainError::invariant("net scores do not balance"))?;

    tracing::debug!(
        obligations = obligations.len(),
        creditors = positives.len(),
        debtors = negatives.len(),
        settlements = settlements.len(),
        "ledger simplified"
    );
    Ok(settlements)
}

/// Best settlement list for the sub-problem, or `None` if it cannot be
/// zeroed out (one side exhausted before the other).
///
/// Ties keep the first candidate found.
fn search(positives: &[NetScore], negatives: &[NetScore]) -> Option<Vec<Settlement>> {
    let Some((debtor, rest)) = negatives.split_first() else {
        return positives.is_empty().then(Vec::new);
    };
    let owed = -debtor.score;

    let mut best: Option<Vec<Settlement>> = None;
    for (i, creditor) in positives.iter().enumerate() {
        let mut next_positives: Vec<NetScore> = positives
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, p)| p.clone())
            .collect();
        let mut next_negatives: Vec<NetScore> = rest.to_vec();

        // Residual balances go to the back of their list.
        let amount = if creditor.score == owed {
            owed
        } else if creditor.score > owed {
            next_positives.push(NetScore {
                participant: creditor.participant.clone(),
                score: creditor.score - owed,
            });
            owed
        } else {
            next_negatives.push(NetScore {
                participant: debtor.participant.clone(),
                score: debtor.score + creditor.score,
            });
            creditor.score
        };

        let Some(tail) = search(&next_positives, &next_negatives) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| tail.len() + 1 < b.len()) {
            let mut candidate = Vec::with_capacity(tail.len() + 1);
            candidate.push(Settlement {
                from: debtor.participant.clone(),
                to: creditor.participant.clone(),
                amount,
            });
            candidate.extend(tail);
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn h(s: &str) -> ParticipantHandle {
        ParticipantHandle::parse(format!("{s}@group.test")).unwrap()
    }

    fn owes(debtor: &str, creditor: &str, amount: i64) -> Obligation {
        Obligation {
            debtor: h(debtor),
            creditor: h(creditor),
            amount: Money::from_major(amount),
        }
    }

    fn pays(from: &str, to: &str, amount: i64) -> Settlement {
        Settlement {
            from: h(from),
            to: h(to),
            amount: Money::from_major(amount),
        }
    }

    fn nonzero_scores<'a>(
        obligations: impl IntoIterator<Item = &'a Obligation>,
    ) -> BTreeMap<ParticipantHandle, Money> {
        net_scores(obligations)
            .into_iter()
            .filter(|s| !s.score.is_zero())
            .map(|s| (s.participant, s.score))
            .collect()
    }

    #[test]
    fn chain_collapses_to_one_payment() {
        let obligations = vec![owes("a", "b", 100), owes("b", "c", 100)];
        let scores = net_scores(&obligations);
        assert_eq!(
            scores,
            vec![
                NetScore { participant: h("a"), score: Money::from_major(-100) },
                NetScore { participant: h("b"), score: Money::ZERO },
                NetScore { participant: h("c"), score: Money::from_major(100) },
            ]
        );

        assert_eq!(simplify(&obligations).unwrap(), vec![pays("a", "c", 100)]);
    }

    #[test]
    fn nothing_owed_means_nothing_to_settle() {
        assert!(simplify(&[]).unwrap().is_empty());
        let circular = vec![owes("a", "b", 10), owes("b", "a", 10)];
        assert!(simplify(&circular).unwrap().is_empty());
    }

    #[test]
    fn prefers_exact_matches_over_partial_ones() {
        // Scores: n1 -70, p1 +30, p2 +70, n2 -30.
        let obligations = vec![owes("n1", "p1", 30), owes("n1", "p2", 40), owes("n2", "p2", 30)];
        assert_eq!(
            simplify(&obligations).unwrap(),
            vec![pays("n1", "p2", 70), pays("n2", "p1", 30)]
        );
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        let obligations = vec![owes("n1", "p1", 50), owes("n1", "p2", 50)];
        assert_eq!(
            simplify(&obligations).unwrap(),
            vec![pays("n1", "p1", 50), pays("n1", "p2", 50)]
        );
    }

    #[test]
    fn residual_debtor_moves_behind_the_other_debtors() {
        // Scores: n1 -80, p1 +50, n2 -20, p2 +50.
        // Whoever n1 pays first, its residual queues behind n2, which settles next.
        let obligations = vec![owes("n1", "p1", 50), owes("n2", "p2", 20), owes("n1", "p2", 30)];
        let settlements = simplify(&obligations).unwrap();
        assert_eq!(settlements.len(), 3);
        assert_eq!(settlements[0].from, h("n1"));
        assert_eq!(settlements[1].from, h("n2"));
        assert_eq!(settlements[2].from, h("n1"));
    }

    #[test]
    fn rerunning_a_simplified_ledger_does_not_grow() {
        let obligations = vec![owes("n1", "p1", 30), owes("n1", "p2", 40), owes("n2", "p2", 30)];
        let first = simplify(&obligations).unwrap();
        let again: Vec<Obligation> = first.iter().cloned().map(Obligation::from).collect();
        let second = simplify(&again).unwrap();
        assert!(second.len() <= first.len());
        assert_eq!(second, first);
    }

    #[test]
    fn one_sided_scores_cannot_be_settled() {
        let positives = vec![NetScore { participant: h("a"), score: Money::from_major(10) }];
        assert_eq!(search(&positives, &[]), None);

        let negatives = vec![NetScore { participant: h("b"), score: Money::from_major(-10) }];
        assert_eq!(search(&[], &negatives), None);
    }

    fn arb_obligations() -> impl Strategy<Value = Vec<Obligation>> {
        const NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];
        prop::collection::vec((0usize..5, 1usize..5, 1i64..50_000i64), 0..8).prop_map(|raw| {
            raw.into_iter()
                .map(|(d, offset, minor)| Obligation {
                    debtor: h(NAMES[d]),
                    creditor: h(NAMES[(d + offset) % 5]),
                    amount: Money::from_minor(minor),
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: settling preserves every participant's net score.
        #[test]
        fn settlements_preserve_net_scores(obligations in arb_obligations()) {
            let settlements = simplify(&obligations).unwrap();
            let replayed: Vec<Obligation> = settlements.iter().cloned().map(Obligation::from).collect();
            prop_assert_eq!(nonzero_scores(&replayed), nonzero_scores(&obligations));
        }

        /// Property: every payment retires at least one open balance, so the
        /// list is shorter than the number of non-zero participants.
        #[test]
        fn settlement_count_is_bounded(obligations in arb_obligations()) {
            let open = nonzero_scores(&obligations).len();
            let settlements = simplify(&obligations).unwrap();
            prop_assert!(settlements.len() <= open.saturating_sub(1));
            prop_assert!(settlements.iter().all(|s| s.amount.is_positive() && s.from != s.to));
        }
    }
}
