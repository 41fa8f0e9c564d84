use crate::core::types::{Payout, Settlement};
use rust_decimal::Decimal;

#[derive(Debug)]
struct Balance<'a> {
    participant_id: &'a str,
    remaining: Decimal,
}

/// Collapses net payouts into pairwise transfers, debtor to creditor.
///
/// Greedy: the largest open creditor is matched with the largest open debtor,
/// the smaller of the two balances moves, and whichever side hits zero is
/// retired. With zero-sum input both sides drain together. Equal magnitudes
/// keep their input order (stable sort). Zero payouts never appear.
pub fn settlements(payouts: &[Payout]) -> Vec<Settlement> {
    let mut creditors = balances(payouts, |amount| amount > Decimal::ZERO);
    let mut debtors = balances(payouts, |amount| amount < Decimal::ZERO);

    let mut out = Vec::with_capacity(creditors.len() + debtors.len());
    let mut ci = 0;
    let mut di = 0;

    while ci < creditors.len() && di < debtors.len() {
        let transfer = creditors[ci].remaining.min(debtors[di].remaining);

        out.push(Settlement {
            from_participant_id: debtors[di].participant_id.to_string(),
            to_participant_id: creditors[ci].participant_id.to_string(),
            amount: transfer,
        });

        creditors[ci].remaining -= transfer;
        debtors[di].remaining -= transfer;

        if creditors[ci].remaining.is_zero() {
            ci += 1;
        }
        if debtors[di].remaining.is_zero() {
            di += 1;
        }
    }

    out
}

/// Magnitudes of the selected side, largest first.
fn balances(payouts: &[Payout], side: impl Fn(Decimal) -> bool) -> Vec<Balance<'_>> {
    let mut out: Vec<Balance<'_>> = payouts
        .iter()
        .filter(|p| side(p.amount))
        .map(|p| Balance {
            participant_id: &p.participant_id,
            remaining: p.amount.abs(),
        })
        .collect();
    out.sort_by(|a, b| b.remaining.cmp(&a.remaining));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn payout(id: &str, amount: Decimal) -> Payout {
        Payout {
            participant_id: id.to_string(),
            amount,
        }
    }

    fn sent_by(settlements: &[Settlement]) -> HashMap<&str, Decimal> {
        let mut m = HashMap::new();
        for s in settlements {
            *m.entry(s.from_participant_id.as_str()).or_insert(Decimal::ZERO) += s.amount;
        }
        m
    }

    fn received_by(settlements: &[Settlement]) -> HashMap<&str, Decimal> {
        let mut m = HashMap::new();
        for s in settlements {
            *m.entry(s.to_participant_id.as_str()).or_insert(Decimal::ZERO) += s.amount;
        }
        m
    }

    #[test]
    fn test_two_party_settlement() {
        let payouts = vec![
            payout("a", Decimal::new(1080, 2)),
            payout("b", Decimal::new(-1080, 2)),
        ];
        let result = settlements(&payouts);
        assert_eq!(
            result,
            vec![Settlement {
                from_participant_id: "b".to_string(),
                to_participant_id: "a".to_string(),
                amount: Decimal::new(1080, 2),
            }]
        );
    }

    #[test]
    fn test_one_creditor_two_debtors() {
        let payouts = vec![
            payout("a", Decimal::from(10)),
            payout("b", Decimal::from(-5)),
            payout("c", Decimal::from(-5)),
        ];
        let result = settlements(&payouts);
        assert_eq!(result.len(), 2);
        // equal debts keep input order
        assert_eq!(result[0].from_participant_id, "b");
        assert_eq!(result[1].from_participant_id, "c");
        assert!(result.iter().all(|s| s.to_participant_id == "a"));
        assert_eq!(received_by(&result)["a"], Decimal::from(10));
    }

    #[test]
    fn test_zero_payouts_are_skipped() {
        let payouts = vec![
            payout("a", Decimal::ZERO),
            payout("b", Decimal::ZERO),
        ];
        assert!(settlements(&payouts).is_empty());

        let payouts = vec![
            payout("a", Decimal::from(3)),
            payout("z", Decimal::ZERO),
            payout("b", Decimal::from(-3)),
        ];
        let result = settlements(&payouts);
        assert_eq!(result.len(), 1);
        assert!(result.iter().all(|s| s.from_participant_id != "z" && s.to_participant_id != "z"));
    }

    #[test]
    fn test_largest_matched_first() {
        let payouts = vec![
            payout("small_win", Decimal::from(2)),
            payout("big_win", Decimal::from(8)),
            payout("small_loss", Decimal::from(-3)),
            payout("big_loss", Decimal::from(-7)),
        ];
        let result = settlements(&payouts);

        assert_eq!(result[0].from_participant_id, "big_loss");
        assert_eq!(result[0].to_participant_id, "big_win");
        assert_eq!(result[0].amount, Decimal::from(7));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_conservation() {
        let payouts = vec![
            payout("a", Decimal::new(1234, 2)),
            payout("b", Decimal::new(-317, 2)),
            payout("c", Decimal::new(566, 2)),
            payout("d", Decimal::new(-1483, 2)),
            payout("e", Decimal::new(0, 2)),
        ];
        let result = settlements(&payouts);
        let sent = sent_by(&result);
        let received = received_by(&result);

        for p in &payouts {
            let id = p.participant_id.as_str();
            if p.amount < Decimal::ZERO {
                assert_eq!(sent[id], -p.amount);
                assert!(!received.contains_key(id));
            } else if p.amount > Decimal::ZERO {
                assert_eq!(received[id], p.amount);
                assert!(!sent.contains_key(id));
            }
        }
        assert!(result.iter().all(|s| s.amount > Decimal::ZERO));
        // at most n - 1 transfers between the 4 non-zero participants
        assert!(result.len() <= 3);
    }
}
