use crate::core::error::{EngineError, EngineResult};
use crate::core::types::{BrierScore, Participant, Payout};
use crate::scoring::prng::SeededPrng;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Payouts are settled in currency minor units.
const PAYOUT_DP: u32 = 2;

/// Below this the rounded payouts already sum to zero (half a minor unit).
fn zero_sum_threshold() -> Decimal {
    Decimal::new(5, 3)
}

/// Minimum of all max stakes; bounds every payout's magnitude.
pub fn amount_in_play(participants: &[Participant]) -> EngineResult<Decimal> {
    if participants.len() < 2 {
        return Err(EngineError::InsufficientParticipants {
            count: participants.len(),
        });
    }
    participants
        .iter()
        .map(|p| p.max_stake)
        .min()
        .ok_or(EngineError::InsufficientParticipants { count: 0 })
}

/// Mean Brier score of everybody except `participant_id`.
pub fn avg_others_brier(
    participant_id: &str,
    brier_scores: &[BrierScore],
) -> EngineResult<Decimal> {
    let others: Vec<Decimal> = brier_scores
        .iter()
        .filter(|bs| bs.participant_id != participant_id)
        .map(|bs| bs.score)
        .collect();

    if others.is_empty() {
        return Err(EngineError::InsufficientParticipants {
            count: brier_scores.len(),
        });
    }

    let sum: Decimal = others.iter().sum();
    Ok(sum / Decimal::from(others.len()))
}

/// Zero-sum payouts from relative Brier scores.
///
/// Payout = amount_in_play × (avg_others_brier − own_brier) / 2
///
/// Scores live in [0, 2], so no payout exceeds the amount in play. Results are
/// rounded to cents and corrected so they sum to exactly zero; `tiebreak_seed`
/// (the wager's claim text) makes the correction target reproducible.
pub fn payouts(
    participants: &[Participant],
    brier_scores: &[BrierScore],
    tiebreak_seed: &str,
) -> EngineResult<Vec<Payout>> {
    let amount = amount_in_play(participants)?;
    debug!(%amount, participants = participants.len(), "amount in play");

    // every score must be present before any average is taken
    let own_scores = participants
        .iter()
        .map(|participant| {
            brier_scores
                .iter()
                .find(|bs| bs.participant_id == participant.id)
                .map(|bs| bs.score)
                .ok_or_else(|| EngineError::MissingScore {
                    participant_id: participant.id.clone(),
                })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let raw = participants
        .iter()
        .zip(own_scores)
        .map(|(participant, own)| {
            let avg_others = avg_others_brier(&participant.id, brier_scores)?;
            Ok(Payout {
                participant_id: participant.id.clone(),
                amount: (avg_others - own) / Decimal::TWO * amount,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(round_payouts_to_zero_sum(raw, tiebreak_seed))
}

/// Rounds half-up to cents, then pushes any leftover onto the largest payout.
///
/// Ties for the largest magnitude are broken with a PRNG seeded from `seed`:
/// scanning in order, each later equal candidate takes over on a draw < 0.5.
pub fn round_payouts_to_zero_sum(payouts: Vec<Payout>, seed: &str) -> Vec<Payout> {
    let mut rounded: Vec<Payout> = payouts
        .into_iter()
        .map(|p| Payout {
            participant_id: p.participant_id,
            amount: p
                .amount
                .round_dp_with_strategy(PAYOUT_DP, RoundingStrategy::MidpointAwayFromZero),
        })
        .collect();

    let sum: Decimal = rounded.iter().map(|p| p.amount).sum();
    if sum.abs() < zero_sum_threshold() || rounded.is_empty() {
        return rounded;
    }

    let mut prng = SeededPrng::new(seed);
    let mut max_idx = 0;
    let mut max_abs = rounded[0].amount.abs();

    for (i, payout) in rounded.iter().enumerate().skip(1) {
        let abs = payout.amount.abs();
        if abs > max_abs {
            max_abs = abs;
            max_idx = i;
        } else if abs == max_abs && prng.next_f64() < 0.5 {
            max_idx = i;
        }
    }

    let adjustment = -sum;
    debug!(
        participant = %rounded[max_idx].participant_id,
        %adjustment,
        "zero-sum rounding correction"
    );
    rounded[max_idx].amount += adjustment;

    rounded
}
