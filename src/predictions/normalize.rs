use crate::core::types::{Outcome, Prediction};
use rust_decimal::Decimal;
use std::collections::HashSet;

/// What a normalization request did.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalization {
    /// Full prediction list with the participant's cells rescaled to 100.
    Scaled(Vec<Prediction>),
    /// Probabilities sum to zero, nothing to scale from. Input left as is.
    ZeroSumScale,
}

fn residual_tolerance() -> Decimal {
    Decimal::new(1, 3)
}

fn nudge() -> Decimal {
    Decimal::new(1, 2)
}

/// Rescales one participant's cells (for the current outcomes) to sum to 100.
///
/// Every value becomes `value × 100 / total`, so terminating splits stay
/// exact. A leftover residual above 0.001 is paid out in ±0.01 steps to the
/// earliest cells in data order.
/// Cells for outcomes no longer in `outcomes` are ignored.
pub fn normalize(
    predictions: &[Prediction],
    participant_id: &str,
    outcomes: &[Outcome],
) -> Normalization {
    let valid: HashSet<&str> = outcomes.iter().map(|o| o.id.as_str()).collect();
    let in_scope = |p: &Prediction| {
        p.participant_id == participant_id && valid.contains(p.outcome_id.as_str())
    };

    let total: Decimal = predictions
        .iter()
        .filter(|p| in_scope(*p))
        .map(|p| p.probability)
        .sum();

    if total.is_zero() {
        return Normalization::ZeroSumScale;
    }

    let mut out = predictions.to_vec();
    let mut scaled_idx = Vec::new();
    let mut scaled_total = Decimal::ZERO;

    for (i, p) in out.iter_mut().enumerate() {
        if in_scope(p) {
            p.probability = p.probability * Decimal::ONE_HUNDRED / total;
            scaled_total += p.probability;
            scaled_idx.push(i);
        }
    }

    let residual = Decimal::ONE_HUNDRED - scaled_total;
    if residual.abs() > residual_tolerance() {
        let step = if residual > Decimal::ZERO { nudge() } else { -nudge() };
        let mut left = residual.abs();
        for &i in &scaled_idx {
            if left <= residual_tolerance() {
                break;
            }
            out[i].probability += step;
            left -= nudge();
        }
    }

    Normalization::Scaled(out)
}
