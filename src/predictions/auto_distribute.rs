use crate::core::types::Prediction;
use rust_decimal::Decimal;
use std::borrow::Cow;
use tracing::debug;

/// Spreads what is left of 100% evenly over a participant's untouched cells.
///
/// Each untouched probability becomes `clamp(old + (100 - total) / n, 0, 100)`
/// where `total` covers all of the participant's cells and `n` the untouched
/// ones. Touched cells are never changed and nothing gets marked touched.
///
/// When the participant has no untouched cells the input is handed back as
/// `Cow::Borrowed`, so callers can skip a redundant update. The result may
/// miss 100 by a rounding residue; run normalization when an exact sum matters.
pub fn auto_distribute<'a>(
    predictions: &'a [Prediction],
    participant_id: &str,
) -> Cow<'a, [Prediction]> {
    let mut total = Decimal::ZERO;
    let mut untouched = 0usize;
    for p in predictions.iter().filter(|p| p.participant_id == participant_id) {
        total += p.probability;
        if !p.touched {
            untouched += 1;
        }
    }

    if untouched == 0 {
        return Cow::Borrowed(predictions);
    }

    // negative when over-allocated: untouched cells drain toward 0
    let remaining = Decimal::ONE_HUNDRED - total;
    let share = remaining / Decimal::from(untouched);
    debug!(participant_id, %remaining, untouched, "auto-distributing");

    Cow::Owned(
        predictions
            .iter()
            .map(|p| {
                if p.participant_id == participant_id && !p.touched {
                    Prediction {
                        probability: (p.probability + share)
                            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            })
            .collect(),
    )
}
