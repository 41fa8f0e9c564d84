use crate::core::error::{EngineError, EngineResult};
use crate::core::types::{BrierScore, Outcome, Participant, Prediction};
use rust_decimal::Decimal;

/// Single-instance Brier score of one participant's forecast.
///
/// BS = Σ_i (f_i - o_i)², with f_i the predicted probability as a fraction and
/// o_i = 1 for the resolved outcome, 0 otherwise. N = 1, so there is no
/// averaging over instances. Range is [0, 2].
///
/// Every outcome needs a prediction entry; a missing one is an upstream bug,
/// not an implicit zero.
pub fn brier_score(
    predictions: &[Prediction],
    resolved_outcome_id: &str,
    outcomes: &[Outcome],
) -> EngineResult<Decimal> {
    let hundred = Decimal::ONE_HUNDRED;
    let mut sum_squared_errors = Decimal::ZERO;

    for outcome in outcomes {
        let prediction = predictions
            .iter()
            .find(|p| p.outcome_id == outcome.id)
            .ok_or_else(|| EngineError::MissingPrediction {
                participant_id: predictions
                    .first()
                    .map(|p| p.participant_id.clone())
                    .unwrap_or_default(),
                outcome_id: outcome.id.clone(),
            })?;

        let actual = if outcome.id == resolved_outcome_id {
            Decimal::ONE
        } else {
            Decimal::ZERO
        };

        let error = prediction.probability / hundred - actual;
        sum_squared_errors += error * error;
    }

    Ok(sum_squared_errors)
}

/// Brier scores for every participant, in participant order.
pub fn all_brier_scores(
    participants: &[Participant],
    predictions: &[Prediction],
    outcomes: &[Outcome],
    resolved_outcome_id: &str,
) -> EngineResult<Vec<BrierScore>> {
    participants
        .iter()
        .map(|participant| {
            let own: Vec<Prediction> = predictions
                .iter()
                .filter(|p| p.participant_id == participant.id)
                .cloned()
                .collect();

            let score = brier_score(&own, resolved_outcome_id, outcomes).map_err(|e| match e {
                // the filtered slice may be empty, so name the participant explicitly
                EngineError::MissingPrediction { outcome_id, .. } => {
                    EngineError::MissingPrediction {
                        participant_id: participant.id.clone(),
                        outcome_id,
                    }
                }
                other => other,
            })?;

            Ok(BrierScore {
                participant_id: participant.id.clone(),
                score,
            })
        })
        .collect()
}
