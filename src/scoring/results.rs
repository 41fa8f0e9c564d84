use crate::core::error::{EngineError, EngineResult};
use crate::core::types::{CalculationResult, Outcome, Participant, Prediction};
use crate::scoring::brier::all_brier_scores;
use crate::scoring::payout::payouts;
use crate::scoring::settlement::settlements;
use tracing::info;

/// Brier scores → payouts → settlements for one resolved outcome.
///
/// Any failure aborts the whole calculation; there are no partial results.
#[tracing::instrument(
    skip_all,
    fields(
        participants = participants.len(),
        outcomes = outcomes.len(),
        resolved = %resolved_outcome_id,
    )
)]
pub fn calculate_results(
    participants: &[Participant],
    predictions: &[Prediction],
    outcomes: &[Outcome],
    resolved_outcome_id: &str,
    tiebreak_seed: &str,
) -> EngineResult<CalculationResult> {
    if !outcomes.iter().any(|o| o.id == resolved_outcome_id) {
        return Err(EngineError::UnknownOutcome {
            outcome_id: resolved_outcome_id.to_string(),
        });
    }

    let brier_scores = all_brier_scores(participants, predictions, outcomes, resolved_outcome_id)?;
    let payouts = payouts(participants, &brier_scores, tiebreak_seed)?;
    let settlements = settlements(&payouts);

    info!(settlements = settlements.len(), "results calculated");

    Ok(CalculationResult {
        brier_scores,
        payouts,
        settlements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn setup() -> (Vec<Participant>, Vec<Outcome>, Vec<Prediction>) {
        let participants = vec![
            Participant {
                id: "a".to_string(),
                name: "A".to_string(),
                max_stake: Decimal::from(50),
            },
            Participant {
                id: "b".to_string(),
                name: "B".to_string(),
                max_stake: Decimal::from(40),
            },
        ];
        let outcomes = vec![
            Outcome {
                id: "rain".to_string(),
                label: "Rain".to_string(),
            },
            Outcome {
                id: "dry".to_string(),
                label: "No Rain".to_string(),
            },
        ];
        let predictions = vec![
            Prediction::new("a", "rain", Decimal::from(70), true),
            Prediction::new("a", "dry", Decimal::from(30), true),
            Prediction::new("b", "rain", Decimal::from(40), true),
            Prediction::new("b", "dry", Decimal::from(60), true),
        ];
        (participants, outcomes, predictions)
    }

    #[test]
    fn test_rain_resolution() {
        let (participants, outcomes, predictions) = setup();
        let result =
            calculate_results(&participants, &predictions, &outcomes, "rain", "claim").unwrap();

        assert_eq!(result.score_for("a"), Some(Decimal::new(18, 2)));
        assert_eq!(result.score_for("b"), Some(Decimal::new(72, 2)));
        assert_eq!(result.payout_for("a"), Some(Decimal::new(1080, 2)));
        assert_eq!(result.payout_for("b"), Some(Decimal::new(-1080, 2)));
        assert_eq!(result.settlements.len(), 1);
        assert_eq!(result.settlements[0].from_participant_id, "b");
        assert_eq!(result.settlements[0].to_participant_id, "a");
        assert_eq!(result.settlements[0].amount, Decimal::new(1080, 2));
    }

    #[test]
    fn test_no_rain_resolution() {
        let (participants, outcomes, predictions) = setup();
        let result =
            calculate_results(&participants, &predictions, &outcomes, "dry", "claim").unwrap();

        assert_eq!(result.payout_for("a"), Some(Decimal::new(-1320, 2)));
        assert_eq!(result.payout_for("b"), Some(Decimal::new(1320, 2)));
        assert_eq!(result.settlements[0].from_participant_id, "a");
        assert_eq!(result.settlements[0].amount, Decimal::new(1320, 2));
    }

    #[test]
    fn test_missing_prediction_propagates() {
        let (participants, outcomes, mut predictions) = setup();
        predictions.pop();
        let err =
            calculate_results(&participants, &predictions, &outcomes, "rain", "claim").unwrap_err();
        assert!(matches!(err, EngineError::MissingPrediction { .. }));
    }

    #[test]
    fn test_unknown_outcome_rejected() {
        let (participants, outcomes, predictions) = setup();
        let err =
            calculate_results(&participants, &predictions, &outcomes, "snow", "claim").unwrap_err();
        assert_eq!(
            err,
            EngineError::UnknownOutcome {
                outcome_id: "snow".to_string()
            }
        );
    }
}
