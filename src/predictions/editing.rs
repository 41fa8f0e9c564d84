use crate::core::types::{Outcome, Participant, Prediction};
use crate::predictions::auto_distribute::auto_distribute;
use rust_decimal::Decimal;

/// Allowed drift from 100% before a participant's row is flagged.
pub fn sum_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Records an explicit probability and rebalances the participant's
/// untouched cells.
pub fn set_probability(
    predictions: &[Prediction],
    participant_id: &str,
    outcome_id: &str,
    probability: Decimal,
) -> Vec<Prediction> {
    let mut updated = predictions.to_vec();
    let cell = Prediction::new(participant_id, outcome_id, probability, true);

    match updated
        .iter_mut()
        .find(|p| p.participant_id == participant_id && p.outcome_id == outcome_id)
    {
        Some(existing) => *existing = cell,
        None => updated.push(cell),
    }

    auto_distribute(&updated, participant_id).into_owned()
}

pub fn participant_total(predictions: &[Prediction], participant_id: &str) -> Decimal {
    predictions
        .iter()
        .filter(|p| p.participant_id == participant_id)
        .map(|p| p.probability)
        .sum()
}

/// True when the participant's probabilities are off 100 by more than 0.01.
pub fn has_sum_warning(predictions: &[Prediction], participant_id: &str) -> bool {
    let total = participant_total(predictions, participant_id);
    (total - Decimal::ONE_HUNDRED).abs() > sum_tolerance()
}

/// Dense participant × outcome grid, ready for scoring.
///
/// Existing cells are kept, missing ones are added untouched at 0, cells of
/// removed participants or outcomes are dropped. Every participant is then
/// auto-distributed, so a new participant starts out uniform and a new
/// outcome picks up whatever share is left.
pub fn seed_predictions(
    participants: &[Participant],
    outcomes: &[Outcome],
    predictions: &[Prediction],
) -> Vec<Prediction> {
    let mut grid = Vec::with_capacity(participants.len() * outcomes.len());

    for participant in participants {
        for outcome in outcomes {
            let cell = predictions
                .iter()
                .find(|p| p.participant_id == participant.id && p.outcome_id == outcome.id)
                .cloned()
                .unwrap_or_else(|| {
                    Prediction::new(&participant.id, &outcome.id, Decimal::ZERO, false)
                });
            grid.push(cell);
        }
    }

    for participant in participants {
        grid = auto_distribute(&grid, &participant.id).into_owned();
    }

    grid
}
