use crate::core::types::{Outcome, Participant, Prediction};
use crate::predictions::editing::sum_tolerance;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A reason the engine's precondition does not hold for a wager.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ValidationIssue {
    #[serde(rename_all = "camelCase")]
    MissingPrediction {
        participant_id: String,
        outcome_id: String,
    },
    #[serde(rename_all = "camelCase")]
    OutOfRange {
        participant_id: String,
        outcome_id: String,
        probability: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    BadSum {
        participant_id: String,
        total: Decimal,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingPrediction {
                participant_id,
                outcome_id,
            } => write!(f, "{participant_id} has no prediction for {outcome_id}"),
            ValidationIssue::OutOfRange {
                participant_id,
                outcome_id,
                probability,
            } => write!(
                f,
                "{participant_id} predicts {probability}% for {outcome_id}, outside 0-100"
            ),
            ValidationIssue::BadSum {
                participant_id,
                total,
            } => write!(f, "{participant_id}'s probabilities sum to {total}%, not 100%"),
        }
    }
}

pub fn validate_probability_sum(probabilities: &[Decimal], tolerance: Decimal) -> bool {
    let sum: Decimal = probabilities.iter().sum();
    (sum - Decimal::ONE_HUNDRED).abs() <= tolerance
}

pub fn validate_probability_range(probability: Decimal) -> bool {
    (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&probability)
}

/// Warnings for near-certain forecasts, which expose the forecaster to the
/// largest Brier penalties. Categories are numbered from 1.
pub fn check_extreme_probabilities(probabilities: &[Decimal], threshold: Decimal) -> Vec<String> {
    let mut warnings = Vec::new();
    for (i, prob) in probabilities.iter().enumerate() {
        if *prob < threshold {
            warnings.push(format!(
                "Category {} has very low probability ({}%) - this may result in large payouts",
                i + 1,
                prob
            ));
        }
        if *prob > Decimal::ONE_HUNDRED - threshold {
            warnings.push(format!(
                "Category {} has very high probability ({}%) - this may result in large payouts",
                i + 1,
                prob
            ));
        }
    }
    warnings
}

/// Extreme-probability warnings for every participant's full row, prefixed
/// with the participant's name. Incomplete rows are skipped.
pub fn extreme_warnings(
    participants: &[Participant],
    outcomes: &[Outcome],
    predictions: &[Prediction],
    threshold: Decimal,
) -> Vec<String> {
    let mut warnings = Vec::new();
    for participant in participants {
        let row: Option<Vec<Decimal>> = outcomes
            .iter()
            .map(|o| {
                predictions
                    .iter()
                    .find(|p| p.participant_id == participant.id && p.outcome_id == o.id)
                    .map(|p| p.probability)
            })
            .collect();
        let Some(row) = row else { continue };
        for w in check_extreme_probabilities(&row, threshold) {
            warnings.push(format!("{}: {w}", participant.name));
        }
    }
    warnings
}

/// Plain proportional rescale to 100, kept exact for terminating splits.
/// Library helper for callers holding raw weights rather than percentages.
/// `None` when there is nothing to scale.
pub fn scale_probabilities_percent(probabilities: &[Decimal]) -> Option<Vec<Decimal>> {
    let sum: Decimal = probabilities.iter().sum();
    if sum.is_zero() {
        return None;
    }
    Some(
        probabilities
            .iter()
            .map(|p| *p * Decimal::ONE_HUNDRED / sum)
            .collect(),
    )
}

/// Everything that would stop `calculate_results` or make it meaningless.
/// Empty means every participant has a full row in range summing to 100.
pub fn check_wager(
    participants: &[Participant],
    outcomes: &[Outcome],
    predictions: &[Prediction],
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for participant in participants {
        let mut row = Vec::with_capacity(outcomes.len());
        let mut complete = true;

        for outcome in outcomes {
            let Some(cell) = predictions
                .iter()
                .find(|p| p.participant_id == participant.id && p.outcome_id == outcome.id)
            else {
                complete = false;
                issues.push(ValidationIssue::MissingPrediction {
                    participant_id: participant.id.clone(),
                    outcome_id: outcome.id.clone(),
                });
                continue;
            };

            if !validate_probability_range(cell.probability) {
                issues.push(ValidationIssue::OutOfRange {
                    participant_id: participant.id.clone(),
                    outcome_id: outcome.id.clone(),
                    probability: cell.probability,
                });
            }
            row.push(cell.probability);
        }

        if complete && !validate_probability_sum(&row, sum_tolerance()) {
            issues.push(ValidationIssue::BadSum {
                participant_id: participant.id.clone(),
                total: row.iter().sum(),
            });
        }
    }

    issues
}
