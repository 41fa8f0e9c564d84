use crate::core::types::{CalculationResult, Participant};
use crate::report::stakes::format_amount;

pub const IDENTICAL_PREDICTIONS_NOTE: &str =
    "All payouts are zero: everyone made identical predictions";

fn display_name<'a>(participants: &'a [Participant], id: &'a str) -> &'a str {
    participants
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.name.as_str())
        .unwrap_or(id)
}

/// Plain-text payout rows and settlement instructions for one resolution.
pub fn render_results(
    result: &CalculationResult,
    participants: &[Participant],
    stakes_id: &str,
) -> Vec<String> {
    let mut lines = Vec::new();

    for score in &result.brier_scores {
        let payout = result.payout_for(&score.participant_id).unwrap_or_default();
        lines.push(format!(
            "{:<16} brier {:>6}  payout {:>12}",
            display_name(participants, &score.participant_id),
            format!("{:.4}", score.score),
            format_amount(payout, stakes_id),
        ));
    }

    if result.all_payouts_zero() {
        lines.push(IDENTICAL_PREDICTIONS_NOTE.to_string());
        return lines;
    }

    for s in &result.settlements {
        lines.push(format!(
            "{} pays {} {}",
            display_name(participants, &s.from_participant_id),
            display_name(participants, &s.to_participant_id),
            format_amount(s.amount, stakes_id),
        ));
    }

    lines
}
