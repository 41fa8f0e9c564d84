use crate::core::error::{EngineError, EngineResult};
use crate::core::types::{Outcome, Participant, Prediction, Settlement};
use crate::scoring::payout::amount_in_play;
use crate::scoring::results::calculate_results;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const SCORE_DISPLAY_DP: u32 = 4;

/// Name-keyed wager description: each player's forecast is a vector of
/// fractions aligned with `categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub categories: Vec<String>,
    pub players: BTreeMap<String, Player>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub max_bet: Decimal,
    pub predictions: Vec<Decimal>, // fractions, sum to 1
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeReport {
    pub category: String,
    pub brier_scores: BTreeMap<String, Decimal>,
    pub avg_brier_others: BTreeMap<String, Decimal>,
    pub payouts: BTreeMap<String, Decimal>,
    pub settlements: Vec<Settlement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub amount_in_play: Decimal,
    pub outcomes: Vec<OutcomeReport>,
}

impl ScenarioReport {
    pub fn outcome(&self, category: &str) -> Option<&OutcomeReport> {
        self.outcomes.iter().find(|o| o.category == category)
    }
}

fn display_score(score: Decimal) -> Decimal {
    score.round_dp_with_strategy(SCORE_DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

fn outcome_id(index: usize) -> String {
    format!("category-{index}")
}

/// Mean score of every player except `player`, over a name-keyed score table.
pub fn avg_brier_others_for(
    scores: &BTreeMap<String, Decimal>,
    player: &str,
) -> EngineResult<Decimal> {
    if !scores.contains_key(player) {
        return Err(EngineError::MissingScore {
            participant_id: player.to_string(),
        });
    }
    let others: Vec<Decimal> = scores
        .iter()
        .filter(|(name, _)| name.as_str() != player)
        .map(|(_, score)| *score)
        .collect();
    if others.is_empty() {
        return Err(EngineError::InsufficientParticipants {
            count: scores.len(),
        });
    }
    Ok(others.iter().sum::<Decimal>() / Decimal::from(others.len()))
}

/// Runs the canonical engine once per category, as if each one had occurred.
///
/// Players are keyed and processed by name in sorted order. Scores and
/// averages are rounded to 4 places for display; payouts and settlements
/// come straight from the engine.
pub fn process_scenario(scenario: &Scenario, tiebreak_seed: &str) -> EngineResult<ScenarioReport> {
    let outcomes: Vec<Outcome> = scenario
        .categories
        .iter()
        .enumerate()
        .map(|(i, label)| Outcome {
            id: outcome_id(i),
            label: label.clone(),
        })
        .collect();

    let mut participants = Vec::with_capacity(scenario.players.len());
    let mut predictions = Vec::with_capacity(scenario.players.len() * outcomes.len());

    for (name, player) in &scenario.players {
        if player.predictions.len() != outcomes.len() {
            return Err(EngineError::InvalidScenario(format!(
                "{name} has {} predictions for {} categories",
                player.predictions.len(),
                outcomes.len()
            )));
        }

        participants.push(Participant {
            id: name.clone(),
            name: name.clone(),
            max_stake: player.max_bet,
        });
        for (outcome, fraction) in outcomes.iter().zip(&player.predictions) {
            predictions.push(Prediction::new(
                name,
                &outcome.id,
                *fraction * Decimal::ONE_HUNDRED,
                true,
            ));
        }
    }

    let amount = amount_in_play(&participants)?;
    let mut reports = Vec::with_capacity(outcomes.len());

    for outcome in &outcomes {
        let result =
            calculate_results(&participants, &predictions, &outcomes, &outcome.id, tiebreak_seed)?;

        let exact: BTreeMap<String, Decimal> = result
            .brier_scores
            .iter()
            .map(|bs| (bs.participant_id.clone(), bs.score))
            .collect();
        let mut avg_brier_others = BTreeMap::new();
        for name in exact.keys() {
            let avg = avg_brier_others_for(&exact, name)?;
            avg_brier_others.insert(name.clone(), display_score(avg));
        }

        reports.push(OutcomeReport {
            category: outcome.label.clone(),
            brier_scores: exact
                .iter()
                .map(|(name, score)| (name.clone(), display_score(*score)))
                .collect(),
            avg_brier_others,
            payouts: result
                .payouts
                .iter()
                .map(|p| (p.participant_id.clone(), p.amount))
                .collect(),
            settlements: result.settlements,
        });
    }

    Ok(ScenarioReport {
        amount_in_play: amount,
        outcomes: reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_json() -> &'static str {
        r#"{
            "categories": ["Rain", "No Rain"],
            "players": {
                "bob": { "max_bet": 40, "predictions": ["0.4", "0.6"] },
                "alice": { "max_bet": 50, "predictions": ["0.7", "0.3"] }
            }
        }"#
    }

    #[test]
    fn test_binary_scenario_report() {
        let scenario: Scenario = serde_json::from_str(scenario_json()).unwrap();
        let report = process_scenario(&scenario, "rain?").unwrap();

        assert_eq!(report.amount_in_play, Decimal::from(40));
        assert_eq!(report.outcomes.len(), 2);

        let rain = report.outcome("Rain").unwrap();
        assert_eq!(rain.brier_scores["alice"], Decimal::new(18, 2));
        assert_eq!(rain.brier_scores["bob"], Decimal::new(72, 2));
        assert_eq!(rain.avg_brier_others["alice"], Decimal::new(72, 2));
        assert_eq!(rain.payouts["alice"], Decimal::new(1080, 2));
        assert_eq!(rain.settlements.len(), 1);
        assert_eq!(rain.settlements[0].from_participant_id, "bob");

        let dry = report.outcome("No Rain").unwrap();
        assert_eq!(dry.payouts["bob"], Decimal::new(1320, 2));
        assert_eq!(dry.payouts["alice"], Decimal::new(-1320, 2));
    }

    #[test]
    fn test_scores_rounded_for_display() {
        let mut players = BTreeMap::new();
        players.insert(
            "a".to_string(),
            Player {
                max_bet: Decimal::from(10),
                predictions: vec![Decimal::new(1, 0) / Decimal::from(3); 3],
            },
        );
        players.insert(
            "b".to_string(),
            Player {
                max_bet: Decimal::from(10),
                predictions: vec![Decimal::new(5, 1), Decimal::new(25, 2), Decimal::new(25, 2)],
            },
        );
        let scenario = Scenario {
            categories: vec!["x".into(), "y".into(), "z".into()],
            players,
        };

        let report = process_scenario(&scenario, "").unwrap();
        let x = report.outcome("x").unwrap();
        // (1/3 - 1)² + 2 × (1/3)² = 2/3
        assert_eq!(x.brier_scores["a"], Decimal::new(6667, 4));
        assert_eq!(x.brier_scores["b"], Decimal::new(375, 3));
        for o in &report.outcomes {
            assert_eq!(o.payouts.values().copied().sum::<Decimal>(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_avg_brier_others_for() {
        let scores: BTreeMap<String, Decimal> = [
            ("a".to_string(), Decimal::new(2, 1)),
            ("b".to_string(), Decimal::new(4, 1)),
            ("c".to_string(), Decimal::new(8, 1)),
        ]
        .into_iter()
        .collect();

        assert_eq!(avg_brier_others_for(&scores, "a").unwrap(), Decimal::new(6, 1));
        assert!(matches!(
            avg_brier_others_for(&scores, "zed"),
            Err(EngineError::MissingScore { .. })
        ));
    }

    #[test]
    fn test_mismatched_prediction_length() {
        let mut scenario: Scenario = serde_json::from_str(scenario_json()).unwrap();
        scenario.categories.push("Snow".to_string());
        assert!(matches!(
            process_scenario(&scenario, ""),
            Err(EngineError::InvalidScenario(_))
        ));
    }

    #[test]
    fn test_single_player_scenario_rejected() {
        let mut scenario: Scenario = serde_json::from_str(scenario_json()).unwrap();
        scenario.players.remove("bob");
        assert_eq!(
            process_scenario(&scenario, ""),
            Err(EngineError::InsufficientParticipants { count: 1 })
        );
    }
}
