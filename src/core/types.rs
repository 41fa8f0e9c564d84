use crate::core::error::EngineResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ----------- Wager inputs -----------------
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    /// Upper bound on what this participant can lose.
    pub max_stake: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub participant_id: String,
    pub outcome_id: String,
    pub probability: Decimal, // percent, 0..=100
    #[serde(default = "default_touched")]
    pub touched: bool, // explicit user input vs auto-filled
}

fn default_touched() -> bool {
    true
}

impl Prediction {
    pub fn new(
        participant_id: &str,
        outcome_id: &str,
        probability: Decimal,
        touched: bool,
    ) -> Self {
        Self {
            participant_id: participant_id.to_string(),
            outcome_id: outcome_id.to_string(),
            probability,
            touched,
        }
    }
}

// ----------- Derived values -----------------
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrierScore {
    pub participant_id: String,
    pub score: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub participant_id: String,
    pub amount: Decimal, // > 0 receives, < 0 pays
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub from_participant_id: String,
    pub to_participant_id: String,
    pub amount: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub brier_scores: Vec<BrierScore>,
    pub payouts: Vec<Payout>,
    pub settlements: Vec<Settlement>,
}

impl CalculationResult {
    /// Everyone scored the same, so nobody pays anybody. Presentation shows
    /// an explanation instead of an empty settlement list.
    pub fn all_payouts_zero(&self) -> bool {
        self.payouts.iter().all(|p| p.amount.is_zero())
    }

    pub fn payout_for(&self, participant_id: &str) -> Option<Decimal> {
        self.payouts
            .iter()
            .find(|p| p.participant_id == participant_id)
            .map(|p| p.amount)
    }

    pub fn score_for(&self, participant_id: &str) -> Option<Decimal> {
        self.brier_scores
            .iter()
            .find(|s| s.participant_id == participant_id)
            .map(|s| s.score)
    }
}

// ----------- Aggregate -----------------
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wager {
    pub claim: String,
    #[serde(default)]
    pub details: String,
    #[serde(default)]
    pub stakes: String,
    pub participants: Vec<Participant>,
    pub outcomes: Vec<Outcome>,
    pub predictions: Vec<Prediction>,
    // config lowercases table keys
    #[serde(default, alias = "resolvedoutcomeid")]
    pub resolved_outcome_id: Option<String>,
}

impl Wager {
    /// Minimum of all max stakes; errors below two participants.
    pub fn amount_in_play(&self) -> EngineResult<Decimal> {
        crate::scoring::payout::amount_in_play(&self.participants)
    }

    /// Results for the resolved outcome, `Ok(None)` while the wager is open.
    /// The claim seeds the rounding tie-break so recomputation is stable.
    pub fn results(&self) -> EngineResult<Option<CalculationResult>> {
        let Some(resolved) = self.resolved_outcome_id.as_deref() else {
            return Ok(None);
        };
        self.results_for(resolved).map(Some)
    }

    /// Results as if `outcome_id` had occurred, regardless of the current resolution.
    pub fn results_for(&self, outcome_id: &str) -> EngineResult<CalculationResult> {
        crate::scoring::results::calculate_results(
            &self.participants,
            &self.predictions,
            &self.outcomes,
            outcome_id,
            &self.claim,
        )
    }
}
