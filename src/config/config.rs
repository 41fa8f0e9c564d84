use crate::core::types::{Outcome, Wager};
use crate::predictions::validation::validate_probability_range;
use anyhow::{Context, Result};
use config::{Config, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;

pub const MIN_PARTICIPANTS: usize = 2;
pub const MAX_PARTICIPANTS: usize = 8;
pub const MIN_OUTCOMES: usize = 2;
pub const MAX_OUTCOMES: usize = 8;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppCfg {
    pub wager: Wager,
    #[serde(default)]
    pub report: ReportCfg,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportCfg {
    #[serde(default = "default_stakes")]
    pub stakes: String,
    // config lowercases table keys
    #[serde(
        rename = "allOutcomes",
        alias = "alloutcomes",
        default = "default_all_outcomes"
    )]
    pub all_outcomes: bool,
    #[serde(default)]
    pub json: bool,
    #[serde(
        rename = "extremeThreshold",
        alias = "extremethreshold",
        default = "default_extreme_threshold"
    )]
    pub extreme_threshold: Decimal,
}

impl Default for ReportCfg {
    fn default() -> Self {
        Self {
            stakes: default_stakes(),
            all_outcomes: default_all_outcomes(),
            json: false,
            extreme_threshold: default_extreme_threshold(),
        }
    }
}
fn default_stakes() -> String {
    "usd".into()
}
fn default_all_outcomes() -> bool {
    true
}
fn default_extreme_threshold() -> Decimal {
    Decimal::from(5)
}

impl ReportCfg {
    /// Every outcome with `all_outcomes`, otherwise only the resolved one
    /// (none while the wager is open).
    pub fn outcomes_to_settle<'a>(&self, wager: &'a Wager) -> Vec<&'a Outcome> {
        if self.all_outcomes {
            return wager.outcomes.iter().collect();
        }
        let resolved = wager.resolved_outcome_id.as_deref();
        wager
            .outcomes
            .iter()
            .filter(|o| Some(o.id.as_str()) == resolved)
            .collect()
    }
}

impl AppCfg {
    pub fn load(path: &str) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::with_name(path))
            .add_source(config::Environment::default().separator("__"))
            .build()
            .context("building config")?;

        Self::from_config(cfg)
    }

    pub fn from_config(cfg: Config) -> Result<Self> {
        let app: AppCfg = cfg.try_deserialize().context("deserializing config")?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        let w = &self.wager;

        anyhow::ensure!(
            (MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&w.participants.len()),
            "wager.participants must have {MIN_PARTICIPANTS}-{MAX_PARTICIPANTS} entries, got {}",
            w.participants.len()
        );
        anyhow::ensure!(
            (MIN_OUTCOMES..=MAX_OUTCOMES).contains(&w.outcomes.len()),
            "wager.outcomes must have {MIN_OUTCOMES}-{MAX_OUTCOMES} entries, got {}",
            w.outcomes.len()
        );

        let mut participant_ids = HashSet::new();
        for p in &w.participants {
            anyhow::ensure!(
                participant_ids.insert(p.id.as_str()),
                "duplicate participant id {}",
                p.id
            );
            anyhow::ensure!(
                p.max_stake >= Decimal::ZERO,
                "participant {} has negative maxStake",
                p.id
            );
        }

        let mut outcome_ids = HashSet::new();
        for o in &w.outcomes {
            anyhow::ensure!(
                outcome_ids.insert(o.id.as_str()),
                "duplicate outcome id {}",
                o.id
            );
        }

        for p in &w.predictions {
            anyhow::ensure!(
                participant_ids.contains(p.participant_id.as_str()),
                "prediction references unknown participant {}",
                p.participant_id
            );
            anyhow::ensure!(
                outcome_ids.contains(p.outcome_id.as_str()),
                "prediction references unknown outcome {}",
                p.outcome_id
            );
            anyhow::ensure!(
                validate_probability_range(p.probability),
                "probability {} for {}/{} is outside 0-100",
                p.probability,
                p.participant_id,
                p.outcome_id
            );
        }

        anyhow::ensure!(
            validate_probability_range(self.report.extreme_threshold),
            "report.extremeThreshold must be within 0-100"
        );

        if let Some(resolved) = &w.resolved_outcome_id {
            anyhow::ensure!(
                outcome_ids.contains(resolved.as_str()),
                "wager.resolvedOutcomeId {resolved} is not a known outcome"
            );
        }

        Ok(())
    }
}
