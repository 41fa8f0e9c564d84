//! Name-keyed "what if each category occurs" tables over the canonical engine.

pub mod table;

pub use table::{
    OutcomeReport, Player, Scenario, ScenarioReport, avg_brier_others_for, process_scenario,
};
