//! Brier-score settlement for friendly wagers: forecast editing, scoring,
//! zero-sum payouts and the transfers that settle them.

pub mod config;
pub mod core;
pub mod predictions;
pub mod report;
pub mod scenario;
pub mod scoring;

pub use crate::core::error::{EngineError, EngineResult};
pub use crate::core::types::{
    BrierScore, CalculationResult, Outcome, Participant, Payout, Prediction, Settlement, Wager,
};
pub use crate::scoring::calculate_results;
