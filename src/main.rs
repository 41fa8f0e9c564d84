use anyhow::Result;
use brier_settle::config::config::AppCfg;
use brier_settle::core::types::{Outcome, Wager};
use brier_settle::predictions::{check_wager, extreme_warnings, seed_predictions};
use brier_settle::report::render::render_results;
use serde_json::json;
use tracing::{error, info, info_span, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "wager.yml";
const UNAVAILABLE: &str = "calculation unavailable";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    dotenv::dotenv().ok();

    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let cfg = AppCfg::load(&path)?;

    let span = info_span!(
        "Runner",
        pid = %std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        config = %path,
    );
    let _enter = span.enter();

    let mut wager = cfg.wager;
    wager.predictions = seed_predictions(&wager.participants, &wager.outcomes, &wager.predictions);

    for issue in check_wager(&wager.participants, &wager.outcomes, &wager.predictions) {
        warn!(%issue, "wager not ready for scoring");
    }
    let extremes = extreme_warnings(
        &wager.participants,
        &wager.outcomes,
        &wager.predictions,
        cfg.report.extreme_threshold,
    );
    for warning in extremes {
        warn!(%warning, "extreme forecast");
    }

    let stakes = if wager.stakes.is_empty() {
        cfg.report.stakes.clone()
    } else {
        wager.stakes.clone()
    };

    let targets = cfg.report.outcomes_to_settle(&wager);

    if targets.is_empty() {
        info!("wager is still open, nothing to settle");
        return Ok(());
    }

    info!(claim = %wager.claim, outcomes = targets.len(), "settling");

    if cfg.report.json {
        let reports: Vec<_> = targets.iter().map(|o| outcome_json(&wager, o)).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for outcome in targets {
        println!("== if {} ==", outcome.label);
        match wager.results_for(&outcome.id) {
            Ok(result) => {
                for line in render_results(&result, &wager.participants, &stakes) {
                    println!("{line}");
                }
            }
            Err(e) => {
                error!(outcome = %outcome.id, error = %e, "calculation failed");
                println!("{UNAVAILABLE}");
            }
        }
        println!();
    }

    Ok(())
}

fn outcome_json(wager: &Wager, outcome: &Outcome) -> serde_json::Value {
    match wager.results_for(&outcome.id) {
        Ok(result) => json!({ "outcomeId": outcome.id, "result": result }),
        Err(e) => {
            error!(outcome = %outcome.id, error = %e, "calculation failed");
            json!({ "outcomeId": outcome.id, "error": UNAVAILABLE })
        }
    }
}
