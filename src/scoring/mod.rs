pub mod brier;
pub mod payout;
pub mod prng;
pub mod results;
pub mod settlement;

pub use brier::{all_brier_scores, brier_score};
pub use payout::{amount_in_play, avg_others_brier, payouts};
pub use prng::SeededPrng;
pub use results::calculate_results;
pub use settlement::settlements;
