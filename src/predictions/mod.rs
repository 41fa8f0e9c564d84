pub mod auto_distribute;
pub mod editing;
pub mod normalize;
pub mod validation;

pub use auto_distribute::auto_distribute;
pub use editing::{has_sum_warning, participant_total, seed_predictions, set_probability};
pub use normalize::{Normalization, normalize};
pub use validation::{
    ValidationIssue, check_extreme_probabilities, check_wager, extreme_warnings,
    scale_probabilities_percent,
};
