use serde::{Deserialize, Serialize};

use crate::core_types::units::Inches;

/// Configuration for the near-limit cautions
///
/// `Default` gives the standard planning margins. Tighter club or operator
/// margins can be passed to [`calculate_with_thresholds`](super::calculate_with_thresholds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WarningThresholds {
    /// `NEAR_MAX_GROSS` fires when the remaining margin is below this fraction of max gross
    pub near_gross_fraction: f64,
    /// `CG_NEAR_LIMIT` fires when the CG is closer than this to either limit
    pub cg_near_limit: Inches,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            near_gross_fraction: 0.05,
            cg_near_limit: Inches::new(1.0),
        }
    }
}
