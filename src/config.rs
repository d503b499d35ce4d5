//! Engine configuration
//!
//! All defaults are passed explicitly into the engine's entry points; nothing
//! in this crate reads ambient or global state.

use serde::{Deserialize, Serialize};

use crate::strategy::Strategy;

/// Maximum simulation horizon when none is configured: 600 months (50 years).
/// A portfolio still carrying balance at the horizon is reported as
/// non-convergent rather than simulated further.
pub const DEFAULT_HORIZON_MONTHS: u32 = 600;

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of months to simulate before flagging non-convergence
    pub horizon_months: u32,

    /// Annual rate (percent) substituted for records with no rate supplied
    pub default_annual_rate_pct: f64,

    /// Strategy used when the caller does not name one
    pub default_strategy: Strategy,

    /// Currency symbol for display layers; the engine itself never formats
    pub currency_symbol: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_months: DEFAULT_HORIZON_MONTHS,
            default_annual_rate_pct: 0.0,
            default_strategy: Strategy::Avalanche,
            currency_symbol: "$".to_string(),
        }
    }
}
