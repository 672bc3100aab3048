use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal slice of a progressive tax schedule.
///
/// A bracket only stores its upper bound; the lower bound is the previous
/// bracket's `upper_limit` (zero for the first bracket).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Upper bound of the slice. `None` marks the unbounded top bracket.
    #[serde(default)]
    pub upper_limit: Option<Decimal>,

    /// Marginal rate as a fraction (e.g. `0.05` for 5%).
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_limit: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_limit: Some(upper_limit),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_limit: None,
            rate,
        }
    }
}
