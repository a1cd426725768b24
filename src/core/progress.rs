use crate::domain::model::GroupBuy;
use crate::utils::error::{GroupBuyError, Result};

/// `min(100, 100 * current / target)`. A non-positive or non-finite target
/// is rejected instead of dividing by it.
pub fn progress_percent(current_amount: f64, target_amount: f64) -> Result<f64> {
    if !target_amount.is_finite() || target_amount <= 0.0 {
        return Err(GroupBuyError::validation(
            "target_amount",
            format!("progress needs a positive target, got {}", target_amount),
        ));
    }
    Ok((100.0 * current_amount / target_amount).min(100.0))
}

impl GroupBuy {
    pub fn progress_percent(&self) -> Result<f64> {
        progress_percent(self.current_amount, self.target_amount)
    }

    pub fn is_funded(&self) -> bool {
        self.target_amount > 0.0 && self.current_amount >= self.target_amount
    }
}
