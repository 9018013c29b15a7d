//! Winnings = round(bet * multiplier). Invalid input never propagates NaN or
//! infinity: a bad bet pays 0, a bad multiplier or product pays the bet back.

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PayoutError {
    #[error("invalid bet: {0}")]
    InvalidBet(f64),

    #[error("invalid multiplier {multiplier} for bet {bet}")]
    InvalidMultiplier { bet: f64, multiplier: f64 },

    #[error("invalid winnings {winnings} for bet {bet}")]
    InvalidWinnings { bet: f64, winnings: f64 },
}

impl PayoutError {
    /// What [compute_winnings] pays out when this error occurs.
    pub fn fallback(&self) -> u64 {
        match *self {
            Self::InvalidBet(_) => 0,
            Self::InvalidMultiplier { bet, .. } | Self::InvalidWinnings { bet, .. } => to_points(bet),
        }
    }
}

/// Strict form: rejects anything [compute_winnings] would fall back on.
pub fn try_compute_winnings(bet: f64, multiplier: f64) -> Result<u64, PayoutError> {
    if !bet.is_finite() || bet < 0.0 {
        return Err(PayoutError::InvalidBet(bet));
    }
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(PayoutError::InvalidMultiplier { bet, multiplier });
    }
    let winnings = (bet * multiplier).round();
    if !winnings.is_finite() || winnings < 0.0 || winnings >= u64::MAX as f64 {
        return Err(PayoutError::InvalidWinnings { bet, winnings });
    }
    Ok(winnings as u64)
}

/// Never fails. Anomalies are logged and answered with a safe payout:
/// 0 for an invalid bet, the original bet for an invalid multiplier or product.
pub fn compute_winnings(bet: f64, multiplier: f64) -> u64 {
    match try_compute_winnings(bet, multiplier) {
        Ok(winnings) => winnings,
        Err(err) => {
            let fallback = err.fallback();
            log::warn!("payout anomaly: {err}, paying {fallback}");
            fallback
        }
    }
}

fn to_points(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u64::MAX as f64) as u64
    } else {
        0
    }
}
