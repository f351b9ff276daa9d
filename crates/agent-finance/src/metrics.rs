//! Return and risk arithmetic over price series

use crate::error::{FinanceError, Result};

/// Approximate number of trading days in a year
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to 4 decimal places
pub fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

/// Percentage change from `first` to `last`
pub fn total_return_pct(first: f64, last: f64) -> f64 {
    (last / first - 1.0) * 100.0
}

/// Compound annual growth rate, in percent, over `observations` trading days
///
/// Zero when the span is empty.
pub fn cagr_pct(first: f64, last: f64, observations: usize) -> f64 {
    let years = observations as f64 / TRADING_DAYS_PER_YEAR;
    if years > 0.0 {
        ((last / first).powf(1.0 / years) - 1.0) * 100.0
    } else {
        0.0
    }
}

/// Simple returns between consecutive closes
pub fn daily_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Sample standard deviation (N - 1 denominator)
///
/// `None` for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}

/// Annualized volatility of daily returns, in percent
///
/// Zero when there are too few returns for a sample deviation.
pub fn annualized_volatility_pct(closes: &[f64]) -> f64 {
    sample_std_dev(&daily_returns(closes))
        .map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt() * 100.0)
        .unwrap_or(0.0)
}

/// Worst peak-to-trough decline, in percent (always <= 0)
pub fn max_drawdown_pct(closes: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for &close in closes {
        peak = peak.max(close);
        worst = worst.min((close - peak) / peak);
    }
    worst * 100.0
}

/// Performance summary of a closing-price series
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceMetrics {
    pub start_price: f64,
    pub end_price: f64,
    pub total_return_pct: f64,
    pub cagr_pct: f64,
    pub volatility_pct: f64,
    pub max_drawdown_pct: f64,
    pub trading_days: usize,
}

impl PerformanceMetrics {
    /// Compute metrics from closing prices, oldest first
    ///
    /// At least two closes are required.
    pub fn from_closes(closes: &[f64]) -> Result<Self> {
        let (&first, &last) = match (closes.first(), closes.last()) {
            (Some(first), Some(last)) if closes.len() >= 2 => (first, last),
            _ => {
                return Err(FinanceError::InsufficientData(
                    "at least 2 closing prices are required".to_string(),
                ));
            }
        };

        Ok(Self {
            start_price: first,
            end_price: last,
            total_return_pct: total_return_pct(first, last),
            cagr_pct: cagr_pct(first, last, closes.len()),
            volatility_pct: annualized_volatility_pct(closes),
            max_drawdown_pct: max_drawdown_pct(closes),
            trading_days: closes.len(),
        })
    }
}

/// Outcome of compounding a principal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundGrowth {
    pub future_value: f64,
    pub total_growth: f64,
    pub total_return_pct: f64,
}

/// Compound `principal` annually at `annual_rate` for `years`
pub fn compound_growth(principal: f64, annual_rate: f64, years: f64) -> CompoundGrowth {
    let future_value = principal * (1.0 + annual_rate).powf(years);
    CompoundGrowth {
        future_value,
        total_growth: future_value - principal,
        total_return_pct: (future_value / principal - 1.0) * 100.0,
    }
}
