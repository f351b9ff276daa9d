//! Financial ratio knowledge base

/// Ratio types with a known interpretation
///
/// Unknown tags map to [`RatioKind::Generic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioKind {
    Pe,
    DebtToEquity,
    Current,
    Roe,
    Generic,
}

impl RatioKind {
    /// Look up a ratio tag, case-insensitively
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "pe" => RatioKind::Pe,
            "debt_to_equity" => RatioKind::DebtToEquity,
            "current" => RatioKind::Current,
            "roe" => RatioKind::Roe,
            _ => RatioKind::Generic,
        }
    }

    /// Canonical tag
    pub fn tag(&self) -> &'static str {
        match self {
            RatioKind::Pe => "pe",
            RatioKind::DebtToEquity => "debt_to_equity",
            RatioKind::Current => "current",
            RatioKind::Roe => "roe",
            RatioKind::Generic => "generic",
        }
    }

    /// Display name
    pub fn description(&self) -> &'static str {
        match self {
            RatioKind::Pe => "Price-to-Earnings Ratio",
            RatioKind::DebtToEquity => "Debt-to-Equity Ratio",
            RatioKind::Current => "Current Ratio",
            RatioKind::Roe => "Return on Equity",
            RatioKind::Generic => "Financial Ratio",
        }
    }

    /// Threshold label for a ratio value; every threshold is exclusive
    pub fn context(&self, value: f64) -> &'static str {
        match self {
            RatioKind::Pe if value > 25.0 => "High",
            RatioKind::Pe if value > 15.0 => "Moderate",
            RatioKind::Pe => "Low",
            RatioKind::DebtToEquity if value > 1.0 => "High leverage",
            RatioKind::DebtToEquity => "Conservative",
            RatioKind::Current if value > 1.5 => "Good liquidity",
            RatioKind::Current => "Potential concern",
            RatioKind::Roe if value > 0.15 => "Strong",
            RatioKind::Roe if value > 0.10 => "Average",
            RatioKind::Roe => "Weak",
            RatioKind::Generic => "Custom calculation",
        }
    }

    /// All known kinds
    pub fn all() -> [RatioKind; 5] {
        [
            RatioKind::Pe,
            RatioKind::DebtToEquity,
            RatioKind::Current,
            RatioKind::Roe,
            RatioKind::Generic,
        ]
    }
}
