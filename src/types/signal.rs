use serde::{Deserialize, Serialize};

/// Forecast horizon reported alongside every signal batch.
pub const SIGNAL_HORIZON: &str = "30d";

/// Qualitative direction label for a symbol's recent price action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    StrongUp,
    Up,
    Neutral,
    Down,
    StrongDown,
    /// Fewer bars than the classifier needs.
    InsufficientData,
    /// Nothing has been computed yet.
    #[default]
    Unknown,
}

impl Trend {
    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::StrongUp => "strong_up",
            Trend::Up => "up",
            Trend::Neutral => "neutral",
            Trend::Down => "down",
            Trend::StrongDown => "strong_down",
            Trend::InsufficientData => "insufficient_data",
            Trend::Unknown => "unknown",
        }
    }

    /// Get display label for this trend.
    pub fn label(&self) -> &'static str {
        match self {
            Trend::StrongUp => "Strong Buy",
            Trend::Up => "Buy",
            Trend::Neutral => "Hold",
            Trend::Down => "Sell",
            Trend::StrongDown => "Strong Sell",
            Trend::InsufficientData => "No Data",
            Trend::Unknown => "Unknown",
        }
    }

    /// Up-probability before the monthly return adjustment.
    pub fn base_probability(&self) -> f64 {
        match self {
            Trend::StrongUp => 0.75,
            Trend::Up => 0.60,
            Trend::Neutral => 0.50,
            Trend::Down => 0.40,
            Trend::StrongDown => 0.25,
            Trend::InsufficientData | Trend::Unknown => 0.50,
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    pub symbol: String,
    pub trend: Trend,
    /// Probability of an upward move, clamped to [0.05, 0.95].
    pub prob_up: f64,
    /// Last close.
    pub current_price: f64,
    /// Percent change over the last 30 bars (or all bars when fewer).
    pub monthly_return: f64,
    /// Annualized volatility of daily returns, in percent.
    pub volatility: f64,
    /// 5-period simple moving average.
    pub ma_short: f64,
    /// 20-period simple moving average, or the mean of all bars when fewer.
    pub ma_medium: f64,
    /// Number of bars the signal was computed from.
    pub data_points: usize,
    /// Set only when the signal could not be fully computed.
    pub error: Option<String>,
}

impl Signal {
    /// Pre-computation default for a symbol.
    pub fn pending(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            trend: Trend::Unknown,
            prob_up: 0.5,
            current_price: 0.0,
            monthly_return: 0.0,
            volatility: 0.0,
            ma_short: 0.0,
            ma_medium: 0.0,
            data_points: 0,
            error: None,
        }
    }

    /// Signal carrying only a failure message.
    pub fn failed(symbol: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::pending(symbol)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// External representation with rounding and field omission applied.
    pub fn to_payload(&self) -> SignalPayload {
        let computed = self.current_price > 0.0;
        let metric = |v: f64| computed.then(|| round2(v));

        SignalPayload {
            symbol: self.symbol.clone(),
            trend: self.trend,
            prob_up: round2(self.prob_up),
            current_price: metric(self.current_price),
            monthly_return: metric(self.monthly_return),
            volatility: metric(self.volatility),
            ma5: metric(self.ma_short),
            ma20: metric(self.ma_medium),
            data_points: computed.then_some(self.data_points),
            error: self.error.clone().filter(|e| !e.is_empty()),
        }
    }
}

/// Serialized form of a [`Signal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalPayload {
    pub symbol: String,
    pub trend: Trend,
    pub prob_up: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_return: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma5: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ma20: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_points: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body for the batch signals endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalsResponse {
    pub as_of: String,
    pub horizon: String,
    pub signals: Vec<SignalPayload>,
}

impl SignalsResponse {
    pub fn new(signals: &[Signal], as_of: impl Into<String>) -> Self {
        Self {
            as_of: as_of.into(),
            horizon: SIGNAL_HORIZON.to_string(),
            signals: signals.iter().map(Signal::to_payload).collect(),
        }
    }
}

/// Summary of a manual ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub symbols_attempted: usize,
    pub records_ingested: usize,
    /// Entries of the form `"SYM: reason"`.
    pub failed_symbols: Vec<String>,
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
