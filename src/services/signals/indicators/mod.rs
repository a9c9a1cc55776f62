//! Technical indicator implementations.
//!
//! Every function works on an ascending series (most recent value last) and
//! returns `None` when there is not enough data, so a valid zero is never
//! confused with a failed computation.

pub mod atr;
pub mod drawdown;
pub mod ema;
pub mod rsi;
pub mod slope;
pub mod sma;
pub mod volatility;

pub use atr::{atr, true_range};
pub use drawdown::max_drawdown;
pub use ema::ema;
pub use rsi::rsi;
pub use slope::slope_logprice;
pub use sma::sma;
pub use volatility::{annualize_volatility, realized_vol, simple_returns, TRADING_DAYS_PER_YEAR};
