pub mod price;
pub mod signal;

pub use price::*;
pub use signal::*;

/// Universes offered to clients.
pub const UNIVERSES: [&str; 3] = ["SP500", "NASDAQ100", "WATCHLIST"];
