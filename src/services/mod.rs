pub mod features;
pub mod signals;

pub use features::{compute_all, compute_features, write_features, FeatureError, FeatureRow};
pub use signals::SignalService;
