//! Pull-to-refresh components

pub mod pull_to_refresh;
pub mod spinner;

pub use pull_to_refresh::{PullToRefresh, PullToRefreshProps};
pub use spinner::{CupertinoSpinner, DefaultSpinner};
