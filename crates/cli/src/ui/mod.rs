//! Terminal UI components for stackrun

pub mod progress;

pub use progress::{SpinnerExecutor, create_spinner};
