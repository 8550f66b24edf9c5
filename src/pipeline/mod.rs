//! Pipeline entry points.
//!
//! - `NotificationProcessor`: Labels uploaded images and writes one article per batch

pub mod process;

pub use process::{NotificationProcessor, ProcessOutcome};
