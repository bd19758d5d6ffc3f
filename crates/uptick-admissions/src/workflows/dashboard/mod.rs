//! Data records backing the student dashboard.

pub mod progress;

pub use progress::{CourseProgress, ProgressError};
