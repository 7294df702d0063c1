//! The statistics dashboard: period metrics, daily charts and
//! per-therapist figures.

pub mod charts;
pub mod dashboard;
pub mod fetch;
pub mod render;
pub mod types;

pub use charts::*;
pub use dashboard::*;
pub use render::*;
pub use types::*;
