//! The reports dashboard: four independent report views over the
//! clinic's appointment data, loaded per date or date range.

pub mod dashboard;
pub mod fetch;
pub mod render;
pub mod types;

pub use dashboard::*;
pub use render::*;
pub use types::*;
