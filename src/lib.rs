//! chart-brush: brush-selection target management for charts.
//!
//! Binds user-drawn brush areas (line, rect and polygon selections) to the
//! grid and geo coordinate systems of a chart model, converts their ranges
//! between pixel and data space, and keeps category-axis selections stable
//! across rescaling.

pub mod brush;
pub mod config;
pub mod coord;
pub mod core;
pub mod error;
pub mod finder;
pub mod model;
pub mod telemetry;

pub use brush::{BrushArea, BrushRange, BrushTargetManager, BrushType, TargetLookup};
pub use config::TargetManagerSettings;
pub use error::{BrushError, BrushResult};
pub use finder::FinderOption;
pub use model::GlobalModel;
