//! Brush areas and the target manager binding them to coordinate systems.

pub mod area;
pub mod convert;
pub mod diff;
pub mod manager;
pub mod panel;
pub mod target_info;

pub use area::{BrushArea, BrushRange, BrushType, RangeOffset};
pub use convert::{Converted, convert};
pub use diff::{diff, get_scales};
pub use manager::{BrushTargetManager, InitialCoordRange, InputUpdate, OutputUpdate, TargetLookup};
pub use panel::{ElementLookup, NoElements, PanelOpt};
pub use target_info::{TargetFamily, TargetInfo};
