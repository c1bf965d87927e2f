pub mod geometry;

pub use geometry::{MinMax, Rect, Transform, Vec2, format_min_max};
