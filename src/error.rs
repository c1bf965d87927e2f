use thiserror::Error;

use crate::brush::BrushType;
use crate::model::ComponentFamily;

pub type BrushResult<T> = Result<T, BrushError>;

#[derive(Debug, Error)]
pub enum BrushError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("range shape does not match brush type `{brush_type}`: expected {expected}")]
    RangeShapeMismatch {
        brush_type: BrushType,
        expected: &'static str,
    },

    #[error("brush type `{brush_type}` requires an axis-based coordinate system")]
    AxisRequired { brush_type: BrushType },

    #[error("area has no `{which}` to convert")]
    MissingRange { which: &'static str },

    #[error("unknown {family} component at index {index}")]
    UnknownComponent {
        family: ComponentFamily,
        index: usize,
    },
}
