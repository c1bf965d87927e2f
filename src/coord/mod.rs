//! Coordinate systems a brush can target.
//!
//! Grids and geo views expose the same point/data capability through
//! [`CoordSys`]; axis-only conversions (line brushes) are available for
//! Cartesian systems only.

pub mod axis;
pub mod cartesian;
pub mod geo;
pub mod scale;

pub use axis::{Axis, AxisDim};
pub use cartesian::Cartesian2D;
pub use geo::GeoView;
pub use scale::{AxisScale, CategoryScale, ValueScale};

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

/// Which way a conversion goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConvertDirection {
    /// Data space to pixel space.
    ToPixel,
    /// Pixel space to data space.
    ToData,
}

/// Identity of a coordinate system instance inside one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CoordSysId {
    Cartesian {
        grid_index: usize,
        x_axis_index: usize,
        y_axis_index: usize,
    },
    Geo {
        geo_index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CoordSys {
    Cartesian(Cartesian2D),
    Geo(GeoView),
}

impl CoordSys {
    #[must_use]
    pub fn id(&self) -> CoordSysId {
        match self {
            Self::Cartesian(cartesian) => CoordSysId::Cartesian {
                grid_index: cartesian.grid_index(),
                x_axis_index: cartesian.axis(AxisDim::X).model_index(),
                y_axis_index: cartesian.axis(AxisDim::Y).model_index(),
            },
            Self::Geo(geo) => CoordSysId::Geo {
                geo_index: geo.geo_index(),
            },
        }
    }

    #[must_use]
    pub fn data_to_point(&self, data: Vec2) -> Vec2 {
        match self {
            Self::Cartesian(cartesian) => cartesian.data_to_point(data),
            Self::Geo(geo) => geo.data_to_point(data),
        }
    }

    #[must_use]
    pub fn point_to_data(&self, point: Vec2) -> Vec2 {
        match self {
            Self::Cartesian(cartesian) => cartesian.point_to_data(point),
            Self::Geo(geo) => geo.point_to_data(point),
        }
    }

    /// Single entry point for both directions so that every brush shape
    /// converts through the same code path either way.
    #[must_use]
    pub fn convert_point(&self, direction: ConvertDirection, value: Vec2) -> Vec2 {
        match direction {
            ConvertDirection::ToPixel => self.data_to_point(value),
            ConvertDirection::ToData => self.point_to_data(value),
        }
    }

    /// Axis of the given dimension, `None` for systems without axes.
    #[must_use]
    pub fn axis(&self, dim: AxisDim) -> Option<&Axis> {
        match self {
            Self::Cartesian(cartesian) => Some(cartesian.axis(dim)),
            Self::Geo(_) => None,
        }
    }
}
