use serde::{Deserialize, Serialize};

use crate::core::MinMax;

use super::scale::AxisScale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDim {
    X,
    Y,
}

impl AxisDim {
    /// Position of this dimension inside `[x, y]` pairs.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// Laid-out axis of a grid.
///
/// Three coordinate spaces meet here:
/// - data: values of the axis scale (category indices for category axes)
/// - local: pixel offset along the axis, `extent[0]..extent[1]`
/// - global: chart pixel coordinate
///
/// The y axis grows upward in local space while global pixels grow downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    dim: AxisDim,
    model_index: usize,
    scale: AxisScale,
    extent: MinMax,
    coord_base: f64,
}

impl Axis {
    /// `extent` is the local pixel extent (reversed for inverse axes) and
    /// `coord_base` the global pixel position of the owning grid's left
    /// (x) or top (y) edge.
    #[must_use]
    pub fn new(
        dim: AxisDim,
        model_index: usize,
        scale: AxisScale,
        extent: MinMax,
        coord_base: f64,
    ) -> Self {
        Self {
            dim,
            model_index,
            scale,
            extent,
            coord_base,
        }
    }

    #[must_use]
    pub fn dim(&self) -> AxisDim {
        self.dim
    }

    /// Index of the axis component inside its family.
    #[must_use]
    pub fn model_index(&self) -> usize {
        self.model_index
    }

    #[must_use]
    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    #[must_use]
    pub fn extent(&self) -> MinMax {
        self.extent
    }

    /// Extent shrunk by half a band on both ends for band-centered scales.
    fn data_extent(&self) -> MinMax {
        let mut extent = self.extent;
        if let Some(bands) = self.scale.band_count() {
            let margin = (extent[1] - extent[0]) / bands / 2.0;
            extent[0] += margin;
            extent[1] -= margin;
        }
        extent
    }

    /// Data value to local pixel coordinate.
    #[must_use]
    pub fn data_to_coord(&self, data: f64) -> f64 {
        let extent = self.data_extent();
        let ratio = self.scale.normalize(data);
        extent[0] + ratio * (extent[1] - extent[0])
    }

    /// Local pixel coordinate to data value. Category axes snap to an index.
    #[must_use]
    pub fn coord_to_data(&self, coord: f64) -> f64 {
        let extent = self.data_extent();
        let span = extent[1] - extent[0];
        let ratio = if span == 0.0 {
            0.5
        } else {
            (coord - extent[0]) / span
        };
        self.scale.scale(ratio)
    }

    #[must_use]
    pub fn to_global_coord(&self, coord: f64) -> f64 {
        match self.dim {
            AxisDim::X => coord + self.coord_base,
            AxisDim::Y => self.extent[0] + self.extent[1] - coord + self.coord_base,
        }
    }

    #[must_use]
    pub fn to_local_coord(&self, coord: f64) -> f64 {
        match self.dim {
            AxisDim::X => coord - self.coord_base,
            AxisDim::Y => self.extent[0] + self.extent[1] - coord + self.coord_base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisDim};
    use crate::coord::AxisScale;

    #[test]
    fn value_axis_maps_into_global_pixels() {
        let scale = AxisScale::value(0.0, 100.0).expect("scale");
        let axis = Axis::new(AxisDim::X, 0, scale, [0.0, 200.0], 40.0);
        assert_eq!(axis.to_global_coord(axis.data_to_coord(50.0)), 140.0);
        assert_eq!(axis.coord_to_data(axis.to_local_coord(140.0)), 50.0);
    }

    #[test]
    fn y_axis_grows_upward() {
        let scale = AxisScale::value(0.0, 10.0).expect("scale");
        let axis = Axis::new(AxisDim::Y, 0, scale, [0.0, 100.0], 20.0);
        assert_eq!(axis.to_global_coord(axis.data_to_coord(0.0)), 120.0);
        assert_eq!(axis.to_global_coord(axis.data_to_coord(10.0)), 20.0);
        assert_eq!(axis.coord_to_data(axis.to_local_coord(70.0)), 5.0);
    }

    #[test]
    fn category_axis_places_data_in_band_centers() {
        let scale = AxisScale::category(["a", "b", "c", "d"]).expect("scale");
        let axis = Axis::new(AxisDim::X, 0, scale, [0.0, 400.0], 0.0);
        assert_eq!(axis.data_to_coord(0.0), 50.0);
        assert_eq!(axis.data_to_coord(3.0), 350.0);
        assert_eq!(axis.coord_to_data(10.0), 0.0);
        assert_eq!(axis.coord_to_data(160.0), 1.0);
    }
}
