use serde::{Deserialize, Serialize};

use crate::core::{Rect, Vec2};

use super::axis::{Axis, AxisDim};

/// One x/y axis pair inside a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cartesian2D {
    grid_index: usize,
    grid_rect: Rect,
    x_axis: Axis,
    y_axis: Axis,
}

impl Cartesian2D {
    #[must_use]
    pub fn new(grid_index: usize, grid_rect: Rect, x_axis: Axis, y_axis: Axis) -> Self {
        Self {
            grid_index,
            grid_rect,
            x_axis,
            y_axis,
        }
    }

    #[must_use]
    pub fn grid_index(&self) -> usize {
        self.grid_index
    }

    /// Pixel rect of the owning grid.
    #[must_use]
    pub fn grid_rect(&self) -> Rect {
        self.grid_rect
    }

    #[must_use]
    pub fn axis(&self, dim: AxisDim) -> &Axis {
        match dim {
            AxisDim::X => &self.x_axis,
            AxisDim::Y => &self.y_axis,
        }
    }

    #[must_use]
    pub fn data_to_point(&self, data: Vec2) -> Vec2 {
        [
            self.x_axis.to_global_coord(self.x_axis.data_to_coord(data[0])),
            self.y_axis.to_global_coord(self.y_axis.data_to_coord(data[1])),
        ]
    }

    #[must_use]
    pub fn point_to_data(&self, point: Vec2) -> Vec2 {
        [
            self.x_axis.coord_to_data(self.x_axis.to_local_coord(point[0])),
            self.y_axis.coord_to_data(self.y_axis.to_local_coord(point[1])),
        ]
    }
}
