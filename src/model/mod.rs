//! Component registry the brush layer resolves finder options against.
//!
//! This is the minimal model surface brushing needs: grids with their axes,
//! geo views, placeholder components of the other finder families and series
//! bound to a coordinate system. Coordinate systems are laid out on demand
//! from the current component state, so a data zoom applied to an axis
//! scale shows up in the next layout.

mod component;

pub use component::{Component, ComponentFamily, ComponentKey, ComponentMeta, ComponentOption};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::coord::{Axis, AxisDim, AxisScale, Cartesian2D, CoordSysId, GeoView};
use crate::core::{Rect, Vec2};
use crate::error::{BrushError, BrushResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridModel {
    pub rect: Rect,
}

impl GridModel {
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisModel {
    pub grid_index: usize,
    pub scale: AxisScale,
    #[serde(default)]
    pub inverse: bool,
}

impl AxisModel {
    #[must_use]
    pub fn new(grid_index: usize, scale: AxisScale) -> Self {
        Self {
            grid_index,
            scale,
            inverse: false,
        }
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.inverse = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoModel {
    /// Data-space extent (longitude, latitude).
    pub bounding_rect: Rect,
    /// Pixel box the map is fitted into before roaming.
    pub layout: Rect,
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub pan: Vec2,
}

fn default_zoom() -> f64 {
    1.0
}

impl GeoModel {
    #[must_use]
    pub fn new(bounding_rect: Rect, layout: Rect) -> Self {
        Self {
            bounding_rect,
            layout,
            zoom: default_zoom(),
            pan: [0.0, 0.0],
        }
    }

    /// Sets roam state: zoom around the layout center, then pixel pan.
    pub fn set_roam(&mut self, zoom: f64, pan: Vec2) -> BrushResult<()> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(BrushError::InvalidData(
                "geo zoom must be finite and > 0".to_owned(),
            ));
        }
        if !pan.iter().all(|v| v.is_finite()) {
            return Err(BrushError::InvalidData("geo pan must be finite".to_owned()));
        }
        self.zoom = zoom;
        self.pan = pan;
        Ok(())
    }
}

/// Coordinate system a series is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SeriesCoord {
    Cartesian {
        x_axis_index: usize,
        y_axis_index: usize,
    },
    Geo {
        geo_index: usize,
    },
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesModel {
    pub coord: SeriesCoord,
}

impl SeriesModel {
    #[must_use]
    pub fn cartesian(x_axis_index: usize, y_axis_index: usize) -> Self {
        Self {
            coord: SeriesCoord::Cartesian {
                x_axis_index,
                y_axis_index,
            },
        }
    }

    #[must_use]
    pub fn geo(geo_index: usize) -> Self {
        Self {
            coord: SeriesCoord::Geo { geo_index },
        }
    }

    #[must_use]
    pub fn without_coord() -> Self {
        Self {
            coord: SeriesCoord::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalModel {
    grids: Vec<Component<GridModel>>,
    x_axes: Vec<Component<AxisModel>>,
    y_axes: Vec<Component<AxisModel>>,
    geos: Vec<Component<GeoModel>>,
    others: Vec<(ComponentFamily, ComponentMeta)>,
    series: Vec<Component<SeriesModel>>,
}

impl GlobalModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_grid(&mut self, grid: GridModel, option: ComponentOption) -> BrushResult<usize> {
        grid.rect.validate("grid")?;
        let meta = self.next_meta(ComponentFamily::Grid, option)?;
        let index = meta.index;
        self.grids.push(Component { meta, model: grid });
        Ok(index)
    }

    pub fn add_x_axis(&mut self, axis: AxisModel, option: ComponentOption) -> BrushResult<usize> {
        self.add_axis(AxisDim::X, axis, option)
    }

    pub fn add_y_axis(&mut self, axis: AxisModel, option: ComponentOption) -> BrushResult<usize> {
        self.add_axis(AxisDim::Y, axis, option)
    }

    fn add_axis(
        &mut self,
        dim: AxisDim,
        axis: AxisModel,
        option: ComponentOption,
    ) -> BrushResult<usize> {
        self.grid(axis.grid_index)?;
        let family = axis_family(dim);
        let meta = self.next_meta(family, option)?;
        let index = meta.index;
        let component = Component { meta, model: axis };
        match dim {
            AxisDim::X => self.x_axes.push(component),
            AxisDim::Y => self.y_axes.push(component),
        }
        Ok(index)
    }

    pub fn add_geo(&mut self, geo: GeoModel, option: ComponentOption) -> BrushResult<usize> {
        // Reject unusable geometry at registration instead of at layout time.
        GeoView::fitted(0, geo.bounding_rect, geo.layout, geo.zoom, geo.pan)?;
        let meta = self.next_meta(ComponentFamily::Geo, option)?;
        let index = meta.index;
        self.geos.push(Component { meta, model: geo });
        Ok(index)
    }

    /// Registers a component of a family without a brushable coordinate
    /// system (graph, polar, radius/angle axis, bmap).
    pub fn add_component(
        &mut self,
        family: ComponentFamily,
        option: ComponentOption,
    ) -> BrushResult<usize> {
        match family {
            ComponentFamily::Grid
            | ComponentFamily::XAxis
            | ComponentFamily::YAxis
            | ComponentFamily::Geo => {
                return Err(BrushError::InvalidData(format!(
                    "`{family}` components must be added through their typed constructor"
                )));
            }
            _ => {}
        }
        let meta = self.next_meta(family, option)?;
        let index = meta.index;
        self.others.push((family, meta));
        Ok(index)
    }

    pub fn add_series(&mut self, series: SeriesModel) -> BrushResult<usize> {
        match series.coord {
            SeriesCoord::Cartesian {
                x_axis_index,
                y_axis_index,
            } => {
                let x_grid = self.axis(AxisDim::X, x_axis_index)?.model.grid_index;
                let y_grid = self.axis(AxisDim::Y, y_axis_index)?.model.grid_index;
                if x_grid != y_grid {
                    return Err(BrushError::InvalidData(format!(
                        "series axes belong to different grids ({x_grid} and {y_grid})"
                    )));
                }
            }
            SeriesCoord::Geo { geo_index } => {
                self.geo(geo_index)?;
            }
            SeriesCoord::None => {}
        }
        let index = self.series.len();
        self.series.push(Component {
            meta: ComponentMeta {
                index,
                id: index.to_string(),
                name: None,
            },
            model: series,
        });
        Ok(index)
    }

    fn next_meta(
        &self,
        family: ComponentFamily,
        option: ComponentOption,
    ) -> BrushResult<ComponentMeta> {
        let existing = self.metas(family);
        let index = existing.len();
        let id = option.id.unwrap_or_else(|| index.to_string());
        if existing.iter().any(|meta| meta.id == id) {
            return Err(BrushError::InvalidData(format!(
                "duplicate {family} id `{id}`"
            )));
        }
        Ok(ComponentMeta {
            index,
            id,
            name: option.name,
        })
    }

    /// Addressing data of every component of `family`, in index order.
    #[must_use]
    pub fn metas(&self, family: ComponentFamily) -> Vec<&ComponentMeta> {
        match family {
            ComponentFamily::Grid => self.grids.iter().map(|c| &c.meta).collect(),
            ComponentFamily::XAxis => self.x_axes.iter().map(|c| &c.meta).collect(),
            ComponentFamily::YAxis => self.y_axes.iter().map(|c| &c.meta).collect(),
            ComponentFamily::Geo => self.geos.iter().map(|c| &c.meta).collect(),
            _ => self
                .others
                .iter()
                .filter(|(f, _)| *f == family)
                .map(|(_, meta)| meta)
                .collect(),
        }
    }

    pub fn grid(&self, index: usize) -> BrushResult<&Component<GridModel>> {
        self.grids
            .get(index)
            .ok_or(BrushError::UnknownComponent {
                family: ComponentFamily::Grid,
                index,
            })
    }

    pub fn geo(&self, index: usize) -> BrushResult<&Component<GeoModel>> {
        self.geos.get(index).ok_or(BrushError::UnknownComponent {
            family: ComponentFamily::Geo,
            index,
        })
    }

    pub fn geo_mut(&mut self, index: usize) -> BrushResult<&mut GeoModel> {
        self.geos
            .get_mut(index)
            .map(|c| &mut c.model)
            .ok_or(BrushError::UnknownComponent {
                family: ComponentFamily::Geo,
                index,
            })
    }

    pub fn axis(&self, dim: AxisDim, index: usize) -> BrushResult<&Component<AxisModel>> {
        let axes = match dim {
            AxisDim::X => &self.x_axes,
            AxisDim::Y => &self.y_axes,
        };
        axes.get(index).ok_or(BrushError::UnknownComponent {
            family: axis_family(dim),
            index,
        })
    }

    /// Mutable access to an axis scale, e.g. to apply a data zoom.
    pub fn axis_scale_mut(&mut self, dim: AxisDim, index: usize) -> BrushResult<&mut AxisScale> {
        let axes = match dim {
            AxisDim::X => &mut self.x_axes,
            AxisDim::Y => &mut self.y_axes,
        };
        axes.get_mut(index)
            .map(|c| &mut c.model.scale)
            .ok_or(BrushError::UnknownComponent {
                family: axis_family(dim),
                index,
            })
    }

    pub fn series(&self, index: usize) -> Option<&SeriesModel> {
        self.series.get(index).map(|c| &c.model)
    }

    /// Grid owning the given axis.
    pub fn axis_grid(&self, dim: AxisDim, index: usize) -> BrushResult<usize> {
        Ok(self.axis(dim, index)?.model.grid_index)
    }

    /// Lays out one axis against its grid rect.
    pub fn layout_axis(&self, dim: AxisDim, index: usize) -> BrushResult<Axis> {
        let axis = &self.axis(dim, index)?.model;
        let rect = self.grid(axis.grid_index)?.model.rect.normalized();
        let (length, base) = match dim {
            AxisDim::X => (rect.width, rect.x),
            AxisDim::Y => (rect.height, rect.y),
        };
        let extent = if axis.inverse {
            [length, 0.0]
        } else {
            [0.0, length]
        };
        Ok(Axis::new(dim, index, axis.scale.clone(), extent, base))
    }

    /// Every Cartesian of a grid, one per x/y axis pair, x-major order.
    pub fn cartesians(&self, grid_index: usize) -> BrushResult<Vec<Cartesian2D>> {
        let rect = self.grid(grid_index)?.model.rect.normalized();
        let x_indices = axis_indices_in_grid(&self.x_axes, grid_index);
        let y_indices = axis_indices_in_grid(&self.y_axes, grid_index);

        let mut cartesians = Vec::with_capacity(x_indices.len() * y_indices.len());
        for &x_index in &x_indices {
            let x_axis = self.layout_axis(AxisDim::X, x_index)?;
            for &y_index in &y_indices {
                let y_axis = self.layout_axis(AxisDim::Y, y_index)?;
                cartesians.push(Cartesian2D::new(grid_index, rect, x_axis.clone(), y_axis));
            }
        }
        trace!(grid_index, count = cartesians.len(), "lay out grid cartesians");
        Ok(cartesians)
    }

    pub fn geo_view(&self, geo_index: usize) -> BrushResult<GeoView> {
        let geo = &self.geo(geo_index)?.model;
        GeoView::fitted(geo_index, geo.bounding_rect, geo.layout, geo.zoom, geo.pan)
    }

    /// Identity of the coordinate system a series is drawn in.
    pub fn series_coord_sys(&self, series: &SeriesModel) -> BrushResult<Option<CoordSysId>> {
        Ok(match series.coord {
            SeriesCoord::Cartesian {
                x_axis_index,
                y_axis_index,
            } => Some(CoordSysId::Cartesian {
                grid_index: self.axis_grid(AxisDim::X, x_axis_index)?,
                x_axis_index,
                y_axis_index,
            }),
            SeriesCoord::Geo { geo_index } => Some(CoordSysId::Geo { geo_index }),
            SeriesCoord::None => None,
        })
    }
}

const fn axis_family(dim: AxisDim) -> ComponentFamily {
    match dim {
        AxisDim::X => ComponentFamily::XAxis,
        AxisDim::Y => ComponentFamily::YAxis,
    }
}

fn axis_indices_in_grid(axes: &[Component<AxisModel>], grid_index: usize) -> Vec<usize> {
    axes.iter()
        .filter(|axis| axis.model.grid_index == grid_index)
        .map(|axis| axis.meta.index)
        .collect()
}
