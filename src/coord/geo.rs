use serde::{Deserialize, Serialize};

use crate::core::{Rect, Transform, Vec2};
use crate::error::BrushResult;

/// Geographic view: a data-space bounding rect (longitude/latitude) mapped
/// onto pixels by a view-fit transform followed by the roam transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoView {
    geo_index: usize,
    bounding_rect: Rect,
    transform: Transform,
    inverse: Transform,
}

impl GeoView {
    pub fn new(geo_index: usize, bounding_rect: Rect, transform: Transform) -> BrushResult<Self> {
        let inverse = transform.invert()?;
        Ok(Self {
            geo_index,
            bounding_rect,
            transform,
            inverse,
        })
    }

    /// Fits `bounding_rect` into `layout` (latitude growing upward) and then
    /// applies roam zoom around the layout center followed by `pan`.
    pub fn fitted(
        geo_index: usize,
        bounding_rect: Rect,
        layout: Rect,
        zoom: f64,
        pan: Vec2,
    ) -> BrushResult<Self> {
        let bounding_rect = bounding_rect.validate("geo bounding")?.normalized();
        let layout = layout.validate("geo layout")?.normalized();
        let sx = layout.width / bounding_rect.width;
        let sy = -layout.height / bounding_rect.height;
        let view = Transform::new(
            [sx, sy],
            [
                layout.x - bounding_rect.x * sx,
                layout.y + layout.height - bounding_rect.y * sy,
            ],
        );
        let roam =
            Transform::scale_around(zoom, layout.center()).then(Transform::new([1.0, 1.0], pan));
        Self::new(geo_index, bounding_rect, view.then(roam))
    }

    #[must_use]
    pub fn geo_index(&self) -> usize {
        self.geo_index
    }

    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        self.bounding_rect
    }

    /// Combined view and roam transform, data to pixel.
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Pixel rect currently covered by the map.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.bounding_rect.apply_transform(self.transform)
    }

    #[must_use]
    pub fn data_to_point(&self, data: Vec2) -> Vec2 {
        self.transform.apply(data)
    }

    #[must_use]
    pub fn point_to_data(&self, point: Vec2) -> Vec2 {
        self.inverse.apply(point)
    }
}
