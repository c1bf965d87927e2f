use serde::{Deserialize, Serialize};

use crate::error::{BrushError, BrushResult};

/// A 2D point, `[x, y]`, in either pixel or data space.
pub type Vec2 = [f64; 2];

/// A `[min, max]` pair along one axis.
pub type MinMax = [f64; 2];

/// Orders a pair so that `min <= max`. Already ordered pairs are returned as-is.
#[must_use]
pub fn format_min_max(min_max: MinMax) -> MinMax {
    if min_max[0] > min_max[1] {
        [min_max[1], min_max[0]]
    } else {
        min_max
    }
}

/// Axis-aligned rectangle in pixel or data space.
///
/// A negative `width`/`height` is allowed on construction;
/// [`Rect::normalized`] flips it into the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the smallest rect spanning two corner points.
    #[must_use]
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let [x_min, x_max] = format_min_max([a[0], b[0]]);
        let [y_min, y_max] = format_min_max([a[1], b[1]]);
        Self::new(x_min, y_min, x_max - x_min, y_max - y_min)
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        Self::from_corners([self.x, self.y], [self.x + self.width, self.y + self.height])
    }

    #[must_use]
    pub fn x_extent(self) -> MinMax {
        format_min_max([self.x, self.x + self.width])
    }

    #[must_use]
    pub fn y_extent(self) -> MinMax {
        format_min_max([self.y, self.y + self.height])
    }

    #[must_use]
    pub fn center(self) -> Vec2 {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(self, point: Vec2) -> bool {
        let [x_min, x_max] = self.x_extent();
        let [y_min, y_max] = self.y_extent();
        point[0] >= x_min && point[0] <= x_max && point[1] >= y_min && point[1] <= y_max
    }

    /// Clamps a point into the rect.
    #[must_use]
    pub fn clamp_point(self, point: Vec2) -> Vec2 {
        let [x_min, x_max] = self.x_extent();
        let [y_min, y_max] = self.y_extent();
        [point[0].clamp(x_min, x_max), point[1].clamp(y_min, y_max)]
    }

    /// Maps both corners through `transform` and returns the normalized result.
    #[must_use]
    pub fn apply_transform(self, transform: Transform) -> Self {
        let a = transform.apply([self.x, self.y]);
        let b = transform.apply([self.x + self.width, self.y + self.height]);
        Self::from_corners(a, b)
    }

    pub fn validate(self, name: &str) -> BrushResult<Self> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() {
                return Err(BrushError::InvalidData(format!(
                    "{name} rect `{field}` must be finite"
                )));
            }
        }
        Ok(self)
    }
}

/// Axis-aligned affine transform: `p' = p * scale + translate`.
///
/// Roam (pan/zoom) and view fitting never rotate, so the full 2x3 matrix is
/// not needed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: Vec2,
    pub translate: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale: [1.0, 1.0],
        translate: [0.0, 0.0],
    };

    #[must_use]
    pub const fn new(scale: Vec2, translate: Vec2) -> Self {
        Self { scale, translate }
    }

    /// Uniform scaling around `origin`.
    #[must_use]
    pub fn scale_around(factor: f64, origin: Vec2) -> Self {
        Self::new(
            [factor, factor],
            [origin[0] * (1.0 - factor), origin[1] * (1.0 - factor)],
        )
    }

    #[must_use]
    pub fn apply(self, point: Vec2) -> Vec2 {
        [
            point[0] * self.scale[0] + self.translate[0],
            point[1] * self.scale[1] + self.translate[1],
        ]
    }

    /// Returns `outer ∘ self`, i.e. `self` is applied first.
    #[must_use]
    pub fn then(self, outer: Self) -> Self {
        Self::new(
            [self.scale[0] * outer.scale[0], self.scale[1] * outer.scale[1]],
            [
                self.translate[0] * outer.scale[0] + outer.translate[0],
                self.translate[1] * outer.scale[1] + outer.translate[1],
            ],
        )
    }

    pub fn invert(self) -> BrushResult<Self> {
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(BrushError::InvalidData(
                "transform scale must be finite and non-zero to invert".to_owned(),
            ));
        }
        Ok(Self::new(
            [1.0 / self.scale[0], 1.0 / self.scale[1]],
            [
                -self.translate[0] / self.scale[0],
                -self.translate[1] / self.scale[1],
            ],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{Rect, Transform, format_min_max};

    #[test]
    fn format_min_max_swaps_reversed_pairs_only() {
        assert_eq!(format_min_max([5.0, 2.0]), [2.0, 5.0]);
        assert_eq!(format_min_max([2.0, 5.0]), [2.0, 5.0]);
        assert_eq!(format_min_max([3.0, 3.0]), [3.0, 3.0]);
    }

    #[test]
    fn rect_normalizes_negative_size() {
        let rect = Rect::new(10.0, 20.0, -4.0, -6.0).normalized();
        assert_eq!(rect, Rect::new(6.0, 14.0, 4.0, 6.0));
        assert!(rect.contains([6.0, 14.0]));
        assert!(!rect.contains([5.9, 14.0]));
        assert_eq!(rect.clamp_point([0.0, 100.0]), [6.0, 20.0]);
    }

    #[test]
    fn transform_composition_and_inverse_round_trip() {
        let view = Transform::new([2.0, -3.0], [10.0, 50.0]);
        let roam = Transform::scale_around(1.5, [20.0, 20.0]);
        let full = view.then(roam);

        let point = [3.0, 7.0];
        let expected = roam.apply(view.apply(point));
        let mapped = full.apply(point);
        assert!((mapped[0] - expected[0]).abs() <= 1e-12);
        assert!((mapped[1] - expected[1]).abs() <= 1e-12);

        let back = full.invert().expect("invertible").apply(mapped);
        assert!((back[0] - point[0]).abs() <= 1e-12);
        assert!((back[1] - point[1]).abs() <= 1e-12);
    }

    #[test]
    fn degenerate_transform_cannot_be_inverted() {
        let err = Transform::new([0.0, 1.0], [0.0, 0.0])
            .invert()
            .expect_err("zero scale must fail");
        assert!(format!("{err}").contains("non-zero"));
    }

    #[test]
    fn rect_transform_flips_into_canonical_form() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        let mapped = rect.apply_transform(Transform::new([1.0, -2.0], [0.0, 100.0]));
        assert_eq!(mapped, Rect::new(0.0, 90.0, 10.0, 10.0));
    }
}
