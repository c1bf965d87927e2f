//! Rescale-aware pixel reconstruction.
//!
//! Category axes snap pixels to band centers, so rebuilding a pixel range
//! from a stored data range moves the drawn selection. The first output
//! conversion remembers how far the reconverted pixels sit from the drawn
//! ones; later input conversions subtract that offset, stretched by how much
//! the selection's pixel extent has grown or shrunk since.

use crate::core::MinMax;

use super::area::{BrushRange, BrushType};

/// `values - scales ⊙ refer`, shaped by `brush_type`.
///
/// Returns `None` when `values` and `refer` do not share a shape that fits
/// `brush_type` (e.g. a polygon whose vertex count changed).
#[must_use]
pub fn diff(
    brush_type: BrushType,
    values: &BrushRange,
    refer: &BrushRange,
    scales: [f64; 2],
) -> Option<BrushRange> {
    match (brush_type, values, refer) {
        (BrushType::LineX, BrushRange::Linear(values), BrushRange::Linear(refer)) => {
            Some(BrushRange::Linear(diff_axis(*values, *refer, scales[0])))
        }
        (BrushType::LineY, BrushRange::Linear(values), BrushRange::Linear(refer)) => {
            Some(BrushRange::Linear(diff_axis(*values, *refer, scales[1])))
        }
        (BrushType::Rect, BrushRange::Rect(values), BrushRange::Rect(refer)) => {
            Some(BrushRange::Rect([
                diff_axis(values[0], refer[0], scales[0]),
                diff_axis(values[1], refer[1], scales[1]),
            ]))
        }
        (BrushType::Polygon, BrushRange::Polygon(values), BrushRange::Polygon(refer))
            if values.len() == refer.len() =>
        {
            Some(BrushRange::Polygon(
                values
                    .iter()
                    .zip(refer)
                    .map(|(value, refer)| {
                        [
                            value[0] - scales[0] * refer[0],
                            value[1] - scales[1] * refer[1],
                        ]
                    })
                    .collect(),
            ))
        }
        _ => None,
    }
}

fn diff_axis(values: MinMax, refer: MinMax, scale: f64) -> MinMax {
    [values[0] - scale * refer[0], values[1] - scale * refer[1]]
}

/// Per-axis ratio of the current extent size to the original one.
///
/// Falls back to `1` when either extent is zero-sized or the ratio is not
/// finite (`NaN` extents of line brushes).
#[must_use]
pub fn get_scales(current: &[MinMax; 2], origin: &[MinMax; 2]) -> [f64; 2] {
    let current = extent_size(current);
    let origin = extent_size(origin);
    [0, 1].map(|i| {
        let scale = current[i] / origin[i];
        if current[i] == 0.0 || origin[i] == 0.0 || !scale.is_finite() {
            1.0
        } else {
            scale
        }
    })
}

fn extent_size(xy_min_max: &[MinMax; 2]) -> [f64; 2] {
    xy_min_max.map(|extent| extent[1] - extent[0])
}

#[cfg(test)]
mod tests {
    use super::{diff, get_scales};
    use crate::brush::{BrushRange, BrushType};

    #[test]
    fn scales_are_size_ratios() {
        let scales = get_scales(&[[0.0, 40.0], [10.0, 20.0]], &[[5.0, 25.0], [0.0, 20.0]]);
        assert_eq!(scales, [2.0, 0.5]);
    }

    #[test]
    fn zero_or_nan_extents_fall_back_to_unit_scale() {
        let scales = get_scales(&[[0.0, 40.0], [3.0, 3.0]], &[[5.0, 5.0], [3.0, 3.0]]);
        assert_eq!(scales, [1.0, 1.0]);

        let scales = get_scales(&[[5.0, 5.0], [0.0, 10.0]], &[[0.0, 10.0], [0.0, 10.0]]);
        assert_eq!(scales, [1.0, 1.0]);

        let nan = [f64::NAN, f64::NAN];
        let scales = get_scales(&[[0.0, 40.0], nan], &[[0.0, 20.0], nan]);
        assert_eq!(scales, [2.0, 1.0]);
    }

    #[test]
    fn rect_diff_scales_each_axis() {
        let values = BrushRange::Rect([[10.0, 50.0], [20.0, 80.0]]);
        let refer = BrushRange::Rect([[1.0, -1.0], [2.0, 0.0]]);
        assert_eq!(
            diff(BrushType::Rect, &values, &refer, [2.0, 3.0]),
            Some(BrushRange::Rect([[8.0, 52.0], [14.0, 80.0]]))
        );
    }

    #[test]
    fn line_diff_uses_its_own_axis_scale() {
        let values = BrushRange::Linear([10.0, 20.0]);
        let refer = BrushRange::Linear([1.0, 1.0]);
        assert_eq!(
            diff(BrushType::LineY, &values, &refer, [5.0, 2.0]),
            Some(BrushRange::Linear([8.0, 18.0]))
        );
    }

    #[test]
    fn polygon_diff_broadcasts_scales_and_rejects_vertex_mismatch() {
        let values = BrushRange::Polygon(vec![[10.0, 10.0], [20.0, 30.0]]);
        let refer = BrushRange::Polygon(vec![[1.0, 1.0], [-1.0, 2.0]]);
        assert_eq!(
            diff(BrushType::Polygon, &values, &refer, [2.0, 1.0]),
            Some(BrushRange::Polygon(vec![[8.0, 9.0], [22.0, 28.0]]))
        );

        let short = BrushRange::Polygon(vec![[1.0, 1.0]]);
        assert_eq!(diff(BrushType::Polygon, &values, &short, [1.0, 1.0]), None);
    }
}
