//! Pixel/data conversion of brush ranges.
//!
//! Each brush shape converts through one function for both directions; only
//! the coordinate-system method invoked per point flips.

use crate::coord::{AxisDim, ConvertDirection, CoordSys};
use crate::core::{MinMax, Vec2, format_min_max};
use crate::error::{BrushError, BrushResult};

use super::area::{BrushRange, BrushType};

/// A converted range plus its per-axis bounding extents.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    pub values: BrushRange,
    /// `[[xMin, xMax], [yMin, yMax]]` of `values`; `NaN` on the unused
    /// axis of line brushes.
    pub xy_min_max: [MinMax; 2],
}

pub fn convert(
    brush_type: BrushType,
    direction: ConvertDirection,
    coord_sys: &CoordSys,
    range: &BrushRange,
) -> BrushResult<Converted> {
    match (brush_type, range) {
        (BrushType::LineX, BrushRange::Linear(pair)) => {
            convert_axis(brush_type, AxisDim::X, direction, coord_sys, *pair)
        }
        (BrushType::LineY, BrushRange::Linear(pair)) => {
            convert_axis(brush_type, AxisDim::Y, direction, coord_sys, *pair)
        }
        (BrushType::Rect, BrushRange::Rect(rect)) => Ok(convert_rect(direction, coord_sys, rect)),
        (BrushType::Polygon, BrushRange::Polygon(points)) => {
            Ok(convert_polygon(direction, coord_sys, points))
        }
        _ => Err(BrushError::RangeShapeMismatch {
            brush_type,
            expected: brush_type.expected_shape(),
        }),
    }
}

fn convert_rect(
    direction: ConvertDirection,
    coord_sys: &CoordSys,
    rect: &[MinMax; 2],
) -> Converted {
    let min_corner = coord_sys.convert_point(direction, [rect[0][0], rect[1][0]]);
    let max_corner = coord_sys.convert_point(direction, [rect[0][1], rect[1][1]]);
    let values = [
        format_min_max([min_corner[0], max_corner[0]]),
        format_min_max([min_corner[1], max_corner[1]]),
    ];
    Converted {
        values: BrushRange::Rect(values),
        xy_min_max: values,
    }
}

fn convert_polygon(
    direction: ConvertDirection,
    coord_sys: &CoordSys,
    points: &[Vec2],
) -> Converted {
    let mut xy_min_max = [
        [f64::INFINITY, f64::NEG_INFINITY],
        [f64::INFINITY, f64::NEG_INFINITY],
    ];
    let values = points
        .iter()
        .map(|point| {
            let converted = coord_sys.convert_point(direction, *point);
            for (extent, value) in xy_min_max.iter_mut().zip(converted) {
                extent[0] = extent[0].min(value);
                extent[1] = extent[1].max(value);
            }
            converted
        })
        .collect();
    Converted {
        values: BrushRange::Polygon(values),
        xy_min_max,
    }
}

fn convert_axis(
    brush_type: BrushType,
    dim: AxisDim,
    direction: ConvertDirection,
    coord_sys: &CoordSys,
    pair: MinMax,
) -> BrushResult<Converted> {
    let axis = coord_sys
        .axis(dim)
        .ok_or(BrushError::AxisRequired { brush_type })?;
    let values = format_min_max(pair.map(|value| match direction {
        ConvertDirection::ToData => axis.coord_to_data(axis.to_local_coord(value)),
        ConvertDirection::ToPixel => axis.to_global_coord(axis.data_to_coord(value)),
    }));
    let mut xy_min_max = [[f64::NAN, f64::NAN]; 2];
    xy_min_max[dim.index()] = values;
    Ok(Converted {
        values: BrushRange::Linear(values),
        xy_min_max,
    })
}

#[cfg(test)]
mod tests {
    use super::convert;
    use crate::brush::{BrushRange, BrushType};
    use crate::coord::{Axis, AxisDim, AxisScale, Cartesian2D, ConvertDirection, CoordSys, GeoView};
    use crate::core::Rect;

    fn value_cartesian() -> CoordSys {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        CoordSys::Cartesian(Cartesian2D::new(
            0,
            rect,
            Axis::new(AxisDim::X, 0, AxisScale::value(0.0, 10.0).expect("x"), [0.0, 100.0], 0.0),
            Axis::new(AxisDim::Y, 0, AxisScale::value(0.0, 10.0).expect("y"), [0.0, 100.0], 0.0),
        ))
    }

    #[test]
    fn rect_is_normalized_after_y_flip() {
        let coord_sys = value_cartesian();
        let range = BrushRange::Rect([[10.0, 50.0], [20.0, 80.0]]);
        let converted =
            convert(BrushType::Rect, ConvertDirection::ToData, &coord_sys, &range).expect("rect");
        assert_eq!(converted.values, BrushRange::Rect([[1.0, 5.0], [2.0, 8.0]]));
        assert_eq!(converted.xy_min_max, [[1.0, 5.0], [2.0, 8.0]]);
    }

    #[test]
    fn polygon_tracks_running_extents() {
        let coord_sys = value_cartesian();
        let range = BrushRange::Polygon(vec![[10.0, 90.0], [60.0, 40.0], [30.0, 20.0]]);
        let converted = convert(BrushType::Polygon, ConvertDirection::ToData, &coord_sys, &range)
            .expect("polygon");
        assert_eq!(
            converted.values,
            BrushRange::Polygon(vec![[1.0, 1.0], [6.0, 6.0], [3.0, 8.0]])
        );
        assert_eq!(converted.xy_min_max, [[1.0, 6.0], [1.0, 8.0]]);
    }

    #[test]
    fn line_y_marks_unused_axis_as_nan() {
        let coord_sys = value_cartesian();
        let converted = convert(
            BrushType::LineY,
            ConvertDirection::ToPixel,
            &coord_sys,
            &BrushRange::Linear([7.0, 2.0]),
        )
        .expect("lineY");
        assert_eq!(converted.values, BrushRange::Linear([30.0, 80.0]));
        assert!(converted.xy_min_max[0].iter().all(|v| v.is_nan()));
        assert_eq!(converted.xy_min_max[1], [30.0, 80.0]);
    }

    #[test]
    fn line_brush_on_geo_requires_axis() {
        let geo = GeoView::fitted(
            0,
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(0.0, 0.0, 100.0, 100.0),
            1.0,
            [0.0, 0.0],
        )
        .expect("geo");
        let err = convert(
            BrushType::LineX,
            ConvertDirection::ToData,
            &CoordSys::Geo(geo),
            &BrushRange::Linear([0.0, 1.0]),
        )
        .expect_err("geo has no axis");
        assert!(format!("{err}").contains("axis-based"));
    }

    #[test]
    fn mismatched_shape_is_an_error() {
        let err = convert(
            BrushType::Rect,
            ConvertDirection::ToData,
            &value_cartesian(),
            &BrushRange::Linear([0.0, 1.0]),
        )
        .expect_err("mismatch");
        assert!(format!("{err}").contains("[[xMin, xMax], [yMin, yMax]]"));
    }
}
