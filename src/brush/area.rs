use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{MinMax, Vec2};
use crate::error::{BrushError, BrushResult};
use crate::finder::FinderOption;

/// Shape semantics of a brush selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrushType {
    LineX,
    LineY,
    Rect,
    Polygon,
}

impl BrushType {
    pub const ALL: [Self; 4] = [Self::LineX, Self::LineY, Self::Rect, Self::Polygon];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineX => "lineX",
            Self::LineY => "lineY",
            Self::Rect => "rect",
            Self::Polygon => "polygon",
        }
    }

    /// Human-readable shape expected for ranges of this brush type.
    #[must_use]
    pub const fn expected_shape(self) -> &'static str {
        match self {
            Self::LineX | Self::LineY => "[min, max]",
            Self::Rect => "[[xMin, xMax], [yMin, yMax]]",
            Self::Polygon => "[[x, y], ...]",
        }
    }
}

impl fmt::Display for BrushType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selection shape in pixel or data space.
///
/// Rect and polygon ranges share the same JSON shape for two vertices, so
/// parsing goes through [`BrushRange::from_json`] with the brush type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BrushRange {
    Linear(MinMax),
    Rect([MinMax; 2]),
    Polygon(Vec<Vec2>),
}

impl BrushRange {
    #[must_use]
    pub fn fits(&self, brush_type: BrushType) -> bool {
        matches!(
            (self, brush_type),
            (Self::Linear(_), BrushType::LineX | BrushType::LineY)
                | (Self::Rect(_), BrushType::Rect)
                | (Self::Polygon(_), BrushType::Polygon)
        )
    }

    pub fn from_json(brush_type: BrushType, value: &Value) -> BrushResult<Self> {
        let mismatch = || BrushError::RangeShapeMismatch {
            brush_type,
            expected: brush_type.expected_shape(),
        };
        match brush_type {
            BrushType::LineX | BrushType::LineY => {
                serde_json::from_value::<MinMax>(value.clone())
                    .map(Self::Linear)
                    .map_err(|_| mismatch())
            }
            BrushType::Rect => serde_json::from_value::<[MinMax; 2]>(value.clone())
                .map(Self::Rect)
                .map_err(|_| mismatch()),
            BrushType::Polygon => serde_json::from_value::<Vec<Vec2>>(value.clone())
                .map(Self::Polygon)
                .map_err(|_| mismatch()),
        }
    }
}

/// Pixel offset memo captured on the first output conversion of an area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeOffset {
    /// Reconverted pixel range minus the original pixel range, at unit scale.
    pub offset: BrushRange,
    /// Pixel extents of the reconverted range; `NaN` on the unused axis of
    /// line brushes.
    #[serde(with = "nan_extent")]
    pub xy_min_max: [MinMax; 2],
}

/// One user-visible brush selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawBrushArea")]
pub struct BrushArea {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_id: Option<String>,
    pub brush_type: BrushType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<BrushRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord_range: Option<BrushRange>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coord_ranges: Vec<BrushRange>,
    #[serde(rename = "__rangeOffset", skip_serializing_if = "Option::is_none")]
    pub range_offset: Option<RangeOffset>,
    #[serde(flatten)]
    pub finder: FinderOption,
}

impl BrushArea {
    #[must_use]
    pub fn new(brush_type: BrushType) -> Self {
        Self {
            panel_id: None,
            brush_type,
            range: None,
            coord_range: None,
            coord_ranges: Vec::new(),
            range_offset: None,
            finder: FinderOption::new(),
        }
    }

    #[must_use]
    pub fn rect(range: [MinMax; 2]) -> Self {
        Self::new(BrushType::Rect).with_range(BrushRange::Rect(range))
    }

    #[must_use]
    pub fn polygon(points: Vec<Vec2>) -> Self {
        Self::new(BrushType::Polygon).with_range(BrushRange::Polygon(points))
    }

    #[must_use]
    pub fn line_x(range: MinMax) -> Self {
        Self::new(BrushType::LineX).with_range(BrushRange::Linear(range))
    }

    #[must_use]
    pub fn line_y(range: MinMax) -> Self {
        Self::new(BrushType::LineY).with_range(BrushRange::Linear(range))
    }

    #[must_use]
    pub fn with_range(mut self, range: BrushRange) -> Self {
        self.range = Some(range);
        self
    }

    #[must_use]
    pub fn with_coord_range(mut self, coord_range: BrushRange) -> Self {
        self.coord_range = Some(coord_range);
        self
    }

    #[must_use]
    pub fn with_panel_id(mut self, panel_id: impl Into<String>) -> Self {
        self.panel_id = Some(panel_id.into());
        self
    }

    #[must_use]
    pub fn with_finder(mut self, finder: FinderOption) -> Self {
        self.finder = finder;
        self
    }

    pub fn from_json_str(input: &str) -> BrushResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| BrushError::InvalidData(format!("failed to parse brush area: {e}")))
    }

    pub fn to_json_pretty(&self) -> BrushResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BrushError::InvalidData(format!("failed to serialize brush area: {e}")))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBrushArea {
    #[serde(default)]
    panel_id: Option<String>,
    brush_type: BrushType,
    #[serde(default)]
    range: Option<Value>,
    #[serde(default)]
    coord_range: Option<Value>,
    #[serde(default)]
    coord_ranges: Option<Vec<Value>>,
    #[serde(default, rename = "__rangeOffset")]
    range_offset: Option<RawRangeOffset>,
    #[serde(flatten)]
    finder: FinderOption,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRangeOffset {
    offset: Value,
    #[serde(with = "nan_extent")]
    xy_min_max: [MinMax; 2],
}

impl TryFrom<RawBrushArea> for BrushArea {
    type Error = BrushError;

    fn try_from(raw: RawBrushArea) -> Result<Self, Self::Error> {
        let brush_type = raw.brush_type;
        let parse = |value: &Value| BrushRange::from_json(brush_type, value);
        let range_offset = raw
            .range_offset
            .map(|offset| -> BrushResult<RangeOffset> {
                Ok(RangeOffset {
                    offset: parse(&offset.offset)?,
                    xy_min_max: offset.xy_min_max,
                })
            })
            .transpose()?;
        Ok(Self {
            panel_id: raw.panel_id,
            brush_type,
            range: raw.range.as_ref().map(parse).transpose()?,
            coord_range: raw.coord_range.as_ref().map(parse).transpose()?,
            coord_ranges: raw
                .coord_ranges
                .unwrap_or_default()
                .iter()
                .map(parse)
                .collect::<BrushResult<_>>()?,
            range_offset,
            finder: raw.finder,
        })
    }
}

/// JSON has no `NaN`; unused line-brush extents travel as `null`.
mod nan_extent {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::core::MinMax;

    pub fn serialize<S: Serializer>(
        extent: &[MinMax; 2],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let as_options = extent.map(|pair| pair.map(|v| if v.is_nan() { None } else { Some(v) }));
        as_options.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[MinMax; 2], D::Error> {
        let as_options = <[[Option<f64>; 2]; 2]>::deserialize(deserializer)?;
        Ok(as_options.map(|pair| pair.map(|v| v.unwrap_or(f64::NAN))))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{BrushArea, BrushRange, BrushType, RangeOffset};
    use crate::model::ComponentFamily;

    #[test]
    fn brush_type_uses_camel_case_names() {
        for brush_type in BrushType::ALL {
            let json = serde_json::to_value(brush_type).expect("serialize");
            assert_eq!(json, json!(brush_type.as_str()));
        }
    }

    #[test]
    fn two_vertex_ranges_parse_by_brush_type() {
        let value = json!([[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(
            BrushRange::from_json(BrushType::Rect, &value).expect("rect"),
            BrushRange::Rect([[1.0, 2.0], [3.0, 4.0]])
        );
        assert_eq!(
            BrushRange::from_json(BrushType::Polygon, &value).expect("polygon"),
            BrushRange::Polygon(vec![[1.0, 2.0], [3.0, 4.0]])
        );
        let err = BrushRange::from_json(BrushType::LineX, &value).expect_err("line mismatch");
        assert!(format!("{err}").contains("[min, max]"));
    }

    #[test]
    fn area_json_keeps_finder_keys_and_offset() {
        let input = json!({
            "brushType": "lineX",
            "xAxisIndex": 0,
            "coordRange": [2, 5],
            "__rangeOffset": {
                "offset": [0.5, -0.5],
                "xyMinMax": [[10.0, 40.0], [null, null]]
            },
            "unknownKey": true
        });
        let area: BrushArea = serde_json::from_value(input).expect("area");
        assert_eq!(area.brush_type, BrushType::LineX);
        assert_eq!(area.coord_range, Some(BrushRange::Linear([2.0, 5.0])));
        assert!(area.finder.query(ComponentFamily::XAxis).is_some());
        let offset = area.range_offset.as_ref().expect("offset");
        assert!(offset.xy_min_max[1][0].is_nan());

        let json = serde_json::to_value(&area).expect("serialize");
        assert_eq!(json["xAxisIndex"], json!([0]));
        assert_eq!(json["__rangeOffset"]["xyMinMax"][1], json!([null, null]));
        assert!(json.get("unknownKey").is_none());
    }

    #[test]
    fn area_with_wrong_range_shape_is_rejected() {
        let err = BrushArea::from_json_str(r#"{"brushType":"rect","range":[1,2]}"#)
            .expect_err("shape mismatch");
        assert!(format!("{err}").contains("rect"));
    }

    #[test]
    fn range_fits_only_its_brush_types() {
        let linear = BrushRange::Linear([0.0, 1.0]);
        assert!(linear.fits(BrushType::LineX));
        assert!(linear.fits(BrushType::LineY));
        assert!(!linear.fits(BrushType::Rect));
        let offset = RangeOffset {
            offset: BrushRange::Polygon(vec![[0.0, 0.0]]),
            xy_min_max: [[0.0, 0.0], [0.0, 0.0]],
        };
        assert!(offset.offset.fits(BrushType::Polygon));
    }
}
