use serde::{Deserialize, Serialize};

use crate::core::{MinMax, format_min_max};
use crate::error::{BrushError, BrushResult};

/// Continuous numeric scale over a visible `[min, max]` domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    min: f64,
    max: f64,
}

impl ValueScale {
    pub fn new(min: f64, max: f64) -> BrushResult<Self> {
        validate_domain(min, max)?;
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn extent(self) -> MinMax {
        [self.min, self.max]
    }

    #[must_use]
    pub fn normalize(self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    #[must_use]
    pub fn scale(self, ratio: f64) -> f64 {
        self.min + ratio * (self.max - self.min)
    }
}

/// Ordinal scale over category indices.
///
/// `window` is the visible index range; zooming narrows it. Mapping a pixel
/// back to data snaps to the nearest index, so `data -> pixel -> data` is
/// exact but `pixel -> data -> pixel` is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScale {
    categories: Vec<String>,
    window: MinMax,
    #[serde(default = "default_boundary_gap")]
    boundary_gap: bool,
}

fn default_boundary_gap() -> bool {
    true
}

impl CategoryScale {
    pub fn new<I, S>(categories: I) -> BrushResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        if categories.is_empty() {
            return Err(BrushError::InvalidData(
                "category scale needs at least one category".to_owned(),
            ));
        }
        let last = (categories.len() - 1) as f64;
        Ok(Self {
            categories,
            window: [0.0, last],
            boundary_gap: true,
        })
    }

    /// Places categories on axis ticks instead of band centers.
    #[must_use]
    pub fn without_boundary_gap(mut self) -> Self {
        self.boundary_gap = false;
        self
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    #[must_use]
    pub fn window(&self) -> MinMax {
        self.window
    }

    #[must_use]
    pub fn boundary_gap(&self) -> bool {
        self.boundary_gap
    }

    /// Number of visible categories.
    #[must_use]
    pub fn count(&self) -> f64 {
        self.window[1] - self.window[0] + 1.0
    }

    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.window[1] - self.window[0];
        if span == 0.0 {
            return 0.5;
        }
        (value - self.window[0]) / span
    }

    #[must_use]
    pub fn scale(&self, ratio: f64) -> f64 {
        (self.window[0] + ratio * (self.window[1] - self.window[0])).round()
    }

    fn set_window(&mut self, start: f64, end: f64) -> BrushResult<()> {
        if !start.is_finite() || !end.is_finite() {
            return Err(BrushError::InvalidData(
                "category window must be finite".to_owned(),
            ));
        }
        let last = (self.categories.len() - 1) as f64;
        let [start, end] = format_min_max([start.round(), end.round()]);
        self.window = [start.clamp(0.0, last), end.clamp(0.0, last)];
        Ok(())
    }
}

/// Scale attached to an axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AxisScale {
    Value(ValueScale),
    Category(CategoryScale),
}

impl AxisScale {
    pub fn value(min: f64, max: f64) -> BrushResult<Self> {
        ValueScale::new(min, max).map(Self::Value)
    }

    pub fn category<I, S>(categories: I) -> BrushResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryScale::new(categories).map(Self::Category)
    }

    /// Visible data extent.
    #[must_use]
    pub fn extent(&self) -> MinMax {
        match self {
            Self::Value(scale) => scale.extent(),
            Self::Category(scale) => scale.window(),
        }
    }

    /// Band count when data sits in band centers, `None` otherwise.
    #[must_use]
    pub fn band_count(&self) -> Option<f64> {
        match self {
            Self::Category(scale) if scale.boundary_gap() => Some(scale.count()),
            _ => None,
        }
    }

    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        match self {
            Self::Value(scale) => scale.normalize(value),
            Self::Category(scale) => scale.normalize(value),
        }
    }

    #[must_use]
    pub fn scale(&self, ratio: f64) -> f64 {
        match self {
            Self::Value(scale) => scale.scale(ratio),
            Self::Category(scale) => scale.scale(ratio),
        }
    }

    /// Replaces the visible extent, as a data zoom does.
    pub fn set_extent(&mut self, start: f64, end: f64) -> BrushResult<()> {
        match self {
            Self::Value(scale) => {
                let [min, max] = format_min_max([start, end]);
                *scale = ValueScale::new(min, max)?;
                Ok(())
            }
            Self::Category(scale) => scale.set_window(start, end),
        }
    }

    /// Zooms the visible extent around `anchor`.
    ///
    /// `factor > 1.0` zooms in, `0.0 < factor < 1.0` zooms out.
    pub fn zoom(&mut self, factor: f64, anchor: f64) -> BrushResult<()> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(BrushError::InvalidData(
                "zoom factor must be finite and > 0".to_owned(),
            ));
        }
        if !anchor.is_finite() {
            return Err(BrushError::InvalidData(
                "zoom anchor must be finite".to_owned(),
            ));
        }
        let [start, end] = self.extent();
        let new_start = anchor - (anchor - start) / factor;
        let new_end = anchor + (end - anchor) / factor;
        self.set_extent(new_start, new_end)
    }
}

fn validate_domain(min: f64, max: f64) -> BrushResult<()> {
    if !min.is_finite() || !max.is_finite() || min == max {
        return Err(BrushError::InvalidData(
            "scale domain must be finite and non-zero".to_owned(),
        ));
    }
    Ok(())
}
