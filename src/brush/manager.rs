use tracing::{debug, trace};

use crate::config::TargetManagerSettings;
use crate::coord::ConvertDirection;
use crate::error::{BrushError, BrushResult};
use crate::finder::{FinderOption, FoundComponents};
use crate::model::{GlobalModel, SeriesModel};

use super::area::{BrushArea, BrushRange, BrushType, RangeOffset};
use super::convert::convert;
use super::diff::{diff, get_scales};
use super::panel::PanelOpt;
use super::target_info::{TargetFamily, TargetInfo};

/// Where an area applies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TargetLookup<'a> {
    /// Bound to one panel.
    Bound(&'a TargetInfo),
    /// Not bound to any panel or component: applies to every coordinate
    /// system.
    Global,
    /// Bound to a panel id this manager does not know (e.g. the grid was
    /// removed since the area was drawn).
    Unresolved,
}

/// Result of converting an area's pixel range into data space.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputUpdate {
    /// One data range per coordinate system of the panel, in panel order.
    pub coord_ranges: Vec<BrushRange>,
    /// Set when the area had no `coord_range` yet.
    pub initial: Option<InitialCoordRange>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitialCoordRange {
    pub coord_range: BrushRange,
    pub range_offset: Option<RangeOffset>,
}

/// Result of converting an area's data range back into pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct InputUpdate {
    pub panel_id: String,
    pub range: BrushRange,
}

/// Resolves brush areas to coordinate systems and converts their ranges.
///
/// Built once per render from the current model; immutable afterwards.
/// Rebuild it whenever the set of coordinate systems or their scales change.
#[derive(Debug, Clone)]
pub struct BrushTargetManager {
    target_infos: Vec<TargetInfo>,
}

impl BrushTargetManager {
    pub fn new(
        option: &FinderOption,
        model: &GlobalModel,
        settings: TargetManagerSettings,
    ) -> BrushResult<Self> {
        let settings = settings.validate()?;
        let found = FoundComponents::resolve(model, option);
        let mut target_infos = Vec::new();
        for family in settings.enabled_families() {
            family.build(&found, model, &mut target_infos)?;
        }
        debug!(panels = target_infos.len(), "built brush target infos");
        Ok(Self { target_infos })
    }

    #[must_use]
    pub fn target_infos(&self) -> &[TargetInfo] {
        &self.target_infos
    }

    #[must_use]
    pub fn target_info(&self, panel_id: &str) -> Option<&TargetInfo> {
        self.target_infos
            .iter()
            .find(|target| target.panel_id() == panel_id)
    }

    /// Finds the panel an area applies to.
    ///
    /// A `panel_id` binds directly. Otherwise the area's own finder references
    /// are resolved and matched against every panel; when nothing matches the
    /// area is global.
    #[must_use]
    pub fn find_target_info(&self, area: &BrushArea, model: &GlobalModel) -> TargetLookup<'_> {
        if let Some(panel_id) = &area.panel_id {
            return self
                .target_info(panel_id)
                .map_or(TargetLookup::Unresolved, TargetLookup::Bound);
        }

        let found = FoundComponents::resolve(model, &area.finder);
        self.target_infos
            .iter()
            .find(|target| {
                TargetFamily::ORDER
                    .into_iter()
                    .any(|family| family.matches(&found, model, target))
            })
            .map_or(TargetLookup::Global, TargetLookup::Bound)
    }

    /// Converts `area.range` into data ranges without touching the area.
    ///
    /// `None` when the area is not bound to a panel.
    pub fn output_ranges(
        &self,
        area: &BrushArea,
        model: &GlobalModel,
    ) -> BrushResult<Option<OutputUpdate>> {
        let TargetLookup::Bound(target) = self.find_target_info(area, model) else {
            return Ok(None);
        };
        let range = area
            .range
            .as_ref()
            .ok_or(BrushError::MissingRange { which: "range" })?;

        let coord_ranges = target
            .coord_syses()
            .iter()
            .map(|coord_sys| {
                convert(area.brush_type, ConvertDirection::ToData, coord_sys, range)
                    .map(|converted| converted.values)
            })
            .collect::<BrushResult<Vec<_>>>()?;

        let initial = match (&area.coord_range, coord_ranges.first()) {
            (None, Some(coord_range)) => {
                // Pixel -> data is not invertible on category axes, so keep the
                // drift of the reconverted range for later reconstruction.
                let reconverted = convert(
                    area.brush_type,
                    ConvertDirection::ToPixel,
                    target.coord_sys(),
                    coord_range,
                )?;
                let range_offset = diff(area.brush_type, &reconverted.values, range, [1.0, 1.0])
                    .map(|offset| RangeOffset {
                        offset,
                        xy_min_max: reconverted.xy_min_max,
                    });
                Some(InitialCoordRange {
                    coord_range: coord_range.clone(),
                    range_offset,
                })
            }
            _ => None,
        };

        trace!(
            panel_id = target.panel_id(),
            brush_type = %area.brush_type,
            coord_ranges = coord_ranges.len(),
            "output brush range"
        );
        Ok(Some(OutputUpdate {
            coord_ranges,
            initial,
        }))
    }

    /// Converts pixel ranges of bound areas into data ranges in place.
    ///
    /// Appends to `coord_ranges`; the first conversion of an area also sets
    /// `coord_range` and the offset memo. Every area is converted before any
    /// is written, so on error the slice is left untouched.
    pub fn set_output_ranges(
        &self,
        areas: &mut [BrushArea],
        model: &GlobalModel,
    ) -> BrushResult<()> {
        let updates = areas
            .iter()
            .map(|area| self.output_ranges(area, model))
            .collect::<BrushResult<Vec<_>>>()?;
        for (area, update) in areas.iter_mut().zip(updates) {
            let Some(update) = update else {
                continue;
            };
            area.coord_ranges.extend(update.coord_ranges);
            if let Some(initial) = update.initial {
                area.coord_range = Some(initial.coord_range);
                area.range_offset = initial.range_offset;
            }
        }
        Ok(())
    }

    /// Rebuilds the pixel range of an area from its `coord_range` without
    /// touching the area.
    ///
    /// With an offset memo the result is `fresh - scale ⊙ offset`, where
    /// `scale` is the growth of the pixel extent since the memo was taken.
    pub fn input_ranges(
        &self,
        area: &BrushArea,
        model: &GlobalModel,
    ) -> BrushResult<Option<InputUpdate>> {
        let TargetLookup::Bound(target) = self.find_target_info(area, model) else {
            return Ok(None);
        };
        let coord_range = area
            .coord_range
            .as_ref()
            .ok_or(BrushError::MissingRange {
                which: "coordRange",
            })?;

        let fresh = convert(
            area.brush_type,
            ConvertDirection::ToPixel,
            target.coord_sys(),
            coord_range,
        )?;
        let range = match &area.range_offset {
            Some(range_offset) => {
                let scales = get_scales(&fresh.xy_min_max, &range_offset.xy_min_max);
                match diff(area.brush_type, &fresh.values, &range_offset.offset, scales) {
                    Some(range) => range,
                    None => {
                        debug!(
                            panel_id = target.panel_id(),
                            "range offset no longer fits coord range, ignoring it"
                        );
                        fresh.values
                    }
                }
            }
            None => fresh.values,
        };

        trace!(
            panel_id = target.panel_id(),
            brush_type = %area.brush_type,
            "input brush range"
        );
        Ok(Some(InputUpdate {
            panel_id: target.panel_id().to_owned(),
            range,
        }))
    }

    /// Rebuilds pixel ranges of bound areas from their data ranges in place
    /// and binds them to their panel. On error the slice is left untouched.
    pub fn set_input_ranges(
        &self,
        areas: &mut [BrushArea],
        model: &GlobalModel,
    ) -> BrushResult<()> {
        let updates = areas
            .iter()
            .map(|area| self.input_ranges(area, model))
            .collect::<BrushResult<Vec<_>>>()?;
        for (area, update) in areas.iter_mut().zip(updates) {
            let Some(update) = update else {
                continue;
            };
            area.panel_id = Some(update.panel_id);
            area.range = Some(update.range);
        }
        Ok(())
    }

    /// Panel descriptors for the brush controller, one per target info.
    ///
    /// Cursor hit-testing takes the host's element lookup at call time, see
    /// [`PanelOpt::is_target_by_cursor`].
    pub fn make_panel_opts<F>(&self, default_brush_type: F) -> Vec<PanelOpt>
    where
        F: Fn(&TargetInfo) -> Option<BrushType>,
    {
        self.target_infos
            .iter()
            .map(|target| {
                PanelOpt::new(
                    target.panel_id(),
                    default_brush_type(target),
                    target.panel_rect(),
                    target.coord_sys_model(),
                )
            })
            .collect()
    }

    /// Whether a brush area selects data of `series`.
    ///
    /// Global areas control every series; bound areas only series drawn in one
    /// of the panel's coordinate systems.
    #[must_use]
    pub fn control_series(
        &self,
        area: &BrushArea,
        series: &SeriesModel,
        model: &GlobalModel,
    ) -> bool {
        match self.find_target_info(area, model) {
            TargetLookup::Global => true,
            TargetLookup::Unresolved => false,
            TargetLookup::Bound(target) => match model.series_coord_sys(series) {
                Ok(Some(id)) => target
                    .coord_syses()
                    .iter()
                    .any(|coord_sys| coord_sys.id() == id),
                Ok(None) => false,
                Err(err) => {
                    debug!(error = %err, "series coordinate system not resolvable");
                    false
                }
            },
        }
    }
}
