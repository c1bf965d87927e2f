use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coord::{AxisDim, CoordSys};
use crate::core::Rect;
use crate::error::BrushResult;
use crate::finder::FoundComponents;
use crate::model::{ComponentFamily, ComponentKey, GlobalModel};

/// Coordinate-system families that produce brush panels, in build and
/// match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetFamily {
    Grid,
    Geo,
}

impl TargetFamily {
    pub const ORDER: [Self; 2] = [Self::Grid, Self::Geo];

    #[must_use]
    pub const fn panel_prefix(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Geo => "geo",
        }
    }

    /// Appends the target infos of this family found in `found`.
    pub fn build(
        self,
        found: &FoundComponents,
        model: &GlobalModel,
        out: &mut Vec<TargetInfo>,
    ) -> BrushResult<()> {
        match self {
            Self::Grid => build_grid_targets(found, model, out),
            Self::Geo => build_geo_targets(found, model, out),
        }
    }

    /// Whether `found` designates `target`.
    #[must_use]
    pub fn matches(
        self,
        found: &FoundComponents,
        model: &GlobalModel,
        target: &TargetInfo,
    ) -> bool {
        match self {
            Self::Grid => match_grid(found, model, target),
            Self::Geo => match_geo(found, target),
        }
    }
}

/// One brushable panel: a grid (with the Cartesians brushing applies to)
/// or a geo view.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetInfo {
    panel_id: String,
    family: TargetFamily,
    coord_sys_model: ComponentKey,
    // Never empty; the first entry is the representative system.
    coord_syses: Vec<CoordSys>,
    x_axis_declared: bool,
    y_axis_declared: bool,
}

impl TargetInfo {
    #[must_use]
    pub fn panel_id(&self) -> &str {
        &self.panel_id
    }

    #[must_use]
    pub fn family(&self) -> TargetFamily {
        self.family
    }

    /// The grid or geo component owning this panel.
    #[must_use]
    pub fn coord_sys_model(&self) -> ComponentKey {
        self.coord_sys_model
    }

    /// Representative coordinate system (first Cartesian of a grid).
    #[must_use]
    pub fn coord_sys(&self) -> &CoordSys {
        &self.coord_syses[0]
    }

    #[must_use]
    pub fn coord_syses(&self) -> &[CoordSys] {
        &self.coord_syses
    }

    /// Whether an x axis of this grid was referenced. Always `false` for geo.
    #[must_use]
    pub fn x_axis_declared(&self) -> bool {
        self.x_axis_declared
    }

    #[must_use]
    pub fn y_axis_declared(&self) -> bool {
        self.y_axis_declared
    }

    /// Pixel rect brushing is confined to.
    #[must_use]
    pub fn panel_rect(&self) -> Rect {
        match self.coord_sys() {
            CoordSys::Cartesian(cartesian) => cartesian.grid_rect(),
            CoordSys::Geo(geo) => geo.view_rect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct GridDeclaration {
    x_axis: bool,
    y_axis: bool,
    whole_grid: bool,
}

fn build_grid_targets(
    found: &FoundComponents,
    model: &GlobalModel,
    out: &mut Vec<TargetInfo>,
) -> BrushResult<()> {
    let x_axes = found.models(ComponentFamily::XAxis);
    let y_axes = found.models(ComponentFamily::YAxis);
    let grids = found.models(ComponentFamily::Grid);
    if x_axes.is_none() && y_axes.is_none() && grids.is_none() {
        return Ok(());
    }
    let x_axes = x_axes.unwrap_or_default();
    let y_axes = y_axes.unwrap_or_default();

    // Keyed by grid index so an axis and its grid referenced together count once.
    let mut declared: IndexMap<usize, GridDeclaration> = IndexMap::new();
    for &axis_index in x_axes {
        let grid_index = model.axis_grid(AxisDim::X, axis_index)?;
        declared.entry(grid_index).or_default().x_axis = true;
    }
    for &axis_index in y_axes {
        let grid_index = model.axis_grid(AxisDim::Y, axis_index)?;
        declared.entry(grid_index).or_default().y_axis = true;
    }
    for &grid_index in grids.unwrap_or_default() {
        declared.insert(
            grid_index,
            GridDeclaration {
                x_axis: true,
                y_axis: true,
                whole_grid: true,
            },
        );
    }

    for (grid_index, declaration) in declared {
        let cartesians: Vec<CoordSys> = model
            .cartesians(grid_index)?
            .into_iter()
            .filter(|cartesian| {
                declaration.whole_grid
                    || x_axes.contains(&cartesian.axis(AxisDim::X).model_index())
                    || y_axes.contains(&cartesian.axis(AxisDim::Y).model_index())
            })
            .map(CoordSys::Cartesian)
            .collect();
        if cartesians.is_empty() {
            debug!(grid_index, "grid has no cartesian to brush, skipping panel");
            continue;
        }

        let grid = model.grid(grid_index)?;
        out.push(TargetInfo {
            panel_id: panel_id(TargetFamily::Grid, &grid.meta.id),
            family: TargetFamily::Grid,
            coord_sys_model: ComponentKey::new(ComponentFamily::Grid, grid_index),
            coord_syses: cartesians,
            x_axis_declared: declaration.x_axis,
            y_axis_declared: declaration.y_axis,
        });
    }
    Ok(())
}

fn build_geo_targets(
    found: &FoundComponents,
    model: &GlobalModel,
    out: &mut Vec<TargetInfo>,
) -> BrushResult<()> {
    for &geo_index in found.models(ComponentFamily::Geo).unwrap_or_default() {
        let geo = model.geo(geo_index)?;
        out.push(TargetInfo {
            panel_id: panel_id(TargetFamily::Geo, &geo.meta.id),
            family: TargetFamily::Geo,
            coord_sys_model: ComponentKey::new(ComponentFamily::Geo, geo_index),
            coord_syses: vec![CoordSys::Geo(model.geo_view(geo_index)?)],
            x_axis_declared: false,
            y_axis_declared: false,
        });
    }
    Ok(())
}

fn panel_id(family: TargetFamily, model_id: &str) -> String {
    format!("{}--{model_id}", family.panel_prefix())
}

fn match_grid(found: &FoundComponents, model: &GlobalModel, target: &TargetInfo) -> bool {
    let owning_grid = |family: ComponentFamily, dim: AxisDim| {
        found
            .model(family)
            .and_then(|axis_index| model.axis_grid(dim, axis_index).ok())
    };
    let grid_index = found
        .model(ComponentFamily::Grid)
        .or_else(|| owning_grid(ComponentFamily::XAxis, AxisDim::X))
        .or_else(|| owning_grid(ComponentFamily::YAxis, AxisDim::Y));
    grid_index.is_some_and(|grid_index| {
        target.coord_sys_model == ComponentKey::new(ComponentFamily::Grid, grid_index)
    })
}

fn match_geo(found: &FoundComponents, target: &TargetInfo) -> bool {
    found.model(ComponentFamily::Geo).is_some_and(|geo_index| {
        target.coord_sys_model == ComponentKey::new(ComponentFamily::Geo, geo_index)
    })
}

#[cfg(test)]
mod tests {
    use super::TargetFamily;
    use crate::coord::{AxisDim, AxisScale, CoordSys};
    use crate::core::Rect;
    use crate::finder::{FinderOption, FoundComponents};
    use crate::model::{
        AxisModel, ComponentFamily, ComponentOption, GeoModel, GlobalModel, GridModel,
    };

    /// Grid "main" with x axes 0 and 1 and y axis 0; grid 1 with x 2 / y 1.
    fn two_grid_model() -> GlobalModel {
        let mut model = GlobalModel::new();
        let main = model
            .add_grid(
                GridModel::new(Rect::new(0.0, 0.0, 100.0, 100.0)),
                ComponentOption::default().with_id("main"),
            )
            .expect("grid main");
        let side = model
            .add_grid(
                GridModel::new(Rect::new(200.0, 0.0, 100.0, 100.0)),
                ComponentOption::default(),
            )
            .expect("grid side");
        let scale = || AxisScale::value(0.0, 10.0).expect("scale");
        for grid in [main, main, side] {
            model
                .add_x_axis(AxisModel::new(grid, scale()), ComponentOption::default())
                .expect("x axis");
        }
        for grid in [main, side] {
            model
                .add_y_axis(AxisModel::new(grid, scale()), ComponentOption::default())
                .expect("y axis");
        }
        model
    }

    fn build(model: &GlobalModel, option: &FinderOption) -> Vec<super::TargetInfo> {
        let found = FoundComponents::resolve(model, option);
        let mut out = Vec::new();
        for family in TargetFamily::ORDER {
            family.build(&found, model, &mut out).expect("build");
        }
        out
    }

    fn x_indices(target: &super::TargetInfo) -> Vec<usize> {
        target
            .coord_syses()
            .iter()
            .filter_map(|c| c.axis(AxisDim::X).map(|axis| axis.model_index()))
            .collect()
    }

    #[test]
    fn axes_of_one_grid_collapse_into_one_panel() {
        let model = two_grid_model();
        let option = FinderOption::new()
            .with_indices(ComponentFamily::XAxis, [0, 1])
            .with_index(ComponentFamily::YAxis, 0);
        let targets = build(&model, &option);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].panel_id(), "grid--main");
        assert_eq!(x_indices(&targets[0]), vec![0, 1]);
        assert!(targets[0].x_axis_declared());
        assert!(targets[0].y_axis_declared());
    }

    #[test]
    fn only_cartesians_of_referenced_axes_are_kept() {
        let model = two_grid_model();
        let option = FinderOption::new().with_index(ComponentFamily::XAxis, 1);
        let targets = build(&model, &option);
        assert_eq!(targets.len(), 1);
        assert_eq!(x_indices(&targets[0]), vec![1]);
        assert!(targets[0].x_axis_declared());
        assert!(!targets[0].y_axis_declared());
    }

    #[test]
    fn direct_grid_reference_keeps_every_cartesian() {
        let model = two_grid_model();
        let option = FinderOption::new()
            .with_index(ComponentFamily::XAxis, 2)
            .with_id(ComponentFamily::Grid, "main");
        let targets = build(&model, &option);
        let ids: Vec<_> = targets.iter().map(|t| t.panel_id().to_owned()).collect();
        assert_eq!(ids, vec!["grid--1", "grid--main"]);
        assert_eq!(x_indices(&targets[1]), vec![0, 1]);
        assert_eq!(targets[1].panel_rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn geo_targets_follow_grid_targets() {
        let mut model = two_grid_model();
        model
            .add_geo(
                GeoModel::new(Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(0.0, 0.0, 50.0, 50.0)),
                ComponentOption::default().with_id("world"),
            )
            .expect("geo");
        let option = FinderOption::new()
            .with_all(ComponentFamily::Geo)
            .with_index(ComponentFamily::YAxis, 1);
        let targets = build(&model, &option);
        let ids: Vec<_> = targets.iter().map(|t| t.panel_id().to_owned()).collect();
        assert_eq!(ids, vec!["grid--1", "geo--world"]);
        assert!(matches!(targets[1].coord_sys(), CoordSys::Geo(_)));
        assert_eq!(targets[1].panel_rect(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn grid_matcher_resolves_through_axis_owner() {
        let model = two_grid_model();
        let targets = build(&model, &FinderOption::new().with_all(ComponentFamily::Grid));
        let found = FoundComponents::resolve(
            &model,
            &FinderOption::new().with_index(ComponentFamily::YAxis, 1),
        );
        let matched: Vec<_> = targets
            .iter()
            .filter(|target| TargetFamily::Grid.matches(&found, &model, target))
            .map(|target| target.panel_id().to_owned())
            .collect();
        assert_eq!(matched, vec!["grid--1"]);
        assert!(!TargetFamily::Geo.matches(&found, &model, &targets[1]));
    }

    #[test]
    fn first_listed_axis_decides_grid_match_and_panel_order() {
        let model = two_grid_model();
        let option = FinderOption::new().with_indices(ComponentFamily::XAxis, [2, 0]);
        let targets = build(&model, &option);
        let ids: Vec<_> = targets.iter().map(|t| t.panel_id().to_owned()).collect();
        assert_eq!(ids, vec!["grid--1", "grid--main"]);

        let found = FoundComponents::resolve(&model, &option);
        let matched: Vec<_> = targets
            .iter()
            .filter(|target| TargetFamily::Grid.matches(&found, &model, target))
            .map(|target| target.panel_id().to_owned())
            .collect();
        assert_eq!(matched, vec!["grid--1"]);
    }
}
