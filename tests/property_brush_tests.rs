use chart_brush::brush::{BrushArea, BrushRange, BrushTargetManager};
use chart_brush::config::TargetManagerSettings;
use chart_brush::coord::AxisScale;
use chart_brush::core::Rect;
use chart_brush::finder::FinderOption;
use chart_brush::model::{AxisModel, ComponentFamily, ComponentOption, GlobalModel, GridModel};
use proptest::prelude::*;

fn value_grid(x_min: f64, x_span: f64, y_min: f64, y_span: f64, inverse_y: bool) -> GlobalModel {
    let mut model = GlobalModel::new();
    let grid = model
        .add_grid(
            GridModel::new(Rect::new(40.0, 30.0, 600.0, 400.0)),
            ComponentOption::default(),
        )
        .expect("grid");
    model
        .add_x_axis(
            AxisModel::new(grid, AxisScale::value(x_min, x_min + x_span).expect("x")),
            ComponentOption::default(),
        )
        .expect("x axis");
    let y_axis = AxisModel::new(grid, AxisScale::value(y_min, y_min + y_span).expect("y"));
    model
        .add_y_axis(
            if inverse_y { y_axis.inverted() } else { y_axis },
            ComponentOption::default(),
        )
        .expect("y axis");
    model
}

proptest! {
    #[test]
    fn value_axis_rect_output_then_input_is_identity(
        x_min in -1_000.0f64..1_000.0,
        x_span in 1.0f64..5_000.0,
        y_min in -1_000.0f64..1_000.0,
        y_span in 1.0f64..5_000.0,
        inverse_y in any::<bool>(),
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
        c in 0.0f64..1.0,
        d in 0.0f64..1.0
    ) {
        let model = value_grid(x_min, x_span, y_min, y_span, inverse_y);
        let manager = BrushTargetManager::new(
            &FinderOption::new().with_index(ComponentFamily::Grid, 0),
            &model,
            TargetManagerSettings::default(),
        )
        .expect("manager");

        let x = [40.0 + 600.0 * a.min(b), 40.0 + 600.0 * a.max(b)];
        let y = [30.0 + 400.0 * c.min(d), 30.0 + 400.0 * c.max(d)];
        let mut areas = vec![BrushArea::rect([x, y]).with_panel_id("grid--0")];
        manager.set_output_ranges(&mut areas, &model).expect("output");
        areas[0].range = None;
        manager.set_input_ranges(&mut areas, &model).expect("input");

        let Some(BrushRange::Rect(range)) = &areas[0].range else {
            panic!("rect range expected");
        };
        for (restored, drawn) in range.iter().zip([x, y]) {
            prop_assert!((restored[0] - drawn[0]).abs() <= 1e-6);
            prop_assert!((restored[1] - drawn[1]).abs() <= 1e-6);
        }
    }

    #[test]
    fn line_x_coord_range_stays_ordered(
        a in 0.0f64..1.0,
        b in 0.0f64..1.0
    ) {
        let model = value_grid(-50.0, 100.0, 0.0, 10.0, false);
        let manager = BrushTargetManager::new(
            &FinderOption::new().with_index(ComponentFamily::XAxis, 0),
            &model,
            TargetManagerSettings::default(),
        )
        .expect("manager");
        let area = BrushArea::line_x([40.0 + 600.0 * a, 40.0 + 600.0 * b]).with_panel_id("grid--0");
        let update = manager
            .output_ranges(&area, &model)
            .expect("output")
            .expect("bound");
        let Some(BrushRange::Linear(pair)) = update.coord_ranges.first() else {
            panic!("linear coord range expected");
        };
        prop_assert!(pair[0] <= pair[1]);
        prop_assert!(pair[0] >= -50.0 - 1e-9 && pair[1] <= 50.0 + 1e-9);
    }
}
