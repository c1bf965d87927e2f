//! Rect-panel helpers handed to the interactive brush controller: clipping,
//! cursor hit-testing and the cross-axis extent of line brushes.

use serde::{Deserialize, Serialize};

use crate::core::{MinMax, Rect, Vec2};
use crate::model::ComponentKey;

use super::area::BrushType;

/// Host lookup for the component owning the element under the cursor.
pub trait ElementLookup {
    /// `None` when the cursor is over no component element (blank canvas,
    /// or an element of this panel's own coordinate system).
    fn component_at(&self, cursor: Vec2) -> Option<ComponentKey>;
}

/// Lookup for hosts that do not track element ownership.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoElements;

impl ElementLookup for NoElements {
    fn component_at(&self, _cursor: Vec2) -> Option<ComponentKey> {
        None
    }
}

/// Brushable panel descriptor derived from one target info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelOpt {
    pub panel_id: String,
    pub default_brush_type: Option<BrushType>,
    /// Normalized pixel rect of the panel; also the clip path.
    pub rect: Rect,
    pub coord_sys_model: ComponentKey,
}

impl PanelOpt {
    #[must_use]
    pub fn new(
        panel_id: impl Into<String>,
        default_brush_type: Option<BrushType>,
        rect: Rect,
        coord_sys_model: ComponentKey,
    ) -> Self {
        Self {
            panel_id: panel_id.into(),
            default_brush_type,
            rect: rect.normalized(),
            coord_sys_model,
        }
    }

    /// Clamps brush points into the panel rect.
    #[must_use]
    pub fn clip_points(&self, points: &[Vec2]) -> Vec<Vec2> {
        points
            .iter()
            .map(|point| self.rect.clamp_point(*point))
            .collect()
    }

    /// Whether a brush gesture starting at `cursor` belongs to this panel:
    /// inside the rect and not over another component's element.
    #[must_use]
    pub fn is_target_by_cursor(&self, cursor: Vec2, elements: &dyn ElementLookup) -> bool {
        self.rect.contains(cursor)
            && !elements
                .component_at(cursor)
                .is_some_and(|owner| owner != self.coord_sys_model)
    }

    /// Pixel extent a line brush spans on the axis it does not select:
    /// the panel height for `lineX`, the width for `lineY`.
    #[must_use]
    pub fn linear_brush_other_extent(&self, brush_type: BrushType) -> Option<MinMax> {
        match brush_type {
            BrushType::LineX => Some(self.rect.y_extent()),
            BrushType::LineY => Some(self.rect.x_extent()),
            BrushType::Rect | BrushType::Polygon => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementLookup, NoElements, PanelOpt};
    use crate::brush::BrushType;
    use crate::core::{Rect, Vec2};
    use crate::model::{ComponentFamily, ComponentKey};

    struct Fixed(Option<ComponentKey>);

    impl ElementLookup for Fixed {
        fn component_at(&self, _cursor: Vec2) -> Option<ComponentKey> {
            self.0
        }
    }

    fn panel() -> PanelOpt {
        PanelOpt::new(
            "grid--0",
            Some(BrushType::Rect),
            Rect::new(10.0, 20.0, 100.0, 50.0),
            ComponentKey::new(ComponentFamily::Grid, 0),
        )
    }

    #[test]
    fn clip_clamps_outside_points() {
        let clipped = panel().clip_points(&[[0.0, 0.0], [50.0, 40.0], [500.0, 500.0]]);
        assert_eq!(clipped, vec![[10.0, 20.0], [50.0, 40.0], [110.0, 70.0]]);
    }

    #[test]
    fn cursor_over_other_component_is_not_a_target() {
        let panel = panel();
        assert!(panel.is_target_by_cursor([50.0, 40.0], &NoElements));
        assert!(!panel.is_target_by_cursor([5.0, 40.0], &NoElements));

        let own = Fixed(Some(ComponentKey::new(ComponentFamily::Grid, 0)));
        assert!(panel.is_target_by_cursor([50.0, 40.0], &own));
        let other = Fixed(Some(ComponentKey::new(ComponentFamily::Geo, 0)));
        assert!(!panel.is_target_by_cursor([50.0, 40.0], &other));
    }

    #[test]
    fn line_brush_spans_the_orthogonal_panel_extent() {
        let panel = panel();
        assert_eq!(panel.linear_brush_other_extent(BrushType::LineX), Some([20.0, 70.0]));
        assert_eq!(panel.linear_brush_other_extent(BrushType::LineY), Some([10.0, 110.0]));
        assert_eq!(panel.linear_brush_other_extent(BrushType::Polygon), None);
    }
}
