//! Space view abstraction - base trait for all dashboard views

use uuid::Uuid;

use crate::plots::{BarRender, LineRender, MapRender};
use crate::ViewerContext;

/// Unique identifier for a space view
pub type SpaceViewId = Uuid;

/// What a view wants drawn
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstructions {
    Map(MapRender),
    Bar(BarRender),
    Line(LineRender),
}

impl RenderInstructions {
    pub fn as_map(&self) -> Option<&MapRender> {
        match self {
            RenderInstructions::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_bar(&self) -> Option<&BarRender> {
        match self {
            RenderInstructions::Bar(bar) => Some(bar),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LineRender> {
        match self {
            RenderInstructions::Line(line) => Some(line),
            _ => None,
        }
    }
}

/// Base trait for all space views (map, bar chart, line chart)
pub trait SpaceView {
    /// Get the unique ID of this view
    fn id(&self) -> SpaceViewId;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Get the view type
    fn view_type(&self) -> &str;

    /// Compute render instructions from the current aggregates and selection.
    ///
    /// Views may update their own state here but never the selection.
    fn render(&mut self, ctx: &ViewerContext<'_>) -> RenderInstructions;
}
