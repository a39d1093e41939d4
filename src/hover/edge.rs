use crate::foundation::core::{Point, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum HoverEdge {
    Top,
    Bottom,
}

impl HoverEdge {
    /// `-1` for top, `+1` for bottom: the sign of a y offset that sits beyond this edge.
    pub fn sign(self) -> f64 {
        match self {
            Self::Top => -1.0,
            Self::Bottom => 1.0,
        }
    }
}

/// Nearest horizontal edge of a `size` box to a point in box-local coordinates.
///
/// Compares squared distances to the midpoints of the top and bottom edges. Only a strictly
/// closer top edge wins, so the exact middle row classifies as [`HoverEdge::Bottom`].
pub fn classify_edge(local: Point, size: Size) -> HoverEdge {
    let top_mid = Point::new(size.width / 2.0, 0.0);
    let bottom_mid = Point::new(size.width / 2.0, size.height);
    let top_dist = (local - top_mid).hypot2();
    let bottom_dist = (local - bottom_mid).hypot2();
    if top_dist < bottom_dist {
        HoverEdge::Top
    } else {
        HoverEdge::Bottom
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hover/edge.rs"]
mod tests;
