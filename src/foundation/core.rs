use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Handle of one element on the [`crate::Stage`].
///
/// Components collect these at construction time and own them; nothing is ever looked up by
/// class name or selector.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

/// Host window size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> MotionResult<Self> {
        if !width.is_finite() || width < 0.0 || !height.is_finite() || height < 0.0 {
            return Err(MotionError::validation(
                "viewport width/height must be finite and >= 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// The visible document region when scrolled to `scroll_y`.
    pub fn document_rect(self, scroll_y: f64) -> Rect {
        Rect::new(0.0, scroll_y, self.width, scroll_y + self.height)
    }
}

/// Animatable properties of one element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    pub opacity: f64,
    /// Pixel translation.
    pub translate: Vec2,
    /// Vertical translation as a percentage of the element's own height.
    pub y_percent: f64,
    pub scale: f64,
    /// Horizontal-only scale, used for lines that grow in from the left.
    pub scale_x: f64,
    pub rotate_x_deg: f64,
    pub visible: bool,
    /// Whether the element takes part in hit testing.
    pub interactive: bool,
}

impl Default for VisualState {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            translate: Vec2::ZERO,
            y_percent: 0.0,
            scale: 1.0,
            scale_x: 1.0,
            rotate_x_deg: 0.0,
            visible: true,
            interactive: true,
        }
    }
}

impl VisualState {
    /// Fully transparent, shifted by `(dx, dy)`.
    pub fn hidden_offset(dx: f64, dy: f64) -> Self {
        Self {
            opacity: 0.0,
            translate: Vec2::new(dx, dy),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_translate(mut self, dx: f64, dy: f64) -> Self {
        self.translate = Vec2::new(dx, dy);
        self
    }

    pub fn with_y_percent(mut self, y_percent: f64) -> Self {
        self.y_percent = y_percent;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_scale_x(mut self, scale_x: f64) -> Self {
        self.scale_x = scale_x;
        self
    }

    pub fn with_rotate_x(mut self, deg: f64) -> Self {
        self.rotate_x_deg = deg;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
