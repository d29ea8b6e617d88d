//! A render surface that counts draw calls instead of drawing.
//!
//! Lets the binary exercise the full render pass without a window.

use serde::Serialize;

use salvo_core::geometry::{Circle, Rect, Vector2};
use salvo_core::render::{Color, RenderSurface};

/// Draw calls per primitive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrawStats {
    pub clears: u64,
    pub rects: u64,
    pub arcs: u64,
    pub lines: u64,
    pub gradients: u64,
    pub texts: u64,
}

impl DrawStats {
    pub fn total(&self) -> u64 {
        self.clears + self.rects + self.arcs + self.lines + self.gradients + self.texts
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Everything drawn since the surface was created.
    pub total: DrawStats,
    /// Calls since the last clear.
    pub frame: DrawStats,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn count(&mut self, bump: impl Fn(&mut DrawStats)) {
        bump(&mut self.total);
        bump(&mut self.frame);
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, _area: Rect) {
        self.frame = DrawStats::default();
        self.count(|s| s.clears += 1);
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Color) {
        self.count(|s| s.rects += 1);
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _line_width: f64) {
        self.count(|s| s.rects += 1);
    }

    fn fill_arc(&mut self, _circle: Circle, _start: f64, _end: f64, _color: Color) {
        self.count(|s| s.arcs += 1);
    }

    fn stroke_arc(&mut self, _circle: Circle, _start: f64, _end: f64, _color: Color, _w: f64) {
        self.count(|s| s.arcs += 1);
    }

    fn line(&mut self, _from: Vector2, _to: Vector2, _color: Color, _line_width: f64) {
        self.count(|s| s.lines += 1);
    }

    fn gradient_line(&mut self, _f: Vector2, _t: Vector2, _fc: Color, _tc: Color, _w: f64) {
        self.count(|s| s.gradients += 1);
    }

    fn text(&mut self, _text: &str, _position: Vector2, _font_px: f64, _color: Color) {
        self.count(|s| s.texts += 1);
    }
}
