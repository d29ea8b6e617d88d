//! The rendering seam.
//!
//! The simulation draws through [`RenderSurface`] and never touches a
//! concrete graphics API. Hosts implement the trait over whatever canvas
//! they own; [`NullSurface`] discards everything for headless runs.

use serde::{Deserialize, Serialize};

use crate::geometry::{Circle, Rect, Vector2};

/// Opaque RGB colour, serialised as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLUE: Color = Color(0, 0, 255);
    pub const RED: Color = Color(255, 0, 0);
    pub const ORANGE: Color = Color(255, 165, 0);
    pub const PINK: Color = Color(255, 192, 203);
    pub const YELLOW: Color = Color(255, 255, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const GREY: Color = Color(128, 128, 128);
    pub const LIME_GREEN: Color = Color(50, 205, 50);

    /// CSS-style `#rrggbb` form, handy for canvas-backed hosts.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Primitive draw operations offered by the host's canvas.
pub trait RenderSurface {
    /// Clear the given area.
    fn clear(&mut self, area: Rect);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn stroke_rect(&mut self, rect: Rect, color: Color, line_width: f64);

    /// Filled arc from `start_angle` to `end_angle` (radians, clockwise in screen space).
    fn fill_arc(&mut self, circle: Circle, start_angle: f64, end_angle: f64, color: Color);

    fn stroke_arc(
        &mut self,
        circle: Circle,
        start_angle: f64,
        end_angle: f64,
        color: Color,
        line_width: f64,
    );

    fn line(&mut self, from: Vector2, to: Vector2, color: Color, line_width: f64);

    /// Line stroked with a linear gradient from `from_color` to `to_color`.
    fn gradient_line(
        &mut self,
        from: Vector2,
        to: Vector2,
        from_color: Color,
        to_color: Color,
        line_width: f64,
    );

    /// Text with its baseline-left corner at `position`.
    fn text(&mut self, text: &str, position: Vector2, font_px: f64, color: Color);

    /// Stroke consecutive points as connected segments.
    fn stroke_polyline(&mut self, points: &[Vector2], color: Color, line_width: f64) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color, line_width);
        }
    }
}

/// Surface that draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn clear(&mut self, _area: Rect) {}
    fn fill_rect(&mut self, _rect: Rect, _color: Color) {}
    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _line_width: f64) {}
    fn fill_arc(&mut self, _circle: Circle, _start: f64, _end: f64, _color: Color) {}
    fn stroke_arc(&mut self, _circle: Circle, _start: f64, _end: f64, _color: Color, _w: f64) {}
    fn line(&mut self, _from: Vector2, _to: Vector2, _color: Color, _line_width: f64) {}
    fn gradient_line(&mut self, _f: Vector2, _t: Vector2, _fc: Color, _tc: Color, _w: f64) {}
    fn text(&mut self, _text: &str, _position: Vector2, _font_px: f64, _color: Color) {}
}
