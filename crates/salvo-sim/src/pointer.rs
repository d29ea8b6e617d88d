//! Pointer tracking.
//!
//! Move events arrive in screen coordinates; the cached playfield offset
//! turns them into playfield coordinates. A viewport change replaces the
//! offset but leaves the stored position alone until the next move.

use glam::DVec2;

use salvo_core::geometry::Vector2;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Last pointer position, playfield-local.
    pub position: Vector2,
    /// Screen position of the playfield's top-left corner.
    pub offset: Vector2,
}

impl PointerState {
    pub fn moved(&mut self, client_x: f64, client_y: f64) {
        self.position = DVec2::new(client_x, client_y) - self.offset;
    }

    pub fn viewport_changed(&mut self, left: f64, top: f64) {
        self.offset = DVec2::new(left, top);
    }
}
