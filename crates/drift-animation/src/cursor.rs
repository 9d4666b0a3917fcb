//! Cursor projection from viewport pixels.

use glam::Vec2;

/// Map a viewport pixel position to normalized device coordinates
/// (`-1..1`, y up). A zero-sized or non-finite viewport maps to the origin.
pub fn viewport_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Vec2 {
    if !(width > 0.0 && height > 0.0) || !width.is_finite() || !height.is_finite() {
        return Vec2::ZERO;
    }
    let ndc = Vec2::new((x / width) * 2.0 - 1.0, 1.0 - (y / height) * 2.0);
    if ndc.is_finite() { ndc } else { Vec2::ZERO }
}
