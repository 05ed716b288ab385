// Math utilities and helper functions

use glam::Vec2;

/// Count a timer down by `dt`, never going below zero
pub fn tick_down(timer: f32, dt: f32) -> f32 {
    (timer - dt).max(0.0)
}

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Unit vector along `gravity`, or `None` when its magnitude is below `epsilon`
pub fn gravity_direction(gravity: Vec2, epsilon: f32) -> Option<Vec2> {
    let magnitude = gravity.length();
    if magnitude < epsilon {
        None
    } else {
        Some(gravity / magnitude)
    }
}

/// World "right" projected onto the plane perpendicular to gravity.
///
/// Sideways gravity has no such projection; the perpendicular of `down` is used
/// instead. Degenerate `down` yields +X.
pub fn right_axis(down: Vec2) -> Vec2 {
    let right = (Vec2::X - down * down.dot(Vec2::X)).normalize_or_zero();
    if right != Vec2::ZERO {
        return right;
    }
    let perpendicular = down.perp().normalize_or_zero();
    if perpendicular == Vec2::ZERO {
        Vec2::X
    } else {
        perpendicular
    }
}

/// Remove the component of `v` that lies along the unit vector `axis`
pub fn strip_component(v: Vec2, axis: Vec2) -> Vec2 {
    v - axis * v.dot(axis)
}
