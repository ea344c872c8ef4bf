//! Geometry helpers for waypoint paths.

use bevy::prelude::*;

/// Linearly interpolate between two waypoints.
///
/// Computed component-wise as `(1 - t) * from + t * to`.
pub fn lerp_points(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from * (1.0 - t) + to * t
}

/// Angle in radians between the segment `p1 -> p2` and the segment `p2 -> p3`.
///
/// Returns `None` when either segment has zero length, since the angle is
/// undefined there. The cosine is clamped to `[-1, 1]` before `acos` so
/// floating-point noise on straight or fully reversed corners can't produce NaN.
pub fn turn_angle(p1: Vec3, p2: Vec3, p3: Vec3) -> Option<f32> {
    let incoming = p2 - p1;
    let outgoing = p3 - p2;

    let lengths = incoming.length() * outgoing.length();
    if lengths <= 0.0 {
        return None;
    }

    let cos = incoming.dot(outgoing) / lengths;
    if !cos.is_finite() {
        return None;
    }
    Some(cos.clamp(-1.0, 1.0).acos())
}

/// Axis a corner turn rotates around.
pub fn turn_axis(clockwise: bool) -> Vec3 {
    if clockwise {
        Vec3::NEG_Y
    } else {
        Vec3::Y
    }
}

/// Rotation applied at a corner with the given turn angle.
pub fn corner_rotation(angle: f32, clockwise: bool) -> Quat {
    Quat::from_axis_angle(turn_axis(clockwise), angle)
}

/// Index `offset` steps after `index` in a cyclic sequence of length `len`.
///
/// `len` must be non-zero.
pub fn cyclic_index(index: usize, offset: usize, len: usize) -> usize {
    (index + offset) % len
}
