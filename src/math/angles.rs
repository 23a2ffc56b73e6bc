//! Vertex angles between landmark rays.
//!
//! Tracking noise regularly produces duplicate or collapsed landmarks. None
//! of that is an error here: every degenerate configuration yields an angle
//! of 0.

use nalgebra::Vector3;

use crate::landmarks::Landmark;
use crate::topology::AngleTriplet;

/// Angle in radians between two vectors, in `[0, pi]`.
///
/// Returns exactly 0 when `u == v` element-wise, and 0 when either vector
/// has zero length.
#[must_use]
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    if u == v {
        return 0.0;
    }

    // clamp() keeps NaN, so zero-length vectors still fall through to the guard.
    let cos = (u.dot(v) / (u.norm() * v.norm())).clamp(-1.0, 1.0);
    let angle = cos.acos();

    if angle.is_nan() {
        0.0
    } else {
        angle
    }
}

/// Angle at `triplet.vertex` between the rays towards `triplet.a` and `triplet.c`.
///
/// Landmarks missing from `frame` are treated as degenerate geometry.
#[must_use]
pub fn joint_angle(frame: &[Landmark], triplet: &AngleTriplet) -> f64 {
    let (Some(a), Some(b), Some(c)) = (
        frame.get(triplet.a),
        frame.get(triplet.vertex),
        frame.get(triplet.c),
    ) else {
        return 0.0;
    };

    let b = Vector3::from(*b);
    let u = Vector3::from(*a) - b;
    let v = Vector3::from(*c) - b;

    angle_between(&u, &v)
}
