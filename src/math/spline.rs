use glam::Vec3;

/// Uniform Catmull-Rom between `p1` and `p2`, `t` in [0, 1]
pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;

    0.5 * (2.0 * p1
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Evaluate a closed Catmull-Rom loop at `progress`, measured in segments.
/// Wraps in both directions. Returns `None` for an empty control polygon.
pub fn sample_closed(points: &[Vec3], progress: f32) -> Option<Vec3> {
    let n = points.len();
    if n == 0 {
        return None;
    }

    let wrapped = progress.rem_euclid(n as f32);
    // rem_euclid can round up to exactly n for tiny negative inputs
    let index = (wrapped.floor() as usize).min(n - 1);
    let t = wrapped - index as f32;

    let p0 = points[(index + n - 1) % n];
    let p1 = points[index];
    let p2 = points[(index + 1) % n];
    let p3 = points[(index + 2) % n];

    Some(catmull_rom(p0, p1, p2, p3, t))
}
