use crate::foundation::core::Point;

/// A location on a polyline together with the direction of the segment it lies on.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PathSample {
    pub position: Point,
    /// Direction of the containing segment, radians, `atan2(dy, dx)`.
    pub tangent_angle: f64,
}

pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Walks `points` and returns the location `target` units along it, or `None` when
/// `target` lies past the end.
///
/// The tangent is the direction of the containing segment and does not vary within
/// it. Zero-length segments are skipped.
pub fn point_at_distance(points: &[Point], target: f64) -> Option<PathSample> {
    let mut travelled = 0.0;
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let seg_len = a.distance(b);
        if seg_len <= f64::EPSILON {
            continue;
        }
        if travelled + seg_len >= target {
            let t = ((target - travelled) / seg_len).max(0.0);
            let d = b - a;
            return Some(PathSample {
                position: a.lerp(b, t),
                tangent_angle: d.y.atan2(d.x),
            });
        }
        travelled += seg_len;
    }
    None
}
