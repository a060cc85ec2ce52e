use rand::Rng;

use crate::{
    config::CurveParams,
    foundation::core::{Canvas, Point, Vec2},
};

/// Uniform Catmull-Rom blend of one coordinate between `p1` (t = 0) and `p2` (t = 1),
/// with `p0` and `p3` as tangent context.
pub fn catmull_rom(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    // Endpoints are returned as-is so consecutive segments join without rounding drift.
    if t <= 0.0 {
        return p1;
    }
    if t >= 1.0 {
        return p2;
    }

    let v0 = (p2 - p0) * 0.5;
    let v1 = (p3 - p1) * 0.5;
    let t2 = t * t;
    let t3 = t2 * t;
    (2.0 * p1 - 2.0 * p2 + v0 + v1) * t3 + (-3.0 * p1 + 3.0 * p2 - 2.0 * v0 - v1) * t2 + v0 * t + p1
}

pub fn catmull_rom_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    Point::new(
        catmull_rom(p0.x, p1.x, p2.x, p3.x, t),
        catmull_rom(p0.y, p1.y, p2.y, p3.y, t),
    )
}

/// Random walk of control points starting inside the canvas margin.
pub fn random_control_polygon<R: Rng + ?Sized>(
    canvas: Canvas,
    params: &CurveParams,
    rng: &mut R,
) -> Vec<Point> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let m = params.edge_margin;
    let start = Point::new(
        rng.gen_range(w * m..w * (1.0 - m)),
        rng.gen_range(h * m..h * (1.0 - m)),
    );

    let count = params.control_points.sample(rng).max(1) as usize;
    let mut control = Vec::with_capacity(count);
    control.push(start);
    for _ in 1..count {
        let prev = control[control.len() - 1];
        let heading = rng.gen_range(0.0..360.0_f64).to_radians();
        let distance = params.step_distance.sample(rng);
        control.push(prev + Vec2::from_angle(heading) * distance);
    }
    control
}

/// Samples a Catmull-Rom spline through `control`, `intervals + 1` points per segment.
///
/// Neighbour indices are clamped at both ends, so the first and last control points
/// act as their own outer neighbours. Fewer than two control points are returned as-is.
pub fn interpolate(control: &[Point], intervals: u32) -> Vec<Point> {
    if control.len() < 2 || intervals == 0 {
        return control.to_vec();
    }

    let last = control.len() - 1;
    let per_segment = intervals as usize + 1;
    let mut points = Vec::with_capacity(last * per_segment);
    for i in 0..last {
        let p0 = control[i.saturating_sub(1)];
        let p1 = control[i];
        let p2 = control[i + 1];
        let p3 = control[(i + 2).min(last)];
        for k in 0..=intervals {
            let t = f64::from(k) / f64::from(intervals);
            points.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }
    points
}

/// A fresh smooth random path for `canvas`.
pub fn generate_curve_points<R: Rng + ?Sized>(
    canvas: Canvas,
    params: &CurveParams,
    rng: &mut R,
) -> Vec<Point> {
    let control = random_control_polygon(canvas, params, rng);
    interpolate(&control, params.samples_per_segment)
}
