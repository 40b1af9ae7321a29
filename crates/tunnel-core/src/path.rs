//! Parametric paths the camera travels along.
//!
//! A [`Curve`] maps `u` in \[0, 1\] to a world-space point. [`PathModel`]
//! wraps one and answers the queries the camera rig and scene layout need.

use glam::Vec3;

/// Step used for finite-difference tangents.
const TANGENT_EPS: f32 = 0.0005;

pub trait Curve {
    /// Position at parameter `u`; callers pass `u` already clamped to \[0, 1\].
    fn point_at(&self, u: f32) -> Vec3;

    fn tangent_at(&self, u: f32) -> Vec3 {
        let a = self.point_at((u - TANGENT_EPS).max(0.0));
        let b = self.point_at((u + TANGENT_EPS).min(1.0));
        (b - a).normalize_or_zero()
    }
}

/// Straight segment from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineCurve {
    pub start: Vec3,
    pub end: Vec3,
}

impl LineCurve {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }
}

impl Curve for LineCurve {
    #[inline]
    fn point_at(&self, u: f32) -> Vec3 {
        self.start.lerp(self.end, u)
    }

    fn tangent_at(&self, _u: f32) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }
}

/// Catmull-Rom spline through `points`, evaluated in cubic Hermite form.
#[derive(Clone, Debug)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    tension: f32,
}

impl CatmullRomCurve {
    /// Returns `None` with fewer than two control points.
    pub fn new(points: Vec<Vec3>, tension: f32) -> Option<Self> {
        (points.len() >= 2).then_some(Self { points, tension })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

impl Curve for CatmullRomCurve {
    fn point_at(&self, u: f32) -> Vec3 {
        let u = u.clamp(0.0, 1.0);
        let last = self.points.len() - 1;
        let scaled = u * last as f32;
        let i1 = (scaled.floor() as usize).min(last - 1);
        let t = scaled - i1 as f32;

        let i0 = i1.saturating_sub(1);
        let i2 = (i1 + 1).min(last);
        let i3 = (i1 + 2).min(last);

        catmull_rom(
            self.points[i0],
            self.points[i1],
            self.points[i2],
            self.points[i3],
            t,
            self.tension,
        )
    }
}

fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32, tension: f32) -> Vec3 {
    let v0 = (p2 - p0) * tension;
    let v1 = (p3 - p1) * tension;

    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p1 * h00 + v0 * h10 + p2 * h01 + v1 * h11
}

/// A sampled point on the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPoint {
    pub position: Vec3,
    pub tangent: Vec3,
}

#[derive(Clone, Debug)]
pub struct PathModel<C: Curve> {
    curve: C,
}

impl<C: Curve> PathModel<C> {
    pub fn new(curve: C) -> Self {
        Self { curve }
    }

    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Sample the path at fraction `f`. Out-of-range input is clamped to \[0, 1\].
    pub fn point_at_fraction(&self, f: f32) -> PathPoint {
        let f = if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) };
        PathPoint {
            position: self.curve.point_at(f),
            tangent: self.curve.tangent_at(f),
        }
    }
}

/// `(f + offset) mod 1`, always in \[0, 1).
#[inline]
pub fn wrap_fraction(f: f32, offset: f32) -> f32 {
    (f + offset).rem_euclid(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> PathModel<LineCurve> {
        PathModel::new(LineCurve::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -100.0)))
    }

    #[test]
    fn line_endpoints_and_midpoint() {
        let p = line();
        assert_eq!(p.point_at_fraction(0.0).position, Vec3::ZERO);
        assert_eq!(p.point_at_fraction(1.0).position, Vec3::new(0.0, 0.0, -100.0));
        assert!((p.point_at_fraction(0.5).position.z + 50.0).abs() < 1e-4);
        assert_eq!(p.point_at_fraction(0.3).tangent, Vec3::NEG_Z);
    }

    #[test]
    fn fraction_is_clamped() {
        let p = line();
        assert_eq!(p.point_at_fraction(-3.0), p.point_at_fraction(0.0));
        assert_eq!(p.point_at_fraction(7.0), p.point_at_fraction(1.0));
        assert_eq!(p.point_at_fraction(f32::NAN), p.point_at_fraction(0.0));
    }

    #[test]
    fn wrap_fraction_stays_in_unit_interval() {
        assert!((wrap_fraction(0.99, 0.03) - 0.02).abs() < 1e-5);
        assert!((wrap_fraction(0.5, 0.03) - 0.53).abs() < 1e-6);
        assert!((wrap_fraction(1.0, 0.03) - 0.03).abs() < 1e-6);
        assert!(wrap_fraction(0.999, 0.03) < 1.0);
    }

    #[test]
    fn catmull_rom_passes_through_control_points() {
        let pts = vec![
            Vec3::ZERO,
            Vec3::new(1.0, 2.0, -10.0),
            Vec3::new(-1.0, 0.0, -20.0),
            Vec3::new(0.0, 0.0, -30.0),
        ];
        let c = CatmullRomCurve::new(pts.clone(), 0.5).unwrap();
        for (i, p) in pts.iter().enumerate() {
            let u = i as f32 / 3.0;
            assert!(c.point_at(u).distance(*p) < 1e-4, "control point {i}");
        }
    }

    #[test]
    fn catmull_rom_is_continuous_across_spans() {
        let c = CatmullRomCurve::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
            0.5,
        )
        .unwrap();
        let knot = 1.0 / 3.0;
        let before = c.point_at(knot - 1e-4);
        let after = c.point_at(knot + 1e-4);
        assert!(before.distance(after) < 1e-2);
    }

    #[test]
    fn catmull_rom_needs_two_points() {
        assert!(CatmullRomCurve::new(vec![Vec3::ZERO], 0.5).is_none());
    }
}
