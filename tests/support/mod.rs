//! Test support library
//! Provides scene builders and tolerance helpers shared by the integration tests.
#![allow(dead_code)]

use isovist::{
    Envelope, Mass,
    float_types::Real,
    polygon::Polygon,
};
use nalgebra::{Point2, Point3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Axis-aligned rectangle profile, counter-clockwise.
pub fn rect(x0: Real, y0: Real, x1: Real, y1: Real) -> Vec<Point2<Real>> {
    vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ]
}

/// The 10x10 lot centered at the origin, from z = 0 to z = 10.
pub fn square_envelope() -> Envelope {
    Envelope::new(rect(-5.0, -5.0, 5.0, 5.0), 0.0, 10.0)
}

/// A single wall in the plane `x = x`, facing `-X`, spanning `y` in
/// `[-half_width, half_width]` and `z` in `[z0, z1]`.
pub fn wall_facing_west(x: Real, half_width: Real, z0: Real, z1: Real) -> Polygon<()> {
    Polygon::new(
        vec![
            Point3::new(x, half_width, z0),
            Point3::new(x, -half_width, z0),
            Point3::new(x, -half_width, z1),
            Point3::new(x, half_width, z1),
        ],
        None,
    )
}

/// A box building occupying `[x0, x1] × [y0, y1]` from the ground to `height`.
pub fn block(x0: Real, y0: Real, x1: Real, y1: Real, height: Real) -> Mass<()> {
    Mass::extruded(&rect(x0, y0, x1, y1), 0.0, height, None)
}

/// `100 · n · sin(τ/n) / τ`: the score of a fully open site cast with `n`
/// rays, the inscribed n-gon against its circle.
pub fn open_site_score(ray_count: usize) -> Real {
    let n = ray_count as Real;
    let tau = isovist::float_types::TAU;
    100.0 * n * (tau / n).sin() / tau
}
