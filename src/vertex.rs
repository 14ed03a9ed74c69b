//! Struct and functions for working with colored `Vertex`s from which visualization triangles are composed.

use crate::color::Color;
use crate::float_types::Real;
use nalgebra::{Point3, Rotation3, Vector3};

/// A vertex of a visualization triangle, holding position, normal and color.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vertex {
    pub pos: Point3<Real>,
    pub normal: Vector3<Real>,
    pub color: Color,
}

impl Vertex {
    /// Create a new [`Vertex`].
    ///
    /// * `pos`    – the position in model space
    /// * `normal` – copied verbatim; isovist fans always use `+Z`
    /// * `color`  – per-vertex color
    ///
    /// Non-finite coordinates are sanitised to zero.
    #[inline]
    pub fn new(mut pos: Point3<Real>, mut normal: Vector3<Real>, color: Color) -> Self {
        for c in pos.coords.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }
        for c in normal.iter_mut() {
            if !c.is_finite() {
                *c = 0.0;
            }
        }

        Vertex { pos, normal, color }
    }
}

/// Rotate `point` by `angle` radians about the vertical axis through `pivot`.
///
/// Positive angles rotate counter-clockwise when seen from above.
pub fn rotate_about_z(point: &Point3<Real>, pivot: &Point3<Real>, angle: Real) -> Point3<Real> {
    let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), angle);
    pivot + rot * (point - pivot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::{PI, tolerance};

    #[test]
    fn new_sanitises_non_finite() {
        let v = Vertex::new(
            Point3::new(Real::NAN, 1.0, Real::INFINITY),
            Vector3::z(),
            Color::default(),
        );
        assert_eq!(v.pos, Point3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn rotation_keeps_pivot_distance() {
        let pivot = Point3::new(1.0, 2.0, 5.0);
        let r = rotate_about_z(&Point3::new(4.0, 2.0, 5.0), &pivot, PI / 2.0);
        assert!((r - Point3::new(1.0, 5.0, 5.0)).norm() < tolerance());
        assert!(((r - pivot).norm() - 3.0).abs() < tolerance());
    }
}
