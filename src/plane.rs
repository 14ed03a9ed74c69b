//! Oriented planes and the ray/plane and plane-local projection operations the
//! intersector is built on.

use crate::float_types::{Real, parry3d::query::Ray, tolerance};
use nalgebra::{Isometry3, Matrix4, Point3, Rotation3, Translation3, Vector3};

/// An oriented plane `n · p = w` with a unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    /// Unit normal vector of the plane
    pub normal: Vector3<Real>,
    /// Distance from origin along normal (plane equation: n·p = w)
    pub w: Real,
}

impl Plane {
    /// Create a new plane from a (not necessarily unit) normal vector and offset.
    ///
    /// Returns `None` for a zero-length normal.
    pub fn from_normal(normal: Vector3<Real>, w: Real) -> Option<Self> {
        let len = normal.norm();
        if len < Real::EPSILON {
            return None;
        }
        Some(Plane {
            normal: normal / len,
            w: w / len,
        })
    }

    /// Create a plane through three points.
    ///
    /// The normal follows the right-hand rule: `(p2 - p1) × (p3 - p1)`.
    /// Returns `None` if the points are (numerically) collinear or coincident,
    /// rather than inventing an arbitrary plane for them.
    pub fn from_points(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> Option<Self> {
        let v1 = p2 - p1;
        let v2 = p3 - p1;
        let normal = v1.cross(&v2);

        // Scale-aware: |v1 × v2| = |v1| |v2| sin θ
        let scale = v1.norm() * v2.norm();
        if scale < Real::EPSILON || normal.norm() <= tolerance() * scale {
            return None;
        }

        Plane::from_normal(normal, normal.dot(&p1.coords))
    }

    #[inline]
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }


    /// The point of the plane closest to the world origin.
    pub fn origin(&self) -> Point3<Real> {
        Point3::from(self.normal * self.w)
    }

    /// **Ray/Plane Intersection**
    ///
    /// Solves `n · (o + t d) = w` for `t`:
    /// ```text
    /// t = (w - n·o) / (n·d)
    /// ```
    /// Returns `None` when the ray runs parallel to the plane (`n·d ≈ 0`) or
    /// when the crossing lies behind the ray origin (`t < 0`).
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Point3<Real>> {
        let denom = self.normal.dot(&ray.dir);
        if denom.abs() < Real::EPSILON {
            return None;
        }
        let t = (self.w - self.normal.dot(&ray.origin.coords)) / denom;
        if t < 0.0 {
            return None;
        }
        Some(ray.point_at(t))
    }

    /// Returns `(transform_to_xy, transform_from_xy)`.
    ///
    /// `transform_to_xy` maps points on this plane onto the `z = 0` plane, so
    /// 2D algorithms can run on the `x`/`y` coordinates; `transform_from_xy`
    /// is its inverse.
    pub fn to_xy_transform(&self) -> (Matrix4<Real>, Matrix4<Real>) {
        let n = self.normal();

        // Rotate plane.normal -> +Z. rotation_between fails only for the
        // antiparallel case, where a half turn about X does the job.
        let rot = Rotation3::rotation_between(&n, &Vector3::z()).unwrap_or_else(|| {
            Rotation3::from_axis_angle(&Vector3::x_axis(), crate::float_types::PI)
        });
        let iso_rot = Isometry3::from_parts(Translation3::identity(), rot.into());

        // Shift so the plane's reference point lands at z = 0.
        let p0_rot = iso_rot.transform_point(&self.origin());
        let iso_trans = Translation3::new(0.0, 0.0, -p0_rot.z);

        let transform_to_xy = iso_trans.to_homogeneous() * iso_rot.to_homogeneous();
        let transform_from_xy = transform_to_xy
            .try_inverse()
            .unwrap_or_else(Matrix4::identity);

        (transform_to_xy, transform_from_xy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_rejects_collinear() {
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        );
        assert!(plane.is_none());
    }

    #[test]
    fn from_points_right_hand_rule() {
        let plane = Plane::from_points(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert_eq!(plane.normal(), Vector3::z());
        assert_eq!(plane.w, 0.0);
    }

    #[test]
    fn ray_hits_plane_in_front() {
        let plane = Plane::from_normal(Vector3::new(-1.0, 0.0, 0.0), -15.0).unwrap();
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::x());
        let hit = plane.intersect_ray(&ray).unwrap();
        assert!((hit - Point3::new(15.0, 0.0, 5.0)).norm() < 1e-9);
    }

    #[test]
    fn ray_misses_plane_behind_or_parallel() {
        let plane = Plane::from_normal(Vector3::x(), 15.0).unwrap();
        let behind = Ray::new(Point3::origin(), -Vector3::x());
        let parallel = Ray::new(Point3::origin(), Vector3::y());
        assert!(plane.intersect_ray(&behind).is_none());
        assert!(plane.intersect_ray(&parallel).is_none());
    }

    #[test]
    fn xy_transform_flattens_plane() {
        let plane = Plane::from_points(
            Point3::new(15.0, -1.0, 0.0),
            Point3::new(15.0, 1.0, 0.0),
            Point3::new(15.0, 1.0, 10.0),
        )
        .unwrap();
        let (to_xy, from_xy) = plane.to_xy_transform();
        let p = Point3::new(15.0, 3.0, 7.0);
        let flat = to_xy.transform_point(&p);
        assert!(flat.z.abs() < 1e-9);
        let back = from_xy.transform_point(&flat);
        assert!((back - p).norm() < 1e-9);
    }

    #[test]
    fn xy_transform_handles_downward_normal() {
        let plane = Plane::from_normal(-Vector3::z(), -3.0).unwrap();
        let (to_xy, _) = plane.to_xy_transform();
        let flat = to_xy.transform_point(&Point3::new(2.0, 1.0, 3.0));
        assert!(flat.z.abs() < 1e-9);
    }
}
