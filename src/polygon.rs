//! Planar boundary polygons of context buildings, and the ray/face intersector.

use crate::float_types::{
    Real,
    parry3d::{bounding_volume::Aabb, query::Ray},
    tolerance,
};
use crate::plane::Plane;
use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::{Centroid, Coord, LineString, Polygon as GeoPolygon};
use nalgebra::{Matrix4, Point3, Vector3};
use std::sync::OnceLock;

/// A planar polygon in 3D, given by its boundary vertices.
///
/// Vertices wind counter-clockwise when seen from the side the surface faces,
/// so the Newell normal points outward.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    pub vertices: Vec<Point3<Real>>,

    /// Lazily-computed bounding box
    pub bounding_box: OnceLock<Aabb>,

    /// Generic metadata
    pub metadata: Option<S>,
}

impl<S: Clone + PartialEq> PartialEq for Polygon<S> {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.metadata == other.metadata
    }
}

impl<S: Clone + Send + Sync> Polygon<S> {
    pub fn new(vertices: Vec<Point3<Real>>, metadata: Option<S>) -> Self {
        Polygon {
            vertices,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Plane through the first three boundary vertices, or `None` if the
    /// polygon has fewer than three vertices or they are collinear.
    pub fn plane(&self) -> Option<Plane> {
        match self.vertices.as_slice() {
            [a, b, c, ..] => Plane::from_points(*a, *b, *c),
            _ => None,
        }
    }

    /// **Newell's Method**
    ///
    /// Area-weighted normal of the whole boundary:
    /// ```text
    /// n = Σᵢ (vᵢ × vᵢ₊₁)
    /// ```
    /// Its length is twice the polygon area. Robust for concave and slightly
    /// non-planar boundaries, unlike a normal taken from three vertices.
    pub fn newell_normal(&self) -> Vector3<Real> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .fold(Vector3::zeros(), |acc, (a, b)| acc + a.coords.cross(&b.coords))
    }

    /// Unit outward normal, `None` when the boundary has no area.
    pub fn normal(&self) -> Option<Vector3<Real>> {
        let n = self.newell_normal();
        let len = n.norm();
        if len < Real::EPSILON {
            None
        } else {
            Some(n / len)
        }
    }

    /// Surface area of the polygon.
    pub fn area(&self) -> Real {
        0.5 * self.newell_normal().norm()
    }

    /// Plain average of the boundary vertices.
    pub fn vertex_average(&self) -> Point3<Real> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as Real)
    }

    /// Area centroid of the polygon.
    ///
    /// Computed in the polygon's own plane; falls back to the vertex average
    /// for boundaries without a well-defined plane.
    pub fn centroid(&self) -> Point3<Real> {
        let Some(plane) = self.plane() else {
            return self.vertex_average();
        };
        let (to_xy, from_xy) = plane.to_xy_transform();
        let flat = self.to_geo_polygon(&to_xy);
        match flat.centroid() {
            Some(c) => {
                let z = self.mean_flat_z(&to_xy);
                from_xy.transform_point(&Point3::new(c.x(), c.y(), z))
            },
            None => self.vertex_average(),
        }
    }

    /// Axis-aligned bounding box of the boundary vertices.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for pos in &self.vertices {
                mins.x = mins.x.min(pos.x);
                mins.y = mins.y.min(pos.y);
                mins.z = mins.z.min(pos.z);
                maxs.x = maxs.x.max(pos.x);
                maxs.y = maxs.y.max(pos.y);
                maxs.z = maxs.z.max(pos.z);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Reverse winding, flipping the facing side.
    pub fn flip(&mut self) {
        self.vertices.reverse();
    }

    /// **Ray/Face Intersection**
    ///
    /// 1. Plane through the first three boundary vertices (collinear → no hit).
    /// 2. Ray/plane crossing (parallel or behind the origin → no hit).
    /// 3. Boundary and crossing are mapped into the plane-local XY frame.
    /// 4. Hit iff the crossing lies inside the boundary or on it, within
    ///    [`tolerance`].
    ///
    /// A miss is an ordinary outcome and is reported as `None`.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Point3<Real>> {
        let plane = self.plane()?;
        let hit = plane.intersect_ray(ray)?;

        let (to_xy, _) = plane.to_xy_transform();
        let flat_hit = to_xy.transform_point(&hit);
        let coord = Coord {
            x: flat_hit.x,
            y: flat_hit.y,
        };

        let boundary = self.to_geo_polygon(&to_xy);
        match boundary.coordinate_position(&coord) {
            CoordPos::Inside | CoordPos::OnBoundary => Some(hit),
            CoordPos::Outside if near_boundary(boundary.exterior(), coord) => Some(hit),
            CoordPos::Outside => None,
        }
    }

    /// Boundary mapped through `transform` with the `z` coordinate dropped.
    fn to_geo_polygon(&self, transform: &Matrix4<Real>) -> GeoPolygon<Real> {
        let coords: Vec<Coord<Real>> = self
            .vertices
            .iter()
            .map(|v| {
                let p = transform.transform_point(v);
                Coord { x: p.x, y: p.y }
            })
            .collect();
        GeoPolygon::new(LineString::new(coords), Vec::new())
    }

    /// Mean plane-local height, ~0 for planar boundaries.
    fn mean_flat_z(&self, transform: &Matrix4<Real>) -> Real {
        let sum: Real = self
            .vertices
            .iter()
            .map(|v| transform.transform_point(v).z)
            .sum();
        sum / self.vertices.len() as Real
    }
}

/// True if `coord` is within [`tolerance`] of any edge of `ring`.
fn near_boundary(ring: &LineString<Real>, coord: Coord<Real>) -> bool {
    let tol = tolerance();
    ring.lines().any(|line| {
        let d = line.end - line.start;
        let len2 = d.x * d.x + d.y * d.y;
        let t = if len2 < Real::EPSILON {
            0.0
        } else {
            (((coord.x - line.start.x) * d.x + (coord.y - line.start.y) * d.y) / len2)
                .clamp(0.0, 1.0)
        };
        let px = line.start.x + t * d.x - coord.x;
        let py = line.start.y + t * d.y - coord.y;
        (px * px + py * py).sqrt() <= tol
    })
}
