//! Isovist construction: a fixed fan of horizontal rays from the observer,
//! each resolved to its nearest obstruction or to the cast radius.

use crate::errors::{IsovistError, Result};
use crate::float_types::{Real, TAU, parry3d::query::Ray};
use crate::polygon::Polygon;
use crate::site::ObserverSite;
use geo::{Area, Coord, LineString, Polygon as GeoPolygon};
use nalgebra::{Point3, Vector3};

/// A ray's crossing with one surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Point3<Real>,
    /// Distance from the ray origin
    pub distance: Real,
}

/// One vertex of an isovist.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsovistVertex {
    pub pos: Point3<Real>,
    /// `true` if a surface stopped the ray, `false` for the capped fallback
    pub obstructed: bool,
}

/// The visible region around one observer site.
///
/// Holds exactly one vertex per ray, in counter-clockwise angular order
/// starting at `+X`. The ring is implicitly closed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Isovist {
    pub site: ObserverSite,
    pub vertices: Vec<IsovistVertex>,
}

/// `ray_count` evenly spaced unit directions in the horizontal plane,
/// direction `i` at angle `τ·i/ray_count` from `+X`.
pub fn ray_directions(ray_count: usize) -> Result<Vec<Vector3<Real>>> {
    if ray_count == 0 {
        return Err(IsovistError::InvalidRayCount(ray_count));
    }
    Ok((0..ray_count)
        .map(|i| {
            let angle = TAU * i as Real / ray_count as Real;
            Vector3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect())
}

/// Nearest crossing of `ray` with any of `candidates` no farther than
/// `max_distance`.
///
/// Ties go to the first minimal-distance hit in candidate order.
pub fn nearest_hit<S: Clone + Send + Sync>(
    ray: &Ray,
    candidates: &[&Polygon<S>],
    max_distance: Real,
) -> Option<RayHit> {
    let mut best: Option<RayHit> = None;
    for face in candidates {
        let Some(point) = face.intersect_ray(ray) else {
            continue;
        };
        let distance = (point - ray.origin).norm();
        if distance > max_distance {
            continue;
        }
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(RayHit { point, distance });
        }
    }
    best
}

impl Isovist {
    /// Cast `ray_count` rays from `site` against `candidates`.
    ///
    /// Every ray contributes exactly one vertex: its nearest hit, or the point
    /// at `site.max_radius` along the ray when nothing is hit within that
    /// radius. No vertex is ever farther than `site.max_radius`.
    pub fn build<S: Clone + Send + Sync>(
        site: &ObserverSite,
        candidates: &[&Polygon<S>],
        ray_count: usize,
    ) -> Result<Self> {
        let vertices = ray_directions(ray_count)?
            .into_iter()
            .map(|dir| {
                let ray = Ray::new(site.center, dir);
                match nearest_hit(&ray, candidates, site.max_radius) {
                    Some(hit) => IsovistVertex {
                        pos: hit.point,
                        obstructed: true,
                    },
                    None => IsovistVertex {
                        pos: ray.point_at(site.max_radius),
                        obstructed: false,
                    },
                }
            })
            .collect();

        Ok(Isovist {
            site: *site,
            vertices,
        })
    }

    #[inline]
    pub fn ray_count(&self) -> usize {
        self.vertices.len()
    }

    /// Vertex positions in angular order.
    pub fn points(&self) -> impl Iterator<Item = Point3<Real>> + '_ {
        self.vertices.iter().map(|v| v.pos)
    }

    /// Plan view of the isovist as a `geo` polygon.
    pub fn to_polygon(&self) -> GeoPolygon<Real> {
        let coords: Vec<Coord<Real>> = self
            .vertices
            .iter()
            .map(|v| Coord {
                x: v.pos.x,
                y: v.pos.y,
            })
            .collect();
        GeoPolygon::new(LineString::new(coords), Vec::new())
    }

    /// Shoelace area of the plan polygon (magnitude).
    pub fn area(&self) -> Real {
        self.to_polygon().unsigned_area()
    }

    /// Share of rays stopped by a surface, in `[0, 1]`.
    pub fn obstructed_fraction(&self) -> Real {
        if self.vertices.is_empty() {
            return 0.0;
        }
        let hits = self.vertices.iter().filter(|v| v.obstructed).count();
        hits as Real / self.vertices.len() as Real
    }

    /// Distance of every vertex from the observer, in angular order.
    pub fn distances(&self) -> impl Iterator<Item = Real> + '_ {
        self.vertices.iter().map(|v| (v.pos - self.site.center).norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::{DEFAULT_RAY_COUNT, PI};

    fn site() -> ObserverSite {
        ObserverSite::new(Point3::new(0.0, 0.0, 5.0), 5.0, 20.0).unwrap()
    }

    fn wall_at(x: Real) -> Polygon<()> {
        Polygon::new(
            vec![
                Point3::new(x, 5.0, 0.0),
                Point3::new(x, -5.0, 0.0),
                Point3::new(x, -5.0, 10.0),
                Point3::new(x, 5.0, 10.0),
            ],
            None,
        )
    }

    #[test]
    fn zero_rays_fail_fast() {
        let candidates: Vec<&Polygon<()>> = Vec::new();
        assert_eq!(
            Isovist::build(&site(), &candidates, 0),
            Err(IsovistError::InvalidRayCount(0))
        );
    }

    #[test]
    fn directions_are_unit_and_ordered() {
        let dirs = ray_directions(4).unwrap();
        assert!((dirs[0] - Vector3::x()).norm() < 1e-12);
        assert!((dirs[1] - Vector3::y()).norm() < 1e-12);
        for d in dirs {
            assert!((d.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn open_site_is_inscribed_polygon() {
        let candidates: Vec<&Polygon<()>> = Vec::new();
        let iso = Isovist::build(&site(), &candidates, DEFAULT_RAY_COUNT).unwrap();
        assert_eq!(iso.ray_count(), DEFAULT_RAY_COUNT);
        assert!(iso.distances().all(|d| (d - 20.0).abs() < 1e-9));
        assert_eq!(iso.obstructed_fraction(), 0.0);

        let n = DEFAULT_RAY_COUNT as Real;
        let inscribed = 0.5 * n * 400.0 * (TAU / n).sin();
        assert!((iso.area() - inscribed).abs() < 1e-6);
        assert!(iso.area() <= PI * 400.0);
    }

    #[test]
    fn nearest_of_two_walls_wins() {
        let near = wall_at(10.0);
        let far = wall_at(15.0);
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::x());
        let hit = nearest_hit(&ray, &[&far, &near], 20.0).unwrap();
        assert!((hit.distance - 10.0).abs() < 1e-9);
    }

    #[test]
    fn equal_distance_keeps_first() {
        let a: Polygon<u8> = Polygon::new(wall_at(10.0).vertices, Some(1));
        let b: Polygon<u8> = Polygon::new(wall_at(10.0).vertices, Some(2));
        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::x());
        let hit = nearest_hit(&ray, &[&a, &b], 20.0).unwrap();
        let first = a.intersect_ray(&ray).unwrap();
        assert_eq!(hit.point, first);
    }

    #[test]
    fn hits_beyond_radius_fall_back() {
        let wall = wall_at(25.0);
        let iso = Isovist::build(&site(), &[&wall], 8).unwrap();
        assert!(!iso.vertices[0].obstructed);
        assert!((iso.vertices[0].pos - Point3::new(20.0, 0.0, 5.0)).norm() < 1e-9);
    }

    #[test]
    fn single_ray_is_permitted() {
        let wall = wall_at(15.0);
        let iso = Isovist::build(&site(), &[&wall], 1).unwrap();
        assert_eq!(iso.ray_count(), 1);
        assert!(iso.vertices[0].obstructed);
        assert_eq!(iso.area(), 0.0);
    }
}
