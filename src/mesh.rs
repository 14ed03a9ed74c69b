//! Colored triangle fans that visualize isovist ray lengths.

use crate::color::MeshColors;
use crate::float_types::{MAX_NORMALIZED_DISTANCE, PI, Real};
use crate::isovist::Isovist;
use crate::triangulated::Triangulated3D;
use crate::vertex::{Vertex, rotate_about_z};
use nalgebra::Vector3;

/// One triangle per ray of an isovist.
///
/// Triangle `i` is `[center, pᵢ rotated by -δ, pᵢ rotated by +δ]` where `pᵢ`
/// is the isovist vertex of ray `i` and `δ` is half the angle between rays.
/// All three vertices carry the same color, picked by the normalized ray
/// length, and face `+Z`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsovistMesh {
    pub triangles: Vec<[Vertex; 3]>,
}

impl IsovistMesh {
    pub fn from_isovist(isovist: &Isovist, colors: &MeshColors) -> Self {
        let center = isovist.site.center;
        let radius = isovist.site.max_radius;
        let half_step = PI / isovist.ray_count().max(1) as Real;

        let triangles = isovist
            .points()
            .map(|p| {
                let t = ((p - center).norm() / radius).min(MAX_NORMALIZED_DISTANCE);
                let color = colors.at(t);
                [
                    Vertex::new(center, Vector3::z(), color),
                    Vertex::new(rotate_about_z(&p, &center, -half_step), Vector3::z(), color),
                    Vertex::new(rotate_about_z(&p, &center, half_step), Vector3::z(), color),
                ]
            })
            .collect();

        IsovistMesh { triangles }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

}

impl Triangulated3D for IsovistMesh {
    fn visit_triangles<F>(&self, mut f: F)
    where
        F: FnMut([Vertex; 3]),
    {
        for tri in &self.triangles {
            f(*tri);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Polygon;
    use crate::site::ObserverSite;
    use nalgebra::Point3;

    fn site() -> ObserverSite {
        ObserverSite::new(Point3::new(1.0, 2.0, 5.0), 5.0, 20.0).unwrap()
    }

    #[test]
    fn one_triangle_per_ray() {
        let candidates: Vec<&Polygon<()>> = Vec::new();
        let iso = Isovist::build(&site(), &candidates, 12).unwrap();
        let mesh = IsovistMesh::from_isovist(&iso, &MeshColors::default());
        assert_eq!(mesh.len(), 12);
        let mut visited = 0;
        mesh.visit_triangles(|_| visited += 1);
        assert_eq!(visited, 12);
    }

    #[test]
    fn open_rays_stop_short_of_far_color() {
        let candidates: Vec<&Polygon<()>> = Vec::new();
        let iso = Isovist::build(&site(), &candidates, 8).unwrap();
        let colors = MeshColors::default();
        let mesh = IsovistMesh::from_isovist(&iso, &colors);
        let expected = colors.at(MAX_NORMALIZED_DISTANCE);
        for tri in &mesh.triangles {
            assert!(tri.iter().all(|v| v.color == expected));
            assert_ne!(tri[0].color, colors.far);
        }
    }

    #[test]
    fn fan_is_centered_and_upward() {
        let candidates: Vec<&Polygon<()>> = Vec::new();
        let iso = Isovist::build(&site(), &candidates, 4).unwrap();
        let mesh = IsovistMesh::from_isovist(&iso, &MeshColors::default());
        let center = site().center;
        for tri in &mesh.triangles {
            assert_eq!(tri[0].pos, center);
            assert!(((tri[1].pos - center).norm() - 20.0).abs() < 1e-9);
            let n = (tri[1].pos - tri[0].pos).cross(&(tri[2].pos - tri[0].pos));
            assert!(n.z > 0.0);
            assert_eq!(tri[0].normal, Vector3::z());
        }
        // first ray along +X: corners at ∓45°
        let first = &mesh.triangles[0];
        let s = 20.0 * (PI / 4.0).sin();
        assert!((first[1].pos - Point3::new(1.0 + s, 2.0 - s, 5.0)).norm() < 1e-9);
        assert!((first[2].pos - Point3::new(1.0 + s, 2.0 + s, 5.0)).norm() < 1e-9);
    }
}
