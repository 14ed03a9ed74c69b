//! Sources of obstructing surfaces.
//!
//! A context building may be made of any number of solids; the isovist only
//! needs its planar boundary faces with outward winding. [`BoundarySurfaces`]
//! is that capability, so hosts can plug in their own solid representations.

use crate::float_types::Real;
use crate::polygon::Polygon;
use nalgebra::{Point2, Point3};

/// Anything that can present itself as a set of planar, outward-wound
/// boundary polygons.
pub trait BoundarySurfaces<S: Clone> {
    /// Call `f` once for each boundary surface.
    fn visit_surfaces<'a, F>(&'a self, f: F)
    where
        S: 'a,
        F: FnMut(&'a Polygon<S>);

    /// Number of surfaces [`visit_surfaces`](Self::visit_surfaces) yields.
    fn surface_count(&self) -> usize {
        let mut count = 0;
        self.visit_surfaces(|_| count += 1);
        count
    }
}

/// A closed solid given by its faces.
#[derive(Debug, Clone)]
pub struct Solid<S: Clone> {
    pub faces: Vec<Polygon<S>>,
}

impl<S: Clone + Send + Sync> Solid<S> {
    pub const fn new(faces: Vec<Polygon<S>>) -> Self {
        Solid { faces }
    }

    /// Right prism over a footprint `profile`, from `elevation` up to
    /// `elevation + height`.
    ///
    /// The profile may wind either way; it is reoriented counter-clockwise so
    /// every face normal points out of the solid. Returns an empty solid for
    /// profiles with fewer than three vertices or a non-positive height.
    pub fn extrude(
        profile: &[Point2<Real>],
        elevation: Real,
        height: Real,
        metadata: Option<S>,
    ) -> Self {
        if profile.len() < 3 || height <= 0.0 {
            return Solid { faces: Vec::new() };
        }

        let mut ring: Vec<Point2<Real>> = profile.to_vec();
        if signed_area_2d(&ring) < 0.0 {
            ring.reverse();
        }

        let top = elevation + height;
        let mut faces = Vec::with_capacity(ring.len() + 2);

        // Bottom faces down: clockwise from above
        faces.push(Polygon::new(
            ring.iter()
                .rev()
                .map(|p| Point3::new(p.x, p.y, elevation))
                .collect(),
            metadata.clone(),
        ));
        faces.push(Polygon::new(
            ring.iter().map(|p| Point3::new(p.x, p.y, top)).collect(),
            metadata.clone(),
        ));

        for (a, b) in ring.iter().zip(ring.iter().cycle().skip(1)) {
            faces.push(Polygon::new(
                vec![
                    Point3::new(a.x, a.y, elevation),
                    Point3::new(b.x, b.y, elevation),
                    Point3::new(b.x, b.y, top),
                    Point3::new(a.x, a.y, top),
                ],
                metadata.clone(),
            ));
        }

        Solid { faces }
    }
}

impl<S: Clone> BoundarySurfaces<S> for Solid<S> {
    fn visit_surfaces<'a, F>(&'a self, mut f: F)
    where
        S: 'a,
        F: FnMut(&'a Polygon<S>),
    {
        for face in &self.faces {
            f(face);
        }
    }
}

/// A context building: one or more solids.
#[derive(Debug, Clone)]
pub struct Mass<S: Clone> {
    pub solids: Vec<Solid<S>>,
}

impl<S: Clone + Send + Sync> Mass<S> {
    pub const fn new(solids: Vec<Solid<S>>) -> Self {
        Mass { solids }
    }

    /// A single extruded solid; every face carries a copy of `metadata`.
    pub fn extruded(
        profile: &[Point2<Real>],
        elevation: Real,
        height: Real,
        metadata: Option<S>,
    ) -> Self {
        Mass {
            solids: vec![Solid::extrude(profile, elevation, height, metadata)],
        }
    }
}

impl<S: Clone> BoundarySurfaces<S> for Mass<S> {
    fn visit_surfaces<'a, F>(&'a self, mut f: F)
    where
        S: 'a,
        F: FnMut(&'a Polygon<S>),
    {
        for solid in &self.solids {
            solid.visit_surfaces(&mut f);
        }
    }
}

/// Bare polygon lists are surface sources too.
impl<S: Clone> BoundarySurfaces<S> for [Polygon<S>] {
    fn visit_surfaces<'a, F>(&'a self, mut f: F)
    where
        S: 'a,
        F: FnMut(&'a Polygon<S>),
    {
        for face in self {
            f(face);
        }
    }
}

/// Shoelace signed area, positive for counter-clockwise rings.
pub(crate) fn signed_area_2d(ring: &[Point2<Real>]) -> Real {
    0.5 * ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<Real>()
}
