//! Candidate-surface culling for one observer site.
//!
//! Every filter is a hard reject. Culling only saves intersection tests: for
//! scenes where its assumptions hold, casting against the culled set gives the
//! same nearest hits as casting against every surface.

use crate::float_types::Real;
use crate::polygon::Polygon;
use crate::site::ObserverSite;
use nalgebra::Vector3;

/// Why a surface was dropped from the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No plane or zero area
    Degenerate,
    /// The surface faces away from (or edge-on to) the observer
    BackFacing,
    /// The surface centroid is farther than the cast radius in plan
    OutOfRange,
    /// The surface does not reach the observer's elevation
    OffElevation,
}

/// Classify a single surface against `site`, `Ok(())` meaning it is kept.
pub fn classify<S: Clone + Send + Sync>(
    face: &Polygon<S>,
    site: &ObserverSite,
) -> Result<(), Rejection> {
    let normal = face.normal().ok_or(Rejection::Degenerate)?;
    if face.plane().is_none() {
        return Err(Rejection::Degenerate);
    }

    let to_face = face.centroid() - site.center;

    // Keep only surfaces whose front side looks back at the observer
    let len = to_face.norm();
    if len <= Real::EPSILON || (to_face / len).dot(&normal) >= 0.0 {
        return Err(Rejection::BackFacing);
    }

    let planar = Vector3::new(to_face.x, to_face.y, 0.0);
    if planar.norm() > site.max_radius {
        return Err(Rejection::OutOfRange);
    }

    let bb = face.bounding_box();
    let elevation = site.elevation();
    if bb.mins.z > elevation || bb.maxs.z < elevation {
        return Err(Rejection::OffElevation);
    }

    Ok(())
}

/// Surfaces from `faces` that rays cast from `site` could plausibly hit,
/// in their original order.
pub fn cull_faces<'a, S: Clone + Send + Sync>(
    faces: &[&'a Polygon<S>],
    site: &ObserverSite,
) -> Vec<&'a Polygon<S>> {
    faces
        .iter()
        .copied()
        .filter(|face| match classify(*face, site) {
            Ok(()) => true,
            Err(Rejection::Degenerate) => {
                log::trace!("skipping degenerate surface with {} vertices", face.vertices.len());
                false
            },
            Err(_) => false,
        })
        .collect()
}
