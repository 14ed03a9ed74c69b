//! The view radius run: validate inputs, derive one observer site per
//! envelope slice, build each site's isovist and mesh, and score them all.

use crate::color::MeshColors;
use crate::cull::cull_faces;
use crate::errors::{IsovistError, Result};
use crate::float_types::{DEFAULT_RAY_COUNT, Real};
use crate::isovist::Isovist;
use crate::mesh::IsovistMesh;
use crate::polygon::Polygon;
use crate::score::{ScoreAccumulator, SiteScore};
use crate::site::{Envelope, ObserverSite};
use crate::surfaces::BoundarySurfaces;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Caller parameters of a run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewRadiusInputs {
    /// Elevation to slice the envelopes at
    pub height: Real,
    /// Extra cast distance beyond each footprint's own extent
    pub max_radius: Real,
    /// Rays per observer site
    pub ray_count: usize,
    /// Endpoints of the ray length color ramp
    pub colors: MeshColors,
}

impl Default for ViewRadiusInputs {
    fn default() -> Self {
        ViewRadiusInputs {
            height: 0.0,
            max_radius: 0.0,
            ray_count: DEFAULT_RAY_COUNT,
            colors: MeshColors::default(),
        }
    }
}

impl ViewRadiusInputs {
    pub fn new(height: Real, max_radius: Real) -> Self {
        ViewRadiusInputs {
            height,
            max_radius,
            ..Default::default()
        }
    }

    pub const fn with_ray_count(mut self, ray_count: usize) -> Self {
        self.ray_count = ray_count;
        self
    }

    pub const fn with_colors(mut self, colors: MeshColors) -> Self {
        self.colors = colors;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.ray_count == 0 {
            return Err(IsovistError::InvalidRayCount(self.ray_count));
        }
        if !self.max_radius.is_finite() || self.max_radius < 0.0 {
            return Err(IsovistError::InvalidRadius(self.max_radius));
        }
        Ok(())
    }
}

/// Everything a run produces. `isovists`, `meshes` and `sites` are parallel
/// vectors, one entry per qualifying envelope in input order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewRadiusOutputs {
    /// Aggregate visibility score in `[0, 100]`
    pub score: Real,
    pub sites: Vec<SiteScore>,
    pub isovists: Vec<Isovist>,
    pub meshes: Vec<IsovistMesh>,
}

/// Result of one observer site.
struct SiteResult {
    score: SiteScore,
    isovist: Isovist,
    mesh: IsovistMesh,
}

/// Run the whole computation.
///
/// `envelopes` and `buildings` are optional because hosts may fail to supply
/// either model; both must be present and non-empty, otherwise the run aborts
/// before any geometry is touched.
pub fn execute<S, B>(
    inputs: &ViewRadiusInputs,
    envelopes: Option<&[Envelope]>,
    buildings: Option<&[B]>,
) -> Result<ViewRadiusOutputs>
where
    S: Clone + Send + Sync,
    B: BoundarySurfaces<S> + Sync,
{
    let envelopes = envelopes.ok_or(IsovistError::MissingInput("envelope"))?;
    let buildings = buildings.ok_or(IsovistError::MissingInput("context building"))?;
    if envelopes.is_empty() {
        return Err(IsovistError::EmptyInput("envelopes"));
    }
    if buildings.is_empty() {
        return Err(IsovistError::EmptyInput("context buildings"));
    }
    inputs.validate()?;

    let mut faces: Vec<&Polygon<S>> =
        Vec::with_capacity(buildings.iter().map(|b| b.surface_count()).sum());
    for building in buildings {
        building.visit_surfaces(|face| faces.push(face));
    }

    let slices: Vec<&Envelope> = envelopes
        .iter()
        .filter(|env| env.spans(inputs.height))
        .collect();
    log::debug!(
        "{} of {} envelopes span height {}, {} context surfaces",
        slices.len(),
        envelopes.len(),
        inputs.height,
        faces.len()
    );
    if slices.is_empty() {
        log::warn!("no envelope spans height {}", inputs.height);
    }

    let results = process_slices(&slices, &faces, inputs)?;

    let total: ScoreAccumulator = results.iter().map(|r| r.score).sum();
    let mut outputs = ViewRadiusOutputs {
        score: 0.0,
        sites: Vec::with_capacity(results.len()),
        isovists: Vec::with_capacity(results.len()),
        meshes: Vec::with_capacity(results.len()),
    };
    for result in results {
        outputs.sites.push(result.score);
        outputs.isovists.push(result.isovist);
        outputs.meshes.push(result.mesh);
    }

    outputs.score = total.finish(inputs.height)?;
    log::info!(
        "view radius score {:.3} over {} sites at height {}",
        outputs.score,
        total.sites,
        inputs.height
    );
    Ok(outputs)
}

#[cfg(not(feature = "parallel"))]
fn process_slices<S: Clone + Send + Sync>(
    slices: &[&Envelope],
    faces: &[&Polygon<S>],
    inputs: &ViewRadiusInputs,
) -> Result<Vec<SiteResult>> {
    slices
        .iter()
        .map(|env| process_site(env, faces, inputs))
        .collect()
}

#[cfg(feature = "parallel")]
fn process_slices<S: Clone + Send + Sync>(
    slices: &[&Envelope],
    faces: &[&Polygon<S>],
    inputs: &ViewRadiusInputs,
) -> Result<Vec<SiteResult>> {
    slices
        .par_iter()
        .map(|env| process_site(env, faces, inputs))
        .collect()
}

fn process_site<S: Clone + Send + Sync>(
    envelope: &Envelope,
    faces: &[&Polygon<S>],
    inputs: &ViewRadiusInputs,
) -> Result<SiteResult> {
    let site = ObserverSite::from_envelope(envelope, inputs.height, inputs.max_radius)?;
    let candidates = cull_faces(faces, &site);
    log::debug!(
        "site at ({:.3}, {:.3}, {:.3}) radius {:.3}: {} candidate surfaces",
        site.center.x,
        site.center.y,
        site.center.z,
        site.max_radius,
        candidates.len()
    );

    let isovist = Isovist::build(&site, &candidates, inputs.ray_count)?;
    let score = SiteScore::of(&isovist);
    let mesh = IsovistMesh::from_isovist(&isovist, &inputs.colors);

    Ok(SiteResult {
        score,
        isovist,
        mesh,
    })
}
