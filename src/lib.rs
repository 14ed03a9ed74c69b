//! **Isovist** visibility scoring for building footprints.
//!
//! For every envelope that spans a target height, an observer is placed at the
//! footprint's vertex average and a fan of horizontal rays is cast against the
//! boundary surfaces of the surrounding context buildings. Each ray stops at
//! its nearest obstruction or at a capped radius; the resulting polygon is the
//! isovist. The ratio of isovist area to the area of the unobstructed circle,
//! summed over all footprints, gives a 0–100 score. A colored triangle fan per
//! footprint visualizes the ray lengths.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - [**stl-io**](https://en.wikipedia.org/wiki/STL_(file_format)): `.stl` export of isovist meshes
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to process observer sites in parallel
//! - **serde**: `Serialize`/`Deserialize` for inputs and outputs

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod color;
pub mod cull;
pub mod errors;
pub mod float_types;
pub mod io;
pub mod isovist;
pub mod mesh;
pub mod plane;
pub mod polygon;
pub mod score;
pub mod site;
pub mod surfaces;
pub mod triangulated;
pub mod vertex;
pub mod view_radius;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use errors::{IsovistError, Result};
pub use isovist::Isovist;
pub use mesh::IsovistMesh;
pub use site::{Envelope, ObserverSite};
pub use surfaces::{BoundarySurfaces, Mass, Solid};
pub use view_radius::{ViewRadiusInputs, ViewRadiusOutputs, execute};
