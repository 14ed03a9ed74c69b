//! Errors surfaced by the view radius computation

use crate::float_types::Real;

/// Everything that can abort a view radius run.
///
/// Per-ray and per-surface outcomes are never errors: a ray that hits nothing
/// resolves to its fallback point and a degenerate surface is skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IsovistError {
    /// (MissingInput) A required input collection was not supplied
    #[error("(MissingInput) Unable to find {0} model.")]
    MissingInput(&'static str),
    /// (EmptyInput) A required input collection has no entries
    #[error("(EmptyInput) No {0} in model.")]
    EmptyInput(&'static str),
    /// (NoQualifyingSlice) No envelope spans the requested height, so there is
    /// no reference area to score against
    #[error("(NoQualifyingSlice) No envelope spans the target height {height}")]
    NoQualifyingSlice { height: Real },
    /// (InvalidRayCount) At least one ray is required
    #[error("(InvalidRayCount) Ray count must be at least 1, got {0}")]
    InvalidRayCount(usize),
    /// (InvalidRadius) A cast radius must be finite and strictly positive
    #[error("(InvalidRadius) Radius must be finite and positive, got {0}")]
    InvalidRadius(Real),
    /// (DegenerateFootprint) An envelope profile has no vertices
    #[error("(DegenerateFootprint) Envelope profile has no vertices")]
    DegenerateFootprint,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, IsovistError>;
