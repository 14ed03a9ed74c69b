//! Area-based visibility scoring.

use crate::errors::{IsovistError, Result};
use crate::float_types::Real;
use crate::isovist::Isovist;

/// Achieved and attainable area of one observer site.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteScore {
    /// Area of the isovist
    pub achieved_area: Real,
    /// Area of the unobstructed circle, `π R²`
    pub max_area: Real,
}

impl SiteScore {
    pub fn of(isovist: &Isovist) -> Self {
        SiteScore {
            achieved_area: isovist.area(),
            max_area: isovist.site.max_area(),
        }
    }

    /// `100 · achieved / max`, in `[0, 100]`.
    pub fn percentage(&self) -> Real {
        percentage(self.achieved_area, self.max_area)
    }
}

/// Running totals across observer sites.
///
/// Sites are added in input order, so the totals do not depend on how the
/// sites were computed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreAccumulator {
    pub achieved_area: Real,
    pub max_area: Real,
    pub sites: usize,
}

impl ScoreAccumulator {
    pub const fn new() -> Self {
        ScoreAccumulator {
            achieved_area: 0.0,
            max_area: 0.0,
            sites: 0,
        }
    }

    pub fn add(&mut self, site: &SiteScore) {
        self.achieved_area += site.achieved_area;
        self.max_area += site.max_area;
        self.sites += 1;
    }

    /// Aggregate score, `100 · Σ achieved / Σ max`.
    ///
    /// Fails with [`IsovistError::NoQualifyingSlice`] when nothing was
    /// accumulated, since there is no reference area to divide by.
    pub fn finish(&self, height: Real) -> Result<Real> {
        if self.sites == 0 || self.max_area <= 0.0 {
            return Err(IsovistError::NoQualifyingSlice { height });
        }
        Ok(percentage(self.achieved_area, self.max_area))
    }
}

impl std::iter::Sum<SiteScore> for ScoreAccumulator {
    fn sum<I: Iterator<Item = SiteScore>>(iter: I) -> Self {
        iter.fold(ScoreAccumulator::new(), |mut acc, s| {
            acc.add(&s);
            acc
        })
    }
}

// An inscribed ray polygon can't exceed its circle; the clamp only absorbs rounding.
fn percentage(achieved: Real, max: Real) -> Real {
    if max <= 0.0 {
        return 0.0;
    }
    (100.0 * achieved / max).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_accumulator_is_an_error() {
        let acc = ScoreAccumulator::new();
        assert_eq!(
            acc.finish(5.0),
            Err(IsovistError::NoQualifyingSlice { height: 5.0 })
        );
    }

    #[test]
    fn ratio_of_sums_not_mean_of_ratios() {
        let acc: ScoreAccumulator = [
            SiteScore {
                achieved_area: 50.0,
                max_area: 100.0,
            },
            SiteScore {
                achieved_area: 300.0,
                max_area: 300.0,
            },
        ]
        .into_iter()
        .sum();
        assert_eq!(acc.sites, 2);
        assert!((acc.finish(1.0).unwrap() - 87.5).abs() < 1e-12);
    }

    #[test]
    fn percentage_is_clamped() {
        let s = SiteScore {
            achieved_area: 101.0,
            max_area: 100.0,
        };
        assert_eq!(s.percentage(), 100.0);
    }
}
