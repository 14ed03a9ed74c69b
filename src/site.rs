//! Envelopes and the observer sites derived from them.

use crate::errors::{IsovistError, Result};
use crate::float_types::{PI, Real};
use nalgebra::{Point2, Point3, Vector2};

/// A buildable volume: a horizontal footprint extruded from `elevation` by
/// `height`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    pub elevation: Real,
    pub height: Real,
    pub profile: Vec<Point2<Real>>,
}

impl Envelope {
    pub const fn new(profile: Vec<Point2<Real>>, elevation: Real, height: Real) -> Self {
        Envelope {
            elevation,
            height,
            profile,
        }
    }

    /// True if `height` lies strictly inside the envelope's vertical extent.
    ///
    /// A slice exactly at the base or the roof does not count.
    pub fn spans(&self, height: Real) -> bool {
        height > self.elevation && height < self.elevation + self.height
    }

    /// Plain average of the footprint vertices.
    pub fn vertex_average(&self) -> Option<Point2<Real>> {
        if self.profile.is_empty() {
            return None;
        }
        let sum = self
            .profile
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.coords);
        Some(Point2::from(sum / self.profile.len() as Real))
    }
}

/// The observer of one footprint slice: where the rays start and how far they
/// may travel.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserverSite {
    /// Footprint vertex average, lifted to the slice elevation
    pub center: Point3<Real>,
    /// Distance from the center to the farthest footprint vertex
    pub base_radius: Real,
    /// `base_radius` plus the caller's extra distance
    pub max_radius: Real,
}

impl ObserverSite {
    /// Create a site, validating that `max_radius` is finite and positive.
    pub fn new(center: Point3<Real>, base_radius: Real, max_radius: Real) -> Result<Self> {
        if !max_radius.is_finite() || max_radius <= 0.0 {
            return Err(IsovistError::InvalidRadius(max_radius));
        }
        Ok(ObserverSite {
            center,
            base_radius,
            max_radius,
        })
    }

    /// Site for the slice of `envelope` at `height`, casting `extra_radius`
    /// beyond the footprint's own extent.
    pub fn from_envelope(envelope: &Envelope, height: Real, extra_radius: Real) -> Result<Self> {
        let center = envelope
            .vertex_average()
            .ok_or(IsovistError::DegenerateFootprint)?;
        let base_radius = envelope
            .profile
            .iter()
            .map(|p| (p - center).norm())
            .fold(0.0, Real::max);

        Self::new(
            Point3::new(center.x, center.y, height),
            base_radius,
            base_radius + extra_radius,
        )
    }

    /// Elevation the rays are cast at.
    #[inline]
    pub fn elevation(&self) -> Real {
        self.center.z
    }

    /// Area of the unobstructed reference circle, `π R²`.
    pub fn max_area(&self) -> Real {
        PI * self.max_radius * self.max_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_envelope() -> Envelope {
        Envelope::new(
            vec![
                Point2::new(-5.0, -5.0),
                Point2::new(5.0, -5.0),
                Point2::new(5.0, 5.0),
                Point2::new(-5.0, 5.0),
            ],
            0.0,
            10.0,
        )
    }

    #[test]
    fn spans_is_strict() {
        let env = square_envelope();
        assert!(env.spans(5.0));
        assert!(!env.spans(0.0));
        assert!(!env.spans(10.0));
        assert!(!env.spans(11.0));
    }

    #[test]
    fn site_from_square_footprint() {
        let site = ObserverSite::from_envelope(&square_envelope(), 5.0, 20.0).unwrap();
        assert_eq!(site.center, Point3::new(0.0, 0.0, 5.0));
        assert_eq!(site.elevation(), 5.0);
        let half_diagonal = (50.0 as Real).sqrt();
        assert!((site.base_radius - half_diagonal).abs() < 1e-12);
        assert!((site.max_radius - (half_diagonal + 20.0)).abs() < 1e-12);
    }

    #[test]
    fn empty_profile_is_rejected() {
        let env = Envelope::new(Vec::new(), 0.0, 10.0);
        assert_eq!(
            ObserverSite::from_envelope(&env, 5.0, 20.0),
            Err(IsovistError::DegenerateFootprint)
        );
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let env = Envelope::new(vec![Point2::new(1.0, 1.0)], 0.0, 10.0);
        assert_eq!(
            ObserverSite::from_envelope(&env, 5.0, 0.0),
            Err(IsovistError::InvalidRadius(0.0))
        );
    }
}
