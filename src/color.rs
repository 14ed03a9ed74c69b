//! RGBA colors for visualization vertices.

use crate::float_types::Real;

/// Linear RGBA color, every channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: Real,
    pub g: Real,
    pub b: Real,
    pub a: Real,
}

impl Color {
    pub const fn rgba(r: Real, g: Real, b: Real, a: Real) -> Self {
        Self { r, g, b, a }
    }

    /// Color of a ray that is stopped right at the observer.
    pub const OBSTRUCTED: Color = Color::rgba(0.0, 0.0, 1.0, 0.8);

    /// Color of a ray that reaches the full cast radius.
    pub const UNOBSTRUCTED: Color = Color::rgba(0.0, 1.0, 0.8, 0.8);

    /// Component-wise linear interpolation between `self` (`t = 0`) and `other` (`t = 1`).
    ///
    /// `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Color, t: Real) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::OBSTRUCTED
    }
}

/// The two endpoints of the distance color ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshColors {
    pub near: Color,
    pub far: Color,
}

impl Default for MeshColors {
    fn default() -> Self {
        Self {
            near: Color::OBSTRUCTED,
            far: Color::UNOBSTRUCTED,
        }
    }
}

impl MeshColors {
    /// Color for a normalized distance in `[0, 1]`.
    pub fn at(&self, t: Real) -> Color {
        self.near.lerp(&self.far, t)
    }
}
