//! Linear interpolation between two reference points

use core::fmt;

/// The reference points of a conversion share the same `x`, or lie at infinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DegenerateScale;

impl fmt::Display for DegenerateScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("degenerate scale: reference points must be finite and distinct in x")
    }
}

impl core::error::Error for DegenerateScale {}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Interval {
    min: f64,
    width: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            width: max - min,
        }
    }
}

/// Maps values from one interval onto another.
///
/// Computed in `f64`: scales with a large offset, like the die temperature, lose a noticeable
/// fraction of a degree in `f32`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lerp {
    pub from: Interval,
    pub to: Interval,
}

impl Lerp {
    /// The line through `(x0, y0)` and `(x1, y1)`.
    pub fn through((x0, y0): (f64, f64), (x1, y1): (f64, f64)) -> Self {
        Self {
            from: Interval::new(x0, x1),
            to: Interval::new(y0, y1),
        }
    }

    /// Rise over run. Fails unless both the run and the slope are finite and the run is non-zero.
    pub fn slope(&self) -> Result<f64, DegenerateScale> {
        let slope = self.to.width / self.from.width;

        if self.from.width.is_finite() && slope.is_finite() {
            Ok(slope)
        } else {
            Err(DegenerateScale)
        }
    }

    pub fn map(&self, value: f64) -> Result<f64, DegenerateScale> {
        let slope = self.slope()?;

        Ok(self.to.min + slope * (value - self.from.min))
    }
}

/// Evaluates the line through `(x0, y0)` and `(x1, y1)` at `x`.
///
/// ```rust
/// # use ltc4162::lerp::{interpolate, DegenerateScale};
/// assert_eq!(interpolate(0.0, 0.0, 1.0, 2.0, 3.0), Ok(6.0));
/// assert_eq!(interpolate(1.0, 5.0, 1.0, 6.0, 3.0), Err(DegenerateScale));
/// ```
pub fn interpolate(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> Result<f64, DegenerateScale> {
    Lerp::through((x0, y0), (x1, y1)).map(x)
}
