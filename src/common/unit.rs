//! Length units used by DrawingML.
//!
//! Every position and extent in a presentation part is expressed in EMUs
//! (English Metric Units). These helpers convert the units callers think in.

pub const EMUS_PER_INCH: i64 = 914_400;

/// Convert inches to EMUs, rounding to the nearest unit.
#[inline]
pub fn inches(value: f64) -> i64 {
    (value * EMUS_PER_INCH as f64).round() as i64
}
