//! Small interpolation and line helpers for the Kindle simulation.
//!
//! These are the scalar formulas the fire and day/night code lean on:
//! midpoints, two-point line fitting, range remapping, and linear
//! interpolation. Every operation that divides reports a zero divisor as
//! [`MathError::DivisionByZero`] instead of returning NaN or infinity.

/// Errors that can occur in math helpers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    /// The operation would divide by zero.
    #[error("division by zero in {operation}")]
    DivisionByZero {
        /// Name of the operation that hit the zero divisor.
        operation: &'static str,
    },
}

/// Return `Ok(divisor)` if it is usable, or a [`MathError::DivisionByZero`]
/// tagged with `operation`.
fn nonzero(divisor: f32, operation: &'static str) -> Result<f32, MathError> {
    if divisor == 0.0 || !divisor.is_finite() {
        Err(MathError::DivisionByZero { operation })
    } else {
        Ok(divisor)
    }
}

/// The value equidistant from `a` and `b`.
pub fn average(a: f32, b: f32) -> f32 {
    a + (b - a) / 2.0
}

/// Slope of the line through `(x1, y1)` and `(x2, y2)`.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] for a vertical line (`x1 == x2`).
pub fn slope(x1: f32, y1: f32, x2: f32, y2: f32) -> Result<f32, MathError> {
    let run = nonzero(x2 - x1, "slope")?;
    Ok((y2 - y1) / run)
}

/// Y-intercept of the line with `slope` that passes through `(x, y)`.
pub fn y_intercept(x: f32, y: f32, slope: f32) -> f32 {
    slope.mul_add(-x, y)
}

/// Point where `y = m1*x + b1` meets `y = m2*x + b2`.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] when the lines are parallel.
pub fn intersect_point(m1: f32, b1: f32, m2: f32, b2: f32) -> Result<(f32, f32), MathError> {
    let denom = nonzero(m1 - m2, "intersect_point")?;
    let x = (b2 - b1) / denom;
    Ok((x, m1.mul_add(x, b1)))
}

/// Remap `input` from `[0, origin_max]` onto `[0, out_max]`.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] if `origin_max` is zero.
pub fn map_from_zero(origin_max: f32, out_max: f32, input: f32) -> Result<f32, MathError> {
    let span = nonzero(origin_max, "map_from_zero")?;
    Ok(out_max / span * input)
}

/// Remap `input` from `[origin_min, origin_max]` onto `[out_min, out_max]`.
///
/// The result is not clamped; inputs outside the origin range extrapolate.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] if the origin range is empty.
pub fn map_range(
    origin_min: f32,
    origin_max: f32,
    out_min: f32,
    out_max: f32,
    input: f32,
) -> Result<f32, MathError> {
    let span = nonzero(origin_max - origin_min, "map_range")?;
    Ok(((out_max - out_min) / span).mul_add(input - origin_min, out_min))
}

/// Integer form of [`map_range`].
///
/// The ratio of spans is computed with integer division before it is
/// applied, so uneven spans step rather than scale smoothly.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] if the origin range is empty.
pub fn map_range_int(
    origin_min: i64,
    origin_max: i64,
    out_min: i64,
    out_max: i64,
    input: i64,
) -> Result<i64, MathError> {
    let overflow = MathError::DivisionByZero {
        operation: "map_range_int",
    };
    let span = origin_max.checked_sub(origin_min).ok_or_else(|| overflow.clone())?;
    let ratio = out_max
        .checked_sub(out_min)
        .and_then(|out_span| out_span.checked_div(span))
        .ok_or_else(|| overflow.clone())?;
    input
        .checked_sub(origin_min)
        .and_then(|offset| ratio.checked_mul(offset))
        .and_then(|scaled| out_min.checked_add(scaled))
        .ok_or(overflow)
}

/// Interpolate from `a` to `b` by `t`, with `t` clamped to `[0, 1]`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    lerp_unclamped(a, b, t.clamp(0.0, 1.0))
}

/// Interpolate from `a` to `b` by `t` without clamping.
pub fn lerp_unclamped(a: f32, b: f32, t: f32) -> f32 {
    (b - a).mul_add(t, a)
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns [`MathError::DivisionByZero`] if `a == b`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> Result<f32, MathError> {
    let span = nonzero(b - a, "inverse_lerp")?;
    Ok(((value - a) / span).clamp(0.0, 1.0))
}
