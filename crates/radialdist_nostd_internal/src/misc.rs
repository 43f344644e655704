//! Rounding helpers. `f64::floor` & friends live in `std`, so we can't
//! reach for them inside of this crate.

/// Largest integral value that doesn't exceed `x`.
///
/// This is only meaningful for `|x| < 2⁶³` (the cast saturates outside of
/// that range). [`crate::wrap_component`] reduces larger ratios before
/// calling it.
#[inline(always)]
pub fn floor(x: f64) -> f64 {
    let truncated = (x as i64) as f64;
    if truncated > x { truncated - 1.0 } else { truncated }
}

/// Smallest integral value that isn't less than `x`. The same range caveat
/// as [`floor`] applies.
#[inline(always)]
pub fn ceil(x: f64) -> f64 {
    let truncated = (x as i64) as f64;
    if truncated < x { truncated + 1.0 } else { truncated }
}

/// squared euclidean norm of a 3-vector
#[inline(always)]
pub fn squared_norm(v: &[f64; 3]) -> f64 {
    // NOTE: .powi can't be used in no_std crates
    v[0] * v[0] + (v[1] * v[1] + v[2] * v[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_and_ceil() {
        assert_eq!(floor(1.4), 1.0);
        assert_eq!(floor(1.0), 1.0);
        assert_eq!(floor(-0.5), -1.0);
        assert_eq!(floor(-2.0), -2.0);
        assert_eq!(floor(0.0), 0.0);

        assert_eq!(ceil(1.4), 2.0);
        assert_eq!(ceil(1.0), 1.0);
        assert_eq!(ceil(-0.5), 0.0);
        assert_eq!(ceil(-2.0), -2.0);
    }

    #[test]
    fn squared_norm_simple() {
        assert_eq!(squared_norm(&[3.0, 4.0, 0.0]), 25.0);
        assert_eq!(squared_norm(&[-1.0, -2.0, 2.0]), 9.0);
    }
}
