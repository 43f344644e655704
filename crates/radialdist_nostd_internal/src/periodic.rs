//! Periodic boundary handling for orthorhombic boxes.
//!
//! Only boxes with mutually orthogonal edges are supported. Each axis is
//! wrapped independently, so the edge lengths don't need to match.

use crate::misc::floor;

/// The edge lengths of an orthorhombic periodic box, along with their
/// precomputed reciprocals.
///
/// The constructor guarantees that every length is finite and positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    lengths: [f64; 3],
    inv_lengths: [f64; 3],
}

impl BoxGeometry {
    pub fn new(lengths: [f64; 3]) -> Result<BoxGeometry, &'static str> {
        if lengths.iter().any(|l| !l.is_finite()) {
            Err("box lengths must be finite")
        } else if lengths.iter().any(|&l| l <= 0.0) {
            Err("box lengths must be positive")
        } else {
            Ok(BoxGeometry {
                lengths,
                inv_lengths: [1.0 / lengths[0], 1.0 / lengths[1], 1.0 / lengths[2]],
            })
        }
    }

    /// convenience constructor for a cube
    pub fn cubic(length: f64) -> Result<BoxGeometry, &'static str> {
        BoxGeometry::new([length; 3])
    }

    pub fn lengths(&self) -> &[f64; 3] {
        &self.lengths
    }

    pub fn inv_lengths(&self) -> &[f64; 3] {
        &self.inv_lengths
    }

    pub fn volume(&self) -> f64 {
        self.lengths[0] * self.lengths[1] * self.lengths[2]
    }

    /// Apply the minimum-image convention to a raw displacement vector.
    ///
    /// Every component of the returned vector lies in `[-L/2, L/2)`, where
    /// `L` is the box length along that axis, and differs from the input
    /// component by an integer multiple of `L`.
    #[inline(always)]
    pub fn minimum_image(&self, displacement: [f64; 3]) -> [f64; 3] {
        [
            wrap_component(displacement[0], self.lengths[0], self.inv_lengths[0]),
            wrap_component(displacement[1], self.lengths[1], self.inv_lengths[1]),
            wrap_component(displacement[2], self.lengths[2], self.inv_lengths[2]),
        ]
    }
}

/// Displacements spanning at least this many box lengths are reduced with
/// `%` before wrapping
const MAX_DIRECT_PERIODS: f64 = 4503599627370496.0; // 2⁵²

/// Wrap a single displacement component into `[-length/2, length/2)`.
///
/// `inv_length` must be `1.0 / length`.
#[inline(always)]
pub fn wrap_component(d: f64, length: f64, inv_length: f64) -> f64 {
    let half = 0.5 * length;
    let n_periods = d * inv_length;
    // `floor` is only exact well below 2⁶³. The remainder is exact, so it
    // leaves the result congruent to `d`
    let d = if -MAX_DIRECT_PERIODS < n_periods && n_periods < MAX_DIRECT_PERIODS {
        d
    } else {
        d % length
    };
    let mut wrapped = d - length * floor(d * inv_length + 0.5);
    // rounding in `d * inv_length` can leave us a hair outside of the interval
    if wrapped >= half {
        wrapped -= length;
    } else if wrapped < -half {
        wrapped += length;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_geometry() {
        assert!(BoxGeometry::new([1.0, 0.0, 1.0]).is_err());
        assert!(BoxGeometry::new([1.0, 1.0, -3.0]).is_err());
        assert!(BoxGeometry::new([f64::NAN, 1.0, 1.0]).is_err());
        assert!(BoxGeometry::new([1.0, f64::INFINITY, 1.0]).is_err());
        assert!(BoxGeometry::cubic(0.0).is_err());
    }

    #[test]
    fn geometry_props() {
        let geometry = BoxGeometry::new([2.0, 4.0, 5.0]).unwrap();
        assert_eq!(geometry.volume(), 40.0);
        assert_eq!(geometry.inv_lengths(), &[0.5, 0.25, 0.2]);
    }

    #[test]
    fn wrap_simple() {
        let geometry = BoxGeometry::cubic(10.0).unwrap();
        assert_eq!(geometry.minimum_image([9.0, 0.0, 0.0]), [-1.0, 0.0, 0.0]);
        assert_eq!(geometry.minimum_image([-9.0, 4.0, -4.0]), [1.0, 4.0, -4.0]);
        // several periods away
        assert_eq!(geometry.minimum_image([31.0, -27.0, 0.0]), [1.0, 3.0, 0.0]);
        // the interval is half-open
        assert_eq!(geometry.minimum_image([5.0, -5.0, 15.0]), [-5.0, -5.0, -5.0]);
    }

    #[test]
    fn wrap_axes_are_independent() {
        let geometry = BoxGeometry::new([10.0, 4.0, 100.0]).unwrap();
        assert_eq!(geometry.minimum_image([3.0, 3.0, 3.0]), [3.0, -1.0, 3.0]);
    }

    #[test]
    fn wrap_huge_displacements() {
        for &length in [1.0, 7.3, 10.0].iter() {
            let inv_length = 1.0 / length;
            for &d in [1e17, -1e17, 3.5e19, -9.3e20, 1e300, -1e300].iter() {
                let w = wrap_component(d, length, inv_length);
                assert!((-0.5 * length) <= w && w < (0.5 * length), "d = {d}: {w}");
                // `%` is exact, so d % length is congruent to d
                assert_eq!(wrap_component(d % length, length, inv_length), w);
            }
        }
    }

    #[test]
    fn wrap_interval_and_congruence() {
        let lengths = [1.0, 2.5, 7.3, 10.0];
        for &length in lengths.iter() {
            let inv_length = 1.0 / length;
            for i in -400..=400 {
                let d = (i as f64) * 0.037 * length;
                let w = wrap_component(d, length, inv_length);
                assert!((-0.5 * length) <= w && w < (0.5 * length));

                // w and d must differ by an integer number of box lengths
                let n_periods = (d - w) / length;
                let nearest = floor(n_periods + 0.5);
                let err = n_periods - nearest;
                assert!(-1e-9 < err && err < 1e-9);
            }
        }
    }
}
