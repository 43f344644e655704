use crate::bins::BinEdges;
use crate::histogram::BinCountsViewMut;
use crate::misc::squared_norm;
use crate::periodic::BoxGeometry;
use ndarray::ArrayView2;

/// A read-only view of a single trajectory frame: particle positions and
/// the periodic box that encloses them.
///
/// We place the following constraints on the positions array:
/// - axis 0 is the slow axis and it corresponds to the 3 spatial
///   components.
/// - axis 1 is the fast axis. The length along this axis coincides with
///   the number of particles. We require that it is contiguous (i.e. the
///   stride is unity).
/// - In other words the shape of the array is `(3, n_particles)`.
///
/// Every coordinate must be finite.
///
/// A view is never retained past the call that processes it.
#[derive(Clone, Debug)]
pub struct FrameView<'a> {
    positions: ArrayView2<'a, f64>,
    geometry: BoxGeometry,
    n_particles: usize,
}

impl<'a> FrameView<'a> {
    pub fn new(
        positions: ArrayView2<'a, f64>,
        geometry: BoxGeometry,
    ) -> Result<FrameView<'a>, &'static str> {
        let n_particles = positions.shape()[1];
        if positions.shape()[0] != 3 {
            Err("positions must hold exactly 3 spatial components along axis 0")
        } else if n_particles > 1 && positions.strides()[1] != 1 {
            Err("positions must be contiguous along the particle axis")
        } else if positions.iter().any(|x| !x.is_finite()) {
            Err("positions must be finite")
        } else {
            Ok(FrameView {
                positions,
                geometry,
                n_particles,
            })
        }
    }

    pub fn n_particles(&self) -> usize {
        self.n_particles
    }

    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    #[inline(always)]
    pub fn position(&self, i: usize) -> [f64; 3] {
        [
            self.positions[[0, i]],
            self.positions[[1, i]],
            self.positions[[2, i]],
        ]
    }
}

/// The number of unordered pairs of distinct particles, `N(N-1)/2`
pub fn n_unique_pairs(n_particles: usize) -> u64 {
    let n = n_particles as u64;
    if n < 2 { 0 } else { n * (n - 1) / 2 }
}

/// Bookkeeping returned by [`accumulate_pairs`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PairTally {
    /// number of pairs that were visited
    pub n_pairs: u64,
    /// number of pairs that were recorded in the histogram
    pub n_binned: u64,
}

/// Records the separation of every unique pair of particles in `frame`.
///
/// Each unordered pair of distinct particles is visited exactly once. The
/// separation is the minimum-image displacement, and the bin is picked by
/// comparing the squared separation against `squared_distance_bin_edges`
/// (so no square root is ever taken). Pairs that don't fall inside any bin
/// are dropped.
///
/// A frame with fewer than 2 particles contributes nothing (it isn't an
/// error).
pub fn accumulate_pairs(
    counts: &mut BinCountsViewMut,
    frame: &FrameView,
    squared_distance_bin_edges: &impl BinEdges,
) -> Result<PairTally, &'static str> {
    if counts.n_bins() != squared_distance_bin_edges.n_bins() {
        return Err("the histogram must hold 1 count per distance bin");
    }

    let geometry = &frame.geometry;
    let mut tally = PairTally::default();
    for i_a in 0..frame.n_particles {
        let pos_a = frame.position(i_a);
        for i_b in (i_a + 1)..frame.n_particles {
            let pos_b = frame.position(i_b);
            let separation = geometry.minimum_image([
                pos_b[0] - pos_a[0],
                pos_b[1] - pos_a[1],
                pos_b[2] - pos_a[2],
            ]);
            tally.n_pairs += 1;
            if let Some(bin_index) = squared_distance_bin_edges.bin_index(squared_norm(&separation))
            {
                counts.increment(bin_index);
                tally.n_binned += 1;
            }
        }
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bins::{IrregularBinEdges, ShellSpec};

    #[test]
    fn frame_view_errors() {
        let geometry = BoxGeometry::cubic(10.0).unwrap();
        let positions = [0.0; 6];
        assert!(FrameView::new(ArrayView2::from_shape((2, 3), &positions).unwrap(), geometry).is_err());
        // the particle axis isn't contiguous
        let transposed = ArrayView2::from_shape((2, 3), &positions).unwrap().reversed_axes();
        assert!(FrameView::new(transposed, geometry).is_err());

        let frame = FrameView::new(ArrayView2::from_shape((3, 2), &positions).unwrap(), geometry);
        assert_eq!(frame.unwrap().n_particles(), 2);

        // non-finite coordinates
        for bad in [f64::NAN, -f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let positions = [0.0, bad, 0.0, 0.0, 0.0, 0.0];
            let view = ArrayView2::from_shape((3, 2), &positions).unwrap();
            assert!(FrameView::new(view, geometry).is_err());
        }
    }

    #[test]
    fn n_unique_pairs_simple() {
        assert_eq!(n_unique_pairs(0), 0);
        assert_eq!(n_unique_pairs(1), 0);
        assert_eq!(n_unique_pairs(2), 1);
        assert_eq!(n_unique_pairs(5), 10);
    }

    #[test]
    fn two_particles_across_boundary() {
        // positions (0,0,0) & (9,0,0) in a box of side 10 are only 1 apart
        #[rustfmt::skip]
        let positions = [
            0.0, 9.0,
            0.0, 0.0,
            0.0, 0.0,
        ];
        let frame = FrameView::new(
            ArrayView2::from_shape((3, 2), &positions).unwrap(),
            BoxGeometry::cubic(10.0).unwrap(),
        )
        .unwrap();

        let shells = ShellSpec::new(1.0, 5.0).unwrap();
        let mut edges = [0.0; 6];
        shells.fill_squared_edges(&mut edges).unwrap();
        let bins = IrregularBinEdges::new(&edges).unwrap();

        let mut storage = [0_u64; 5];
        let mut counts = BinCountsViewMut::from_slice(&mut storage);
        let tally = accumulate_pairs(&mut counts, &frame, &bins).unwrap();
        assert_eq!(
            tally,
            PairTally {
                n_pairs: 1,
                n_binned: 1
            }
        );
        assert_eq!(storage, [0, 1, 0, 0, 0]);
    }

    #[test]
    fn every_pair_visited_once() {
        // 5 particles. With a max radius of 9 in a box of side 10, every
        // minimum-image separation (at most 5·√3) gets binned
        #[rustfmt::skip]
        let positions = [
            0.5, 9.5, 3.0, 7.0, 5.0,
            0.5, 1.0, 8.0, 2.0, 5.0,
            9.9, 0.2, 4.0, 6.0, 5.0,
        ];
        let frame = FrameView::new(
            ArrayView2::from_shape((3, 5), &positions).unwrap(),
            BoxGeometry::cubic(10.0).unwrap(),
        )
        .unwrap();

        let shells = ShellSpec::new(1.0, 9.0).unwrap();
        let mut edges = [0.0; 10];
        shells.fill_squared_edges(&mut edges).unwrap();
        let bins = IrregularBinEdges::new(&edges).unwrap();

        let mut storage = [0_u64; 9];
        let mut counts = BinCountsViewMut::from_slice(&mut storage);
        let tally = accumulate_pairs(&mut counts, &frame, &bins).unwrap();
        assert_eq!(tally.n_pairs, n_unique_pairs(5));
        assert_eq!(tally.n_binned, n_unique_pairs(5));
        assert_eq!(counts.total(), tally.n_binned);

        // repeating the frame doubles every count
        let tally = accumulate_pairs(&mut counts, &frame, &bins).unwrap();
        assert_eq!(tally.n_binned, 10);
        assert_eq!(counts.total(), 20);
    }

    #[test]
    fn distant_pairs_are_dropped() {
        // the separation along x is 4 and the max radius is 3
        #[rustfmt::skip]
        let positions = [
            1.0, 5.0, 1.5,
            1.0, 1.0, 1.0,
            1.0, 1.0, 1.0,
        ];
        let frame = FrameView::new(
            ArrayView2::from_shape((3, 3), &positions).unwrap(),
            BoxGeometry::new([20.0, 20.0, 20.0]).unwrap(),
        )
        .unwrap();

        let shells = ShellSpec::new(1.0, 3.0).unwrap();
        let mut edges = [0.0; 4];
        shells.fill_squared_edges(&mut edges).unwrap();
        let bins = IrregularBinEdges::new(&edges).unwrap();

        let mut storage = [0_u64; 3];
        let mut counts = BinCountsViewMut::from_slice(&mut storage);
        let tally = accumulate_pairs(&mut counts, &frame, &bins).unwrap();
        assert_eq!(tally.n_pairs, 3);
        // only (0, 2) is close enough: 0.5 apart
        assert_eq!(tally.n_binned, 1);
        assert_eq!(storage, [1, 0, 0]);
    }

    #[test]
    fn mismatched_bins() {
        let positions = [0.0; 6];
        let frame = FrameView::new(
            ArrayView2::from_shape((3, 2), &positions).unwrap(),
            BoxGeometry::cubic(10.0).unwrap(),
        )
        .unwrap();
        let bins = IrregularBinEdges::new(&[0.0, 1.0, 4.0]).unwrap();
        let mut storage = [0_u64; 3];
        let mut counts = BinCountsViewMut::from_slice(&mut storage);
        assert!(accumulate_pairs(&mut counts, &frame, &bins).is_err());
    }
}
