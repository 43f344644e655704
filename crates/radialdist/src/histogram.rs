//! Owned accumulation state for a g(r) calculation.

use crate::table::RdfTable;
use log::{debug, warn};
use ndarray::Array1;
use radialdist_nostd_internal::{
    BinCountsViewMut, FrameView, IdealGasReference, IrregularBinEdges, PairTally, ShellSpec,
    accumulate_pairs, normalize,
};

/// The squared shell edges, computed once per run and shared (read-only)
/// by every worker.
#[derive(Clone, Debug)]
pub(crate) struct SquaredShellEdges {
    edges: Vec<f64>,
}

impl SquaredShellEdges {
    pub(crate) fn new(shells: &ShellSpec) -> Self {
        let mut edges = vec![0.0; shells.n_edges()];
        shells
            .fill_squared_edges(&mut edges)
            .expect("the buffer holds 1 entry per edge");
        SquaredShellEdges { edges }
    }

    pub(crate) fn bin_edges(&self) -> IrregularBinEdges<'_> {
        IrregularBinEdges::new(&self.edges).expect("shell edges are strictly increasing")
    }
}

/// Pair counts accumulated over some subset of the selected frames.
///
/// Every worker owns one of these. Partial histograms are combined with
/// [`PairHistogram::merge`] once all frames are processed. The counts are
/// integers, so merging never loses precision. The per-frame ideal-gas
/// terms are stored with their frame index and only summed (in frame
/// order) by [`PairHistogram::into_table`], which makes the result
/// independent of how frames were distributed.
#[derive(Clone, Debug)]
pub struct PairHistogram {
    shells: ShellSpec,
    counts: Array1<u64>,
    frame_pair_densities: Vec<(usize, f64)>,
    n_pairs: u64,
}

impl PairHistogram {
    pub fn new(shells: ShellSpec) -> Self {
        PairHistogram {
            shells,
            counts: Array1::zeros(shells.n_bins()),
            frame_pair_densities: Vec::new(),
            n_pairs: 0,
        }
    }

    pub fn shells(&self) -> &ShellSpec {
        &self.shells
    }

    pub fn counts(&self) -> &Array1<u64> {
        &self.counts
    }

    pub fn n_frames(&self) -> usize {
        self.frame_pair_densities.len()
    }

    /// the number of pair separations evaluated so far
    pub fn n_pairs(&self) -> u64 {
        self.n_pairs
    }

    /// Bin every unique pair of `frame` and record its ideal-gas term.
    ///
    /// `bin_edges` must have been built from `self.shells()`.
    pub(crate) fn consume_frame(
        &mut self,
        frame_index: usize,
        frame: &FrameView,
        bin_edges: &IrregularBinEdges,
    ) -> PairTally {
        let n_particles = frame.n_particles();
        if n_particles < 2 {
            warn!("frame {frame_index} holds {n_particles} particle(s) and contributes no pairs");
        }

        let mut counts = BinCountsViewMut::from_array_view(self.counts.view_mut());
        let tally = accumulate_pairs(&mut counts, frame, bin_edges)
            .expect("the histogram holds 1 count per shell");
        self.n_pairs += tally.n_pairs;
        self.frame_pair_densities.push((
            frame_index,
            IdealGasReference::frame_pair_density(n_particles, frame.geometry()),
        ));

        debug!(
            "frame {frame_index}: {n_particles} particles, {} of {} pairs binned",
            tally.n_binned, tally.n_pairs
        );
        tally
    }

    /// Combine the state of 2 partial histograms.
    ///
    /// Panics if the histograms were built for different shells.
    pub fn merge(mut self, other: PairHistogram) -> PairHistogram {
        assert_eq!(self.shells, other.shells, "can't merge mismatched shells");
        let mut counts = BinCountsViewMut::from_array_view(self.counts.view_mut());
        counts
            .merge(other.counts.view())
            .expect("both histograms hold 1 count per shell");
        self.frame_pair_densities
            .extend_from_slice(&other.frame_pair_densities);
        self.n_pairs += other.n_pairs;
        self
    }

    /// Normalize the accumulated counts against the ideal-gas reference.
    pub fn into_table(mut self) -> RdfTable {
        self.frame_pair_densities
            .sort_unstable_by_key(|&(frame_index, _)| frame_index);
        let mut reference = IdealGasReference::new();
        for &(_, pair_density) in self.frame_pair_densities.iter() {
            reference.add_pair_density(pair_density);
        }

        let n_bins = self.shells.n_bins();
        let mut g_values = Array1::<f64>::zeros(n_bins);
        normalize(
            &mut g_values.view_mut(),
            self.counts.view(),
            &self.shells,
            &reference,
        )
        .expect("the histogram holds 1 count per shell");
        let r_centers = Array1::from_shape_fn(n_bins, |i| self.shells.center(i));

        RdfTable::new(r_centers, g_values, self.counts, self.frame_pair_densities.len())
    }
}
