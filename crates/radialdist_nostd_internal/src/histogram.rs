use ndarray::{ArrayView1, ArrayViewMut1};

/// Holds the pair count for every distance bin.
///
/// # Note
/// There is some benefit to defining this even though it wraps
/// ArrayViewMut1 since it helps contain all references to the ndarray
/// package to a few files.
///
/// The bin count is fixed by the underlying buffer. An index outside of
/// `[0, n_bins)` is a bug in the caller, so [`Self::increment`] panics
/// rather than silently dropping the pair.
pub struct BinCountsViewMut<'a> {
    data: ArrayViewMut1<'a, u64>,
}

impl<'a> BinCountsViewMut<'a> {
    pub fn from_array_view(array_view: ArrayViewMut1<'a, u64>) -> Self {
        Self { data: array_view }
    }

    pub fn from_slice(counts: &'a mut [u64]) -> Self {
        Self {
            data: ArrayViewMut1::from(counts),
        }
    }

    pub fn n_bins(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub fn increment(&mut self, bin_index: usize) {
        self.data[bin_index] += 1;
    }

    pub fn counts(&self) -> ArrayView1<u64> {
        self.data.view()
    }

    /// the total number of pairs recorded across all bins
    pub fn total(&self) -> u64 {
        self.data.iter().sum()
    }

    /// add the counts from `other` to `self`
    pub fn merge(&mut self, other: ArrayView1<u64>) -> Result<(), &'static str> {
        if other.len() != self.n_bins() {
            return Err("can't merge histograms with different numbers of bins");
        }
        for (mine, theirs) in self.data.iter_mut().zip(other.iter()) {
            *mine += *theirs;
        }
        Ok(())
    }
}
