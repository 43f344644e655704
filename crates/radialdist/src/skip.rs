use crate::error::Error;
use std::ops::Range;

/// The frames that take part in a calculation: every frame after the
/// first `n_skip` (burn-in) frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSelection {
    n_total: usize,
    n_skip: usize,
}

impl FrameSelection {
    /// Fails when the trajectory is empty or when `n_skip` would exclude
    /// every frame.
    pub fn new(n_total: usize, n_skip: usize) -> Result<FrameSelection, Error> {
        if n_total == 0 {
            Err(Error::no_frames())
        } else if n_skip >= n_total {
            Err(Error::integer_range(
                "n_skip",
                i64::try_from(n_skip).unwrap_or(i64::MAX),
                0,
                (n_total - 1) as i64,
            ))
        } else {
            Ok(FrameSelection { n_total, n_skip })
        }
    }

    pub fn n_total(&self) -> usize {
        self.n_total
    }

    pub fn n_skip(&self) -> usize {
        self.n_skip
    }

    pub fn n_selected(&self) -> usize {
        self.n_total - self.n_skip
    }

    /// the selected frame indices, in increasing order
    pub fn indices(&self) -> Range<usize> {
        self.n_skip..self.n_total
    }
}
