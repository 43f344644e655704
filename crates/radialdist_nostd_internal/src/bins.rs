//! Implements types to represent "bin edges" used for distance binning.
//!
//! [`ShellSpec`] describes the spherical shells a g(r) calculation is binned
//! into (the thing a user thinks about). Inside the pair loop, we don't want
//! to take square roots, so the shells are translated into squared-distance
//! edges and wrapped by [`IrregularBinEdges`], which implements the
//! [`BinEdges`] trait.

use crate::misc::{ceil, floor};
use core::f64::consts::PI;

/// Super simple. This can be expanded as needed.
pub trait BinEdges {
    /// Calculate the bin index for a given value. Values which are equal to
    /// boundary values are considered part of the higher bin, i.e. intervals
    /// do not include the right edge.
    fn bin_index(&self, value: f64) -> Option<usize>;

    fn n_bins(&self) -> usize;
}

pub fn validate_bin_edges(edges: &[f64]) -> Result<(), &'static str> {
    if edges.len() < 2 {
        Err("A minimum of two bin edges are required")
    } else if edges.iter().any(|&x| !x.is_finite()) {
        Err("Bin edges must be finite")
    } else if edges
        .iter()
        .zip(edges.iter().skip(1))
        .any(|(&left, &right)| right <= left)
    {
        // Check if bin_edges are in strictly increasing order
        Err("Bin edges must be in strictly increasing order")
    } else {
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct IrregularBinEdges<'a> {
    bin_edges: &'a [f64],
}

impl<'a> IrregularBinEdges<'a> {
    pub fn new(bin_edges: &'a [f64]) -> Result<IrregularBinEdges<'a>, &'static str> {
        validate_bin_edges(bin_edges)?;
        Ok(IrregularBinEdges { bin_edges })
    }

    pub fn as_slice(&self) -> &'a [f64] {
        self.bin_edges
    }
}

impl BinEdges for IrregularBinEdges<'_> {
    #[inline]
    fn bin_index(&self, value: f64) -> Option<usize> {
        // written so that NaN is rejected too
        let first = self.bin_edges[0];
        let last = self.bin_edges[self.bin_edges.len() - 1];
        if !(value >= first && value < last) {
            return None;
        }

        let index = self
            .bin_edges
            .binary_search_by(|probe| probe.total_cmp(&value))
            // Ok is used for an exact match, Err for a lower bound
            .unwrap_or_else(|i| i - 1);

        Some(index)
    }

    fn n_bins(&self) -> usize {
        self.bin_edges.len() - 1
    }
}

/// relative tolerance used to decide that `max_radius / bin_width` is
/// really an integer that picked up some rounding error
const SHELL_COUNT_RTOL: f64 = 1e-9;

/// Computes `ceil(ratio)`, except that values within a tiny relative
/// distance of an integer are snapped to that integer. Without this, a
/// ratio like `10.000000000000002` would produce an 11th sliver-shell.
fn shell_count(ratio: f64) -> usize {
    let nearest = floor(ratio + 0.5);
    let diff = ratio - nearest;
    let tol = SHELL_COUNT_RTOL * ratio;
    if -tol < diff && diff < tol {
        nearest as usize
    } else {
        ceil(ratio) as usize
    }
}

/// Describes the spherical shells `[i·Δr, (i+1)·Δr)` that partition
/// `[0, max_radius)`.
///
/// There are `ceil(max_radius / Δr)` shells. When `max_radius` isn't a
/// multiple of `Δr`, the outermost shell is truncated at `max_radius`.
/// Once constructed, the shells never change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShellSpec {
    bin_width: f64,
    max_radius: f64,
    n_bins: usize,
}

impl ShellSpec {
    pub fn new(bin_width: f64, max_radius: f64) -> Result<ShellSpec, &'static str> {
        if !bin_width.is_finite() || !max_radius.is_finite() {
            Err("the bin width and max radius must be finite")
        } else if bin_width <= 0.0 {
            Err("the bin width must be positive")
        } else if max_radius <= bin_width {
            Err("the max radius must exceed the bin width")
        } else {
            Ok(ShellSpec {
                bin_width,
                max_radius,
                n_bins: shell_count(max_radius / bin_width),
            })
        }
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    /// the number of entries expected by [`Self::fill_squared_edges`]
    pub fn n_edges(&self) -> usize {
        self.n_bins + 1
    }

    pub fn inner_radius(&self, i: usize) -> f64 {
        (i as f64) * self.bin_width
    }

    pub fn outer_radius(&self, i: usize) -> f64 {
        if (i + 1) >= self.n_bins {
            self.max_radius
        } else {
            ((i + 1) as f64) * self.bin_width
        }
    }

    /// the nominal center of shell `i`, `(i + 0.5)·Δr`
    pub fn center(&self, i: usize) -> f64 {
        ((i as f64) + 0.5) * self.bin_width
    }

    /// volume enclosed between the inner and outer radius of shell `i`
    pub fn shell_volume(&self, i: usize) -> f64 {
        let inner = self.inner_radius(i);
        let outer = self.outer_radius(i);
        (4.0 / 3.0) * PI * (outer * outer * outer - inner * inner * inner)
    }

    /// Write the squared shell edges into `out`, which must hold
    /// [`Self::n_edges`] entries. The result can be wrapped in an
    /// [`IrregularBinEdges`].
    pub fn fill_squared_edges(&self, out: &mut [f64]) -> Result<(), &'static str> {
        if out.len() != self.n_edges() {
            return Err("out must hold exactly 1 more entry than the number of shells");
        }
        for (k, edge) in out.iter_mut().enumerate().take(self.n_bins) {
            let r = (k as f64) * self.bin_width;
            *edge = r * r;
        }
        out[self.n_bins] = self.max_radius * self.max_radius;
        Ok(())
    }
}
