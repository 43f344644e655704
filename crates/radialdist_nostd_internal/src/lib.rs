//! The numeric kernel behind the `radialdist` crate.
//!
//! Everything in here operates on borrowed views and never allocates, so the
//! crate stays `no_std`. The public `radialdist` crate owns all buffers,
//! drives the frame loop and handles errors/IO.
//!
//! The pieces, leaf-first:
//! - [`BoxGeometry`] applies the minimum-image convention in an orthorhombic
//!   periodic box
//! - [`ShellSpec`] describes the spherical shells and [`IrregularBinEdges`]
//!   maps squared distances onto them
//! - [`BinCountsViewMut`] holds the per-shell pair counts
//! - [`accumulate_pairs`] visits every unique pair in a [`FrameView`]
//! - [`IdealGasReference`] & [`normalize`] turn the counts into g(r)
#![no_std]
mod bins;
mod histogram;
mod misc;
mod normalize;
mod pairs;
mod periodic;

pub use bins::{BinEdges, IrregularBinEdges, ShellSpec, validate_bin_edges};
pub use histogram::BinCountsViewMut;
pub use misc::{ceil, floor, squared_norm};
pub use normalize::{IdealGasReference, normalize};
pub use pairs::{FrameView, PairTally, accumulate_pairs, n_unique_pairs};
pub use periodic::{BoxGeometry, wrap_component};
