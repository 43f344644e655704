/*!
Computes the radial distribution function, g(r), of particles in a periodic
box from a sequence of snapshots (frames).

# High-Level: g(r)

g(r) compares the number of particle pairs separated by a distance `r`
against the number expected for an ideal gas (uniform, uncorrelated
particles) at the same density. Structure in a liquid or solid shows up as
peaks and troughs; at large separations, g(r) approaches 1.

The calculation:
1. drops the first `n_skip` frames (burn-in),
2. visits every unique pair of particles in each remaining frame, applies
   the minimum-image convention in the (orthorhombic) periodic box and
   counts the separation in the shell `[i·Δr, (i+1)·Δr)` that contains it,
3. divides the count of each shell by the ideal-gas expectation, summed
   over the processed frames (so the box may change between frames),
4. writes one `<r_center> <g>` line per shell.

# User Guide

Coordinates are supplied through the [`Trajectory`] trait. Callers that
already hold coordinates in memory can use [`InMemoryTrajectory`]. The
settings are collected by [`RdfConfigBuilder`] and the calculation is run
by [`RadialDistribution`], which implements [`Analyzer`].

Errors report an [`ErrorCategory`]. In particular, a failure to write the
output is reported as [`ErrorCategory::Io`], and
[`RadialDistribution::compute`] together with [`RdfTable::write_to_path`]
allow a retry without recomputing anything.

The crate logs through the [`log`] facade; it never installs a logger.

# Developer Guide

See the crate-level documentation for [`radialdist_nostd_internal`].
*/

#![deny(rustdoc::broken_intra_doc_links)]

// inform build-system of the crates in this package
mod analyzer;
mod config;
mod error;
mod executor;
mod histogram;
mod skip;
mod table;
mod trajectory;

// pull in symbols that visible outside of the package
pub use analyzer::{Analyzer, RadialDistribution};
pub use config::{ExecutorKind, RdfConfig, RdfConfigBuilder};
pub use error::{Error, ErrorCategory};
pub use executor::{CancellationToken, Executor, SerialExecutor, ThreadedExecutor};
pub use histogram::PairHistogram;
pub use radialdist_nostd_internal::{BoxGeometry, FrameView, ShellSpec};
pub use skip::FrameSelection;
pub use table::RdfTable;
pub use trajectory::{InMemoryTrajectory, OwnedFrame, Trajectory, frame_view};
