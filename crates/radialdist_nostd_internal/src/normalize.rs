//! Converts raw pair counts into g(r).
//!
//! For a frame with `N` particles in a box of volume `V`, an ideal gas
//! (uniform, uncorrelated particles) places
//! ```text
//! idealCount_i = (N/V) * shellVolume_i * N / 2
//! ```
//! pairs in shell `i`. Because the box may change from one frame to the
//! next, we track the sum of the per-frame factor `N² / (2V)` instead of a
//! single density; multiplying that sum by a shell volume gives the
//! expected count summed over every processed frame.

use crate::bins::ShellSpec;
use crate::periodic::BoxGeometry;
use ndarray::{ArrayView1, ArrayViewMut1};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IdealGasReference {
    pair_density_sum: f64,
    n_frames: u64,
}

impl IdealGasReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// the per-frame factor `(N/V) * N / 2`
    pub fn frame_pair_density(n_particles: usize, geometry: &BoxGeometry) -> f64 {
        let n = n_particles as f64;
        (n / geometry.volume()) * n * 0.5
    }

    /// record a frame with the given particle count and box
    pub fn add_frame(&mut self, n_particles: usize, geometry: &BoxGeometry) {
        self.add_pair_density(Self::frame_pair_density(n_particles, geometry));
    }

    /// record a frame using a value previously computed by
    /// [`Self::frame_pair_density`]
    pub fn add_pair_density(&mut self, pair_density: f64) {
        self.pair_density_sum += pair_density;
        self.n_frames += 1;
    }

    pub fn n_frames(&self) -> u64 {
        self.n_frames
    }

    pub fn pair_density_sum(&self) -> f64 {
        self.pair_density_sum
    }

    /// the ideal-gas pair count for a shell of the given volume, summed
    /// over every recorded frame
    pub fn expected_count(&self, shell_volume: f64) -> f64 {
        self.pair_density_sum * shell_volume
    }
}

/// Fill `g_values` with `c_i / Σ_frames idealCount_i` for every shell.
///
/// Shells where the expected count is 0 (e.g. no frames, or no particles)
/// report `g = 0` rather than dividing by zero.
pub fn normalize(
    g_values: &mut ArrayViewMut1<f64>,
    counts: ArrayView1<u64>,
    shells: &ShellSpec,
    reference: &IdealGasReference,
) -> Result<(), &'static str> {
    if counts.len() != shells.n_bins() {
        return Err("counts must hold 1 entry per shell");
    } else if g_values.len() != shells.n_bins() {
        return Err("g_values must hold 1 entry per shell");
    }

    for (i, (g, &count)) in g_values.iter_mut().zip(counts.iter()).enumerate() {
        let expected = reference.expected_count(shells.shell_volume(i));
        *g = if expected > 0.0 {
            (count as f64) / expected
        } else {
            0.0
        };
    }
    Ok(())
}
