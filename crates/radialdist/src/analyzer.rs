//! Defines the [`Analyzer`] capability and the g(r) implementation of it.

use crate::config::RdfConfig;
use crate::error::Error;
use crate::executor::{CancellationToken, build_executor};
use crate::skip::FrameSelection;
use crate::table::RdfTable;
use crate::trajectory::Trajectory;
use log::info;

/// A self-contained analysis of a trajectory.
///
/// Analyzers hold nothing but their configuration, so a single instance
/// can be evaluated against any number of trajectories.
pub trait Analyzer {
    type Output;

    /// Run the analysis over `trajectory` and persist the result.
    fn evaluate(&self, trajectory: &dyn Trajectory) -> Result<Self::Output, Error>;
}

/// Computes the radial distribution function, g(r).
///
/// A run goes through 4 stages, in order: the frame selection is
/// validated, every selected frame is accumulated, the counts are
/// normalized and (for [`Analyzer::evaluate`]) the table is written to
/// the configured path.
///
/// ```no_run
/// use radialdist::{Analyzer, InMemoryTrajectory, OwnedFrame, RadialDistribution, RdfConfig};
///
/// let trajectory: InMemoryTrajectory = [OwnedFrame::from_points(
///     &[[0.0, 0.0, 0.0], [9.0, 0.0, 0.0]],
///     [10.0, 10.0, 10.0],
/// )]
/// .into_iter()
/// .collect();
/// let config = RdfConfig::builder()
///     .output_path("rdf.dat")
///     .bin_width(1.0)
///     .max_radius(5.0)
///     .build()
///     .unwrap();
/// let table = RadialDistribution::new(config).evaluate(&trajectory).unwrap();
/// assert_eq!(table.len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct RadialDistribution {
    config: RdfConfig,
    cancel: CancellationToken,
}

impl RadialDistribution {
    pub fn new(config: RdfConfig) -> Self {
        RadialDistribution {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Use `cancel` to stop runs early. Cancelling only takes effect
    /// between frames.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &RdfConfig {
        &self.config
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// The frames of `trajectory` that a run would process.
    ///
    /// Fails when the configured skip count would leave no frames.
    pub fn frame_selection(&self, trajectory: &dyn Trajectory) -> Result<FrameSelection, Error> {
        FrameSelection::new(trajectory.n_frames(), self.config.n_skip())
    }

    /// Compute the g(r) table without writing it anywhere.
    pub fn compute(&self, trajectory: &dyn Trajectory) -> Result<RdfTable, Error> {
        let selection = self.frame_selection(trajectory)?;
        let executor = build_executor(self.config.executor())?;
        let shells = self.config.shells();
        info!(
            "computing g(r) over {} of {} frames ({} shells of width {} up to {}) with the {} executor",
            selection.n_selected(),
            selection.n_total(),
            shells.n_bins(),
            shells.bin_width(),
            shells.max_radius(),
            executor.name()
        );

        let hist = executor.accumulate(trajectory, &selection, shells, &self.cancel)?;
        info!(
            "accumulated {} pair separations from {} frames",
            hist.n_pairs(),
            hist.n_frames()
        );
        Ok(hist.into_table())
    }
}

impl Analyzer for RadialDistribution {
    type Output = RdfTable;

    /// Compute the table and write it to the configured output path.
    ///
    /// A write failure is reported with [`crate::ErrorCategory::Io`]; in
    /// that case [`RadialDistribution::compute`] followed by
    /// [`RdfTable::write_to_path`] lets the caller retry the write.
    fn evaluate(&self, trajectory: &dyn Trajectory) -> Result<RdfTable, Error> {
        let table = self.compute(trajectory)?;
        table.write_to_path(self.config.output_path(), self.config.write_header())?;
        Ok(table)
    }
}
