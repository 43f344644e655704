//! Backends that drive pair accumulation over the selected frames.
//!
//! Frames are independent of each other, so the natural unit of work is a
//! whole frame. Each worker owns a private [`PairHistogram`]; the partial
//! histograms are merged once every frame has been consumed, before
//! anything is normalized.

use crate::config::ExecutorKind;
use crate::error::Error;
use crate::histogram::{PairHistogram, SquaredShellEdges};
use crate::skip::FrameSelection;
use crate::trajectory::Trajectory;
use radialdist_nostd_internal::{IrregularBinEdges, ShellSpec};
use rayon::prelude::*;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A flag used to ask a running calculation to stop.
///
/// Clones share the same flag. The flag is checked before each frame is
/// processed (never in the middle of a frame).
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub trait Executor {
    /// a short label, used in log messages
    fn name(&self) -> String;

    /// Accumulate the pair counts of every frame in `selection`.
    ///
    /// Fails on the first frame that can't be loaded or processed, or once
    /// `cancel` has been triggered.
    fn accumulate(
        &self,
        trajectory: &dyn Trajectory,
        selection: &FrameSelection,
        shells: &ShellSpec,
        cancel: &CancellationToken,
    ) -> Result<PairHistogram, Error>;
}

fn process_frame(
    hist: &mut PairHistogram,
    trajectory: &dyn Trajectory,
    frame_index: usize,
    bin_edges: &IrregularBinEdges,
    cancel: &CancellationToken,
) -> Result<(), Error> {
    if cancel.is_cancelled() {
        return Err(Error::cancelled());
    }
    let frame = trajectory.frame(frame_index)?;
    hist.consume_frame(frame_index, &frame, bin_edges);
    Ok(())
}

/// Processes every frame on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    fn name(&self) -> String {
        String::from("serial")
    }

    fn accumulate(
        &self,
        trajectory: &dyn Trajectory,
        selection: &FrameSelection,
        shells: &ShellSpec,
        cancel: &CancellationToken,
    ) -> Result<PairHistogram, Error> {
        let edges = SquaredShellEdges::new(shells);
        let bin_edges = edges.bin_edges();
        let mut hist = PairHistogram::new(*shells);
        for frame_index in selection.indices() {
            process_frame(&mut hist, trajectory, frame_index, &bin_edges, cancel)?;
        }
        Ok(hist)
    }
}

/// Distributes frames across a dedicated rayon thread pool.
///
/// The pool is built once, when the executor is constructed, and never
/// touches rayon's global pool.
pub struct ThreadedExecutor {
    pool: rayon::ThreadPool,
}

impl ThreadedExecutor {
    /// When `n_threads` is `None`, rayon picks the number of threads.
    pub fn new(n_threads: Option<NonZeroUsize>) -> Result<Self, Error> {
        let mut builder =
            rayon::ThreadPoolBuilder::new().thread_name(|i| format!("radialdist-worker-{i}"));
        if let Some(n_threads) = n_threads {
            builder = builder.num_threads(n_threads.get());
        }
        let pool = builder
            .build()
            .map_err(|err| Error::thread_pool(err.to_string()))?;
        Ok(ThreadedExecutor { pool })
    }

    pub fn n_threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for ThreadedExecutor {
    fn name(&self) -> String {
        format!("threaded ({} threads)", self.n_threads())
    }

    fn accumulate(
        &self,
        trajectory: &dyn Trajectory,
        selection: &FrameSelection,
        shells: &ShellSpec,
        cancel: &CancellationToken,
    ) -> Result<PairHistogram, Error> {
        let edges = SquaredShellEdges::new(shells);
        let bin_edges = edges.bin_edges();
        let shells = *shells;
        self.pool.install(|| {
            selection
                .indices()
                .into_par_iter()
                .try_fold(
                    || PairHistogram::new(shells),
                    |mut hist, frame_index| -> Result<PairHistogram, Error> {
                        process_frame(&mut hist, trajectory, frame_index, &bin_edges, cancel)?;
                        Ok(hist)
                    },
                )
                .try_reduce(|| PairHistogram::new(shells), |a, b| Ok(a.merge(b)))
        })
    }
}

/// Build the backend selected by `kind`
pub(crate) fn build_executor(kind: ExecutorKind) -> Result<Box<dyn Executor>, Error> {
    match kind {
        ExecutorKind::Serial => Ok(Box::new(SerialExecutor)),
        ExecutorKind::Threaded { n_threads } => Ok(Box::new(ThreadedExecutor::new(n_threads)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::trajectory::{InMemoryTrajectory, OwnedFrame};

    fn lattice_trajectory(n_frames: usize) -> InMemoryTrajectory {
        (0..n_frames)
            .map(|frame| {
                let offset = 0.1 * (frame as f64);
                let points: Vec<[f64; 3]> = (0..27)
                    .map(|i| {
                        [
                            (i % 3) as f64 * 2.0 + offset,
                            ((i / 3) % 3) as f64 * 2.0,
                            (i / 9) as f64 * 2.0 - offset,
                        ]
                    })
                    .collect();
                OwnedFrame::from_points(&points, [6.0, 6.0, 6.0])
            })
            .collect()
    }

    #[test]
    fn serial_and_threaded_agree() {
        let trajectory = lattice_trajectory(9);
        let selection = FrameSelection::new(9, 2).unwrap();
        let shells = ShellSpec::new(0.5, 3.0).unwrap();
        let cancel = CancellationToken::new();

        let serial = SerialExecutor
            .accumulate(&trajectory, &selection, &shells, &cancel)
            .unwrap();
        let threaded = ThreadedExecutor::new(NonZeroUsize::new(3))
            .unwrap()
            .accumulate(&trajectory, &selection, &shells, &cancel)
            .unwrap();

        assert_eq!(serial.n_frames(), 7);
        assert_eq!(threaded.n_frames(), 7);
        assert_eq!(serial.n_pairs(), 7 * 27 * 26 / 2);
        assert_eq!(serial.counts(), threaded.counts());
        assert_eq!(serial.into_table(), threaded.into_table());
    }

    #[test]
    fn cancelled_before_start() {
        let trajectory = lattice_trajectory(3);
        let selection = FrameSelection::new(3, 0).unwrap();
        let shells = ShellSpec::new(0.5, 3.0).unwrap();
        let cancel = CancellationToken::new();
        let clone = cancel.clone();
        clone.cancel();
        assert!(cancel.is_cancelled());

        let executors: [Box<dyn Executor>; 2] = [
            Box::new(SerialExecutor),
            Box::new(ThreadedExecutor::new(NonZeroUsize::new(2)).unwrap()),
        ];
        for executor in executors.iter() {
            let err = executor
                .accumulate(&trajectory, &selection, &shells, &cancel)
                .unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Cancelled);
        }
    }

    #[test]
    fn build_from_kind() {
        let executor = build_executor(ExecutorKind::Serial).unwrap();
        assert_eq!(executor.name(), "serial");
        let executor = build_executor(ExecutorKind::Threaded {
            n_threads: NonZeroUsize::new(2),
        })
        .unwrap();
        assert_eq!(executor.name(), "threaded (2 threads)");
    }
}
