//! Defines how frames are handed to the calculation.
//!
//! Loading trajectories (file formats, I/O) is the job of the caller. A
//! calculation only needs indexed, read-only access to frames, which is
//! what the [`Trajectory`] trait expresses. [`InMemoryTrajectory`] is a
//! minimal implementation for coordinates that are already in memory.

use crate::error::Error;
use ndarray::{Array2, ArrayView2};
use radialdist_nostd_internal::{BoxGeometry, FrameView};

/// Ordered, random access to the frames of a trajectory.
///
/// The returned [`FrameView`] borrows from the trajectory and is dropped
/// as soon as the frame has been processed. Implementations must be
/// `Sync` so that frames can be processed concurrently.
pub trait Trajectory: Sync {
    fn n_frames(&self) -> usize;

    /// Produce a view of frame `index`, where `index < self.n_frames()`.
    ///
    /// Implementations should report an invalid box with the
    /// [`crate::ErrorCategory::Data`] category (e.g. by going through
    /// [`frame_view`]).
    fn frame(&self, index: usize) -> Result<FrameView<'_>, Error>;
}

/// Builds a [`FrameView`] for frame `frame_index`, converting problems into
/// errors that name the frame.
///
/// `positions` must have the shape `(3, n_particles)` and must be
/// contiguous along the particle axis.
pub fn frame_view<'a>(
    frame_index: usize,
    positions: ArrayView2<'a, f64>,
    box_lengths: [f64; 3],
) -> Result<FrameView<'a>, Error> {
    let geometry = BoxGeometry::new(box_lengths)
        .map_err(|what| Error::box_geometry(frame_index, box_lengths, what))?;
    FrameView::new(positions, geometry).map_err(|what| Error::frame_layout(frame_index, what))
}

/// A single frame that owns its coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedFrame {
    // shape is (3, n_particles), in standard layout
    positions: Array2<f64>,
    box_lengths: [f64; 3],
}

impl OwnedFrame {
    /// `positions` should have the shape `(3, n_particles)`. Problems with
    /// the shape or the box are reported when the frame is viewed, so that
    /// the error can name the frame.
    pub fn new(positions: Array2<f64>, box_lengths: [f64; 3]) -> Self {
        let positions = if positions.is_standard_layout() {
            positions
        } else {
            positions.as_standard_layout().into_owned()
        };
        OwnedFrame {
            positions,
            box_lengths,
        }
    }

    pub fn from_points(points: &[[f64; 3]], box_lengths: [f64; 3]) -> Self {
        let positions = Array2::from_shape_fn((3, points.len()), |(component, particle)| {
            points[particle][component]
        });
        OwnedFrame {
            positions,
            box_lengths,
        }
    }

    pub fn n_particles(&self) -> usize {
        self.positions.shape()[1]
    }

    pub fn positions(&self) -> ArrayView2<'_, f64> {
        self.positions.view()
    }

    pub fn box_lengths(&self) -> [f64; 3] {
        self.box_lengths
    }

    pub fn view(&self, frame_index: usize) -> Result<FrameView<'_>, Error> {
        frame_view(frame_index, self.positions.view(), self.box_lengths)
    }
}

#[derive(Clone, Debug, Default)]
pub struct InMemoryTrajectory {
    frames: Vec<OwnedFrame>,
}

impl InMemoryTrajectory {
    pub fn new(frames: Vec<OwnedFrame>) -> Self {
        InMemoryTrajectory { frames }
    }

    pub fn push(&mut self, frame: OwnedFrame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[OwnedFrame] {
        &self.frames
    }
}

impl FromIterator<OwnedFrame> for InMemoryTrajectory {
    fn from_iter<I: IntoIterator<Item = OwnedFrame>>(iter: I) -> Self {
        InMemoryTrajectory {
            frames: iter.into_iter().collect(),
        }
    }
}

impl Trajectory for InMemoryTrajectory {
    fn n_frames(&self) -> usize {
        self.frames.len()
    }

    fn frame(&self, index: usize) -> Result<FrameView<'_>, Error> {
        match self.frames.get(index) {
            Some(frame) => frame.view(index),
            None => Err(Error::frame_access(index, "the index is out of bounds")),
        }
    }
}
