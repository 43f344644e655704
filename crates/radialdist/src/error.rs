// We follow the same approach as the rest of the crate family: the
// internal (no_std) crate reports problems with `&'static str`, and the
// public crate wraps them in a single opaque `Error` type.
//
// Each ErrorKind variant wraps a small struct that knows how to display
// itself. Callers that need to react to a failure (e.g. retry a write
// without recomputing) inspect `Error::category`.

use std::path::PathBuf;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

/// Broad classification of an [`Error`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller supplied invalid settings. Reported before any frame is
    /// processed.
    Configuration,
    /// A frame couldn't be processed (e.g. a non-positive box length).
    Data,
    /// The numeric result couldn't be persisted. The computation itself
    /// succeeded.
    Io,
    /// The run was cancelled between frames.
    Cancelled,
}

/// The underlying internal error type
#[non_exhaustive]
#[derive(Debug)]
enum ErrorKind {
    /// An error that occurs when the bin width or max radius is problematic
    BinSpec(BinSpecError),
    /// An error that occurs when an integer lies outside of the acceptable
    /// range of values
    IntegerRange(IntegerRangeError),
    /// An error that occurs when no output path was configured
    OutputPathPresence(OutputPathPresenceError),
    /// An error that occurs when the trajectory doesn't hold any frames
    NoFrames(NoFramesError),
    /// An error that occurs when the thread pool can't be constructed
    ThreadPool(ThreadPoolError),
    /// An error that occurs when a frame reports an invalid box
    BoxGeometry(BoxGeometryError),
    /// An error that occurs when a frame's positions are laid out wrong
    FrameLayout(FrameLayoutError),
    /// An error reported by a trajectory while producing a frame
    FrameAccess(FrameAccessError),
    /// An error that occurs while writing the g(r) table
    Write(WriteError),
    /// The run was cancelled between frames
    Cancelled(CancelledError),
}

// define constructor methods for Error
impl Error {
    /// produce an error indicating that the bin width or max radius is
    /// problematic
    pub(crate) fn bin_spec(what: &'static str, bin_width: f64, max_radius: f64) -> Self {
        Error {
            kind: ErrorKind::BinSpec(BinSpecError {
                what,
                bin_width,
                max_radius,
            }),
        }
    }

    /// produce an error indicating that an integer lies outside the acceptable
    /// range of values
    pub(crate) fn integer_range(
        description: &'static str,
        actual: i64,
        min_val: i64,
        max_val: i64,
    ) -> Self {
        Error {
            kind: ErrorKind::IntegerRange(IntegerRangeError {
                description,
                actual,
                min_val,
                max_val,
            }),
        }
    }

    /// produce an error indicating that no output path was specified
    pub(crate) fn output_path_presence() -> Self {
        Error {
            kind: ErrorKind::OutputPathPresence(OutputPathPresenceError),
        }
    }

    /// produce an error indicating that the trajectory is empty
    pub(crate) fn no_frames() -> Self {
        Error {
            kind: ErrorKind::NoFrames(NoFramesError),
        }
    }

    pub(crate) fn thread_pool(what: String) -> Self {
        Error {
            kind: ErrorKind::ThreadPool(ThreadPoolError(what)),
        }
    }

    /// produce an error indicating that frame `frame_index` has an invalid
    /// box
    pub(crate) fn box_geometry(frame_index: usize, lengths: [f64; 3], what: &'static str) -> Self {
        Error {
            kind: ErrorKind::BoxGeometry(BoxGeometryError {
                frame_index,
                lengths,
                what,
            }),
        }
    }

    /// produce an error indicating that the positions of frame `frame_index`
    /// can't be viewed as a `(3, n_particles)` array
    pub(crate) fn frame_layout(frame_index: usize, what: &'static str) -> Self {
        Error {
            kind: ErrorKind::FrameLayout(FrameLayoutError { frame_index, what }),
        }
    }

    /// Produce an error indicating that a trajectory couldn't provide frame
    /// `frame_index`.
    ///
    /// This is public so that implementors of [`crate::Trajectory`] can
    /// report their own failures.
    pub fn frame_access(frame_index: usize, what: impl Into<String>) -> Self {
        Error {
            kind: ErrorKind::FrameAccess(FrameAccessError {
                frame_index,
                what: what.into(),
            }),
        }
    }

    /// produce an error indicating that writing the table failed
    pub(crate) fn write(path: Option<PathBuf>, source: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Write(WriteError { path, source }),
        }
    }

    pub(crate) fn cancelled() -> Self {
        Error {
            kind: ErrorKind::Cancelled(CancelledError),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            ErrorKind::BinSpec(_)
            | ErrorKind::IntegerRange(_)
            | ErrorKind::OutputPathPresence(_)
            | ErrorKind::NoFrames(_)
            | ErrorKind::ThreadPool(_) => ErrorCategory::Configuration,
            ErrorKind::BoxGeometry(_) | ErrorKind::FrameLayout(_) | ErrorKind::FrameAccess(_) => {
                ErrorCategory::Data
            }
            ErrorKind::Write(_) => ErrorCategory::Io,
            ErrorKind::Cancelled(_) => ErrorCategory::Cancelled,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind {
            ErrorKind::Write(ref err) => Some(&err.source),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        self.kind.fmt(f)
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match *self {
            ErrorKind::BinSpec(ref err) => err.fmt(f),
            ErrorKind::IntegerRange(ref err) => err.fmt(f),
            ErrorKind::OutputPathPresence(ref err) => err.fmt(f),
            ErrorKind::NoFrames(ref err) => err.fmt(f),
            ErrorKind::ThreadPool(ref err) => err.fmt(f),
            ErrorKind::BoxGeometry(ref err) => err.fmt(f),
            ErrorKind::FrameLayout(ref err) => err.fmt(f),
            ErrorKind::FrameAccess(ref err) => err.fmt(f),
            ErrorKind::Write(ref err) => err.fmt(f),
            ErrorKind::Cancelled(ref err) => err.fmt(f),
        }
    }
}

#[derive(Clone, Debug)]
struct BinSpecError {
    what: &'static str,
    bin_width: f64,
    max_radius: f64,
}

impl core::fmt::Display for BinSpecError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid distance bins (bin width = {}, max radius = {}): {}",
            self.bin_width, self.max_radius, self.what
        )
    }
}

#[derive(Clone, Debug)]
struct IntegerRangeError {
    description: &'static str,
    actual: i64,
    min_val: i64,
    max_val: i64,
}

impl core::fmt::Display for IntegerRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{} has a value of {}. The value should be no less than {} and \
             not exceed {}",
            self.description, self.actual, self.min_val, self.max_val
        )
    }
}

#[derive(Clone, Debug)]
struct OutputPathPresenceError;

impl core::fmt::Display for OutputPathPresenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "an output path was not specified")
    }
}

#[derive(Clone, Debug)]
struct NoFramesError;

impl core::fmt::Display for NoFramesError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "the trajectory doesn't hold any frames")
    }
}

#[derive(Clone, Debug)]
struct ThreadPoolError(String);

impl core::fmt::Display for ThreadPoolError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unable to build the thread pool: {}", self.0)
    }
}

#[derive(Clone, Debug)]
struct BoxGeometryError {
    frame_index: usize,
    lengths: [f64; 3],
    what: &'static str,
}

impl core::fmt::Display for BoxGeometryError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let [lx, ly, lz] = self.lengths;
        write!(
            f,
            "frame {} has a box of [{lx}, {ly}, {lz}]: {}",
            self.frame_index, self.what
        )
    }
}

#[derive(Clone, Debug)]
struct FrameLayoutError {
    frame_index: usize,
    what: &'static str,
}

impl core::fmt::Display for FrameLayoutError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "problem with frame {}: {}", self.frame_index, self.what)
    }
}

#[derive(Clone, Debug)]
struct FrameAccessError {
    frame_index: usize,
    what: String,
}

impl core::fmt::Display for FrameAccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unable to load frame {}: {}", self.frame_index, self.what)
    }
}

#[derive(Debug)]
struct WriteError {
    path: Option<PathBuf>,
    source: std::io::Error,
}

impl core::fmt::Display for WriteError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.path {
            Some(ref path) => write!(
                f,
                "unable to write the g(r) table to {}: {}",
                path.display(),
                self.source
            ),
            None => write!(f, "unable to write the g(r) table: {}", self.source),
        }
    }
}

#[derive(Clone, Debug)]
struct CancelledError;

impl core::fmt::Display for CancelledError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "the calculation was cancelled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(
            Error::bin_spec("the bin width must be positive", 0.0, 1.0).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::integer_range("n_skip", -1, 0, 9).category(),
            ErrorCategory::Configuration
        );
        assert_eq!(
            Error::box_geometry(3, [1.0, 0.0, 1.0], "box lengths must be positive").category(),
            ErrorCategory::Data
        );
        assert_eq!(Error::frame_access(0, "oops").category(), ErrorCategory::Data);
        let io_err = std::io::Error::other("disk full");
        assert_eq!(Error::write(None, io_err).category(), ErrorCategory::Io);
        assert_eq!(Error::cancelled().category(), ErrorCategory::Cancelled);
    }

    #[test]
    fn messages() {
        let err = Error::integer_range("n_skip", 12, 0, 9);
        assert_eq!(
            err.to_string(),
            "n_skip has a value of 12. The value should be no less than 0 and not exceed 9"
        );

        let err = Error::box_geometry(3, [1.0, 0.0, 1.0], "box lengths must be positive");
        assert_eq!(
            err.to_string(),
            "frame 3 has a box of [1, 0, 1]: box lengths must be positive"
        );

        let err = Error::write(
            Some(PathBuf::from("out.dat")),
            std::io::Error::other("disk full"),
        );
        assert!(err.to_string().contains("out.dat"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
