//! Defines the validated settings of a g(r) calculation.

use crate::error::Error;
use radialdist_nostd_internal::ShellSpec;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Selects how frames are distributed across workers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutorKind {
    /// process every frame on the calling thread
    #[default]
    Serial,
    /// process frames on a dedicated rayon thread pool. When `n_threads` is
    /// `None`, rayon picks the number of threads.
    Threaded { n_threads: Option<NonZeroUsize> },
}

/// The immutable settings of a single g(r) calculation.
///
/// Instances can only be produced by [`RdfConfigBuilder::build`], so the
/// bin width, the max radius and the skip count are always valid (the
/// check against the number of frames happens once a trajectory is known).
#[derive(Clone, Debug, PartialEq)]
pub struct RdfConfig {
    output_path: PathBuf,
    shells: ShellSpec,
    n_skip: usize,
    write_header: bool,
    executor: ExecutorKind,
}

impl RdfConfig {
    pub fn builder() -> RdfConfigBuilder {
        RdfConfigBuilder::new()
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn shells(&self) -> &ShellSpec {
        &self.shells
    }

    pub fn bin_width(&self) -> f64 {
        self.shells.bin_width()
    }

    pub fn max_radius(&self) -> f64 {
        self.shells.max_radius()
    }

    pub fn n_bins(&self) -> usize {
        self.shells.n_bins()
    }

    pub fn n_skip(&self) -> usize {
        self.n_skip
    }

    pub fn write_header(&self) -> bool {
        self.write_header
    }

    pub fn executor(&self) -> ExecutorKind {
        self.executor
    }
}

/// Collects the settings of a g(r) calculation.
///
/// ```
/// use radialdist::RdfConfigBuilder;
///
/// let config = RdfConfigBuilder::new()
///     .output_path("rdf.dat")
///     .bin_width(0.1)
///     .max_radius(5.0)
///     .n_skip(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.n_bins(), 50);
/// ```
#[derive(Clone, Debug)]
pub struct RdfConfigBuilder {
    output_path: Option<PathBuf>,
    bin_width: f64,
    max_radius: f64,
    n_skip: i64,
    write_header: bool,
    executor: ExecutorKind,
}

impl Default for RdfConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RdfConfigBuilder {
    /// The bin width and max radius start out as `NaN`, so they must be
    /// set explicitly. The skip count defaults to 0, the header is written
    /// and frames are processed serially.
    pub fn new() -> Self {
        RdfConfigBuilder {
            output_path: None,
            bin_width: f64::NAN,
            max_radius: f64::NAN,
            n_skip: 0,
            write_header: true,
            executor: ExecutorKind::Serial,
        }
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn bin_width(mut self, bin_width: f64) -> Self {
        self.bin_width = bin_width;
        self
    }

    pub fn max_radius(mut self, max_radius: f64) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// the number of leading frames to exclude
    pub fn n_skip(mut self, n_skip: i64) -> Self {
        self.n_skip = n_skip;
        self
    }

    pub fn write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    pub fn executor(mut self, executor: ExecutorKind) -> Self {
        self.executor = executor;
        self
    }

    pub fn build(self) -> Result<RdfConfig, Error> {
        let output_path = match self.output_path {
            Some(path) if !path.as_os_str().is_empty() => path,
            _ => return Err(Error::output_path_presence()),
        };
        let shells = ShellSpec::new(self.bin_width, self.max_radius)
            .map_err(|what| Error::bin_spec(what, self.bin_width, self.max_radius))?;
        if self.n_skip < 0 {
            return Err(Error::integer_range("n_skip", self.n_skip, 0, i64::MAX));
        }

        Ok(RdfConfig {
            output_path,
            shells,
            n_skip: self.n_skip as usize,
            write_header: self.write_header,
            executor: self.executor,
        })
    }
}
