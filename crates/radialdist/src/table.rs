//! The final g(r) table and its text serialization.

use crate::error::Error;
use log::info;
use ndarray::Array1;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// The normalized result of a g(r) calculation.
///
/// Each entry corresponds to one shell, ordered by increasing radius. The
/// raw pair counts are kept alongside g(r) so that callers can judge the
/// sampling noise of each shell.
#[derive(Clone, Debug, PartialEq)]
pub struct RdfTable {
    r_centers: Array1<f64>,
    g_values: Array1<f64>,
    pair_counts: Array1<u64>,
    n_frames: usize,
}

impl RdfTable {
    pub(crate) fn new(
        r_centers: Array1<f64>,
        g_values: Array1<f64>,
        pair_counts: Array1<u64>,
        n_frames: usize,
    ) -> Self {
        assert!(r_centers.len() == g_values.len() && g_values.len() == pair_counts.len());
        RdfTable {
            r_centers,
            g_values,
            pair_counts,
            n_frames,
        }
    }

    pub fn len(&self) -> usize {
        self.r_centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r_centers.is_empty()
    }

    pub fn r_centers(&self) -> &Array1<f64> {
        &self.r_centers
    }

    pub fn g_values(&self) -> &Array1<f64> {
        &self.g_values
    }

    pub fn pair_counts(&self) -> &Array1<u64> {
        &self.pair_counts
    }

    /// the number of frames that contributed to the table
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// iterate over the `(r_center, g)` rows
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.r_centers
            .iter()
            .copied()
            .zip(self.g_values.iter().copied())
    }

    /// Write one `<r_center> <g>` line per shell, optionally preceded by a
    /// `#`-prefixed header line.
    pub fn write_to<W: Write>(&self, mut writer: W, header: bool) -> std::io::Result<()> {
        if header {
            writeln!(writer, "# r g(r)")?;
        }
        for (r, g) in self.rows() {
            writeln!(writer, "{r} {g}")?;
        }
        writer.flush()
    }

    /// Create (or truncate) the file at `path` and write the table to it.
    ///
    /// A failure leaves `self` untouched, so the caller can try again
    /// (e.g. with another path) without recomputing anything.
    pub fn write_to_path(&self, path: impl AsRef<Path>, header: bool) -> Result<(), Error> {
        let path = path.as_ref();
        File::create(path)
            .and_then(|file| self.write_to(BufWriter::new(file), header))
            .map_err(|err| Error::write(Some(path.to_path_buf()), err))?;
        info!("wrote {} g(r) rows to {}", self.len(), path.display());
        Ok(())
    }
}
