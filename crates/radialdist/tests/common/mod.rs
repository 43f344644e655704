// the reason this is named mod.rs has to do with some complexities of how
// testing is handled
//
// we are following the advice of the rust book
// https://doc.rust-lang.org/book/ch11-03-test-organization.html#submodules-in-integration-tests
#![allow(dead_code)]

use radialdist::{InMemoryTrajectory, OwnedFrame};
use rand::distr::{Distribution, Uniform};
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::SeedableRng;
use std::path::PathBuf;

// based on numpy!
// https://numpy.org/doc/stable/reference/generated/numpy.isclose.html
pub fn isclose(actual: f64, ref_val: f64, rtol: f64, atol: f64) -> bool {
    let actual_nan = actual.is_nan();
    let ref_nan = ref_val.is_nan();
    if actual_nan || ref_nan {
        actual_nan && ref_nan
    } else {
        (actual - ref_val).abs() <= (atol + rtol * ref_val.abs())
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a frame of `n_particles` points scattered uniformly through a box
/// with the specified lengths
pub fn uniform_frame(rng: &mut Xoshiro256PlusPlus, n_particles: usize, lengths: [f64; 3]) -> OwnedFrame {
    let samplers = lengths.map(|length| Uniform::new(0.0, length).unwrap());
    let points: Vec<[f64; 3]> = (0..n_particles)
        .map(|_| {
            [
                samplers[0].sample(rng),
                samplers[1].sample(rng),
                samplers[2].sample(rng),
            ]
        })
        .collect();
    OwnedFrame::from_points(&points, lengths)
}

/// Build a reproducible trajectory of uniformly scattered particles. Every
/// frame uses the same box.
pub fn uniform_trajectory(
    seed: u64,
    n_frames: usize,
    n_particles: usize,
    lengths: [f64; 3],
) -> InMemoryTrajectory {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    (0..n_frames)
        .map(|_| uniform_frame(&mut rng, n_particles, lengths))
        .collect()
}

/// A path inside the system's temporary directory that is unique to the
/// current test process.
pub fn temp_output_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("radialdist-{}-{name}", std::process::id()))
}
