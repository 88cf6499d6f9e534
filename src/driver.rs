//! Batch generation: sample, transform, emit
//!
//! One call to [`generate`] runs a whole batch: resolve the sampler seed,
//! write the tuning descriptor, then walk the sampled points in order and
//! write one position macro each. Emission is fail-fast: the first write
//! error aborts the rest of the batch and is returned as-is, with any files
//! already written left in place.

use std::path::PathBuf;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};

use crate::config::{RunConfig, SamplingPlan};
use crate::geometry::source_position;
use crate::io::{EmissionError, MacWriter};
use crate::sampling::{grid_points, random_points, uniform_points, SamplePoint};

/// What a completed batch produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of position macros written
    pub positions_written: usize,
    /// Path of the tuning descriptor
    pub tuning_file: PathBuf,
    /// Seed the sampler ran with; None for the deterministic grid mode
    pub seed: Option<u64>,
}

/// Run one batch under an already-validated configuration.
pub fn generate(config: &RunConfig) -> Result<RunSummary, EmissionError> {
    let writer = MacWriter::create(&config.out_dir, config.file_id, config.label())?;
    let tuning_file = writer.write_tuning_descriptor(config.absorption, config.rayleigh)?;
    debug!("wrote {}", tuning_file.display());

    let (points, seed) = sample_points(config);
    info!("{} -> {} positions", config.plan.describe(), points.len());

    for (index, point) in points.iter().enumerate() {
        let position = source_position(config.radius_cm, point.theta, point.phi);
        let path =
            writer.write_position_macro(index, *point, &position, config.radius_cm, config.n_events)?;
        debug!("wrote {}", path.display());
    }

    Ok(RunSummary {
        positions_written: points.len(),
        tuning_file,
        seed,
    })
}

/// Produce the batch's points under the configured plan, resolving the seed
/// for the random modes. Grid mode never touches the RNG.
fn sample_points(config: &RunConfig) -> (Vec<SamplePoint>, Option<u64>) {
    match config.plan {
        SamplingPlan::Grid { n_theta, n_phi } => {
            (grid_points(&config.region, n_theta, n_phi), None)
        }
        SamplingPlan::Random { n_positions } => {
            let seed = config.seed.unwrap_or(thread_rng().next_u64());
            info!("random sampler seed: {seed}");
            let mut rng = StdRng::seed_from_u64(seed);
            (
                random_points(&config.region, n_positions, &mut rng),
                Some(seed),
            )
        }
        SamplingPlan::Uniform { n_positions } => {
            let seed = config.seed.unwrap_or(thread_rng().next_u64());
            info!("uniform sampler seed: {seed}");
            let mut rng = StdRng::seed_from_u64(seed);
            (
                uniform_points(&config.region, n_positions, &mut rng),
                Some(seed),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::regions;
    use std::fs;
    use tempfile::tempdir;

    fn test_config(plan: SamplingPlan, out_dir: PathBuf) -> RunConfig {
        RunConfig {
            file_id: 7,
            radius_cm: 10.0,
            n_events: 100,
            absorption: 1.1,
            rayleigh: 0.75,
            plan,
            region: regions::WCTE_MPMT58.clone(),
            out_dir,
            seed: None,
        }
    }

    fn sorted_file_names(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_two_point_grid_batch_end_to_end() {
        // nTheta = 2, nPhi = 1 over the standard window: exactly the two
        // window corners (theta_min, phi_min) and (1.1, phi_min), one macro
        // each, plus the tuning descriptor.
        let dir = tempdir().unwrap();
        let config = test_config(
            SamplingPlan::Grid {
                n_theta: 2,
                n_phi: 1,
            },
            dir.path().join("mac"),
        );

        let summary = generate(&config).unwrap();
        assert_eq!(summary.positions_written, 2);
        assert_eq!(summary.seed, None);
        assert!(summary.tuning_file.exists());

        let names = sorted_file_names(&config.out_dir);
        assert_eq!(names.len(), 3);
        assert!(names[0].starts_with("tuning_f007_"));
        assert!(names[1].contains("_th0.00_phi0.00_p0000"));
        assert!(names[2].contains("_th1.10_phi0.00_p0001"));

        // Pole point sits straight off the window face at R = 10.
        let pole_macro = fs::read_to_string(config.out_dir.join(&names[1])).unwrap();
        assert!(pole_macro.contains("/gps/pos/centre 0.00 0.00 -118.05 cm"));

        // The theta = 1.1 corner: x = 10 sin(1.1), z offset 10 cos(1.1).
        let edge_macro = fs::read_to_string(config.out_dir.join(&names[2])).unwrap();
        assert!(edge_macro.contains("/gps/pos/centre 8.91 0.00 -123.51 cm"));
    }

    #[test]
    fn test_random_batch_is_reproducible_with_a_seed() {
        let dir = tempdir().unwrap();
        let mut config_a = test_config(
            SamplingPlan::Random { n_positions: 20 },
            dir.path().join("a"),
        );
        config_a.seed = Some(12345);
        let mut config_b = test_config(
            SamplingPlan::Random { n_positions: 20 },
            dir.path().join("b"),
        );
        config_b.seed = Some(12345);

        let summary_a = generate(&config_a).unwrap();
        let summary_b = generate(&config_b).unwrap();
        assert_eq!(summary_a.seed, Some(12345));
        assert_eq!(summary_a.positions_written, 20);
        assert_eq!(summary_b.positions_written, 20);

        // Same seed, same draw sequence, same file names.
        assert_eq!(
            sorted_file_names(&config_a.out_dir),
            sorted_file_names(&config_b.out_dir)
        );
    }

    #[test]
    fn test_uniform_batch_writes_requested_count() {
        let dir = tempdir().unwrap();
        let mut config = test_config(
            SamplingPlan::Uniform { n_positions: 25 },
            dir.path().join("mac"),
        );
        config.seed = Some(9);

        let summary = generate(&config).unwrap();
        assert_eq!(summary.positions_written, 25);
        // 25 position macros + 1 tuning descriptor.
        assert_eq!(sorted_file_names(&config.out_dir).len(), 26);
    }

    #[test]
    fn test_unwritable_out_dir_aborts_before_tuning_file() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("mac");
        fs::write(&blocker, "not a directory").unwrap();

        let config = test_config(
            SamplingPlan::Grid {
                n_theta: 2,
                n_phi: 2,
            },
            blocker,
        );
        assert!(matches!(generate(&config), Err(EmissionError::Io(_))));
    }
}
