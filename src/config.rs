//! Run configuration: CLI decoding, validation, and parameter labeling
//!
//! Flags are decoded by clap into [`Cli`] and resolved into an immutable
//! [`RunConfig`] exactly once, before any file is touched. Everything the
//! rest of the crate needs (which sampler runs, how many points, where the
//! files go) is read from that value; there is no mutable global state.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::sampling::{regions, RegionError, SampleRegion};

/// A tuning factor at or above this acts as a process-off sentinel (the
/// attenuation length becomes effectively infinite) and is printed
/// short-form in labels.
const SHORT_LABEL_THRESHOLD: f64 = 10.0;

/// Generate WCSim macro files for an mPMT 58 light-injection scan.
///
/// By default positions are laid out on an n-theta x n-phi grid over the
/// scan window; -d switches to independent random draws, -u to sampling
/// that is uniform per unit solid angle.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source distance from the mPMT 58 window, in cm
    #[arg(short = 'R', long, default_value_t = 10.0)]
    pub radius: f64,

    /// Grid mode: number of theta rows, evenly spaced in sin(theta)
    #[arg(short = 't', long, default_value_t = 10)]
    pub n_theta: u32,

    /// Grid mode: number of phi columns per theta row
    #[arg(short = 'p', long, default_value_t = 0)]
    pub n_phi: u32,

    /// Numeric ID labelling every file of this batch
    #[arg(short = 'f', long)]
    pub file_id: Option<u32>,

    /// Events per simulation run
    #[arg(short = 'e', long, default_value_t = 10_000)]
    pub n_events: u32,

    /// WCSim abwff absorption tuning factor
    #[arg(short = 'a', long)]
    pub absorption: Option<f64>,

    /// WCSim rayff Rayleigh-scattering tuning factor
    #[arg(short = 'r', long)]
    pub rayleigh: Option<f64>,

    /// Draw N positions at random in (sin theta, phi) instead of the grid
    #[arg(short = 'd', long, value_name = "N")]
    pub random_positions: Option<u32>,

    /// Draw N positions uniformly per unit solid angle instead of the grid
    #[arg(short = 'u', long, value_name = "N")]
    pub uniform_positions: Option<u32>,

    /// Directory the macro files are written into
    #[arg(long, default_value = "mac")]
    pub out_dir: PathBuf,

    /// Seed for the -d/-u samplers; unseeded runs draw one from the OS
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Errors found while resolving the command line into a [`RunConfig`].
/// All of them abort the run before any file is written.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no file ID given; pass -f <ID> to label the batch")]
    MissingFileId,
    #[error("missing -{flag} ({name}); both tuning coefficients are required")]
    MissingCoefficient { flag: char, name: &'static str },
    #[error("-d and -u are mutually exclusive; pick one sampling mode")]
    ConflictingModes,
    #[error("{0} must be at least 1")]
    ZeroCount(&'static str),
    #[error("source radius must be positive, got {0} cm")]
    NonPositiveRadius(f64),
    #[error("invalid scan window: {0}")]
    Region(#[from] RegionError),
}

/// Which sampler runs, fixed for the whole batch. Exactly one mode per run;
/// conflicting flags are rejected at validation time rather than resolved by
/// precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingPlan {
    Grid { n_theta: u32, n_phi: u32 },
    Random { n_positions: u32 },
    Uniform { n_positions: u32 },
}

impl SamplingPlan {
    /// One-line human description for the banner and the log.
    pub fn describe(&self) -> String {
        match self {
            SamplingPlan::Grid { n_theta, n_phi } => {
                format!("grid, {n_theta} theta rows x {n_phi} phi columns")
            }
            SamplingPlan::Random { n_positions } => {
                format!("random, {n_positions} positions")
            }
            SamplingPlan::Uniform { n_positions } => {
                format!("area-uniform, {n_positions} positions")
            }
        }
    }
}

/// The resolved, validated configuration of one generation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Batch identifier baked into every file name
    pub file_id: u32,
    /// Source distance from the mPMT window, cm
    pub radius_cm: f64,
    /// Events per simulation run
    pub n_events: u32,
    /// WCSim abwff factor
    pub absorption: f64,
    /// WCSim rayff factor
    pub rayleigh: f64,
    /// Selected sampling mode and its counts
    pub plan: SamplingPlan,
    /// Scan window on the sphere
    pub region: SampleRegion,
    /// Output directory for the macro files
    pub out_dir: PathBuf,
    /// Sampler seed; None means draw one at run time
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Validate the parsed command line. Checks run in order: file ID,
    /// coefficients, mode exclusivity, counts for the selected mode, radius.
    /// The first failure wins.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let file_id = cli.file_id.ok_or(ConfigError::MissingFileId)?;
        let absorption = cli.absorption.ok_or(ConfigError::MissingCoefficient {
            flag: 'a',
            name: "abwff",
        })?;
        let rayleigh = cli.rayleigh.ok_or(ConfigError::MissingCoefficient {
            flag: 'r',
            name: "rayff",
        })?;

        let plan = match (cli.random_positions, cli.uniform_positions) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingModes),
            (Some(n), None) => SamplingPlan::Random {
                n_positions: require_count("random position count", n)?,
            },
            (None, Some(n)) => SamplingPlan::Uniform {
                n_positions: require_count("uniform position count", n)?,
            },
            (None, None) => SamplingPlan::Grid {
                n_theta: require_count("theta row count", cli.n_theta)?,
                n_phi: require_count("phi column count", cli.n_phi)?,
            },
        };

        if cli.radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius(cli.radius));
        }

        Ok(Self {
            file_id,
            radius_cm: cli.radius,
            n_events: cli.n_events,
            absorption,
            rayleigh,
            plan,
            region: regions::WCTE_MPMT58.clone(),
            out_dir: cli.out_dir,
            seed: cli.seed,
        })
    }

    /// Canonical optical-parameter tag for this run's file names.
    pub fn label(&self) -> String {
        attenuation_label(self.absorption, self.rayleigh)
    }
}

fn require_count(name: &'static str, value: u32) -> Result<u32, ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroCount(name))
    } else {
        Ok(value)
    }
}

/// Canonical tag encoding the water-tuning coefficients of a run.
///
/// A coefficient at the sentinel level (>= 10) is printed with one mantissa
/// digit, an active one with three, so file names stay short for the common
/// one-process-off scans while active values keep full precision:
///
/// - both off:  `Absff1.0e+11_Rayff1.0e+11`
/// - abs active: `Absff1.100e+00_Rayff1.0e+11`
/// - ray active: `Absff1.0e+11_Rayff7.500e-01`
/// - both active: `Absff1.100e+00_Rayff7.500e-01`
pub fn attenuation_label(absorption: f64, rayleigh: f64) -> String {
    let abs_off = absorption >= SHORT_LABEL_THRESHOLD;
    let ray_off = rayleigh >= SHORT_LABEL_THRESHOLD;
    let (abs_digits, ray_digits) = match (abs_off, ray_off) {
        (true, true) => (1, 1),
        (false, true) => (3, 1),
        (true, false) => (1, 3),
        (false, false) => (3, 3),
    };
    format!(
        "Absff{}_Rayff{}",
        exp_notation(absorption, abs_digits),
        exp_notation(rayleigh, ray_digits)
    )
}

/// printf-style `%.*e`: lowercase `e`, explicit exponent sign, at least two
/// exponent digits. Rust's `{:e}` pads neither, and file names embedding
/// these labels get compared across batch series, so the exact form matters.
fn exp_notation(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent
                .parse()
                .expect("{:e} output carries an integer exponent");
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli {
            radius: 10.0,
            n_theta: 10,
            n_phi: 10,
            file_id: Some(12),
            n_events: 10_000,
            absorption: Some(1.1),
            rayleigh: Some(0.75),
            random_positions: None,
            uniform_positions: None,
            out_dir: PathBuf::from("mac"),
            seed: None,
        }
    }

    #[test]
    fn test_cli_shape() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_grid_is_the_default_plan() {
        let config = RunConfig::from_cli(base_cli()).unwrap();
        assert_eq!(
            config.plan,
            SamplingPlan::Grid {
                n_theta: 10,
                n_phi: 10
            }
        );
        assert_eq!(config.file_id, 12);
        assert_eq!(config.region, *regions::WCTE_MPMT58);
    }

    #[test]
    fn test_mode_flags_select_plan() {
        let mut cli = base_cli();
        cli.random_positions = Some(300);
        let config = RunConfig::from_cli(cli).unwrap();
        assert_eq!(config.plan, SamplingPlan::Random { n_positions: 300 });

        let mut cli = base_cli();
        cli.uniform_positions = Some(400);
        let config = RunConfig::from_cli(cli).unwrap();
        assert_eq!(config.plan, SamplingPlan::Uniform { n_positions: 400 });
    }

    #[test]
    fn test_conflicting_modes_rejected() {
        let mut cli = base_cli();
        cli.random_positions = Some(100);
        cli.uniform_positions = Some(100);
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::ConflictingModes)
        ));
    }

    #[test]
    fn test_missing_file_id_rejected() {
        let mut cli = base_cli();
        cli.file_id = None;
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::MissingFileId)
        ));
    }

    #[test]
    fn test_missing_coefficients_rejected() {
        let mut cli = base_cli();
        cli.absorption = None;
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::MissingCoefficient { flag: 'a', .. })
        ));

        let mut cli = base_cli();
        cli.rayleigh = None;
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::MissingCoefficient { flag: 'r', .. })
        ));
    }

    #[test]
    fn test_zero_counts_rejected_per_mode() {
        // -p defaults to 0, so a bare grid invocation fails loudly rather
        // than emitting nothing.
        let mut cli = base_cli();
        cli.n_phi = 0;
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::ZeroCount("phi column count"))
        ));

        let mut cli = base_cli();
        cli.random_positions = Some(0);
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::ZeroCount("random position count"))
        ));

        // Grid counts are ignored when a count mode is selected.
        let mut cli = base_cli();
        cli.n_phi = 0;
        cli.uniform_positions = Some(10);
        assert!(RunConfig::from_cli(cli).is_ok());
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let mut cli = base_cli();
        cli.radius = 0.0;
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::NonPositiveRadius(_))
        ));

        let mut cli = base_cli();
        cli.radius = -3.0;
        assert!(matches!(
            RunConfig::from_cli(cli),
            Err(ConfigError::NonPositiveRadius(_))
        ));
    }

    #[test]
    fn test_exp_notation_matches_printf() {
        assert_eq!(exp_notation(0.000555, 3), "5.550e-04");
        assert_eq!(exp_notation(0.000555, 1), "5.6e-04");
        assert_eq!(exp_notation(0.00052, 1), "5.2e-04");
        assert_eq!(exp_notation(10e10, 1), "1.0e+11");
        assert_eq!(exp_notation(10.0, 1), "1.0e+01");
        assert_eq!(exp_notation(1.1, 3), "1.100e+00");
        assert_eq!(exp_notation(0.0, 3), "0.000e+00");
        assert_eq!(exp_notation(-2.5, 1), "-2.5e+00");
    }

    #[test]
    fn test_label_branches() {
        // Sentinel coefficients short, active coefficients long.
        assert_eq!(
            attenuation_label(10e10, 10e10),
            "Absff1.0e+11_Rayff1.0e+11"
        );
        assert_eq!(
            attenuation_label(1.1, 10e10),
            "Absff1.100e+00_Rayff1.0e+11"
        );
        assert_eq!(
            attenuation_label(10e10, 0.75),
            "Absff1.0e+11_Rayff7.500e-01"
        );
        assert_eq!(
            attenuation_label(1.1, 0.75),
            "Absff1.100e+00_Rayff7.500e-01"
        );
    }

    #[test]
    fn test_label_threshold_is_inclusive() {
        assert_eq!(attenuation_label(10.0, 10.0), "Absff1.0e+01_Rayff1.0e+01");
        assert_eq!(
            attenuation_label(9.999, 10.0),
            "Absff9.999e+00_Rayff1.0e+01"
        );
    }

    #[test]
    fn test_plan_describe() {
        assert_eq!(
            SamplingPlan::Grid {
                n_theta: 3,
                n_phi: 4
            }
            .describe(),
            "grid, 3 theta rows x 4 phi columns"
        );
        assert_eq!(
            SamplingPlan::Uniform { n_positions: 500 }.describe(),
            "area-uniform, 500 positions"
        );
    }

    #[test]
    fn test_error_messages_name_the_flags() {
        assert!(ConfigError::MissingFileId.to_string().contains("-f"));
        assert!(ConfigError::ConflictingModes.to_string().contains("-d"));
        let err = ConfigError::MissingCoefficient {
            flag: 'a',
            name: "abwff",
        };
        assert!(err.to_string().contains("abwff"));
    }
}
