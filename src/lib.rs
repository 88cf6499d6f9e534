//! Batch generation of WCSim light-injection scan configurations
//!
//! This crate produces the GEANT4 macro files that drive calibration runs of
//! the WCTE water-Cherenkov simulation: one position macro per sampled
//! light-source location on a spherical cap around the reference mPMT, plus a
//! single water-tuning descriptor per batch. Positions can be laid out on a
//! regular grid in (sin theta, phi), drawn independently at random over the
//! same window, or drawn uniformly per unit solid angle.

pub mod config;
pub mod driver;
pub mod geometry;
pub mod io;
pub mod sampling;

// Re-exports for easier access
pub use config::{attenuation_label, Cli, ConfigError, RunConfig, SamplingPlan};
pub use driver::{generate, RunSummary};
pub use geometry::{source_position, MPMT58_ORIGIN_CM};
pub use io::{EmissionError, MacWriter};
pub use sampling::{SamplePoint, SampleRegion};
