//! Spherical sample-point selection for light-injection scans
//!
//! Three alternative strategies pick source positions on a spherical cap
//! around the reference mPMT:
//! - [`grid_points`]: a regular grid, evenly spaced in (sin theta, phi)
//! - [`random_points`]: independent uniform draws over the same window
//! - [`uniform_points`]: constant density per unit solid angle
//!
//! Exactly one strategy runs per batch. All three emit [`SamplePoint`]s
//! inside a [`SampleRegion`], the bounded polar/azimuthal window that the
//! scan covers.

mod grid;
mod random;
mod uniform;

pub use grid::grid_points;
pub use random::random_points;
pub use uniform::{uniform_point, uniform_points};

use once_cell::sync::Lazy;
use thiserror::Error;

/// A single sampled direction: polar angle from the mPMT facing axis and
/// azimuth in the window plane, both in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub theta: f64,
    pub phi: f64,
}

/// Errors raised when a scan window is constructed with unusable bounds.
#[derive(Error, Debug)]
pub enum RegionError {
    #[error("sin(theta) bounds must satisfy 0 <= min < max <= 1, got [{0}, {1}]")]
    BadPolarBounds(f64, f64),
    #[error("phi bounds must satisfy 0 <= min < max <= pi/2, got [{0}, {1}]")]
    BadAzimuthBounds(f64, f64),
}

/// The bounded window on the sphere that a scan covers.
///
/// Polar bounds are stored as sin(theta) values, which is the coordinate the
/// grid and random samplers space themselves in; they map back through arcsin
/// when an angle is needed. Azimuth bounds are plain angles.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRegion {
    pub sin_theta_min: f64,
    pub sin_theta_max: f64,
    pub phi_min: f64,
    pub phi_max: f64,
}

impl SampleRegion {
    /// Build a window, rejecting bounds that would take arcsin outside its
    /// domain or describe an empty range.
    pub fn new(
        sin_theta_min: f64,
        sin_theta_max: f64,
        phi_min: f64,
        phi_max: f64,
    ) -> Result<Self, RegionError> {
        if !(0.0..=1.0).contains(&sin_theta_min)
            || !(0.0..=1.0).contains(&sin_theta_max)
            || sin_theta_min >= sin_theta_max
        {
            return Err(RegionError::BadPolarBounds(sin_theta_min, sin_theta_max));
        }
        if phi_min < 0.0 || phi_max > std::f64::consts::FRAC_PI_2 || phi_min >= phi_max {
            return Err(RegionError::BadAzimuthBounds(phi_min, phi_max));
        }
        Ok(Self {
            sin_theta_min,
            sin_theta_max,
            phi_min,
            phi_max,
        })
    }

    /// Smallest polar angle in the window, in radians.
    pub fn theta_min(&self) -> f64 {
        self.sin_theta_min.asin()
    }

    /// Largest polar angle in the window, in radians.
    pub fn theta_max(&self) -> f64 {
        self.sin_theta_max.asin()
    }

    /// Cap half-angle used by the area-uniform sampler, in radians.
    ///
    /// This is the stored sin(theta) bound read directly as an angle: the
    /// uniform mode covers a slightly shallower cap (0.89 rad for the
    /// standard window) than the 1.1 rad the grid and random modes reach
    /// through arcsin. Kept distinct from [`Self::theta_max`] on purpose:
    /// existing batch series depend on the shallower cap.
    pub fn polar_cap(&self) -> f64 {
        self.sin_theta_max
    }
}

/// Standard scan windows
pub mod regions {
    use super::*;

    /// Window used for the WCTE mPMT 58 calibration scans: polar range up to
    /// sin(1.1 rad), first azimuthal quadrant.
    pub static WCTE_MPMT58: Lazy<SampleRegion> = Lazy::new(|| {
        SampleRegion::new(
            0.0,
            (1.1_f64).sin(), // also the uniform-mode cap angle, see polar_cap()
            0.0,
            std::f64::consts::FRAC_PI_2,
        )
        .expect("mPMT 58 window bounds are valid")
    });
}
