//! Spherical-to-Cartesian transform for light-source placement
//!
//! Sample points are directions (theta, phi) in the frame of the reference
//! mPMT: theta is the polar angle off the module's facing axis (+z), phi the
//! azimuth in the window plane. The simulation wants absolute positions in
//! the WCSim global frame, so the transform scales the direction by the scan
//! radius and offsets it by the surveyed module centre.

use nalgebra::Vector3;

/// Centre of the mPMT 58 window in the WCSim global frame, in cm.
///
/// Surveyed value from the WCTE geometry definition. A single named constant
/// on purpose: every emitted position is relative to it, and it must track
/// the geometry files, not be re-derived here.
pub const MPMT58_ORIGIN_CM: Vector3<f64> = Vector3::new(0.0, 0.0, -128.05);

/// Unit direction for a (theta, phi) pair in the mPMT frame.
pub fn unit_direction(theta: f64, phi: f64) -> Vector3<f64> {
    Vector3::new(
        theta.sin() * phi.cos(),
        theta.sin() * phi.sin(),
        theta.cos(),
    )
}

/// Absolute source position at distance `radius_cm` from the mPMT 58 window
/// along (theta, phi). Pure: well-formed inputs cannot fail.
pub fn source_position(radius_cm: f64, theta: f64, phi: f64) -> Vector3<f64> {
    MPMT58_ORIGIN_CM + radius_cm * unit_direction(theta, phi)
}
