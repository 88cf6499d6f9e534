//! Regular-grid sampling, evenly spaced in (sin theta, phi)

use ndarray::Array;

use crate::sampling::{SamplePoint, SampleRegion};

/// Lay out a `n_theta` x `n_phi` grid over the window.
///
/// Rows are evenly spaced in sin(theta) between the window's polar bounds
/// and mapped back through arcsin, so rows crowd toward the pole less than a
/// plain theta grid would; columns are evenly spaced in phi directly. A row
/// at theta = 0 is a single physical point however many phi columns the grid
/// has, so only its first column is emitted.
///
/// Deterministic: no randomness anywhere in this mode.
pub fn grid_points(region: &SampleRegion, n_theta: u32, n_phi: u32) -> Vec<SamplePoint> {
    debug_assert!(n_theta >= 1 && n_phi >= 1, "grid counts are validated upstream");

    let sin_thetas = Array::linspace(region.sin_theta_min, region.sin_theta_max, n_theta as usize);
    let phis = Array::linspace(region.phi_min, region.phi_max, n_phi as usize);

    let mut points = Vec::with_capacity(n_theta as usize * n_phi as usize);
    for &sin_theta in sin_thetas.iter() {
        let theta = sin_theta.asin();
        // Pole guard, reset per row: nothing emitted for this theta yet.
        let mut row_emitted = false;
        for &phi in phis.iter() {
            if theta != 0.0 || !row_emitted {
                points.push(SamplePoint { theta, phi });
                row_emitted = true;
            }
        }
    }
    points
}
