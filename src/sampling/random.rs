//! Independent random sampling over the (sin theta, phi) window

use rand::Rng;

use crate::sampling::{SamplePoint, SampleRegion};

/// Draw `n_positions` points with theta uniform in sin(theta) and phi
/// uniform, paired positionally (one theta draw and one phi draw per point).
///
/// The pole guard here is run-wide, unlike the per-row guard of the grid
/// sampler: once any point has been kept, later theta = 0 draws are dropped.
/// The two policies stay separate on purpose; see the tests on both.
pub fn random_points(
    region: &SampleRegion,
    n_positions: u32,
    rng: &mut impl Rng,
) -> Vec<SamplePoint> {
    let mut points = Vec::with_capacity(n_positions as usize);
    let mut kept_any = false;
    for _ in 0..n_positions {
        let theta = rng
            .gen_range(region.sin_theta_min..region.sin_theta_max)
            .asin();
        let phi = rng.gen_range(region.phi_min..region.phi_max);
        if theta != 0.0 || !kept_any {
            points.push(SamplePoint { theta, phi });
            kept_any = true;
        }
    }
    points
}
