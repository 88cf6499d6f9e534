//! Area-uniform sampling: constant density per unit solid angle
//!
//! A grid or a uniform draw in theta over-represents the pole, because the
//! band of sphere between theta and theta + d(theta) shrinks with sin(theta).
//! Drawing u uniformly in [cos(cap), 1] and taking theta = arccos(u) weights
//! theta draws by exactly sin(theta), so the expected number of points in any
//! sub-region of the cap is proportional to its solid angle. Azimuth needs no
//! weighting and is drawn uniformly.

use rand::Rng;

use crate::sampling::{SamplePoint, SampleRegion};

/// Draw one point uniformly per unit solid angle over the window's cap.
///
/// The cap half-angle is `region.polar_cap()`, not `region.theta_max()`:
/// the area-uniform mode reads the stored sin(theta) bound directly as an
/// angle.
pub fn uniform_point(region: &SampleRegion, rng: &mut impl Rng) -> SamplePoint {
    let cos_cap = region.polar_cap().cos();
    let u = rng.gen_range(cos_cap..1.0);
    SamplePoint {
        theta: u.acos(),
        phi: rng.gen_range(region.phi_min..region.phi_max),
    }
}

/// Draw `n_positions` area-uniform points, quantized to 2 decimal places.
///
/// Each point comes from an independent [`uniform_point`] call; there is no
/// cross-point coordination and no pole guard in this mode (repeated
/// theta = 0.00 points are all kept). The rounding of theta and phi to two
/// decimals is measurable in the point density near the window edges and is
/// part of the sampler's contract, not display formatting.
pub fn uniform_points(
    region: &SampleRegion,
    n_positions: u32,
    rng: &mut impl Rng,
) -> Vec<SamplePoint> {
    (0..n_positions)
        .map(|_| {
            let raw = uniform_point(region, rng);
            SamplePoint {
                theta: round_2dp(raw.theta),
                phi: round_2dp(raw.phi),
            }
        })
        .collect()
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
