//! Random helpers used by spawning and explosions

use rand::Rng;

/// Uniform integer in `[min, max)`; returns `min` when the range is empty
pub fn random_range(rng: &mut impl Rng, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    let u: f64 = rng.random();
    let value = (u * (max - min) as f64 + min as f64).floor() as i32;
    // Guard against rounding landing exactly on max
    value.min(max - 1)
}

/// -1.0 or +1.0 with equal probability
pub fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) { -1.0 } else { 1.0 }
}
