//! Euclidean rhythm generation.
//!
//! Hits are placed at `round(i * steps / pulses) mod steps` for each pulse.
//! Rounding is `f64::round` (half away from zero), which matches the
//! `Math.round` placement the stock presets were authored against: the
//! positions are never negative, so the two rules agree exactly.

/// Generate a Euclidean rhythm of `steps` slots carrying `pulses` hits.
///
/// Positions that round onto an already-set slot are simply set again, so a
/// pattern can end up with fewer than `pulses` hits. Callers that compare
/// against stored presets rely on this placement, do not deduplicate.
pub fn generate(steps: usize, pulses: usize) -> Vec<bool> {
    if steps == 0 {
        return vec![];
    }
    if pulses == 0 {
        return vec![false; steps];
    }
    if pulses >= steps {
        return vec![true; steps];
    }

    let mut pattern = vec![false; steps];
    let interval = steps as f64 / pulses as f64;
    for i in 0..pulses {
        let position = (i as f64 * interval).round() as usize % steps;
        pattern[position] = true;
    }
    pattern
}

/// Like [`generate`], then rotated right by `rotation` steps.
pub fn generate_rotated(steps: usize, pulses: usize, rotation: usize) -> Vec<bool> {
    let mut result = generate(steps, pulses);
    if rotation > 0 && !result.is_empty() {
        let rot = rotation % result.len();
        result.rotate_right(rot);
    }
    result
}
