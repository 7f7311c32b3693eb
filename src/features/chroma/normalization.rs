//! Chroma normalization

/// Euclidean norm of a vector
///
/// Accumulates in f64 so squares of large f32 values do not overflow.
pub fn l2_norm(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt()
}

/// Scale a 12-element vector to unit Euclidean norm
///
/// `epsilon` is added to the norm before dividing so a silent frame maps to
/// the zero vector instead of NaN. The result does not depend on the scale
/// of the input, up to the largest finite f32.
///
/// # Arguments
///
/// * `chroma` - 12-element chroma vector
/// * `epsilon` - Norm floor (e.g., 1e-6)
///
/// # Returns
///
/// Normalized copy of the vector
pub fn unit_normalize(chroma: &[f32; 12], epsilon: f32) -> [f32; 12] {
    let denom = l2_norm(chroma) + f64::from(epsilon);
    let mut out = [0.0f32; 12];
    for (o, &x) in out.iter_mut().zip(chroma.iter()) {
        *o = (f64::from(x) / denom) as f32;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_normalize() {
        let mut chroma = [0.0f32; 12];
        chroma[0] = 3.0;
        chroma[4] = 4.0;
        let unit = unit_normalize(&chroma, 1e-6);
        assert!((unit[0] - 0.6).abs() < 1e-5);
        assert!((unit[4] - 0.8).abs() < 1e-5);
        assert!((l2_norm(&unit) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let mut chroma = [0.0f32; 12];
        chroma[2] = 1.0;
        chroma[7] = 1.0;
        chroma[11] = 1.0;
        let reference = unit_normalize(&chroma, 1e-6);

        for scale in [1e20f32, 1e30, f32::MAX] {
            let scaled = chroma.map(|x| x * scale);
            let unit = unit_normalize(&scaled, 1e-6);
            for (a, b) in unit.iter().zip(reference.iter()) {
                assert!((a - b).abs() < 1e-5, "scale {} gave {:?}", scale, unit);
            }
        }
    }

    #[test]
    fn test_silent_frame_stays_zero() {
        let unit = unit_normalize(&[0.0f32; 12], 1e-6);
        assert!(unit.iter().all(|&x| x == 0.0));
    }
}
