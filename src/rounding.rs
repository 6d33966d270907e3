/// Number of decimal places every reported quantity is rounded to.
pub const DEFAULT_PRECISION: i32 = 2;

/// Round `value` to `decimals` places, halves away from zero.
///
/// Non-finite values are returned unchanged; callers decide whether that is
/// an error (see [`crate::PhysicsError::NonFiniteResult`]).
pub fn round_to_decimal(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_decimal() {
        assert_eq!(round_to_decimal(3.14159, 2), 3.14);
        assert_eq!(round_to_decimal(0.0, 2), 0.0);
        assert_eq!(round_to_decimal(2.675, 1), 2.7);
        assert_eq!(round_to_decimal(116.0, DEFAULT_PRECISION), 116.0);
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_decimal(0.5, 0), 1.0);
        assert_eq!(round_to_decimal(-0.5, 0), -1.0);
        assert_eq!(round_to_decimal(-2.5, 0), -3.0);
    }

    #[test]
    fn test_non_finite_passes_through() {
        assert!(round_to_decimal(f64::NAN, 2).is_nan());
        assert_eq!(round_to_decimal(f64::INFINITY, 2), f64::INFINITY);
    }
}
