//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Limit `value` to the range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
/// 
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `lhs` is much smaller than `rhs.abs()` in
/// magnitude and `lhs < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

/// Wrap an angle in degrees into the range (-180, 180].
pub fn wrap_deg_180<T>(value: T) -> T
where
    T: Float
{
    let full: T = T::from(360.0).unwrap();
    let half: T = T::from(180.0).unwrap();

    let wrapped = rem_euclid(value, full);

    if wrapped > half {
        wrapped - full
    }
    else {
        wrapped
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&0.2f64, &-0.15, &0.15), 0.15);
        assert_eq!(clamp(&-0.2f64, &-0.15, &0.15), -0.15);
        assert_eq!(clamp(&0.1f64, &-0.15, &0.15), 0.1);
    }

    #[test]
    fn test_wrap_deg_180() {
        assert_eq!(wrap_deg_180(0f64), 0f64);
        assert_eq!(wrap_deg_180(180f64), 180f64);
        assert_eq!(wrap_deg_180(-180f64), 180f64);
        assert_eq!(wrap_deg_180(190f64), -170f64);
        assert_eq!(wrap_deg_180(-190f64), 170f64);
        assert_eq!(wrap_deg_180(720f64 + 45f64), 45f64);
    }
}
