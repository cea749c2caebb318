use super::{vector::Vector, FloatNum};

#[inline]
pub fn sqr(v: FloatNum) -> FloatNum {
    v * v
}

#[inline]
pub fn safe_equal(a: FloatNum, b: FloatNum, epsilon: FloatNum) -> bool {
    (a - b).abs() <= epsilon
}

/// `a >= b` with a slight preference for `b`, keeps reference face choice stable
/// between frames.
#[inline]
pub fn bias_greater_than(a: FloatNum, b: FloatNum) -> bool {
    const BIAS_RELATIVE: FloatNum = 0.95;
    const BIAS_ABSOLUTE: FloatNum = 0.01;
    a >= b * BIAS_RELATIVE + a * BIAS_ABSOLUTE
}

/// angular velocity `s` crossed with `v`
#[inline]
pub fn cross_sv(s: FloatNum, v: Vector) -> Vector {
    (-s * v.y(), s * v.x()).into()
}

#[inline]
pub fn cross_vs(v: Vector, s: FloatNum) -> Vector {
    (s * v.y(), -s * v.x()).into()
}

#[inline]
pub fn dist_sqr(a: Vector, b: Vector) -> FloatNum {
    (a - b).len_sqr()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bias_greater_than() {
        assert!(bias_greater_than(-0.09, -0.1));
        // ties go to the second argument
        assert!(!bias_greater_than(-0.1, -0.1));
        assert!(!bias_greater_than(-0.2, -0.1));
    }

    #[test]
    fn test_cross_forms() {
        let v = Vector::new(1., 2.);
        assert_eq!(cross_sv(2., v), Vector::new(-4., 2.));
        assert_eq!(cross_vs(v, 2.), Vector::new(4., -2.));
        assert_eq!(cross_sv(2., v), -cross_vs(v, 2.));
    }

    #[test]
    fn test_safe_equal() {
        assert!(safe_equal(1., 1.00005, 1e-4));
        assert!(!safe_equal(1., 1.001, 1e-4));
        assert!(!safe_equal(0., -0.5, 1e-4));
        assert_eq!(sqr(-3.), 9.);
        assert_eq!(dist_sqr(Vector::new(0., 0.), Vector::new(3., 4.)), 25.);
    }
}
