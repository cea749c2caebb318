pub mod matrix;
pub mod num;
pub mod vector;

pub type FloatNum = f64;

/// Tolerance shared by the narrow phase and vector normalization.
pub const EPSILON: FloatNum = 1e-4;

pub const FLT_MAX: FloatNum = FloatNum::MAX;

pub const PI: FloatNum = std::f64::consts::PI;
