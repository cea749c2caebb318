use std::ops::Mul;

use super::{vector::Vector, FloatNum};

/// 2x2 matrix, used as the rotation of a polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat2 {
    m00: FloatNum,
    m01: FloatNum,
    m10: FloatNum,
    m11: FloatNum,
}

impl Default for Mat2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat2 {
    pub const IDENTITY: Mat2 = Mat2::new(1., 0., 0., 1.);

    pub const fn new(m00: FloatNum, m01: FloatNum, m10: FloatNum, m11: FloatNum) -> Self {
        Self { m00, m01, m10, m11 }
    }

    pub fn from_angle(radians: FloatNum) -> Self {
        let mut m = Self::IDENTITY;
        m.set_angle(radians);
        m
    }

    pub fn set_angle(&mut self, radians: FloatNum) {
        let (s, c) = radians.sin_cos();
        self.m00 = c;
        self.m01 = -s;
        self.m10 = s;
        self.m11 = c;
    }

    pub fn abs(&self) -> Mat2 {
        Mat2::new(
            self.m00.abs(),
            self.m01.abs(),
            self.m10.abs(),
            self.m11.abs(),
        )
    }

    pub fn axis_x(&self) -> Vector {
        (self.m00, self.m10).into()
    }

    pub fn axis_y(&self) -> Vector {
        (self.m01, self.m11).into()
    }

    pub fn transpose(&self) -> Mat2 {
        Mat2::new(self.m00, self.m10, self.m01, self.m11)
    }

    pub fn transpose_in_place(&mut self) {
        std::mem::swap(&mut self.m01, &mut self.m10);
    }
}

impl Mul<Vector> for Mat2 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Self::Output {
        (
            self.m00 * rhs.x() + self.m01 * rhs.y(),
            self.m10 * rhs.x() + self.m11 * rhs.y(),
        )
            .into()
    }
}

impl Mul<Vector> for &Mat2 {
    type Output = Vector;
    fn mul(self, rhs: Vector) -> Self::Output {
        *self * rhs
    }
}
