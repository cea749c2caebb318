use crate::{
    error::{ShapeError, ShapeResult},
    math::{FloatNum, PI},
};

use super::MassData;

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    radius: FloatNum,
}

impl Circle {
    pub fn new(radius: FloatNum) -> ShapeResult<Self> {
        if !(radius.is_finite() && radius > 0.) {
            return Err(ShapeError::InvalidRadius { radius });
        }
        Ok(Self { radius })
    }

    #[inline]
    pub fn radius(&self) -> FloatNum {
        self.radius
    }

    // inertia is m * r^2 rather than the solid disk's m * r^2 / 2
    pub fn compute_mass_data(&self, density: FloatNum) -> MassData {
        let r2 = self.radius * self.radius;
        let mass = PI * r2 * density;
        MassData {
            mass,
            inertia: mass * r2,
        }
    }
}
