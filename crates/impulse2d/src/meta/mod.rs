use impulse2d_macro_tools::{Builder, Deref, Fields};
use serde::{Deserialize, Serialize};

use crate::math::{vector::Vector, FloatNum};

pub type Mass = FloatNum;

#[derive(Clone, Copy, Debug, PartialEq, Fields, Builder, Serialize, Deserialize)]
#[r]
#[w(set)]
#[serde(default)]
pub struct Material {
    #[default = 0.5]
    static_friction: FloatNum,
    #[default = 0.3]
    dynamic_friction: FloatNum,
    #[default = 0.2]
    restitution: FloatNum,
}

// value with its cached reciprocal, the reciprocal of zero is zero
#[derive(Clone, Copy, Debug, Default, Deref, Fields)]
pub(crate) struct ValueWithInv {
    #[deref]
    value: FloatNum,
    #[r]
    inv: FloatNum,
}

impl ValueWithInv {
    pub(crate) fn set_value(&mut self, new_value: FloatNum) {
        self.value = new_value;
        self.inv = if new_value == 0. {
            0.
        } else {
            new_value.recip()
        };
    }
}

/// Physical state of one element.
#[derive(Clone, Debug, Fields)]
#[r]
pub struct Rigidbody {
    #[w]
    position: Vector,
    #[w]
    velocity: Vector,
    // radians
    orientation: FloatNum,
    #[w]
    angular_velocity: FloatNum,
    #[w]
    force: Vector,
    #[w]
    torque: FloatNum,
    #[shared(skip)]
    mass: ValueWithInv,
    #[shared(skip)]
    inertia: ValueWithInv,
    #[w]
    material: Material,
    is_static: bool,
}

impl Default for Rigidbody {
    fn default() -> Self {
        Self::new(Vector::ZERO)
    }
}

impl Rigidbody {
    pub fn new(position: Vector) -> Self {
        Self {
            position,
            velocity: Vector::ZERO,
            orientation: 0.,
            angular_velocity: 0.,
            force: Vector::ZERO,
            torque: 0.,
            mass: Default::default(),
            inertia: Default::default(),
            material: Default::default(),
            is_static: false,
        }
    }

    #[inline]
    pub fn mass(&self) -> Mass {
        *self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> Mass {
        self.mass.inv()
    }

    pub fn set_mass(&mut self, mass: Mass) -> &mut Self {
        self.mass.set_value(mass);
        self
    }

    #[inline]
    pub fn inertia(&self) -> FloatNum {
        *self.inertia
    }

    #[inline]
    pub fn inv_inertia(&self) -> FloatNum {
        self.inertia.inv()
    }

    pub fn set_inertia(&mut self, inertia: FloatNum) -> &mut Self {
        self.inertia.set_value(inertia);
        self
    }

    // the shape matrix is synced by the owning element
    pub(crate) fn set_orientation(&mut self, radians: FloatNum) {
        self.orientation = radians;
    }

    /// Pin the body in place, infinite mass and inertia from now on.
    pub fn set_static(&mut self) -> &mut Self {
        self.mass.set_value(0.);
        self.inertia.set_value(0.);
        self.is_static = true;
        self
    }

    /// accumulated until the end of the current step
    pub fn apply_force(&mut self, force: Vector) {
        self.force += force;
    }

    pub fn apply_torque(&mut self, torque: FloatNum) {
        self.torque += torque;
    }

    // r is the vector from the center of mass to the contact point
    pub fn apply_impulse(&mut self, impulse: Vector, r: Vector) {
        self.velocity += impulse * self.inv_mass();
        self.angular_velocity += self.inv_inertia() * (r ^ impulse);
    }

    pub fn clear_forces(&mut self) {
        self.force.set_zero();
        self.torque = 0.;
    }

    pub fn compute_kinetic_energy(&self) -> FloatNum {
        let velocity = self.velocity;
        0.5 * (self.mass() * (velocity * velocity)
            + self.inertia() * self.angular_velocity * self.angular_velocity)
    }

    pub fn momentum(&self) -> Vector {
        self.velocity * self.mass()
    }
}
