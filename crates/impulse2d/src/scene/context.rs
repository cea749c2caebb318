use impulse2d_macro_tools::{Builder, Fields};
use serde::{Deserialize, Serialize};

use crate::math::{vector::Vector, FloatNum, EPSILON};

/// How the friction coefficients of two materials are combined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionMix {
    /// `sqrt(a * a)`, only the first body's material counts
    #[default]
    BodyA,
    /// `sqrt(a * b)`
    GeometricMean,
}

impl FrictionMix {
    pub fn mix(&self, a: FloatNum, b: FloatNum) -> FloatNum {
        match self {
            FrictionMix::BodyA => (a * a).sqrt(),
            FrictionMix::GeometricMean => (a * b).sqrt(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Fields, Builder, Serialize, Deserialize)]
#[r]
#[w(set)]
#[serde(default)]
pub struct ConstraintParameters {
    // tolerance for the resting contact and tiny impulse checks
    #[default(EPSILON)]
    epsilon: FloatNum,
    // penetration allowed before positional correction kicks in
    #[default = 0.05]
    slop: FloatNum,
    // share of the remaining penetration removed each frame
    #[default = 0.4]
    percent: FloatNum,
    friction_mix: FrictionMix,
}

/// define global config of a scene
#[derive(Clone, Debug, PartialEq, Fields, Builder, Serialize, Deserialize)]
#[r]
#[serde(default)]
pub struct WorldConfig {
    #[w(set)]
    #[default(Vector::new(0., 9.81 * 15.))]
    gravity: Vector,
    #[w(set)]
    #[default = 10]
    iterations: usize,
    #[w]
    constraint_parameters: ConstraintParameters,
}
