//! Sequential impulses.
//!
//! Two bodies A and B touch at a contact point, `n` is the contact normal from A to B.
//! The relative velocity along `n` must not be negative:
//!
//! ( velocity_B + (angular_velocity_B X r_B) - velocity_A - (angular_velocity_A X r_A) ) * n >= 0
//!
//! An impulse `I = n * j` changes the velocities by `I / mass` and
//! `(r X I) / inertia`. Solving for `j` with restitution `e` gives
//! `j = -(1 + e) * (rv * n) / inv_mass_effective`. Friction repeats the same
//! steps along the tangent, clamped by coulomb's law. The velocity pass never
//! removes overlap completely, the rest is pushed apart directly after
//! integration (baumgarte style).

use crate::{
    math::{num::cross_sv, vector::Vector, FloatNum},
    meta::Rigidbody,
};

pub mod manifold;

/// Inverse effective mass of a pair along `normal`, with `r_a`/`r_b` the
/// vectors from each center of mass to the contact point.
pub fn compute_inv_mass_effective(
    &normal: &Vector,
    body_pair: (&Rigidbody, &Rigidbody),
    r_a: Vector,
    r_b: Vector,
) -> FloatNum {
    let (body_a, body_b) = body_pair;

    body_a.inv_mass()
        + body_b.inv_mass()
        + (r_a ^ normal).powi(2) * body_a.inv_inertia()
        + (r_b ^ normal).powi(2) * body_b.inv_inertia()
}

/// Velocity of b relative to a at the contact point.
pub fn compute_relative_velocity(
    body_pair: (&Rigidbody, &Rigidbody),
    r_a: Vector,
    r_b: Vector,
) -> Vector {
    let (body_a, body_b) = body_pair;

    body_b.velocity() + cross_sv(body_b.angular_velocity(), r_b)
        - body_a.velocity()
        - cross_sv(body_a.angular_velocity(), r_a)
}
