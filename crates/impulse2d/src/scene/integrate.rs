use crate::{
    element::Element,
    math::{vector::Vector, FloatNum},
};

/// Half a step of force and gravity into the velocities.
pub(crate) fn integrate_forces(element: &mut Element, delta_time: FloatNum, gravity: Vector) {
    let body = element.rigidbody_mut();
    let inv_mass = body.inv_mass();
    if inv_mass == 0. {
        return;
    }

    let half_dt = delta_time * 0.5;
    let acceleration = body.force() * inv_mass + gravity;
    *body.velocity_mut() += acceleration * half_dt;

    let angular_acceleration = body.torque() * body.inv_inertia();
    *body.angular_velocity_mut() += angular_acceleration * half_dt;
}

// position update then the second half of the force step
pub(crate) fn integrate_velocity(element: &mut Element, delta_time: FloatNum, gravity: Vector) {
    if element.rigidbody().inv_mass() == 0. {
        return;
    }

    let velocity = element.rigidbody().velocity();
    *element.rigidbody_mut().position_mut() += velocity * delta_time;

    let orientation = element.orientation() + element.rigidbody().angular_velocity() * delta_time;
    element.set_orientation(orientation);

    integrate_forces(element, delta_time, gravity);
}
