use impulse2d_macro_tools::{Deref, Fields};

use crate::{
    collision::{self, Contact},
    element::{Element, ID},
    math::{num::safe_equal, FloatNum},
    meta::Rigidbody,
    scene::context::WorldConfig,
};

use super::{compute_inv_mass_effective, compute_relative_velocity};

/// Contact state of one colliding pair, rebuilt every frame.
#[derive(Clone, Debug, Deref, Fields)]
#[r]
pub struct Manifold {
    index_a: usize,
    index_b: usize,
    id_a: ID,
    id_b: ID,
    #[deref]
    #[shared(skip)]
    contact: Contact,
    mixed_restitution: FloatNum,
    mixed_static_friction: FloatNum,
    mixed_dynamic_friction: FloatNum,
}

impl Manifold {
    /// `index_a`/`index_b` locate the pair in the element store
    pub fn new(index_a: usize, index_b: usize) -> Self {
        Self {
            index_a,
            index_b,
            id_a: 0,
            id_b: 0,
            contact: Default::default(),
            mixed_restitution: 0.,
            mixed_static_friction: 0.,
            mixed_dynamic_friction: 0.,
        }
    }

    /// Fill in the contact geometry of the pair.
    pub fn solve(&mut self, a: &Element, b: &Element) {
        self.id_a = a.id();
        self.id_b = b.id();
        self.contact = collision::solve(a, b);
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Mix the materials and drop restitution for resting contacts.
    pub fn initialize(
        &mut self,
        a: &Rigidbody,
        b: &Rigidbody,
        delta_time: FloatNum,
        config: &WorldConfig,
    ) {
        let parameters = config.constraint_parameters();
        let (material_a, material_b) = (a.material(), b.material());

        self.mixed_restitution = material_a.restitution().min(material_b.restitution());

        let friction_mix = parameters.friction_mix();
        self.mixed_static_friction =
            friction_mix.mix(material_a.static_friction(), material_b.static_friction());
        self.mixed_dynamic_friction =
            friction_mix.mix(material_a.dynamic_friction(), material_b.dynamic_friction());

        // only gravity moves the pair, resolve without bounce
        let resting_threshold = (config.gravity() * delta_time).len_sqr() + parameters.epsilon();
        for &point in self.contact.contact_points() {
            let r_a = point - a.position();
            let r_b = point - b.position();
            let rv = compute_relative_velocity((a, b), r_a, r_b);
            if rv.len_sqr() < resting_threshold {
                self.mixed_restitution = 0.;
            }
        }
    }

    /// One sequential impulse pass over the contact points.
    pub fn apply_impulse(&self, a: &mut Rigidbody, b: &mut Rigidbody, config: &WorldConfig) {
        let epsilon = config.constraint_parameters().epsilon();

        if safe_equal(a.inv_mass() + b.inv_mass(), 0., epsilon) {
            Self::infinite_mass_correction(a, b);
            return;
        }

        let normal = self.normal();
        let contact_count = self.contact_count() as FloatNum;

        for &point in self.contact_points() {
            let r_a = point - a.position();
            let r_b = point - b.position();

            let rv = compute_relative_velocity((a, b), r_a, r_b);
            let contact_velocity = rv * normal;

            // separating, the rest of this manifold waits for the next pass
            if contact_velocity > 0. {
                return;
            }

            let inv_mass_sum = compute_inv_mass_effective(&normal, (a, b), r_a, r_b);

            let j = -(1. + self.mixed_restitution) * contact_velocity / inv_mass_sum / contact_count;

            let impulse = normal * j;
            a.apply_impulse(-impulse, r_a);
            b.apply_impulse(impulse, r_b);

            // friction
            let rv = compute_relative_velocity((a, b), r_a, r_b);
            let tangent = (rv - normal * (rv * normal)).normalized();

            let jt = -(rv * tangent) / inv_mass_sum / contact_count;

            if safe_equal(jt, 0., epsilon) {
                return;
            }

            // coulomb
            let tangent_impulse = if jt.abs() < j * self.mixed_static_friction {
                tangent * jt
            } else {
                tangent * (-j * self.mixed_dynamic_friction)
            };

            a.apply_impulse(-tangent_impulse, r_a);
            b.apply_impulse(tangent_impulse, r_b);
        }
    }

    /// Push the pair apart along the normal, proportional to inverse mass.
    pub fn positional_correction(&self, a: &mut Rigidbody, b: &mut Rigidbody, config: &WorldConfig) {
        let inv_mass_a = a.inv_mass();
        let inv_mass_b = b.inv_mass();
        let inv_mass_sum = inv_mass_a + inv_mass_b;
        if inv_mass_sum == 0. {
            return;
        }

        let parameters = config.constraint_parameters();
        let depth = (self.penetration() - parameters.slop()).max(0.);
        let correction = self.normal() * (depth / inv_mass_sum * parameters.percent());

        *a.position_mut() -= correction * inv_mass_a;
        *b.position_mut() += correction * inv_mass_b;
    }

    pub fn infinite_mass_correction(a: &mut Rigidbody, b: &mut Rigidbody) {
        a.velocity_mut().set_zero();
        b.velocity_mut().set_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        element::ElementBuilder,
        meta::MaterialBuilder,
        scene::context::{FrictionMix, WorldConfigBuilder},
    };
    use approx::assert_abs_diff_eq;

    fn zero_gravity() -> WorldConfig {
        WorldConfigBuilder::new().gravity((0., 0.)).into()
    }

    fn ball(position: (FloatNum, FloatNum), velocity: (FloatNum, FloatNum)) -> Element {
        ElementBuilder::circle(1., position)
            .unwrap()
            .velocity(velocity)
            .material(
                MaterialBuilder::new()
                    .restitution(1.)
                    .static_friction(0.)
                    .dynamic_friction(0.),
            )
            .build()
            .unwrap()
    }

    fn colliding(a: &Element, b: &Element) -> Manifold {
        let mut manifold = Manifold::new(0, 1);
        manifold.solve(a, b);
        assert!(manifold.is_colliding());
        manifold
    }

    #[test]
    fn test_elastic_head_on_swaps_velocity() {
        let config = zero_gravity();
        let mut a = ball((0., 0.), (5., 0.));
        let mut b = ball((1.9, 0.), (-5., 0.));

        let mut manifold = colliding(&a, &b);
        manifold.initialize(a.rigidbody(), b.rigidbody(), 1. / 60., &config);
        assert_eq!(manifold.mixed_restitution(), 1.);

        manifold.apply_impulse(a.rigidbody_mut(), b.rigidbody_mut(), &config);

        assert_abs_diff_eq!(a.rigidbody().velocity().x(), -5., epsilon = 1e-9);
        assert_abs_diff_eq!(b.rigidbody().velocity().x(), 5., epsilon = 1e-9);
        assert_abs_diff_eq!(a.rigidbody().angular_velocity(), 0., epsilon = 1e-12);

        // already separating, further passes change nothing
        manifold.apply_impulse(a.rigidbody_mut(), b.rigidbody_mut(), &config);
        assert_abs_diff_eq!(a.rigidbody().velocity().x(), -5., epsilon = 1e-9);
    }

    #[test]
    fn test_resting_contact_has_no_restitution() {
        let config = WorldConfig::default();
        let a = ball((0., 0.), (0., 0.));
        let b = ball((1.9, 0.), (0., 0.));

        let mut manifold = colliding(&a, &b);
        manifold.initialize(a.rigidbody(), b.rigidbody(), 1. / 60., &config);
        assert_eq!(manifold.mixed_restitution(), 0.);
    }

    #[test]
    fn test_friction_mix_modes() {
        let a = ElementBuilder::circle(1., (0., 0.))
            .unwrap()
            .material(MaterialBuilder::new().static_friction(0.16).dynamic_friction(0.09))
            .build()
            .unwrap();
        let b = ElementBuilder::circle(1., (1.5, 0.))
            .unwrap()
            .material(MaterialBuilder::new().static_friction(1.).dynamic_friction(1.))
            .build()
            .unwrap();

        let mut config = WorldConfig::default();
        let mut manifold = colliding(&a, &b);

        manifold.initialize(a.rigidbody(), b.rigidbody(), 1. / 60., &config);
        assert_abs_diff_eq!(manifold.mixed_static_friction(), 0.16, epsilon = 1e-12);
        assert_abs_diff_eq!(manifold.mixed_dynamic_friction(), 0.09, epsilon = 1e-12);

        config
            .constraint_parameters_mut()
            .set_friction_mix(FrictionMix::GeometricMean);
        manifold.initialize(a.rigidbody(), b.rigidbody(), 1. / 60., &config);
        assert_abs_diff_eq!(manifold.mixed_static_friction(), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(manifold.mixed_dynamic_friction(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_positional_correction_removes_share_of_penetration() {
        let config = zero_gravity();
        let mut a = ball((0., 0.), (0., 0.));
        let mut b = ball((1.5, 0.), (0., 0.));

        let manifold = colliding(&a, &b);
        let before = manifold.penetration();
        assert_abs_diff_eq!(before, 0.5, epsilon = 1e-12);

        manifold.positional_correction(a.rigidbody_mut(), b.rigidbody_mut(), &config);

        let after = collision::solve(&a, &b).penetration();
        let slop = config.constraint_parameters().slop();
        let percent = config.constraint_parameters().percent();
        assert_abs_diff_eq!(after, before - percent * (before - slop), epsilon = 1e-9);

        // equal masses move the same distance
        assert_abs_diff_eq!(
            a.position().x(),
            -(b.position().x() - 1.5),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_static_side_does_not_move() {
        let config = zero_gravity();
        let mut ground = ElementBuilder::rect(5., 0.5, (0., 1.))
            .unwrap()
            .fixed(true)
            .build()
            .unwrap();
        let mut ball = ball((0., -0.4), (0., 3.));

        let mut manifold = colliding(&ball, &ground);
        manifold.initialize(ball.rigidbody(), ground.rigidbody(), 1. / 60., &config);
        manifold.apply_impulse(ball.rigidbody_mut(), ground.rigidbody_mut(), &config);
        manifold.positional_correction(ball.rigidbody_mut(), ground.rigidbody_mut(), &config);

        assert_eq!(ground.position(), (0., 1.).into());
        assert_eq!(ground.rigidbody().velocity(), (0., 0.).into());
        // ground keeps the default restitution, the smaller one wins
        assert_abs_diff_eq!(manifold.mixed_restitution(), 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(ball.rigidbody().velocity().y(), -0.6, epsilon = 1e-9);
    }

    // unit ball 0.1 deep in the top face of a static slab, default material
    fn ball_on_slab(velocity: (FloatNum, FloatNum)) -> (Element, Element, Manifold) {
        let ball = ElementBuilder::circle(1., (0., -0.4))
            .unwrap()
            .velocity(velocity)
            .build()
            .unwrap();
        let slab = ElementBuilder::rect(5., 0.5, (0., 1.))
            .unwrap()
            .fixed(true)
            .build()
            .unwrap();
        let manifold = colliding(&ball, &slab);
        let point = manifold.contact_points()[0];
        assert_abs_diff_eq!(point.x(), 0., epsilon = 1e-12);
        assert_abs_diff_eq!(point.y(), 0.6, epsilon = 1e-12);
        (ball, slab, manifold)
    }

    #[test]
    fn test_sliding_contact_takes_dynamic_friction() {
        let config = zero_gravity();
        let (mut ball, mut slab, mut manifold) = ball_on_slab((5., 3.));
        manifold.initialize(ball.rigidbody(), slab.rigidbody(), 1. / 60., &config);
        manifold.apply_impulse(ball.rigidbody_mut(), slab.rigidbody_mut(), &config);

        // j = 1.2 * 3 * mass, |jt| = 5 * mass exceeds j * 0.5
        let j = 3.6 * ball.rigidbody().mass();
        let dynamic_friction = manifold.mixed_dynamic_friction();
        assert_abs_diff_eq!(dynamic_friction, 0.3, epsilon = 1e-12);

        let velocity = ball.rigidbody().velocity();
        assert_abs_diff_eq!(velocity.y(), -0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(
            velocity.x(),
            5. - j * dynamic_friction * ball.rigidbody().inv_mass(),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(velocity.x(), 3.92, epsilon = 1e-9);
        // friction at the rim spins the ball
        assert_abs_diff_eq!(ball.rigidbody().angular_velocity(), 1.08, epsilon = 1e-9);
        assert_eq!(slab.rigidbody().velocity(), (0., 0.).into());
    }

    #[test]
    fn test_slow_contact_sticks() {
        let config = zero_gravity();
        let (mut ball, mut slab, mut manifold) = ball_on_slab((0.5, 3.));
        manifold.initialize(ball.rigidbody(), slab.rigidbody(), 1. / 60., &config);
        manifold.apply_impulse(ball.rigidbody_mut(), slab.rigidbody_mut(), &config);

        // |jt| = 0.5 * mass stays under j * 0.5, the slip is cancelled
        let velocity = ball.rigidbody().velocity();
        assert_abs_diff_eq!(velocity.x(), 0., epsilon = 1e-9);
        assert_abs_diff_eq!(velocity.y(), -0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(ball.rigidbody().angular_velocity(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_no_slip_no_friction() {
        let config = zero_gravity();
        let (mut ball, mut slab, mut manifold) = ball_on_slab((0., 3.));
        manifold.initialize(ball.rigidbody(), slab.rigidbody(), 1. / 60., &config);
        manifold.apply_impulse(ball.rigidbody_mut(), slab.rigidbody_mut(), &config);

        assert_eq!(ball.rigidbody().velocity().x(), 0.);
        assert_eq!(ball.rigidbody().angular_velocity(), 0.);
        assert_abs_diff_eq!(ball.rigidbody().velocity().y(), -0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_two_static_bodies_stop() {
        let config = zero_gravity();
        let mut a = ball((0., 0.), (0., 0.));
        let mut b = ball((1., 0.), (0., 0.));
        a.set_static();
        b.set_static();
        *a.rigidbody_mut().velocity_mut() = (1., 1.).into();

        let manifold = colliding(&a, &b);
        manifold.apply_impulse(a.rigidbody_mut(), b.rigidbody_mut(), &config);
        assert!(a.rigidbody().velocity().is_zero());

        // no division by zero either
        manifold.positional_correction(a.rigidbody_mut(), b.rigidbody_mut(), &config);
        assert_eq!(a.position(), (0., 0.).into());
    }
}
