pub mod context;
pub(crate) mod integrate;

use log::{debug, trace, warn};

use crate::{
    constraints::manifold::Manifold,
    element::{store::ElementStore, Element, ID},
    math::{vector::Vector, FloatNum},
};

use self::{
    context::WorldConfig,
    integrate::{integrate_forces, integrate_velocity},
};

#[derive(Default)]
pub struct Scene {
    element_store: ElementStore,
    id_dispatcher: IDDispatcher,
    config: WorldConfig,
    contacts: Vec<Manifold>,
    total_duration: FloatNum,
    frame_count: u128,
}

/**
 * uuid generator
 */
#[derive(Default)]
struct IDDispatcher {
    current_id: ID,
}

impl IDDispatcher {
    fn gen_id(&mut self) -> ID {
        self.current_id = self.current_id.wrapping_add(1);
        self.current_id
    }

    fn reset(&mut self) {
        self.current_id = 0;
    }
}

impl Scene {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: impl Into<WorldConfig>) -> Self {
        Self {
            config: config.into(),
            ..Default::default()
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            element_store: ElementStore::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Register an element and hand back its id.
    pub fn push_element(&mut self, element: impl Into<Element>) -> ID {
        let mut element: Element = element.into();

        let element_id = self.id_dispatcher.gen_id();
        element.inject_id(element_id);

        self.element_store.push(element);
        element_id
    }

    #[inline]
    pub fn has_element(&self, element_id: ID) -> bool {
        self.element_store.has_element(element_id)
    }

    #[inline]
    pub fn element_size(&self) -> usize {
        self.element_store.size()
    }

    #[inline]
    pub fn get_element(&self, id: ID) -> Option<&Element> {
        self.element_store.get_element_by_id(id)
    }

    #[inline]
    pub fn get_element_mut(&mut self, id: ID) -> Option<&mut Element> {
        self.element_store.get_mut_element_by_id(id)
    }

    #[inline]
    pub fn elements_iter(&self) -> impl Iterator<Item = &Element> {
        self.element_store.iter()
    }

    #[inline]
    pub fn elements_iter_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.element_store.iter_mut()
    }

    /// contacts found by the last step
    #[inline]
    pub fn contacts(&self) -> &[Manifold] {
        &self.contacts
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut WorldConfig {
        &mut self.config
    }

    pub fn set_gravity(&mut self, gravity: impl Into<Vector>) {
        self.config.set_gravity(gravity);
    }

    #[inline]
    pub fn frame_count(&self) -> u128 {
        self.frame_count
    }

    pub fn total_duration(&self) -> FloatNum {
        self.total_duration
    }

    // remove all elements
    pub fn clear(&mut self) {
        self.element_store.clear();
        self.id_dispatcher.reset();
        self.contacts.clear();
        self.frame_count = 0;
        self.total_duration = 0.;
    }

    /// Advance the simulation by `delta_time` seconds.
    pub fn step(&mut self, delta_time: FloatNum) {
        if !(delta_time.is_finite() && delta_time > 0.) {
            warn!("ignore step with delta time {delta_time}");
            return;
        }

        self.frame_count += 1;
        self.total_duration += delta_time;

        self.collision_detective();

        let gravity = self.config.gravity();

        self.element_store
            .iter_mut()
            .for_each(|element| integrate_forces(element, delta_time, gravity));

        self.pre_solve_constraints(delta_time);

        for _ in 0..self.config.iterations() {
            self.solve_contact_constraints();
        }

        self.element_store
            .iter_mut()
            .for_each(|element| integrate_velocity(element, delta_time, gravity));

        self.solve_position_fix();

        self.element_store
            .iter_mut()
            .for_each(|element| element.rigidbody_mut().clear_forces());

        debug!(
            "frame {} elements {} contacts {}",
            self.frame_count,
            self.element_store.size(),
            self.contacts.len()
        );
    }

    fn collision_detective(&mut self) {
        let Self {
            element_store,
            contacts,
            ..
        } = self;

        contacts.clear();

        for ((index_a, a), (index_b, b)) in element_store.pairs() {
            if a.rigidbody().inv_mass() == 0. && b.rigidbody().inv_mass() == 0. {
                trace!("skip static pair {} {}", a.id(), b.id());
                continue;
            }

            let mut manifold = Manifold::new(index_a, index_b);
            manifold.solve(a, b);
            if manifold.is_colliding() {
                contacts.push(manifold);
            }
        }
    }

    fn pre_solve_constraints(&mut self, delta_time: FloatNum) {
        let Self {
            element_store,
            contacts,
            config,
            ..
        } = self;

        for manifold in contacts.iter_mut() {
            let (Some(a), Some(b)) = (
                element_store.get(manifold.index_a()),
                element_store.get(manifold.index_b()),
            ) else {
                continue;
            };
            manifold.initialize(a.rigidbody(), b.rigidbody(), delta_time, config);
        }
    }

    fn solve_contact_constraints(&mut self) {
        let Self {
            element_store,
            contacts,
            config,
            ..
        } = self;

        for manifold in contacts.iter() {
            if let Some((a, b)) = element_store.pair_mut(manifold.index_a(), manifold.index_b()) {
                manifold.apply_impulse(a.rigidbody_mut(), b.rigidbody_mut(), config);
            }
        }
    }

    fn solve_position_fix(&mut self) {
        let Self {
            element_store,
            contacts,
            config,
            ..
        } = self;

        for manifold in contacts.iter() {
            if let Some((a, b)) = element_store.pair_mut(manifold.index_a(), manifold.index_b()) {
                manifold.positional_correction(a.rigidbody_mut(), b.rigidbody_mut(), config);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementBuilder;
    use approx::assert_abs_diff_eq;

    fn circle(radius: FloatNum, position: (FloatNum, FloatNum)) -> Element {
        ElementBuilder::circle(radius, position)
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_push_element_dispatches_ids() {
        let mut scene = Scene::with_capacity(2);
        let a = scene.push_element(circle(1., (0., 0.)));
        let b = scene.push_element(circle(1., (5., 0.)));
        assert_eq!((a, b), (1, 2));
        assert_eq!(scene.element_size(), 2);
        assert!(scene.has_element(b));
        assert_eq!(scene.get_element(b).map(|e| e.id()), Some(b));

        scene.clear();
        assert_eq!(scene.element_size(), 0);
        assert_eq!(scene.push_element(circle(1., (0., 0.))), 1);
    }

    #[test]
    fn test_invalid_delta_time_is_ignored() {
        let mut scene = Scene::new();
        let id = scene.push_element(circle(1., (0., 0.)));

        scene.step(0.);
        scene.step(-1.);
        scene.step(FloatNum::NAN);
        scene.step(FloatNum::INFINITY);

        assert_eq!(scene.frame_count(), 0);
        assert_eq!(scene.total_duration(), 0.);
        assert_eq!(scene.get_element(id).unwrap().position(), Vector::ZERO);
    }

    #[test]
    fn test_free_fall() {
        let mut scene = Scene::new();
        scene.set_gravity((0., 10.));
        let id = scene.push_element(circle(1., (0., 0.)));

        let dt = 0.1;
        for _ in 0..10 {
            scene.step(dt);
        }

        let element = scene.get_element(id).unwrap();
        // velocity verlet lands on the exact parabola
        assert_abs_diff_eq!(element.rigidbody().velocity().y(), 10., epsilon = 1e-9);
        assert_abs_diff_eq!(element.position().y(), 5., epsilon = 1e-9);
        assert_eq!(scene.frame_count(), 10);
        assert_abs_diff_eq!(scene.total_duration(), 1., epsilon = 1e-12);
    }

    #[test]
    fn test_forces_are_cleared_after_step() {
        let mut scene = Scene::with_config(
            crate::scene::context::WorldConfigBuilder::new().gravity((0., 0.)),
        );
        let id = scene.push_element(circle(1., (0., 0.)));
        let mass = scene.get_element(id).unwrap().rigidbody().mass();

        scene.get_element_mut(id).unwrap().apply_force((mass, 0.));
        scene.step(1.);
        let element = scene.get_element(id).unwrap();
        assert_abs_diff_eq!(element.rigidbody().velocity().x(), 1., epsilon = 1e-12);
        assert!(element.rigidbody().force().is_zero());

        scene.step(1.);
        let element = scene.get_element(id).unwrap();
        assert_abs_diff_eq!(element.rigidbody().velocity().x(), 1., epsilon = 1e-12);
    }

    #[test]
    fn test_static_pairs_are_skipped() {
        let mut scene = Scene::new();
        for x in [0., 1.] {
            let element = ElementBuilder::circle(1., (x, 0.))
                .unwrap()
                .fixed(true)
                .build()
                .unwrap();
            scene.push_element(element);
        }
        scene.step(1. / 60.);
        assert!(scene.contacts().is_empty());

        scene.push_element(circle(1., (0.5, 0.5)));
        scene.step(1. / 60.);
        assert_eq!(scene.contacts().len(), 2);
        assert!(scene
            .contacts()
            .iter()
            .all(|manifold| manifold.index_b() == 2 && manifold.id_b() == 3));
    }

    #[test]
    fn test_overlapping_circles_separate() {
        let mut scene = Scene::with_config(
            crate::scene::context::WorldConfigBuilder::new().gravity((0., 0.)),
        );
        let a = scene.push_element(circle(1., (0., 0.)));
        let b = scene.push_element(circle(1., (1.5, 0.)));

        for _ in 0..60 {
            scene.step(1. / 60.);
        }

        let distance = scene
            .get_element(a)
            .unwrap()
            .position()
            .distance(&scene.get_element(b).unwrap().position());
        let slop = scene.config().constraint_parameters().slop();
        assert!(distance >= 2. - slop - 1e-6, "distance {distance}");
    }
}
