pub(crate) mod store;

use impulse2d_macro_tools::Fields;

use crate::{
    error::{ShapeError, ShapeResult},
    math::{vector::Vector, FloatNum},
    meta::{Material, Rigidbody},
    shape::{circle::Circle, polygon::Polygon, MassData, ShapeKind},
};

pub type ID = u32;

pub struct ElementBuilder {
    kind: ShapeKind,
    position: Vector,
    density: FloatNum,
    material: Material,
    orientation: FloatNum,
    velocity: Vector,
    angular_velocity: FloatNum,
    is_static: bool,
}

impl ElementBuilder {
    pub fn new(kind: impl Into<ShapeKind>, position: impl Into<Vector>) -> Self {
        Self {
            kind: kind.into(),
            position: position.into(),
            density: 1.,
            material: Default::default(),
            orientation: 0.,
            velocity: Vector::ZERO,
            angular_velocity: 0.,
            is_static: false,
        }
    }

    pub fn circle(radius: FloatNum, position: impl Into<Vector>) -> ShapeResult<Self> {
        Ok(Self::new(Circle::new(radius)?, position))
    }

    pub fn rect(
        half_width: FloatNum,
        half_height: FloatNum,
        position: impl Into<Vector>,
    ) -> ShapeResult<Self> {
        Ok(Self::new(Polygon::new_box(half_width, half_height)?, position))
    }

    pub fn polygon(points: &[Vector], position: impl Into<Vector>) -> ShapeResult<Self> {
        Ok(Self::new(Polygon::from_points(points)?, position))
    }

    pub fn density(mut self, density: FloatNum) -> Self {
        self.density = density;
        self
    }

    pub fn material(mut self, material: impl Into<Material>) -> Self {
        self.material = material.into();
        self
    }

    pub fn orientation(mut self, radians: FloatNum) -> Self {
        self.orientation = radians;
        self
    }

    pub fn velocity(mut self, velocity: impl Into<Vector>) -> Self {
        self.velocity = velocity.into();
        self
    }

    pub fn angular_velocity(mut self, angular_velocity: FloatNum) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// static elements never move
    pub fn fixed(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn build(self) -> ShapeResult<Element> {
        Element::new(self)
    }
}

impl TryFrom<ElementBuilder> for Element {
    type Error = ShapeError;

    fn try_from(builder: ElementBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// A rigid body together with its collision shape.
#[derive(Clone, Debug, Fields)]
#[r]
pub struct Element {
    id: ID,
    #[w]
    rigidbody: Rigidbody,
    kind: ShapeKind,
    density: FloatNum,
}

impl Element {
    fn new(builder: ElementBuilder) -> ShapeResult<Self> {
        let ElementBuilder {
            kind,
            position,
            density,
            material,
            orientation,
            velocity,
            angular_velocity,
            is_static,
        } = builder;

        if !(density.is_finite() && density >= 0.) {
            return Err(ShapeError::InvalidDensity { density });
        }

        let non_finite = [
            ("position", position.is_finite()),
            ("velocity", velocity.is_finite()),
            ("orientation", orientation.is_finite()),
            ("angular velocity", angular_velocity.is_finite()),
        ]
        .into_iter()
        .find(|(_, finite)| !finite);
        if let Some((field, _)) = non_finite {
            return Err(ShapeError::NonFinite { field });
        }

        let mut rigidbody = Rigidbody::new(position);
        *rigidbody.material_mut() = material;
        *rigidbody.velocity_mut() = velocity;
        *rigidbody.angular_velocity_mut() = angular_velocity;

        let MassData { mass, inertia } = kind.compute_mass_data(density);
        rigidbody.set_mass(mass).set_inertia(inertia);

        let mut element = Self {
            id: 0,
            rigidbody,
            kind,
            density,
        };

        element.set_orientation(orientation);
        if is_static {
            element.set_static();
        }

        Ok(element)
    }

    pub(crate) fn inject_id(&mut self, id: ID) {
        self.id = id;
    }

    #[inline]
    pub fn position(&self) -> Vector {
        self.rigidbody.position()
    }

    #[inline]
    pub fn orientation(&self) -> FloatNum {
        self.rigidbody.orientation()
    }

    /// Rotate the body and its polygon matrix together.
    pub fn set_orientation(&mut self, radians: FloatNum) {
        self.rigidbody.set_orientation(radians);
        self.kind.set_orientation(radians);
    }

    pub fn set_static(&mut self) {
        self.rigidbody.set_static();
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.rigidbody.is_static()
    }

    pub fn apply_force(&mut self, force: impl Into<Vector>) {
        self.rigidbody.apply_force(force.into());
    }

    pub fn apply_torque(&mut self, torque: FloatNum) {
        self.rigidbody.apply_torque(torque);
    }

    /// polygon corners in world space, empty for circles
    pub fn world_vertices(&self) -> Vec<Vector> {
        match &self.kind {
            ShapeKind::Polygon(polygon) => polygon.world_vertices(self.position()).collect(),
            ShapeKind::Circle(_) => Vec::new(),
        }
    }
}
