pub mod circle;
pub mod polygon;

use crate::math::FloatNum;

use self::{circle::Circle, polygon::Polygon};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MassData {
    pub mass: FloatNum,
    pub inertia: FloatNum,
}

/// Collision geometry of an element.
#[derive(Clone, Debug)]
pub enum ShapeKind {
    Circle(Circle),
    Polygon(Polygon),
}

impl ShapeKind {
    pub fn compute_mass_data(&self, density: FloatNum) -> MassData {
        match self {
            ShapeKind::Circle(circle) => circle.compute_mass_data(density),
            ShapeKind::Polygon(polygon) => polygon.compute_mass_data(density),
        }
    }

    // keeps the polygon matrix in step with the body orientation
    pub(crate) fn set_orientation(&mut self, radians: FloatNum) {
        if let ShapeKind::Polygon(polygon) = self {
            polygon.set_orientation(radians);
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            ShapeKind::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            ShapeKind::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }
}

impl From<Circle> for ShapeKind {
    fn from(circle: Circle) -> Self {
        ShapeKind::Circle(circle)
    }
}

impl From<Polygon> for ShapeKind {
    fn from(polygon: Polygon) -> Self {
        ShapeKind::Polygon(polygon)
    }
}
