pub mod collision;
pub mod constraints;
pub mod element;
pub mod error;
pub mod math;
pub mod meta;
pub mod scene;
pub mod shape;

pub mod prelude {
    pub use super::collision::Contact;
    pub use super::constraints::manifold::Manifold;
    pub use super::element::{Element, ElementBuilder, ID};
    pub use super::error::{Degeneracy, ShapeError, ShapeResult};
    pub use super::math::{matrix::Mat2, vector::Vector, FloatNum};
    pub use super::meta::{Mass, Material, MaterialBuilder, Rigidbody};
    pub use super::scene::{
        context::{ConstraintParameters, FrictionMix, WorldConfig, WorldConfigBuilder},
        Scene,
    };
    pub use super::shape::{circle::Circle, polygon::Polygon, MassData, ShapeKind};
}
