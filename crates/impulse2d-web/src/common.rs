use impulse2d::prelude::*;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Tuple2 {
    pub x: FloatNum,
    pub y: FloatNum,
}

impl From<Vector> for Tuple2 {
    fn from(value: Vector) -> Self {
        Tuple2 {
            x: value.x(),
            y: value.y(),
        }
    }
}

impl From<Tuple2> for Vector {
    fn from(value: Tuple2) -> Vector {
        (value.x, value.y).into()
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(typescript_type = "Vector")]
    pub type WebVector;
    #[wasm_bindgen(typescript_type = "ShapeConfig")]
    pub type WebShapeConfig;
    #[wasm_bindgen(typescript_type = "WorldConfig")]
    pub type WebWorldConfig;
}

impl TryFrom<WebVector> for Vector {
    type Error = JsError;

    fn try_from(value: WebVector) -> Result<Self, Self::Error> {
        let value: JsValue = value.into();
        let value: Tuple2 = serde_wasm_bindgen::from_value(value)
            .map_err(|_| JsError::new("vector should be {x:number,y:number}"))?;
        Ok(value.into())
    }
}

/// Optional per shape settings passed from js, missing keys keep the defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ShapeConfig {
    pub static_friction: FloatNum,
    pub dynamic_friction: FloatNum,
    pub restitution: FloatNum,
    pub density: FloatNum,
    pub is_static: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        let material = Material::default();
        Self {
            static_friction: material.static_friction(),
            dynamic_friction: material.dynamic_friction(),
            restitution: material.restitution(),
            density: 1.,
            is_static: false,
        }
    }
}

impl ShapeConfig {
    pub(crate) fn apply(&self, builder: ElementBuilder) -> ElementBuilder {
        let material = MaterialBuilder::new()
            .static_friction(self.static_friction)
            .dynamic_friction(self.dynamic_friction)
            .restitution(self.restitution);

        builder
            .material(material)
            .density(self.density)
            .fixed(self.is_static)
    }
}

/// What a renderer needs to draw one element.
#[derive(Serialize, Debug, PartialEq)]
#[serde(tag = "shapeType", rename_all = "camelCase")]
pub(crate) enum ElementShape {
    #[serde(rename_all = "camelCase")]
    Circle {
        id: ID,
        center_point: Tuple2,
        orientation: FloatNum,
        radius: FloatNum,
    },
    #[serde(rename_all = "camelCase")]
    Polygon {
        id: ID,
        center_point: Tuple2,
        orientation: FloatNum,
        vertices: Vec<Tuple2>,
    },
}

impl From<&Element> for ElementShape {
    fn from(element: &Element) -> Self {
        let id = element.id();
        let center_point = element.position().into();
        let orientation = element.orientation();

        match element.kind() {
            ShapeKind::Circle(circle) => ElementShape::Circle {
                id,
                center_point,
                orientation,
                radius: circle.radius(),
            },
            ShapeKind::Polygon(_) => ElementShape::Polygon {
                id,
                center_point,
                orientation,
                vertices: element.world_vertices().into_iter().map(Into::into).collect(),
            },
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContactInfo {
    pub element_a_id: ID,
    pub element_b_id: ID,
    pub normal: Tuple2,
    pub penetration: FloatNum,
    pub contact_points: Vec<Tuple2>,
}

impl From<&Manifold> for ContactInfo {
    fn from(manifold: &Manifold) -> Self {
        ContactInfo {
            element_a_id: manifold.id_a(),
            element_b_id: manifold.id_b(),
            normal: manifold.normal().into(),
            penetration: manifold.penetration(),
            contact_points: manifold
                .contact_points()
                .iter()
                .map(|&point| point.into())
                .collect(),
        }
    }
}
