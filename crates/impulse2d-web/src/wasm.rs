use std::panic;

use impulse2d::prelude::*;
use js_sys::Function;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

use crate::common::{
    ContactInfo, ElementShape, ShapeConfig, Tuple2, WebShapeConfig, WebVector, WebWorldConfig,
};

#[wasm_bindgen(js_name = "setPanicConsoleHook")]
pub fn set_panic_console_hook() {
    panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[wasm_bindgen(typescript_custom_section)]
const TS_TYPES: &str = r#"
type Vector = { x: number; y: number };

type ShapeConfig = Partial<{
    staticFriction: number;
    dynamicFriction: number;
    restitution: number;
    density: number;
    isStatic: boolean;
}>;

type WorldConfig = Partial<{
    gravity: Vector;
    iterations: number;
    constraint_parameters: Partial<{
        epsilon: number;
        slop: number;
        percent: number;
        friction_mix: "body_a" | "geometric_mean";
    }>;
}>;
"#;

#[wasm_bindgen]
pub struct WebScene {
    scene: Scene,
}

#[wasm_bindgen]
impl WebScene {
    #[wasm_bindgen(js_name = "setGravity")]
    pub fn set_gravity(&mut self, gravity: WebVector) -> Result<(), JsError> {
        let gravity: Vector = gravity.try_into()?;
        self.scene.set_gravity(gravity);
        Ok(())
    }

    #[wasm_bindgen(js_name = "createCircle")]
    pub fn create_circle(
        &mut self,
        x: FloatNum,
        y: FloatNum,
        radius: FloatNum,
        config: Option<WebShapeConfig>,
    ) -> Result<ID, JsError> {
        let builder = ElementBuilder::circle(radius, (x, y))?;
        self.create_element(builder, config)
    }

    #[wasm_bindgen(js_name = "createBox")]
    pub fn create_box(
        &mut self,
        x: FloatNum,
        y: FloatNum,
        half_width: FloatNum,
        half_height: FloatNum,
        orientation: Option<FloatNum>,
        config: Option<WebShapeConfig>,
    ) -> Result<ID, JsError> {
        let builder = ElementBuilder::rect(half_width, half_height, (x, y))?
            .orientation(orientation.unwrap_or_default());
        self.create_element(builder, config)
    }

    /// the convex hull of `vertices` (model space) is placed at `x`, `y`
    #[wasm_bindgen(js_name = "createPolygon")]
    pub fn create_polygon(
        &mut self,
        x: FloatNum,
        y: FloatNum,
        vertices: Vec<WebVector>,
        config: Option<WebShapeConfig>,
    ) -> Result<ID, JsError> {
        let vertices = vertices
            .into_iter()
            .map(Vector::try_from)
            .collect::<Result<Vec<Vector>, JsError>>()?;

        let builder = ElementBuilder::polygon(&vertices, (x, y))?;
        self.create_element(builder, config)
    }

    pub fn step(&mut self, delta_time: FloatNum) {
        self.scene.step(delta_time);
    }

    #[wasm_bindgen(js_name = "hasElement")]
    pub fn has_element(&self, element_id: ID) -> bool {
        self.scene.has_element(element_id)
    }

    #[wasm_bindgen(js_name = "getElementIds")]
    pub fn element_ids(&self) -> Vec<ID> {
        self.scene.elements_iter().map(|element| element.id()).collect()
    }

    #[wasm_bindgen(js_name = "getElementPosition")]
    pub fn get_element_position(&self, element_id: ID) -> Option<WebVector> {
        self.scene
            .get_element(element_id)
            .map(|element| Tuple2::from(element.position()))
            .and_then(|point| to_value(&point).ok())
            .map(Into::into)
    }

    #[wasm_bindgen(js_name = "applyForce")]
    pub fn apply_force(&mut self, element_id: ID, x: FloatNum, y: FloatNum) -> bool {
        self.scene
            .get_element_mut(element_id)
            .map(|element| element.apply_force((x, y)))
            .is_some()
    }

    /// contacts found by the last step
    pub fn contacts(&self) -> Result<JsValue, JsValue> {
        let contacts: Vec<ContactInfo> = self.scene.contacts().iter().map(Into::into).collect();
        Ok(to_value(&contacts)?)
    }

    #[wasm_bindgen(skip_typescript, js_name = "forEachElement")]
    pub fn for_each_element(&self, callback: Function) -> Result<(), JsValue> {
        let this = JsValue::null();

        for element in self.scene.elements_iter() {
            let shape = ElementShape::from(element);
            callback.call1(&this, &to_value(&shape)?)?;
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.scene.clear();
    }

    #[wasm_bindgen(getter, js_name = "frameCount")]
    pub fn frame_count(&self) -> u64 {
        self.scene.frame_count() as u64
    }

    fn create_element(
        &mut self,
        builder: ElementBuilder,
        config: Option<WebShapeConfig>,
    ) -> Result<ID, JsError> {
        let config: ShapeConfig = match config {
            Some(config) => from_value(config.into())?,
            None => ShapeConfig::default(),
        };

        let element = config.apply(builder).build()?;

        Ok(self.scene.push_element(element))
    }
}

#[wasm_bindgen(js_name = "createScene")]
pub fn create_scene(config: Option<WebWorldConfig>) -> Result<WebScene, JsError> {
    let config: WorldConfig = match config {
        Some(config) => from_value(config.into())?,
        None => WorldConfig::default(),
    };

    Ok(WebScene {
        scene: Scene::with_config(config),
    })
}
