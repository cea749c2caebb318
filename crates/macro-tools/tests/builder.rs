use impulse2d_macro_tools::{Builder, Deref, Fields};

#[derive(Builder, Fields, Debug)]
#[r]
struct Material {
    #[default = 0.5]
    static_friction: f64,
    #[default = 0.3]
    dynamic_friction: f64,
    restitution: f64,
    #[builder(skip)]
    #[default = 7]
    revision: u32,
}

#[test]
fn test_default_values() {
    let material = Material::default();
    assert_eq!(material.static_friction(), 0.5);
    assert_eq!(material.dynamic_friction(), 0.3);
    assert_eq!(material.restitution(), 0.);
    assert_eq!(material.revision(), 7);
}

#[test]
fn test_builder_override() {
    let material: Material = MaterialBuilder::new().restitution(1.).static_friction(0.).into();
    assert_eq!(material.static_friction(), 0.);
    assert_eq!(material.dynamic_friction(), 0.3);
    assert_eq!(material.restitution(), 1.);
}

#[derive(Deref, Default)]
struct Wrapper {
    #[deref]
    value: Vec<u8>,
    #[allow(dead_code)]
    tag: u8,
}

#[test]
fn test_deref_to_marked_field() {
    let mut wrapper = Wrapper::default();
    wrapper.push(3);
    assert_eq!(wrapper.len(), 1);
    assert_eq!(wrapper.value, vec![3]);
}

const LIMIT: u32 = 4;

#[derive(Builder, Fields, Debug)]
#[r]
struct Limits {
    #[default(LIMIT * 2)]
    iterations: u32,
    #[default(String::from("body_a"))]
    mode: String,
    #[default(f64::EPSILON.sqrt())]
    tolerance: f64,
}

#[test]
fn test_expression_defaults() {
    let limits = Limits::default();
    assert_eq!(limits.iterations(), 8);
    assert_eq!(limits.mode(), "body_a");
    assert_eq!(limits.tolerance(), f64::EPSILON.sqrt());

    let limits: Limits = LimitsBuilder::new().mode("geometric_mean").into();
    assert_eq!(limits.iterations(), 8);
    assert_eq!(limits.mode(), "geometric_mean");
}
