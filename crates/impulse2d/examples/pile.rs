use impulse2d::{math::PI, prelude::*, shape::polygon::MAX_POLY_VERTEX_COUNT};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

const FRAMES: usize = 600;
const SPAWN_COUNT: usize = 24;

fn spawn(scene: &mut Scene, rng: &mut impl Rng) -> ShapeResult<ID> {
    let position = (rng.gen_range(100. ..380.), rng.gen_range(0. ..150.));

    let element = match rng.gen_range(0..3) {
        0 => ElementBuilder::circle(rng.gen_range(10. ..30.), position)?.build()?,
        1 => ElementBuilder::rect(25., 25., position)?
            .orientation(rng.gen_range(-PI..PI))
            .build()?,
        _ => {
            let extent = rng.gen_range(5. ..20.);
            let points: Vec<Vector> = (0..rng.gen_range(3..=MAX_POLY_VERTEX_COUNT))
                .map(|_| {
                    (
                        rng.gen_range(-extent..=extent),
                        rng.gen_range(-extent..=extent),
                    )
                        .into()
                })
                .collect();
            ElementBuilder::polygon(&points, position)?
                .material(
                    MaterialBuilder::new()
                        .restitution(0.2)
                        .dynamic_friction(0.2)
                        .static_friction(0.4),
                )
                .build()?
        }
    };

    Ok(scene.push_element(element))
}

fn main() -> ShapeResult<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut rng = StdRng::seed_from_u64(2017);
    let mut scene = Scene::new();

    scene.push_element(
        ElementBuilder::circle(30., (200., 200.))?
            .fixed(true)
            .build()?,
    );
    scene.push_element(
        ElementBuilder::rect(200., 10., (240., 300.))?
            .fixed(true)
            .build()?,
    );

    let mut spawned = 0;
    while spawned < SPAWN_COUNT {
        match spawn(&mut scene, &mut rng) {
            Ok(_) => spawned += 1,
            Err(err) => info!("skip shape: {err}"),
        }
    }

    for frame in 1..=FRAMES {
        scene.step(1. / 60.);

        if frame % 60 == 0 {
            let contact_points: usize = scene
                .contacts()
                .iter()
                .map(|manifold| manifold.contact_count())
                .sum();
            info!(
                "t = {:.1}s, {} contacts, {} contact points",
                scene.total_duration(),
                scene.contacts().len(),
                contact_points
            );
        }
    }

    for element in scene.elements_iter().filter(|element| !element.is_static()) {
        info!(
            "element {} at {} orientation {:.3}",
            element.id(),
            element.position(),
            element.orientation()
        );
    }

    Ok(())
}
