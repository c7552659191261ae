extern crate lagoon;

use std::fs;
use std::time::Duration;

use lagoon::assets::model::{Model, ModelPart};
use lagoon::assets::AssetLoader;
use lagoon::prelude::*;
use lagoon::render::geometry;
use lagoon::scene::placement::Transform;

/// A headless engine with a single cube straddling the water.
fn headless() -> Engine {
    let mut settings = Settings::default();
    settings.engine.headless = true;
    settings.assets.root = "this/directory/does/not/exist".into();

    let mut engine = Engine::new(settings).unwrap();
    engine.set_clock(FrameClock::fixed(Duration::from_millis(20)));

    {
        let mut loader = AssetLoader::new("this/directory/does/not/exist");
        let (scene, video) = engine.scene_and_video_mut();
        let (params, data) = geometry::cube();
        let mesh = video.create_mesh(params, data).unwrap();
        let texture = loader.placeholder(video).unwrap();

        let model = Model {
            mesh: Some(mesh),
            parts: vec![ModelPart {
                index: MeshIndex::All,
                diffuse: texture,
                specular: texture,
            }],
            bounds: Aabb3::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5)),
        };

        let transform = Transform::new().with_translation(0.0, 1.0, -3.0);
        scene.push(SceneObject::new("cube", model, Placement::fixed(transform)));
    }

    engine
}

fn press(engine: &mut Engine, key: Key) {
    engine
        .window_mut()
        .inject(Event::InputDevice(InputEvent::KeyboardPressed { key }));
}

fn release(engine: &mut Engine, key: Key) {
    engine
        .window_mut()
        .inject(Event::InputDevice(InputEvent::KeyboardReleased { key }));
}

#[test]
fn light_toggles() {
    let mut engine = headless();
    assert_eq!(engine.rig().toggles, LightToggles::default());
    assert!(!engine.rig().toggles.spot);

    press(&mut engine, Key::F);
    press(&mut engine, Key::Key1);
    engine.run_frames(1).unwrap();
    assert!(engine.rig().toggles.spot);
    assert!(!engine.rig().toggles.directional);
    assert!(engine.rig().toggles.point);

    // Holding the keys toggles nothing.
    engine.run_frames(3).unwrap();
    assert!(engine.rig().toggles.spot);
    assert!(!engine.rig().toggles.directional);

    release(&mut engine, Key::F);
    engine.run_frames(1).unwrap();
    press(&mut engine, Key::F);
    press(&mut engine, Key::Key2);
    engine.run_frames(1).unwrap();
    assert!(!engine.rig().toggles.spot);
    assert!(!engine.rig().toggles.point);

    // Only the placeholder of the test loader is left.
    assert_eq!(engine.shutdown().unwrap(), 1);
}

#[test]
fn disabled_lights_upload_black() {
    let mut engine = headless();
    let log = engine.log().unwrap();

    press(&mut engine, Key::Key2);
    engine.run_frames(1).unwrap();

    let black = Some(UniformVariable::Vector3f([0.0, 0.0, 0.0]));
    let scene = log
        .draws()
        .into_iter()
        .filter(|v| v.uniform("pointLights[0].diffuse").is_some())
        .collect::<Vec<_>>();

    assert_eq!(scene.len(), 3);
    for v in &scene {
        assert_eq!(v.uniform("pointLights[0].ambient"), black);
        assert_eq!(v.uniform("pointLights[0].diffuse"), black);
        assert_eq!(v.uniform("pointLights[0].specular"), black);
        assert_eq!(v.uniform("spotLight.diffuse"), black);
    }
}

#[test]
fn escape_exits() {
    let mut engine = headless();
    assert_eq!(engine.run_frames(2).unwrap(), 2);

    press(&mut engine, Key::Escape);
    assert!(engine.advance().unwrap().is_none());

    let mut engine = headless();
    engine
        .window_mut()
        .inject(Event::Window(WindowEvent::Closed));
    assert_eq!(engine.run_frames(5).unwrap(), 0);
    engine.run().unwrap();
}

#[test]
fn deterministic_frames() {
    let mut a = headless();
    let mut b = headless();
    let (la, lb) = (a.log().unwrap(), b.log().unwrap());

    a.run_frames(4).unwrap();
    b.run_frames(4).unwrap();

    let sun = |log: &CommandLog| -> Vec<Option<UniformVariable>> {
        log.draws()
            .into_iter()
            .map(|v| v.uniform("dirLight.direction"))
            .filter(|v| v.is_some())
            .collect()
    };

    assert_eq!(la.draws(), lb.draws());

    // The sun moves between frames.
    let sa = sun(&la);
    assert!(!sa.is_empty());
    assert_ne!(sa.first(), sa.last());
}

#[test]
fn settings_file() {
    let path = std::env::temp_dir().join("lagoon-settings-test.json");
    fs::write(
        &path,
        r#"{ "engine": { "headless": true }, "water": { "height": 0.5 } }"#,
    )
    .unwrap();

    let settings = Settings::load(&path).unwrap();
    assert!(settings.engine.headless);
    assert_eq!(settings.water.height, 0.5);
    assert_eq!(settings.water.order, PassOrder::Lagged);

    fs::write(&path, "{ nope").unwrap();
    assert!(Settings::load(&path).is_err());
    fs::remove_file(&path).unwrap();
}
