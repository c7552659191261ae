extern crate lagoon;

use std::time::Duration;

use lagoon::assets::model::{Model, ModelPart};
use lagoon::assets::AssetLoader;
use lagoon::prelude::*;
use lagoon::render::geometry;
use lagoon::scene::placement::Transform;

fn settings(order: PassOrder) -> Settings {
    let mut settings = Settings::default();
    settings.engine.headless = true;
    settings.window.size = Vector2::new(320, 240);
    settings.water.order = order;
    settings.assets.root = "this/directory/does/not/exist".into();
    settings
}

fn engine(order: PassOrder) -> (Engine, CommandLog) {
    let mut engine = Engine::new(settings(order)).unwrap();
    engine.set_clock(FrameClock::fixed(Duration::from_millis(16)));
    let log = engine.log().unwrap();
    (engine, log)
}

fn is_skybox(v: &DrawRecord) -> bool {
    v.uniform("skybox").is_some()
}

fn is_water(v: &DrawRecord) -> bool {
    v.uniform("reflectionTexture").is_some()
}

fn is_preview(v: &DrawRecord) -> bool {
    v.uniform("screenTexture").is_some()
}

/// A unit cube model at `y`, which spans `[y - 0.5, y + 0.5]`.
fn cube_at(video: &mut Video, loader: &mut AssetLoader, y: f32) -> SceneObject {
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

    let transform = Transform::new().with_translation(0.0, y, 0.0);
    SceneObject::new("cube", model, Placement::fixed(transform))
}

#[test]
fn depth_test_restored_after_skybox() {
    for &order in &[PassOrder::Lagged, PassOrder::FrameExact] {
        let (mut engine, log) = engine(order);
        assert_eq!(engine.run_frames(3).unwrap(), 3);

        let draws = log.draws();
        let skyboxes = draws.iter().filter(|v| is_skybox(v)).count();
        assert_eq!(skyboxes, 9);

        for v in &draws {
            if is_skybox(v) {
                assert_eq!(v.depth_test, Some(Comparison::LessOrEqual));
            } else if is_preview(v) {
                assert_eq!(v.depth_test, None);
                assert_eq!(v.surface, None);
                assert!(!v.clip_distance);
            } else {
                assert_eq!(v.depth_test, Some(Comparison::Less));
                assert!(v.clip_distance);
            }
        }

        // Every temporary depth function is followed by the default one.
        let tests: Vec<_> = log
            .commands()
            .into_iter()
            .filter_map(|v| match v {
                Command::SetDepthTest(cmp) => Some(cmp),
                _ => None,
            })
            .collect();
        for pair in tests.chunks(2) {
            assert_ne!(pair[0], Some(Comparison::Less));
            assert_eq!(pair[1], Some(Comparison::Less));
        }

        assert_eq!(log.depth_test(), Some(Comparison::Less));
        assert!(!log.clip_distance());
        assert_eq!(engine.shutdown().unwrap(), 0);
    }
}

#[test]
fn lagged_water_samples_previous_frame() {
    let (mut engine, log) = engine(PassOrder::Lagged);
    engine.run_frames(1).unwrap();

    let reflection = engine.pipeline().targets().reflection.surface();
    let refraction = engine.pipeline().targets().refraction.surface();
    let draws = log.draws();

    let water = draws.iter().position(|v| is_water(v)).unwrap();
    assert_eq!(draws[water].surface, None);
    assert_eq!(
        draws[water].uniform("reflectionTexture"),
        Some(UniformVariable::RenderTexture(
            engine.pipeline().targets().reflection.color()
        ))
    );
    assert_eq!(
        draws[water].uniform("refractionTexture"),
        Some(UniformVariable::RenderTexture(
            engine.pipeline().targets().refraction.color()
        ))
    );

    // Neither target was rendered before the water in this frame.
    assert!(draws[..water]
        .iter()
        .all(|v| v.surface != Some(reflection) && v.surface != Some(refraction)));

    let first_reflection = draws
        .iter()
        .position(|v| v.surface == Some(reflection))
        .unwrap();
    let first_refraction = draws
        .iter()
        .position(|v| v.surface == Some(refraction))
        .unwrap();
    assert!(water < first_reflection && first_reflection < first_refraction);

    // One water draw, only in the main pass.
    assert_eq!(draws.iter().filter(|v| is_water(v)).count(), 1);
    assert_eq!(engine.shutdown().unwrap(), 0);
}

#[test]
fn frame_exact_renders_targets_first() {
    let (mut engine, log) = engine(PassOrder::FrameExact);
    engine.run_frames(1).unwrap();

    let reflection = engine.pipeline().targets().reflection.surface();
    let refraction = engine.pipeline().targets().refraction.surface();
    let draws = log.draws();

    let water = draws.iter().position(|v| is_water(v)).unwrap();
    let last_target = draws
        .iter()
        .rposition(|v| v.surface == Some(reflection) || v.surface == Some(refraction))
        .unwrap();
    assert!(last_target < water);

    // The previews come last, on top of the main pass.
    let previews: Vec<_> = draws
        .iter()
        .enumerate()
        .filter(|v| is_preview(v.1))
        .map(|v| v.0)
        .collect();
    assert_eq!(previews.len(), 2);
    assert!(previews.iter().all(|&i| i > water));
    assert_eq!(engine.shutdown().unwrap(), 0);
}

#[test]
fn clip_culling() {
    let (mut engine, log) = engine(PassOrder::Lagged);

    {
        let mut loader = AssetLoader::new("this/directory/does/not/exist");
        let (scene, video) = engine.scene_and_video_mut();
        scene.objects.clear();
        scene.push(cube_at(video, &mut loader, 3.0));
        scene.push(cube_at(video, &mut loader, 1.0));
        scene.push(cube_at(video, &mut loader, -2.0));
    }

    let stats = engine.advance().unwrap().unwrap();

    // Three objects, the marker, the water and the skybox.
    let main = stats.pass(PassKind::Main).unwrap();
    assert_eq!(main.draws, 6);
    assert_eq!(main.culled, 0);

    // The cube below the water is skipped.
    let reflection = stats.pass(PassKind::Reflection).unwrap();
    assert_eq!(reflection.draws, 4);
    assert_eq!(reflection.culled, 1);

    // The cube above the water and the marker at y = 5.2 are skipped.
    let refraction = stats.pass(PassKind::Refraction).unwrap();
    assert_eq!(refraction.draws, 3);
    assert_eq!(refraction.culled, 2);

    let surface = engine.pipeline().targets().reflection.surface();
    let plane = log
        .draws()
        .into_iter()
        .find(|v| v.surface == Some(surface) && v.uniform("plane").is_some())
        .and_then(|v| v.uniform("plane"));
    assert_eq!(
        plane,
        Some(UniformVariable::Vector4f([0.0, 1.0, 0.0, -1.0]))
    );
}

#[test]
fn wireframe_leaves_previews_filled() {
    let (mut engine, log) = engine(PassOrder::Lagged);
    engine
        .window_mut()
        .inject(Event::InputDevice(InputEvent::KeyboardPressed { key: Key::Z }));
    engine.run_frames(1).unwrap();
    assert!(engine.pipeline().wireframe());

    for v in log.draws() {
        if is_preview(&v) {
            assert_eq!(v.polygon_mode, PolygonMode::Fill);
        } else {
            assert_eq!(v.polygon_mode, PolygonMode::Line);
        }
    }
}

#[test]
fn released_exactly_once() {
    let (mut engine, log) = engine(PassOrder::FrameExact);
    engine.run_frames(2).unwrap();
    assert_eq!(engine.shutdown().unwrap(), 0);

    let mut created = 0;
    let mut deleted = 0;
    for v in log.commands() {
        match v {
            Command::CreateSurface(_)
            | Command::CreateShader(_)
            | Command::CreateTexture(_)
            | Command::CreateRenderTexture(_)
            | Command::CreateMesh(_) => created += 1,
            Command::DeleteSurface(_)
            | Command::DeleteShader(_)
            | Command::DeleteTexture(_)
            | Command::DeleteRenderTexture(_)
            | Command::DeleteMesh(_) => deleted += 1,
            _ => {}
        }
    }

    assert!(created > 0);
    assert_eq!(created, deleted);
}

#[test]
fn follows_window_resize() {
    let (mut engine, _) = engine(PassOrder::Lagged);
    let before = engine.pipeline().targets().reflection.surface();

    engine
        .window_mut()
        .inject(Event::Window(WindowEvent::Resized(640, 480)));
    engine.run_frames(1).unwrap();

    assert_eq!(engine.dimensions(), Vector2::new(640, 480));
    assert_eq!(
        engine.pipeline().targets().dimensions(),
        Vector2::new(640, 480)
    );
    assert_ne!(engine.pipeline().targets().reflection.surface(), before);

    // Minimized windows draw nothing.
    engine
        .window_mut()
        .inject(Event::Window(WindowEvent::Resized(0, 0)));
    let stats = engine.advance().unwrap().unwrap();
    assert_eq!(stats.draws(), 0);
    assert_eq!(
        engine.pipeline().targets().dimensions(),
        Vector2::new(640, 480)
    );
    assert_eq!(engine.shutdown().unwrap(), 0);
}
