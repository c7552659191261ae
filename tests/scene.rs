extern crate lagoon;

use lagoon::assets::AssetLoader;
use lagoon::math::prelude::*;
use lagoon::scene::river::RiverScene;
use lagoon::video::Video;

fn load() -> RiverScene {
    let (mut video, _) = Video::headless(Vector2::new(64, 64));
    let mut loader = AssetLoader::new("this/directory/does/not/exist");
    RiverScene::load(&mut video, &mut loader, 1.0).unwrap()
}

#[test]
fn missing_assets_leave_empty_models() {
    let scene = load();
    assert_eq!(scene.objects.len(), 3);
    assert!(scene.objects.iter().all(|v| v.model.is_empty()));
    assert_eq!(scene.water_height, 1.0);
}

#[test]
fn animation_is_a_function_of_time() {
    let a = load();
    let b = load();

    for t in &[0.0f32, 0.75, 3.2, 60.0] {
        for (x, y) in a.objects.iter().zip(b.objects.iter()) {
            assert_eq!(x.placement.world_matrix(*t), y.placement.world_matrix(*t));
        }
    }

    // The river is still, the fish are not.
    let river = &a.objects[0].placement;
    assert_eq!(river.world_matrix(0.0), river.world_matrix(5.0));

    let fish = &a.objects[1].placement;
    assert_ne!(fish.world_matrix(0.0), fish.world_matrix(0.5));
}
