extern crate lagoon;
#[macro_use]
extern crate approx;

use lagoon::math::prelude::*;
use lagoon::scene::prelude::*;

fn fragment() -> Fragment {
    Fragment {
        position: Point3::new(0.0, 0.0, -2.0),
        normal: Vector3::new(0.0, 0.3, 1.0),
        diffuse: Vector3::new(0.8, 0.6, 0.4),
        specular: Vector3::new(0.5, 0.5, 0.5),
        shininess: 32.0,
    }
}

fn rig(directional: bool, point: bool, spot: bool) -> LightRig {
    let mut rig = LightRig::river();
    // The spotlight looks straight at the fragment.
    rig.update(0.5, Point3::new(0.0, 0.2, 1.0), Vector3::new(0.0, -0.2, -3.0));
    rig.toggles = LightToggles {
        directional,
        point,
        spot,
    };
    rig
}

#[test]
fn lights_are_additive() {
    let eye = Point3::new(0.0, 0.2, 1.0);
    let frag = fragment();
    let overrides = LightOverrides::none();

    let all = rig(true, true, true).resolve(&overrides).shade(eye, &frag);
    let dir = rig(true, false, false).resolve(&overrides).shade(eye, &frag);
    let point = rig(false, true, false).resolve(&overrides).shade(eye, &frag);
    let spot = rig(false, false, true).resolve(&overrides).shade(eye, &frag);

    assert!(spot.x > 0.0);
    assert_ulps_eq!(all, dir + point + spot, epsilon = 1e-4);

    let none = rig(false, false, false).resolve(&overrides).shade(eye, &frag);
    assert_eq!(none, Vector3::new(0.0, 0.0, 0.0));
}

#[test]
fn ambient_only() {
    let eye = Point3::new(0.0, 0.2, 1.0);
    let frag = fragment();

    let mut lights = rig(true, false, false).resolve(&LightOverrides::none());
    lights.directional.phong = Phong::new(0.25, 0.0, 0.0);

    let color = lights.shade(eye, &frag);
    assert_ulps_eq!(color, frag.diffuse * 0.25, epsilon = 1e-6);
}

#[test]
fn full_ambient_on_white() {
    let eye = Point3::new(0.0, 0.2, 1.0);
    let mut frag = fragment();
    frag.diffuse = Vector3::new(1.0, 1.0, 1.0);
    frag.specular = Vector3::new(1.0, 1.0, 1.0);

    // Point and spot are off, so they contribute black.
    let mut lights = rig(true, false, false).resolve(&LightOverrides::none());
    lights.directional.phong = Phong::new(1.0, 0.0, 0.0);

    let color = lights.shade(eye, &frag);
    assert_eq!(color, Vector3::new(1.0, 1.0, 1.0));
}

#[test]
fn fish_are_dimmer_than_the_river() {
    let eye = Point3::new(0.0, 0.2, 1.0);
    let frag = fragment();

    let rig = rig(true, true, true);
    let river = rig.resolve(&LightOverrides::none()).shade(eye, &frag);
    let fish = rig.resolve(&LightOverrides::fish()).shade(eye, &frag);
    assert!(fish.x < river.x);
    assert!(fish.y < river.y);
}

#[test]
fn spot_outside_cone() {
    let mut rig = rig(false, false, true);
    // Looking away from the fragment.
    rig.update(0.5, Point3::new(0.0, 0.2, 1.0), Vector3::new(0.0, 0.0, 1.0));

    let color = rig
        .resolve(&LightOverrides::none())
        .shade(Point3::new(0.0, 0.2, 1.0), &fragment());
    assert_eq!(color, Vector3::new(0.0, 0.0, 0.0));
}
