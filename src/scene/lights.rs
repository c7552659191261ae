//! The lighting rig of the scene: one directional light, one point light and a
//! spotlight carried by the camera.
//!
//! A disabled light is never skipped. Its ambient, diffuse and specular terms
//! are zeroed instead, so every shader sees the same set of lights in every
//! pass. Per-pass and per-object intensity changes are described by
//! `LightOverrides`, which are resolved into a fresh `Lights` value for every
//! draw instead of mutating the rig.

use crate::math::prelude::*;

/// The ambient, diffuse and specular intensities of a light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Phong {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

impl Phong {
    pub fn new(ambient: f32, diffuse: f32, specular: f32) -> Self {
        Phong {
            ambient: Vector3::new(ambient, ambient, ambient),
            diffuse: Vector3::new(diffuse, diffuse, diffuse),
            specular: Vector3::new(specular, specular, specular),
        }
    }

    #[inline]
    pub fn black() -> Self {
        Phong::new(0.0, 0.0, 0.0)
    }
}

/// Distance attenuation `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// Roughly covers a distance of 50 units.
    pub fn medium() -> Self {
        Attenuation {
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }

    #[inline]
    pub fn at(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The direction the light travels in, not normalized.
    pub direction: Vector3<f32>,
    pub phong: Phong,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Point3<f32>,
    pub phong: Phong,
    pub attenuation: Attenuation,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Point3<f32>,
    pub direction: Vector3<f32>,
    pub phong: Phong,
    pub attenuation: Attenuation,
    /// Cosine of the inner cone angle.
    pub cut_off: f32,
    /// Cosine of the outer cone angle.
    pub outer_cut_off: f32,
}

/// The user switches of the rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightToggles {
    pub directional: bool,
    pub point: bool,
    pub spot: bool,
}

impl Default for LightToggles {
    fn default() -> Self {
        LightToggles {
            directional: true,
            point: true,
            spot: false,
        }
    }
}

/// Intensity changes applied on top of the rig for one draw. `None` keeps the
/// value of the rig.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightOverrides {
    /// Replaces the x component of the directional light direction.
    pub sun_x: Option<f32>,
    pub directional_diffuse: Option<Vector3<f32>>,
    pub spot_diffuse: Option<Vector3<f32>>,
}

impl LightOverrides {
    #[inline]
    pub fn none() -> Self {
        Default::default()
    }

    /// The refraction pass looks at the scene through a fixed sun.
    pub fn refraction() -> Self {
        LightOverrides {
            sun_x: Some(-0.2),
            ..Default::default()
        }
    }

    /// Fish swim under the water, they only receive a faint spotlight.
    pub fn fish() -> Self {
        LightOverrides {
            directional_diffuse: Some(Vector3::new(0.0, 0.0, 0.0)),
            spot_diffuse: Some(Vector3::new(0.05, 0.05, 0.05)),
            ..Default::default()
        }
    }

    /// Combines two overrides, fields set in `other` win.
    pub fn merge(&self, other: &LightOverrides) -> LightOverrides {
        LightOverrides {
            sun_x: other.sun_x.or(self.sun_x),
            directional_diffuse: other.directional_diffuse.or(self.directional_diffuse),
            spot_diffuse: other.spot_diffuse.or(self.spot_diffuse),
        }
    }
}

/// The lights a single draw is shaded with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub directional: DirectionalLight,
    pub point: PointLight,
    pub spot: SpotLight,
}

#[derive(Debug, Clone)]
pub struct LightRig {
    pub directional: DirectionalLight,
    pub point: PointLight,
    pub spot: SpotLight,
    pub toggles: LightToggles,
}

impl LightRig {
    /// The lights of the river scene.
    pub fn river() -> Self {
        LightRig {
            directional: DirectionalLight {
                direction: Vector3::new(0.0, -1.0, -0.3),
                phong: Phong::new(1.0, 20.0, 0.5),
            },
            point: PointLight {
                position: Point3::new(0.7, 5.2, 0.0),
                phong: Phong::new(0.05, 0.8, 1.0),
                attenuation: Attenuation::medium(),
            },
            spot: SpotLight {
                position: Point3::origin(),
                direction: Vector3::new(0.0, 0.0, -1.0),
                phong: Phong::new(0.0, 10.0, 1.0),
                attenuation: Attenuation::medium(),
                cut_off: Rad::from(Deg(12.5f32)).0.cos(),
                outer_cut_off: Rad::from(Deg(15.0f32)).0.cos(),
            },
            toggles: LightToggles::default(),
        }
    }

    /// Moves the sun along with `elapsed` seconds and attaches the spotlight to
    /// the camera.
    pub fn update(&mut self, elapsed: f32, eye: Point3<f32>, forward: Vector3<f32>) {
        self.directional.direction.x = elapsed.sin() * 2.0;
        self.spot.position = eye;
        self.spot.direction = forward;
    }

    /// Applies `overrides` and then the toggles.
    pub fn resolve(&self, overrides: &LightOverrides) -> Lights {
        let mut lights = Lights {
            directional: self.directional,
            point: self.point,
            spot: self.spot,
        };

        if let Some(x) = overrides.sun_x {
            lights.directional.direction.x = x;
        }

        if let Some(v) = overrides.directional_diffuse {
            lights.directional.phong.diffuse = v;
        }

        if let Some(v) = overrides.spot_diffuse {
            lights.spot.phong.diffuse = v;
        }

        if !self.toggles.directional {
            lights.directional.phong = Phong::black();
        }

        if !self.toggles.point {
            lights.point.phong = Phong::black();
        }

        if !self.toggles.spot {
            lights.spot.phong = Phong::black();
        }

        lights
    }
}

/// The surface a fragment is shaded on.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    /// The sampled diffuse map.
    pub diffuse: Vector3<f32>,
    /// The sampled specular map.
    pub specular: Vector3<f32>,
    pub shininess: f32,
}

impl Lights {
    /// Evaluates the lighting model of the scene shader on the CPU.
    pub fn shade(&self, eye: Point3<f32>, frag: &Fragment) -> Vector3<f32> {
        let n = frag.normal.normalize();
        let view_dir = (eye - frag.position).normalize();

        let dir = &self.directional;
        let mut color = phong(
            &dir.phong,
            n,
            (-dir.direction).normalize(),
            view_dir,
            frag,
        );

        let point = &self.point;
        let to_light = point.position - frag.position;
        let attenuation = point.attenuation.at(to_light.magnitude());
        color += phong(&point.phong, n, to_light.normalize(), view_dir, frag) * attenuation;

        let spot = &self.spot;
        let to_light = spot.position - frag.position;
        let light_dir = to_light.normalize();
        let theta = light_dir.dot((-spot.direction).normalize());
        let epsilon = spot.cut_off - spot.outer_cut_off;
        let intensity = ((theta - spot.outer_cut_off) / epsilon).max(0.0).min(1.0);
        let attenuation = spot.attenuation.at(to_light.magnitude());
        color += phong(&spot.phong, n, light_dir, view_dir, frag) * (attenuation * intensity);

        color
    }
}

fn phong(
    light: &Phong,
    n: Vector3<f32>,
    light_dir: Vector3<f32>,
    view_dir: Vector3<f32>,
    frag: &Fragment,
) -> Vector3<f32> {
    let diff = n.dot(light_dir).max(0.0);
    let reflect_dir = reflect(-light_dir, n);
    let spec = view_dir.dot(reflect_dir).max(0.0).powf(frag.shininess);

    let ambient = light.ambient.mul_element_wise(frag.diffuse);
    let diffuse = light.diffuse.mul_element_wise(frag.diffuse) * diff;
    let specular = light.specular.mul_element_wise(frag.specular) * spec;
    ambient + diffuse + specular
}

#[inline]
fn reflect(i: Vector3<f32>, n: Vector3<f32>) -> Vector3<f32> {
    i - n * (2.0 * n.dot(i))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn toggles_zero_every_term() {
        let mut rig = LightRig::river();
        rig.toggles = LightToggles {
            directional: false,
            point: false,
            spot: false,
        };

        let lights = rig.resolve(&LightOverrides::fish());
        assert_eq!(lights.directional.phong, Phong::black());
        assert_eq!(lights.point.phong, Phong::black());
        assert_eq!(lights.spot.phong, Phong::black());

        // Geometry is untouched.
        assert_eq!(lights.point.position, rig.point.position);
        assert_eq!(lights.point.attenuation, rig.point.attenuation);
    }

    #[test]
    fn overrides() {
        let mut rig = LightRig::river();
        rig.toggles.spot = true;
        rig.update(1.0, Point3::new(1.0, 2.0, 3.0), Vector3::unit_x());
        assert_eq!(rig.directional.direction.x, 1.0f32.sin() * 2.0);
        assert_eq!(rig.spot.position, Point3::new(1.0, 2.0, 3.0));

        let merged = LightOverrides::refraction().merge(&LightOverrides::fish());
        let lights = rig.resolve(&merged);
        assert_eq!(lights.directional.direction.x, -0.2);
        assert_eq!(lights.directional.phong.diffuse, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(lights.spot.phong.diffuse, Vector3::new(0.05, 0.05, 0.05));

        // The rig itself is never changed by an override.
        assert_eq!(rig.directional.phong.diffuse, Vector3::new(20.0, 20.0, 20.0));
        assert_eq!(rig.resolve(&LightOverrides::none()).spot.phong, rig.spot.phong);
    }

    #[test]
    fn attenuation() {
        let a = Attenuation::medium();
        assert_eq!(a.at(0.0), 1.0);
        assert!(a.at(10.0) < a.at(1.0));
    }
}
