//! The uniform names the scene shaders are written against.

use crate::math::prelude::*;
use crate::scene::lights::Lights;
use crate::utils::prelude::HashValue;
use crate::video::assets::prelude::*;
use crate::video::DrawCall;

macro_rules! impl_uniforms {
    ($name: ident { $($field: ident => [$uvt: ident, $str: tt], )* }) => {
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $field, ) *
        }

        impl $name {
            pub const UNIFORMS: &'static [$name] = &[
                $( $name::$field, ) *
            ];

            pub const FIELDS: &'static [&'static str] = &[
                $( $str, ) *
            ];

            pub const TYPES: &'static [UniformVariableType] = &[
                $( UniformVariableType::$uvt, ) *
            ];

            /// The layout that declares every uniform of this set.
            pub fn layout() -> UniformVariableLayout {
                Self::UNIFORMS
                    .iter()
                    .fold(UniformVariableLayout::build(), |b, &v| {
                        b.with(Self::FIELDS[v as usize], Self::TYPES[v as usize])
                    })
                    .finish()
            }

            #[inline]
            pub fn name(self) -> &'static str {
                Self::FIELDS[self as usize]
            }
        }

        impl Into<HashValue<str>> for $name {
            fn into(self) -> HashValue<str> {
                Self::FIELDS[self as usize].into()
            }
        }
    };
}

impl_uniforms!(
    SceneUniform {
        Model => [Matrix4f, "model"],
        View => [Matrix4f, "view"],
        Projection => [Matrix4f, "projection"],
        ViewPos => [Vector3f, "viewPos"],
        Plane => [Vector4f, "plane"],
        MaterialDiffuse => [Texture, "material.diffuse"],
        MaterialSpecular => [Texture, "material.specular"],
        MaterialShininess => [F32, "material.shininess"],
        DirLightDirection => [Vector3f, "dirLight.direction"],
        DirLightAmbient => [Vector3f, "dirLight.ambient"],
        DirLightDiffuse => [Vector3f, "dirLight.diffuse"],
        DirLightSpecular => [Vector3f, "dirLight.specular"],
        PointLightPosition => [Vector3f, "pointLights[0].position"],
        PointLightAmbient => [Vector3f, "pointLights[0].ambient"],
        PointLightDiffuse => [Vector3f, "pointLights[0].diffuse"],
        PointLightSpecular => [Vector3f, "pointLights[0].specular"],
        PointLightConstant => [F32, "pointLights[0].constant"],
        PointLightLinear => [F32, "pointLights[0].linear"],
        PointLightQuadratic => [F32, "pointLights[0].quadratic"],
        SpotLightPosition => [Vector3f, "spotLight.position"],
        SpotLightDirection => [Vector3f, "spotLight.direction"],
        SpotLightAmbient => [Vector3f, "spotLight.ambient"],
        SpotLightDiffuse => [Vector3f, "spotLight.diffuse"],
        SpotLightSpecular => [Vector3f, "spotLight.specular"],
        SpotLightConstant => [F32, "spotLight.constant"],
        SpotLightLinear => [F32, "spotLight.linear"],
        SpotLightQuadratic => [F32, "spotLight.quadratic"],
        SpotLightCutOff => [F32, "spotLight.cutOff"],
        SpotLightOuterCutOff => [F32, "spotLight.outerCutOff"],
    }
);

impl_uniforms!(
    MarkerUniform {
        Model => [Matrix4f, "model"],
        View => [Matrix4f, "view"],
        Projection => [Matrix4f, "projection"],
        Plane => [Vector4f, "plane"],
    }
);

impl_uniforms!(
    SkyboxUniform {
        View => [Matrix4f, "view"],
        Projection => [Matrix4f, "projection"],
        Skybox => [Texture, "skybox"],
    }
);

impl_uniforms!(
    WaterUniform {
        Model => [Matrix4f, "model"],
        View => [Matrix4f, "view"],
        Projection => [Matrix4f, "projection"],
        Reflection => [RenderTexture, "reflectionTexture"],
        Refraction => [RenderTexture, "refractionTexture"],
    }
);

impl_uniforms!(
    ScreenUniform {
        Texture => [RenderTexture, "screenTexture"],
    }
);

/// The shininess every material of the scene is rendered with.
pub const SHININESS: f32 = 32.0;

/// Uploads the resolved lights of one draw.
pub fn apply_lighting_state(dc: &mut DrawCall, lights: &Lights) {
    use self::SceneUniform as U;

    let dir = &lights.directional;
    dc.set_uniform_variable(U::DirLightDirection, dir.direction);
    dc.set_uniform_variable(U::DirLightAmbient, dir.phong.ambient);
    dc.set_uniform_variable(U::DirLightDiffuse, dir.phong.diffuse);
    dc.set_uniform_variable(U::DirLightSpecular, dir.phong.specular);

    let point = &lights.point;
    dc.set_uniform_variable(U::PointLightPosition, point.position.to_vec());
    dc.set_uniform_variable(U::PointLightAmbient, point.phong.ambient);
    dc.set_uniform_variable(U::PointLightDiffuse, point.phong.diffuse);
    dc.set_uniform_variable(U::PointLightSpecular, point.phong.specular);
    dc.set_uniform_variable(U::PointLightConstant, point.attenuation.constant);
    dc.set_uniform_variable(U::PointLightLinear, point.attenuation.linear);
    dc.set_uniform_variable(U::PointLightQuadratic, point.attenuation.quadratic);

    let spot = &lights.spot;
    dc.set_uniform_variable(U::SpotLightPosition, spot.position.to_vec());
    dc.set_uniform_variable(U::SpotLightDirection, spot.direction);
    dc.set_uniform_variable(U::SpotLightAmbient, spot.phong.ambient);
    dc.set_uniform_variable(U::SpotLightDiffuse, spot.phong.diffuse);
    dc.set_uniform_variable(U::SpotLightSpecular, spot.phong.specular);
    dc.set_uniform_variable(U::SpotLightConstant, spot.attenuation.constant);
    dc.set_uniform_variable(U::SpotLightLinear, spot.attenuation.linear);
    dc.set_uniform_variable(U::SpotLightQuadratic, spot.attenuation.quadratic);
    dc.set_uniform_variable(U::SpotLightCutOff, spot.cut_off);
    dc.set_uniform_variable(U::SpotLightOuterCutOff, spot.outer_cut_off);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scene::lights::{LightOverrides, LightRig};

    #[test]
    fn layouts() {
        let layout = SceneUniform::layout();
        assert_eq!(layout.len(), SceneUniform::UNIFORMS.len());
        assert!(layout.len() <= crate::video::MAX_UNIFORM_VARIABLES);
        assert_eq!(
            layout.variable_type("pointLights[0].position"),
            Some(UniformVariableType::Vector3f)
        );
        assert_eq!(SceneUniform::SpotLightCutOff.name(), "spotLight.cutOff");
        assert_eq!(WaterUniform::layout().len(), 5);
    }

    #[test]
    fn lighting_state() {
        let lights = LightRig::river().resolve(&LightOverrides::none());

        let mut dc = DrawCall::new(ShaderHandle::default(), MeshHandle::default());
        apply_lighting_state(&mut dc, &lights);
        assert_eq!(dc.uniforms().len(), 21);

        for &(field, variable) in dc.uniforms() {
            let tp = SceneUniform::layout().variable_type(field);
            assert_eq!(tp, Some(variable.variable_type()));
        }
    }
}
