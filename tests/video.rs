extern crate lagoon;

use lagoon::math::prelude::*;
use lagoon::video::errors::Error;
use lagoon::video::prelude::*;

const VS: &str = "
#version 330 core
layout (location = 0) in vec3 Position;
uniform mat4 model;
void main() { gl_Position = model * vec4(Position, 1.0); }
";

const FS: &str = "
#version 330 core
out vec4 FragColor;
void main() { FragColor = vec4(1.0); }
";

fn render_texture(format: RenderTextureFormat, w: u32, h: u32) -> RenderTextureParams {
    let mut params = RenderTextureParams::default();
    params.format = format;
    params.dimensions = Vector2::new(w, h);
    params
}

fn shader(video: &mut Video) -> ShaderHandle {
    let params = ShaderParams {
        attributes: AttributeLayout::build()
            .with(Attribute::Position, 3)
            .finish(),
        uniforms: UniformVariableLayout::build()
            .with("model", UniformVariableType::Matrix4f)
            .finish(),
    };

    video.create_shader(params, VS, FS, None).unwrap()
}

#[test]
fn mismatched_attachments() {
    let (mut video, _) = Video::headless(Vector2::new(64, 64));

    let color = video
        .create_render_texture(render_texture(RenderTextureFormat::RGB8, 64, 64))
        .unwrap();
    let depth = video
        .create_render_texture(render_texture(RenderTextureFormat::Depth24Stencil8, 32, 32))
        .unwrap();

    let err = video
        .create_surface(SurfaceParams::new(color, depth))
        .unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::SurfaceIncompatible(_)) => {}
        other => panic!("unexpected error {:?}", other),
    }

    // Nothing was created.
    assert_eq!(video.alive(), 2);

    let depth2 = video
        .create_render_texture(render_texture(RenderTextureFormat::Depth24Stencil8, 64, 64))
        .unwrap();
    let surface = video.create_surface(SurfaceParams::new(color, depth2)).unwrap();
    video.bind(Some(surface)).unwrap();

    // A depth texture is not a color attachment.
    let err = video
        .create_surface(SurfaceParams::new(depth, depth2))
        .unwrap_err();
    assert!(err.downcast_ref::<Error>().is_some());
}

#[test]
fn undefined_uniform() {
    let (mut video, log) = Video::headless(Vector2::new(64, 64));
    let shader = shader(&mut video);
    let (params, data) = lagoon::render::geometry::skybox();
    let mesh = video.create_mesh(params, data).unwrap();

    let mut dc = DrawCall::new(shader, mesh);
    dc.set_uniform_variable("model", Matrix4::<f32>::identity());
    dc.set_uniform_variable("plane", ClipPlane::null().0);

    let err = video.draw(&dc).unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::UniformUndefined(_)) => {}
        other => panic!("unexpected error {:?}", other),
    }

    let mut dc = DrawCall::new(shader, mesh);
    dc.set_uniform_variable("model", 1.0f32);
    let err = video.draw(&dc).unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::UniformTypeMismatch(..)) => {}
        other => panic!("unexpected error {:?}", other),
    }

    assert!(log.draws().is_empty());

    let mut dc = DrawCall::new(shader, mesh);
    dc.set_uniform_variable("model", Matrix4::<f32>::identity());
    assert_eq!(video.draw(&dc).unwrap(), 12);
    assert_eq!(log.draws().len(), 1);
}

#[test]
fn undeclared_uniform_in_source() {
    let (mut video, _) = Video::headless(Vector2::new(64, 64));
    let params = ShaderParams {
        attributes: AttributeLayout::build()
            .with(Attribute::Position, 3)
            .finish(),
        uniforms: UniformVariableLayout::build()
            .with("model", UniformVariableType::Matrix4f)
            .with("fog", UniformVariableType::F32)
            .finish(),
    };

    assert!(video.create_shader(params, VS, FS, None).is_err());
    assert_eq!(video.alive(), 0);
}

const VS_TEXCOORDS: &str = "
#version 330 core
in vec3 Position;
in vec2 Texcoord0;
out vec2 TexCoords;
uniform mat4 model;
void main()
{
    TexCoords = Texcoord0;
    gl_Position = model * vec4(Position, 1.0);
}
";

const VS_LOCAL: &str = "
#version 330 core
in vec3 Position;
in vec2 Texcoord0;
uniform mat4 model;
void main()
{
    vec2 uv = Texcoord0;
    vec4 world = model * vec4(Position, 1.0);
    gl_Position = world;
}
";

const FS_TEXCOORDS: &str = "
#version 330 core
in vec2 TexCoords;
out vec4 FragColor;
void main() { FragColor = vec4(TexCoords, 0.0, 1.0); }
";

fn textured() -> ShaderParams {
    ShaderParams {
        attributes: AttributeLayout::build()
            .with(Attribute::Position, 3)
            .with(Attribute::Texcoord0, 2)
            .finish(),
        uniforms: UniformVariableLayout::build()
            .with("model", UniformVariableType::Matrix4f)
            .finish(),
    }
}

#[test]
fn inactive_attribute() {
    let (mut video, log) = Video::headless(Vector2::new(64, 64));

    // The varying carrying `Texcoord0` is never read by the fragment stage.
    assert!(video
        .create_shader(textured(), VS_TEXCOORDS, FS, None)
        .is_err());

    // `Texcoord0` only feeds a local that goes nowhere.
    assert!(video
        .create_shader(textured(), VS_LOCAL, FS_TEXCOORDS, None)
        .is_err());

    assert_eq!(video.alive(), 0);
    assert!(log.commands().is_empty());

    let shader = video
        .create_shader(textured(), VS_TEXCOORDS, FS_TEXCOORDS, None)
        .unwrap();
    video.delete_shader(shader).unwrap();
    assert_eq!(video.alive(), 0);
}

#[test]
fn delete_twice() {
    let (mut video, log) = Video::headless(Vector2::new(64, 64));
    let (params, data) = lagoon::render::geometry::cube();
    let mesh = video.create_mesh(params, data).unwrap();

    video.delete_mesh(mesh).unwrap();
    let err = video.delete_mesh(mesh).unwrap_err();
    match err.downcast_ref::<Error>() {
        Some(Error::MeshHandleInvalid(_)) => {}
        other => panic!("unexpected error {:?}", other),
    }

    // The slot is reused with a new version, the stale handle stays invalid.
    let (params, data) = lagoon::render::geometry::cube();
    let other = video.create_mesh(params, data).unwrap();
    assert_eq!(other.index(), mesh.index());
    assert!(video.delete_mesh(mesh).is_err());
    assert_eq!(video.alive(), 1);

    let deletes = log
        .commands()
        .into_iter()
        .filter(|v| match *v {
            Command::DeleteMesh(_) => true,
            _ => false,
        })
        .count();
    assert_eq!(deletes, 1);
}

#[test]
fn drop_releases_leftovers() {
    let (mut video, log) = Video::headless(Vector2::new(64, 64));
    shader(&mut video);
    let (params, data) = lagoon::render::geometry::cube();
    video.create_mesh(params, data).unwrap();

    drop(video);

    let commands = log.commands();
    assert!(commands.iter().any(|v| match *v {
        Command::DeleteShader(_) => true,
        _ => false,
    }));
    assert!(commands.iter().any(|v| match *v {
        Command::DeleteMesh(_) => true,
        _ => false,
    }));
}

#[test]
fn bind_resets_viewport() {
    let (mut video, log) = Video::headless(Vector2::new(64, 64));
    let color = video
        .create_render_texture(render_texture(RenderTextureFormat::RGB8, 32, 16))
        .unwrap();
    let depth = video
        .create_render_texture(render_texture(RenderTextureFormat::Depth24Stencil8, 32, 16))
        .unwrap();
    let surface = video.create_surface(SurfaceParams::new(color, depth)).unwrap();

    let last_bind = || match log.commands().last() {
        Some(&Command::Bind { surface, dimensions }) => (surface, dimensions),
        other => panic!("unexpected command {:?}", other),
    };

    video.bind(Some(surface)).unwrap();
    assert_eq!(last_bind(), (Some(surface), Vector2::new(32, 16)));

    video.bind(None).unwrap();
    assert_eq!(last_bind(), (None, Vector2::new(64, 64)));

    video.resize(Vector2::new(100, 50));
    video.bind(None).unwrap();
    assert_eq!(last_bind(), (None, Vector2::new(100, 50)));
}
