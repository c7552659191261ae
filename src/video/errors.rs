use crate::video::assets::prelude::*;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} is invalid.", _0)]
    SurfaceHandleInvalid(SurfaceHandle),
    #[fail(display = "{} is invalid.", _0)]
    TextureHandleInvalid(TextureHandle),
    #[fail(display = "{} is invalid.", _0)]
    RenderTextureHandleInvalid(RenderTextureHandle),
    #[fail(display = "{} is invalid.", _0)]
    ShaderHandleInvalid(ShaderHandle),
    #[fail(display = "{} is invalid.", _0)]
    MeshHandleInvalid(MeshHandle),
    #[fail(display = "Shader is invalid: {}", _0)]
    ShaderInvalid(String),
    #[fail(display = "Uniform {} is undefined.", _0)]
    UniformUndefined(String),
    #[fail(display = "The uniform {} needs a {:?} instead of {:?}.", _0, _1, _2)]
    UniformTypeMismatch(String, UniformVariableType, UniformVariableType),
    #[fail(display = "Incompatible({}) attachments of surface.", _0)]
    SurfaceIncompatible(&'static str),
    #[fail(display = "[GL] Surface is incomplete. {}", _0)]
    SurfaceIncomplete(&'static str),
    #[fail(display = "Out of bounds.")]
    OutOfBounds,
}

pub type Result<T> = ::std::result::Result<T, Error>;

pub const INCOMPLETE_ATTACHMENT: &str = "Not all framebuffer attachment points are framebuffer \
     attachment complete. At least one attachment point has its attached object no longer in \
     existence, or has an attached image with a width or height of zero, or has an image of the \
     wrong kind attached.";

pub const INCOMPLETE_MISSING_ATTACHMENT: &str = "No images are attached to the framebuffer.";

pub const UNSUPPORTED: &str = "The combination of internal formats of the attached images \
     violates an implementation-dependent set of restrictions.";

pub const INCOMPLETE_UNKNOWN: &str = "The framebuffer status is not complete.";
