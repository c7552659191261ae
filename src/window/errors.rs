#[derive(Debug, Clone, Fail)]
pub enum Error {
    #[fail(display = "Failed to create the window and its OpenGL context: {}.", _0)]
    CreationFailed(String),
    #[fail(display = "The OpenGL context is lost: {}.", _0)]
    ContextLost(String),
    #[fail(display = "Failed to grab the cursor: {}.", _0)]
    CursorGrabFailed(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;
