//! Clear colors.

use cgmath::BaseFloat;

/// A RGBA color with components in `[0, 1]`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color<S> {
    pub r: S,
    pub g: S,
    pub b: S,
    pub a: S,
}

impl<S: BaseFloat> Color<S> {
    pub fn new(r: S, g: S, b: S, a: S) -> Self {
        Color { r, g, b, a }
    }
}

impl<S: BaseFloat> From<[S; 4]> for Color<S> {
    fn from(v: [S; 4]) -> Self {
        Color::new(v[0], v[1], v[2], v[3])
    }
}
