mod camera;
mod color;
mod geometry;
mod texture;
mod transform;

pub use self::{camera::*, color::*, geometry::*, texture::*, transform::*};
