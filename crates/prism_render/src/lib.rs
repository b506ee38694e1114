mod opengl;
mod viewport;

pub use self::{opengl::*, viewport::*};
