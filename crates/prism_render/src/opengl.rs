mod buffer;
mod error;
mod graphics;
mod shader;
mod texture;

pub use self::{buffer::*, error::*, graphics::*, shader::*, texture::*};
use prism_dependencies::{gl, glutin::{ContextWrapper, PossiblyCurrent}};

/// Resolves GL function pointers through the current context.
/// Must run once before any other call in this module.
pub fn load_gl_functions<T>(context: &ContextWrapper<PossiblyCurrent, T>) {
    gl::load_with(|symbol| context.get_proc_address(symbol) as *const _);
}
