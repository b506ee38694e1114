use prism_dependencies::{
    gl::{self, types::GLenum},
    log,
};
use std::fmt;

/// Upper bound on errors drained per check. A lost context can keep
/// reporting errors forever.
const MAX_ERRORS_PER_CHECK: usize = 64;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlError(pub GLenum);

impl GlError {
    pub fn name(&self) -> &'static str {
        match self.0 {
            gl::INVALID_ENUM => "INVALID_ENUM",
            gl::INVALID_VALUE => "INVALID_VALUE",
            gl::INVALID_OPERATION => "INVALID_OPERATION",
            gl::STACK_OVERFLOW => "STACK_OVERFLOW",
            gl::STACK_UNDERFLOW => "STACK_UNDERFLOW",
            gl::OUT_OF_MEMORY => "OUT_OF_MEMORY",
            gl::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
            _ => "UNKNOWN",
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.name(), self.0)
    }
}

/// Drains the GL error queue, logging each entry. Errors are only reported,
/// never acted upon.
pub fn check_errors(label: &str) -> Vec<GlError> {
    let errors = drain_errors(|| unsafe { gl::GetError() });
    for error in errors.iter() {
        log::error!("[OpenGL error] {} after {}", error, label);
    }
    errors
}

fn drain_errors(mut next_error: impl FnMut() -> GLenum) -> Vec<GlError> {
    std::iter::from_fn(|| match next_error() {
        gl::NO_ERROR => None,
        code => Some(GlError(code)),
    })
    .take(MAX_ERRORS_PER_CHECK)
    .collect()
}
