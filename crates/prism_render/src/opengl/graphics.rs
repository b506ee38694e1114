use crate::Viewport;
use prism_dependencies::{
    gl::{self, types::GLenum},
    nalgebra_glm as glm,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DepthTestFunction {
    Never,
    Always,
    LessThan,
    GreaterThan,
    LessThanOrEqualTo,
    GreaterThanOrEqualTo,
    EqualTo,
    NotEqualTo,
}

impl From<DepthTestFunction> for GLenum {
    fn from(depth_test_function: DepthTestFunction) -> Self {
        match depth_test_function {
            DepthTestFunction::Never => gl::NEVER,
            DepthTestFunction::Always => gl::ALWAYS,
            DepthTestFunction::LessThan => gl::LESS,
            DepthTestFunction::GreaterThan => gl::GREATER,
            DepthTestFunction::LessThanOrEqualTo => gl::LEQUAL,
            DepthTestFunction::GreaterThanOrEqualTo => gl::GEQUAL,
            DepthTestFunction::EqualTo => gl::EQUAL,
            DepthTestFunction::NotEqualTo => gl::NOTEQUAL,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

impl From<PolygonMode> for GLenum {
    fn from(polygon_mode: PolygonMode) -> Self {
        match polygon_mode {
            PolygonMode::Fill => gl::FILL,
            PolygonMode::Line => gl::LINE,
        }
    }
}

impl PolygonMode {
    pub fn wireframe(enabled: bool) -> Self {
        if enabled {
            Self::Line
        } else {
            Self::Fill
        }
    }
}

pub struct Graphics;

impl Graphics {
    pub fn enable_depth_testing(depth_function: DepthTestFunction) {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(depth_function.into());
        }
    }

    pub fn disable_depth_testing() {
        unsafe {
            gl::Disable(gl::DEPTH_TEST);
        }
    }

    pub fn set_polygon_mode(mode: PolygonMode) {
        unsafe {
            gl::PolygonMode(gl::FRONT_AND_BACK, mode.into());
        }
    }

    pub fn viewport(viewport: &Viewport) {
        unsafe {
            gl::Viewport(
                viewport.x as _,
                viewport.y as _,
                viewport.width as _,
                viewport.height as _,
            );
        }
    }

    pub fn clear_buffers() {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    pub fn clear_color(color: &glm::Vec3) {
        unsafe {
            gl::ClearColor(color.x, color.y, color.z, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_functions_map_to_gl_enums() {
        assert_eq!(GLenum::from(DepthTestFunction::LessThan), gl::LESS);
        assert_eq!(GLenum::from(DepthTestFunction::LessThanOrEqualTo), gl::LEQUAL);
        assert_eq!(GLenum::from(DepthTestFunction::NotEqualTo), gl::NOTEQUAL);
    }

    #[test]
    fn wireframe_toggles_line_mode() {
        assert_eq!(GLenum::from(PolygonMode::wireframe(true)), gl::LINE);
        assert_eq!(GLenum::from(PolygonMode::wireframe(false)), gl::FILL);
    }
}
