use prism_dependencies::{
    gl::{
        self,
        types::{GLchar, GLenum, GLint, GLuint},
    },
    log,
};
use std::{
    ffi::{CString, NulError},
    fmt, ptr,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShaderError {
    #[error("Failed to create a {0} shader object!")]
    CreateShader(ShaderKind),

    #[error("Shader source contains an interior nul byte!")]
    InvalidSource(#[source] NulError),

    #[error("Failed to compile {kind} shader:\n{log}")]
    CompileShader { kind: ShaderKind, log: String },

    #[error("Failed to link shader program:\n{0}")]
    LinkProgram(String),
}

type Result<T, E = ShaderError> = std::result::Result<T, E>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl From<ShaderKind> for GLenum {
    fn from(kind: ShaderKind) -> Self {
        match kind {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => write!(f, "vertex"),
            ShaderKind::Fragment => write!(f, "fragment"),
        }
    }
}

/// A single compiled stage.
pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
}

impl Shader {
    pub fn compile(kind: ShaderKind, source: &str) -> Result<Self> {
        let source = CString::new(source).map_err(ShaderError::InvalidSource)?;

        let id = unsafe { gl::CreateShader(kind.into()) };
        if id == 0 {
            return Err(ShaderError::CreateShader(kind));
        }
        let shader = Self { id, kind };

        unsafe {
            gl::ShaderSource(shader.id, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader.id);
        }

        if !shader.compiled() {
            let info_log = shader.info_log();
            log::error!("Failed to compile {} shader:\n{}", kind, info_log);
            return Err(ShaderError::CompileShader {
                kind,
                log: info_log,
            });
        }

        Ok(shader)
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    fn compiled(&self) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetShaderiv(self.id, gl::COMPILE_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn info_log(&self) -> String {
        let mut length = 0;
        unsafe {
            gl::GetShaderiv(self.id, gl::INFO_LOG_LENGTH, &mut length);
        }
        read_info_log(length, |capacity, written, buffer| unsafe {
            gl::GetShaderInfoLog(self.id, capacity, written, buffer)
        })
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

pub struct ShaderProgram {
    id: GLuint,
    shaders: Vec<Shader>,
}

impl Default for ShaderProgram {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderProgram {
    pub fn new() -> Self {
        Self {
            id: unsafe { gl::CreateProgram() },
            shaders: Vec::new(),
        }
    }

    pub fn vertex_shader_source(&mut self, source: &str) -> Result<&mut Self> {
        let shader = Shader::compile(ShaderKind::Vertex, source)?;
        Ok(self.attach(shader))
    }

    pub fn fragment_shader_source(&mut self, source: &str) -> Result<&mut Self> {
        let shader = Shader::compile(ShaderKind::Fragment, source)?;
        Ok(self.attach(shader))
    }

    pub fn attach(&mut self, shader: Shader) -> &mut Self {
        unsafe {
            gl::AttachShader(self.id, shader.id());
        }
        self.shaders.push(shader);
        self
    }

    /// Links the attached stages. The stages are released afterwards
    /// whether or not linking succeeded.
    pub fn link(&mut self) -> Result<()> {
        unsafe {
            gl::LinkProgram(self.id);
        }

        let linked = self.linked();

        for shader in self.shaders.drain(..) {
            unsafe {
                gl::DetachShader(self.id, shader.id());
            }
        }

        if !linked {
            let info_log = self.info_log();
            log::error!("Failed to link shader program:\n{}", info_log);
            return Err(ShaderError::LinkProgram(info_log));
        }

        Ok(())
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn use_program(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    // The setters below write to the program that is currently in use.

    pub fn set_uniform_int(&self, name: &str, value: i32) {
        if let Some(location) = self.uniform_location(name) {
            unsafe {
                gl::Uniform1i(location, value);
            }
        }
    }

    pub fn set_uniform_float(&self, name: &str, value: f32) {
        if let Some(location) = self.uniform_location(name) {
            unsafe {
                gl::Uniform1f(location, value);
            }
        }
    }

    pub fn set_uniform_vec4(&self, name: &str, data: &[f32]) {
        if let Some(location) = self.uniform_location(name) {
            unsafe {
                gl::Uniform4fv(location, 1, data.as_ptr());
            }
        }
    }

    pub fn set_uniform_matrix4x4(&self, name: &str, data: &[f32]) {
        if let Some(location) = self.uniform_location(name) {
            unsafe {
                gl::UniformMatrix4fv(location, 1, gl::FALSE, data.as_ptr());
            }
        }
    }

    /// Unknown names resolve to -1, which GL ignores on upload.
    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        match CString::new(name) {
            Ok(name) => Some(unsafe { gl::GetUniformLocation(self.id, name.as_ptr()) }),
            Err(error) => {
                log::warn!("Invalid uniform name {:?}: {}", name, error);
                None
            }
        }
    }

    fn linked(&self) -> bool {
        let mut status = gl::FALSE as GLint;
        unsafe {
            gl::GetProgramiv(self.id, gl::LINK_STATUS, &mut status);
        }
        status == gl::TRUE as GLint
    }

    fn info_log(&self) -> String {
        let mut length = 0;
        unsafe {
            gl::GetProgramiv(self.id, gl::INFO_LOG_LENGTH, &mut length);
        }
        read_info_log(length, |capacity, written, buffer| unsafe {
            gl::GetProgramInfoLog(self.id, capacity, written, buffer)
        })
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.shaders.clear();
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn read_info_log(length: GLint, read: impl FnOnce(GLint, *mut GLint, *mut GLchar)) -> String {
    if length <= 0 {
        return String::new();
    }
    let mut buffer = vec![0_u8; length as usize];
    let mut written: GLint = 0;
    read(
        length,
        &mut written as *mut GLint,
        buffer.as_mut_ptr() as *mut GLchar,
    );
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}
