use prism_dependencies::gl::{
    self,
    types::{GLenum, GLint, GLuint, GLvoid},
};
use prism_world::{check_pixel_data, Filter, Format, Sampler, TextureError, WrappingMode};

pub struct Texture {
    id: GLuint,
}

impl Default for Texture {
    fn default() -> Self {
        Self::new()
    }
}

impl Texture {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenTextures(1, &mut id);
        }
        Self { id }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Makes `unit` the active texture unit and binds this texture to it.
    pub fn bind(&self, unit: u32) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, self.id);
        }
    }

    /// Uploads `pixels` as mip level zero and regenerates the mip chain.
    /// The buffer length is checked first, since GL reads `width * height`
    /// texels from it regardless.
    pub fn load_data(
        &mut self,
        width: u32,
        height: u32,
        pixels: &[u8],
        format: Format,
    ) -> Result<(), TextureError> {
        check_pixel_data(pixels, width, height, format)?;
        let (internal_format, pixel_format) = gl_formats(format);
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.id);
            // Rows of RGB images are not padded to four bytes
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                internal_format as GLint,
                width as _,
                height as _,
                0,
                pixel_format,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const GLvoid,
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }
        Ok(())
    }

    pub fn apply_sampler(&self, sampler: &Sampler) {
        let parameters = [
            (gl::TEXTURE_WRAP_S, wrapping_mode(sampler.wrap_s)),
            (gl::TEXTURE_WRAP_T, wrapping_mode(sampler.wrap_t)),
            (gl::TEXTURE_MIN_FILTER, min_filter(sampler.min_filter)),
            (gl::TEXTURE_MAG_FILTER, mag_filter(sampler.mag_filter)),
        ];
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.id);
            for (parameter, value) in parameters {
                gl::TexParameteri(gl::TEXTURE_2D, parameter, value as GLint);
            }
        }
    }
}

impl TryFrom<&prism_world::Texture> for Texture {
    type Error = TextureError;

    fn try_from(world_texture: &prism_world::Texture) -> Result<Self, Self::Error> {
        world_texture.validate()?;
        let mut texture = Texture::new();
        texture.load_data(
            world_texture.width,
            world_texture.height,
            &world_texture.pixels,
            world_texture.format,
        )?;
        texture.apply_sampler(&world_texture.sampler);
        Ok(texture)
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

fn gl_formats(format: Format) -> (GLenum, GLenum) {
    match format {
        Format::R8G8B8 => (gl::RGB8, gl::RGB),
        Format::R8G8B8A8 => (gl::RGBA8, gl::RGBA),
    }
}

fn wrapping_mode(mode: WrappingMode) -> GLenum {
    match mode {
        WrappingMode::ClampToEdge => gl::CLAMP_TO_EDGE,
        WrappingMode::MirroredRepeat => gl::MIRRORED_REPEAT,
        WrappingMode::Repeat => gl::REPEAT,
    }
}

fn min_filter(filter: Filter) -> GLenum {
    match filter {
        Filter::Nearest => gl::NEAREST,
        Filter::Linear => gl::LINEAR,
        Filter::NearestMipmapNearest => gl::NEAREST_MIPMAP_NEAREST,
        Filter::LinearMipmapNearest => gl::LINEAR_MIPMAP_NEAREST,
        Filter::NearestMipmapLinear => gl::NEAREST_MIPMAP_LINEAR,
        Filter::LinearMipmapLinear => gl::LINEAR_MIPMAP_LINEAR,
    }
}

/// Magnification never reads mip levels, so only the texel filter is kept.
fn mag_filter(filter: Filter) -> GLenum {
    match filter {
        Filter::Nearest | Filter::NearestMipmapNearest | Filter::NearestMipmapLinear => {
            gl::NEAREST
        }
        Filter::Linear | Filter::LinearMipmapNearest | Filter::LinearMipmapLinear => gl::LINEAR,
    }
}
