use prism_dependencies::image::{io::Reader as ImageReader, DynamicImage, GenericImageView};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load image from file at path: {1}")]
    LoadImageFromFile(#[source] std::io::Error, String),

    #[error("Failed to decode image at path: {1}")]
    DecodeImage(#[source] prism_dependencies::image::ImageError, String),

    #[error("A {width}x{height} {format:?} texture needs {expected} bytes of pixel data, found {actual}")]
    PixelDataLength {
        width: u32,
        height: u32,
        format: Format,
        expected: usize,
        actual: usize,
    },
}

type Result<T, E = TextureError> = std::result::Result<T, E>;

/// Decoded pixels waiting to be uploaded to the GPU.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub pixels: Vec<u8>,
    pub format: Format,
    pub width: u32,
    pub height: u32,
    pub sampler: Sampler,
}

impl Texture {
    pub fn new(pixels: Vec<u8>, format: Format, width: u32, height: u32) -> Self {
        Self {
            pixels,
            format,
            width,
            height,
            sampler: Sampler::default(),
        }
    }

    /// Image files store their first row at the top while OpenGL samples
    /// row zero at the bottom, so most images want `flip_vertically`.
    pub fn from_file(path: impl AsRef<Path>, flip_vertically: bool) -> Result<Self> {
        let path = path.as_ref();
        let image = ImageReader::open(path)
            .map_err(|error| TextureError::LoadImageFromFile(error, path.display().to_string()))?
            .decode()
            .map_err(|error| TextureError::DecodeImage(error, path.display().to_string()))?;
        Ok(Self::from_image(image, flip_vertically))
    }

    pub fn from_image(image: DynamicImage, flip_vertically: bool) -> Self {
        let image = if flip_vertically { image.flipv() } else { image };
        let (width, height) = image.dimensions();
        if image.color().has_alpha() {
            Self::new(image.into_rgba8().into_raw(), Format::R8G8B8A8, width, height)
        } else {
            Self::new(image.into_rgb8().into_raw(), Format::R8G8B8, width, height)
        }
    }

    /// A 2x2 magenta and black checker, used when an image can't be loaded.
    pub fn placeholder() -> Self {
        #[rustfmt::skip]
        let pixels = vec![
            255, 0, 255, 255,   0, 0, 0, 255,
            0, 0, 0, 255,       255, 0, 255, 255,
        ];
        let mut texture = Self::new(pixels, Format::R8G8B8A8, 2, 2);
        texture.sampler.min_filter = Filter::Nearest;
        texture.sampler.mag_filter = Filter::Nearest;
        texture
    }

    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.format.bytes_per_pixel() * self.width
    }

    /// Fails when the pixel buffer does not cover every row of the image.
    pub fn validate(&self) -> Result<()> {
        check_pixel_data(&self.pixels, self.width, self.height, self.format)
    }
}

/// Checks that `pixels` holds exactly one `format` texel for each of the
/// `width` by `height` pixels.
pub fn check_pixel_data(pixels: &[u8], width: u32, height: u32, format: Format) -> Result<()> {
    let expected = width as usize * height as usize * format.bytes_per_pixel() as usize;
    if pixels.len() != expected {
        return Err(TextureError::PixelDataLength {
            width,
            height,
            format,
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    R8G8B8,
    R8G8B8A8,
}

impl Format {
    pub fn bytes_per_pixel(&self) -> u32 {
        match self {
            Format::R8G8B8 => 3,
            Format::R8G8B8A8 => 4,
        }
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sampler {
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap_s: WrappingMode,
    pub wrap_t: WrappingMode,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrappingMode {
    ClampToEdge,
    MirroredRepeat,
    #[default]
    Repeat,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Filter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    #[default]
    LinearMipmapLinear,
}

impl Filter {
    pub fn uses_mipmaps(&self) -> bool {
        !matches!(self, Filter::Nearest | Filter::Linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_dependencies::image::{Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn rgb_images_stay_three_channel() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 2, Rgb([1, 2, 3])));
        let texture = Texture::from_image(image, false);
        assert_eq!(texture.format, Format::R8G8B8);
        assert_eq!((texture.width, texture.height), (3, 2));
        assert_eq!(texture.pixels.len(), 3 * 2 * 3);
        assert_eq!(texture.bytes_per_row(), 9);
    }

    #[test]
    fn alpha_images_become_rgba() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 6])));
        let texture = Texture::from_image(image, false);
        assert_eq!(texture.format, Format::R8G8B8A8);
        assert_eq!(&texture.pixels[..4], &[9, 8, 7, 6]);
    }

    #[test]
    fn flipping_reverses_rows() {
        let mut image = RgbImage::new(1, 2);
        image.put_pixel(0, 0, Rgb([255, 0, 0]));
        image.put_pixel(0, 1, Rgb([0, 0, 255]));

        let upright = Texture::from_image(DynamicImage::ImageRgb8(image.clone()), false);
        let flipped = Texture::from_image(DynamicImage::ImageRgb8(image), true);
        assert_eq!(&upright.pixels[..3], &[255, 0, 0]);
        assert_eq!(&flipped.pixels[..3], &[0, 0, 255]);
    }

    #[test]
    fn placeholder_is_a_checker() {
        let texture = Texture::placeholder();
        assert_eq!(texture.pixels.len() as u32, texture.bytes_per_row() * texture.height);
        assert_eq!(texture.pixels[0..4], texture.pixels[12..16]);
        assert_ne!(texture.pixels[0..4], texture.pixels[4..8]);
        assert!(!texture.sampler.min_filter.uses_mipmaps());
    }

    #[test]
    fn short_pixel_buffer_is_rejected() {
        let texture = Texture::new(vec![0; 11], Format::R8G8B8A8, 2, 2);
        match texture.validate() {
            Err(TextureError::PixelDataLength {
                expected, actual, ..
            }) => assert_eq!((expected, actual), (16, 11)),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(check_pixel_data(&[0; 12], 2, 2, Format::R8G8B8).is_ok());
        assert!(check_pixel_data(&[0; 13], 2, 2, Format::R8G8B8).is_err());
        assert!(Texture::placeholder().validate().is_ok());
    }

    #[test]
    fn missing_file_reports_path() {
        match Texture::from_file("no/such/texture.png", true) {
            Err(TextureError::LoadImageFromFile(_, path)) => {
                assert_eq!(path, "no/such/texture.png")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
