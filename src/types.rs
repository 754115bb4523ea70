//! Value types shared between geometry generation and the renderer.

use bytemuck::{Pod, Zeroable};

use crate::error::RenderError;

/// A two-component vertex, ready for the GPU.
///
/// Used for both pixel-space positions and unit-square texture coordinates;
/// both attributes read tightly packed pairs of 32-bit floats.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// The two components, meaning depends on the attribute.
    pub position: [f32; 2],
}

impl Vertex {
    /// Construct from two components.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }
}

/// A fully decoded image: tightly packed RGBA8 pixels plus dimensions.
///
/// Decoding happens entirely before rendering is triggered; the renderer
/// never suspends waiting for pixel data.
#[derive(Debug)]
pub struct ImageData {
    /// RGBA bytes, row-major, `width * height * 4` long.
    pub pixels: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageData {
    /// Decode an encoded image (png or jpeg) into RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// [`RenderError::ImageDecode`] if the bytes cannot be decoded.
    pub fn decode(bytes: &[u8]) -> Result<Self, RenderError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        tracing::debug!(width, height, "image decoded");
        Ok(Self {
            pixels: img.into_raw(),
            width,
            height,
        })
    }

    /// Wrap already-decoded RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// [`RenderError::InvalidImageData`] if `pixels.len()` is not exactly
    /// `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::InvalidImageData {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rgba_accepts_matching_length() {
        let img = ImageData::from_rgba(4, 3, vec![0; 4 * 3 * 4]).expect("valid pixel data");
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 3);
        assert_eq!(img.pixels.len(), 48);
    }

    #[test]
    fn from_rgba_rejects_short_buffer() {
        let err = ImageData::from_rgba(4, 3, vec![0; 10]).expect_err("length mismatch");
        assert!(matches!(
            err,
            RenderError::InvalidImageData {
                width: 4,
                height: 3,
                len: 10
            }
        ));
    }

    #[test]
    fn image_data_is_debug_printable() {
        let img = ImageData::from_rgba(1, 1, vec![0; 4]).expect("valid pixel data");
        let repr = format!("{img:?}");
        assert!(repr.contains("width: 1"));
        assert!(repr.contains("height: 1"));
    }

    #[test]
    fn decode_rejects_garbage_bytes() {
        let err = ImageData::decode(&[0xde, 0xad, 0xbe, 0xef]).expect_err("not an image");
        assert!(matches!(err, RenderError::ImageDecode(_)));
    }
}
