use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::{BufMut, Bytes, BytesMut};
use image::{DynamicImage, GenericImageView};

use crate::error::{Error, Result};

/// Side lengths the device accepts for animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameSize {
    Px16,
    Px32,
    Px64,
}

impl FrameSize {
    pub const ALL: [FrameSize; 3] = [FrameSize::Px16, FrameSize::Px32, FrameSize::Px64];

    pub fn side(self) -> u32 {
        match self {
            FrameSize::Px16 => 16,
            FrameSize::Px32 => 32,
            FrameSize::Px64 => 64,
        }
    }

    /// Bytes in one RGB24 frame of this size.
    pub fn byte_len(self) -> usize {
        let side = self.side() as usize;
        side * side * 3
    }

    pub fn for_side(side: u32) -> Result<Self> {
        FrameSize::ALL
            .into_iter()
            .find(|size| size.side() == side)
            .ok_or_else(|| {
                Error::validation("frame size", format!("{} is not one of 16, 32 or 64", side))
            })
    }

    /// The largest frame size that does not exceed `side`, falling back to
    /// the smallest one for tiny sources.
    pub fn largest_fitting(side: u32) -> Self {
        FrameSize::ALL
            .into_iter()
            .rev()
            .find(|size| size.side() <= side)
            .unwrap_or(FrameSize::Px16)
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.side(), self.side())
    }
}

/// Serialises `image` as row-major RGB24.
///
/// Channels are read at 16 bits and shifted down by 8; alpha is dropped.
pub fn rgb24_bytes(image: &DynamicImage) -> Bytes {
    let pixels = image.to_rgba16();
    let mut buffer =
        BytesMut::with_capacity(pixels.width() as usize * pixels.height() as usize * 3);
    for pixel in pixels.pixels() {
        let [red, green, blue, _] = pixel.0;
        buffer.put_u8((red >> 8) as u8);
        buffer.put_u8((green >> 8) as u8);
        buffer.put_u8((blue >> 8) as u8);
    }
    buffer.freeze()
}

/// One square RGB24 frame at device resolution.
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    size: FrameSize,
    data: Bytes,
}

impl FrameBuffer {
    /// Serialises an image that is already square and of an accepted size.
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width != height {
            return Err(Error::validation(
                "frame size",
                format!("{}x{} is not square", width, height),
            ));
        }
        let size = FrameSize::for_side(width)?;
        Ok(FrameBuffer {
            size,
            data: rgb24_bytes(image),
        })
    }

    /// Wraps pre-serialised RGB24 bytes.
    pub fn from_rgb24(size: FrameSize, data: impl Into<Bytes>) -> Result<Self> {
        let data = data.into();
        if data.len() != size.byte_len() {
            return Err(Error::validation(
                "frame data",
                format!(
                    "{} bytes given, a {} frame needs {}",
                    data.len(),
                    size,
                    size.byte_len()
                ),
            ));
        }
        Ok(FrameBuffer { size, data })
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("size", &self.size)
            .field("bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba, RgbaImage};

    #[test]
    fn test_rgb24_two_pixels() {
        let image = ImageBuffer::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([255u8, 0, 0])
            } else {
                Rgb([0, 255, 0])
            }
        });
        let bytes = rgb24_bytes(&DynamicImage::ImageRgb8(image));
        assert_eq!(bytes.as_ref(), &[0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00]);
    }

    #[test]
    fn test_rgb24_drops_alpha_and_is_row_major() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(1, 0, Rgba([1, 2, 3, 0]));
        image.put_pixel(0, 1, Rgba([4, 5, 6, 128]));
        let bytes = rgb24_bytes(&DynamicImage::ImageRgba8(image));
        assert_eq!(bytes.as_ref(), &[0, 0, 0, 1, 2, 3, 4, 5, 6, 0, 0, 0]);
    }

    #[test]
    fn test_rgb24_sixteen_bit_source_is_shifted() {
        let image = ImageBuffer::from_pixel(1, 1, Rgb([0xABCDu16, 0x00FF, 0xFFFF]));
        let bytes = rgb24_bytes(&DynamicImage::ImageRgb16(image));
        assert_eq!(bytes.as_ref(), &[0xAB, 0x00, 0xFF]);
    }

    #[test]
    fn test_frame_size_for_side() {
        assert_eq!(FrameSize::for_side(16).unwrap(), FrameSize::Px16);
        assert_eq!(FrameSize::for_side(64).unwrap(), FrameSize::Px64);
        assert!(FrameSize::for_side(48).unwrap_err().is_validation());
        assert!(FrameSize::for_side(0).is_err());
    }

    #[test]
    fn test_largest_fitting() {
        assert_eq!(FrameSize::largest_fitting(80), FrameSize::Px64);
        assert_eq!(FrameSize::largest_fitting(64), FrameSize::Px64);
        assert_eq!(FrameSize::largest_fitting(63), FrameSize::Px32);
        assert_eq!(FrameSize::largest_fitting(32), FrameSize::Px32);
        assert_eq!(FrameSize::largest_fitting(20), FrameSize::Px16);
        assert_eq!(FrameSize::largest_fitting(8), FrameSize::Px16);
    }

    #[test]
    fn test_frame_buffer_from_image() {
        let square = DynamicImage::new_rgb8(32, 32);
        let frame = FrameBuffer::from_image(&square).unwrap();
        assert_eq!(frame.size(), FrameSize::Px32);
        assert_eq!(frame.data().len(), 32 * 32 * 3);

        assert!(FrameBuffer::from_image(&DynamicImage::new_rgb8(64, 32))
            .unwrap_err()
            .is_validation());
        assert!(FrameBuffer::from_image(&DynamicImage::new_rgb8(48, 48))
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_from_rgb24_checks_length() {
        assert!(FrameBuffer::from_rgb24(FrameSize::Px16, vec![0u8; 16 * 16 * 3]).is_ok());
        assert!(FrameBuffer::from_rgb24(FrameSize::Px16, vec![0u8; 10]).is_err());
    }

    #[test]
    fn test_base64() {
        let frame = FrameBuffer::from_rgb24(FrameSize::Px16, vec![0u8; 16 * 16 * 3]).unwrap();
        assert_eq!(frame.to_base64().len(), (16 * 16 * 3) / 3 * 4);
        assert!(frame.to_base64().starts_with("AAAA"));
    }
}
