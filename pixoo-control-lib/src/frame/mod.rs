//! Conversion of arbitrary images into device-sized animation frames.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;
use std::time::Duration;

use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, DynamicImage, GenericImageView, ImageError};

use crate::error::{Error, Result};

mod buffer;

pub use buffer::{rgb24_bytes, FrameBuffer, FrameSize};

/// Most frames one animation upload may carry.
pub const MAX_ANIMATION_FRAMES: usize = 60;

/// Top-left corner and side of the centred square inside `width` x `height`.
pub fn center_square(width: u32, height: u32) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

/// Crops the centred square of side `min(width, height)`.
pub fn crop_center_square(image: &DynamicImage) -> DynamicImage {
    let (width, height) = image.dimensions();
    let (x, y, side) = center_square(width, height);
    image.crop_imm(x, y, side, side)
}

/// Crops `image` to its centred square and resamples it to `size`.
pub fn fit_to_frame(image: &DynamicImage, size: FrameSize) -> DynamicImage {
    let (width, height) = image.dimensions();
    crop_and_resample(image, center_square(width, height), size)
}

fn crop_and_resample(
    image: &DynamicImage,
    (x, y, side): (u32, u32, u32),
    size: FrameSize,
) -> DynamicImage {
    let square = image.crop_imm(x, y, side, side);
    if side == size.side() {
        square
    } else {
        square.resize_exact(size.side(), size.side(), FilterType::Lanczos3)
    }
}

/// A decoded GIF: composited frames and how long each stays on screen.
#[derive(Debug, Clone)]
pub struct GifAnimation {
    frames: Vec<DynamicImage>,
    delays: Vec<Duration>,
}

impl GifAnimation {
    pub fn decode<R: BufRead + Seek>(reader: R) -> Result<Self> {
        let decoder = GifDecoder::new(reader)?;
        let frames = decoder.into_frames().collect_frames()?;
        let (frames, delays) = frames
            .into_iter()
            .map(|frame| {
                // GIF delays are stored in hundredths of a second; the
                // decoder already reports them as a millisecond ratio.
                let delay = Duration::from(frame.delay());
                (DynamicImage::ImageRgba8(frame.into_buffer()), delay)
            })
            .unzip();
        Ok(GifAnimation { frames, delays })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path).map_err(ImageError::IoError)?;
        GifAnimation::decode(BufReader::new(file))
    }

    pub fn from_frames(frames: Vec<(DynamicImage, Duration)>) -> Self {
        let (frames, delays) = frames.into_iter().unzip();
        GifAnimation { frames, delays }
    }

    pub fn frames(&self) -> &[DynamicImage] {
        &self.frames
    }

    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Crops every frame with the square derived from the first frame and
    /// resamples it to the largest frame size that fits.
    pub fn to_device_frames(&self) -> Result<(FrameSize, Vec<DynamicImage>)> {
        let first = self
            .frames
            .first()
            .ok_or_else(|| Error::validation("animation", "the GIF has no frames"))?;
        let square = center_square(first.width(), first.height());
        let size = FrameSize::largest_fitting(square.2);
        let frames = self
            .frames
            .iter()
            .map(|frame| crop_and_resample(frame, square, size))
            .collect();
        Ok((size, frames))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame, Rgba, RgbaImage};
    use std::io::Cursor;

    /// 100x80 with red 10px bands left and right of a green centre.
    fn banded_frame() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(100, 80, |x, _| {
            if (10..90).contains(&x) {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([255, 0, 0, 255])
            }
        }))
    }

    #[test]
    fn test_center_square() {
        assert_eq!(center_square(100, 80), (10, 0, 80));
        assert_eq!(center_square(80, 100), (0, 10, 80));
        assert_eq!(center_square(64, 64), (0, 0, 64));
    }

    #[test]
    fn test_crop_keeps_the_centre() {
        let cropped = crop_center_square(&banded_frame());
        assert_eq!(cropped.dimensions(), (80, 80));
        let rgba = cropped.to_rgba8();
        assert!(rgba.pixels().all(|p| *p == Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn test_fit_to_frame() {
        assert_eq!(
            fit_to_frame(&banded_frame(), FrameSize::Px64).dimensions(),
            (64, 64)
        );
        assert_eq!(
            fit_to_frame(&DynamicImage::new_rgb8(32, 40), FrameSize::Px32).dimensions(),
            (32, 32)
        );
    }

    #[test]
    fn test_gif_100x80_becomes_64x64() {
        let gif = GifAnimation::from_frames(vec![
            (banded_frame(), Duration::from_millis(100)),
            (banded_frame(), Duration::from_millis(200)),
        ]);
        let (size, frames) = gif.to_device_frames().unwrap();
        assert_eq!(size, FrameSize::Px64);
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.dimensions() == (64, 64)));
    }

    #[test]
    fn test_small_gif_is_upscaled_to_16() {
        let gif = GifAnimation::from_frames(vec![(
            DynamicImage::new_rgba8(12, 12),
            Duration::from_millis(50),
        )]);
        let (size, frames) = gif.to_device_frames().unwrap();
        assert_eq!(size, FrameSize::Px16);
        assert_eq!(frames[0].dimensions(), (16, 16));
    }

    #[test]
    fn test_empty_gif() {
        let gif = GifAnimation::from_frames(Vec::new());
        assert!(gif.to_device_frames().unwrap_err().is_validation());
    }

    #[test]
    fn test_decode_reads_frames_and_delays() {
        let mut encoded = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut encoded);
            for delay_ms in [100, 250] {
                let buffer = RgbaImage::from_pixel(20, 10, Rgba([0, 0, 255, 255]));
                let frame =
                    Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(delay_ms, 1));
                encoder.encode_frame(frame).unwrap();
            }
        }

        let gif = GifAnimation::decode(Cursor::new(encoded)).unwrap();
        assert_eq!(gif.len(), 2);
        assert_eq!(gif.frames()[0].dimensions(), (20, 10));
        assert_eq!(
            gif.delays(),
            &[Duration::from_millis(100), Duration::from_millis(250)]
        );
    }
}
