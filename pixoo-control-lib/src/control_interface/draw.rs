use std::time::Duration;

use clap::ValueEnum;
use image::{DynamicImage, GenericImageView};
use log::debug;
use palette::Srgb;
use serde::Deserialize;

use crate::control_interface::{Command, ControlInterface};
use crate::error::{ensure_range, Error, Result};
use crate::frame::{FrameBuffer, FrameSize, GifAnimation, MAX_ANIMATION_FRAMES};
use crate::util::transport::Transport;

/// Where the device should look for a GIF to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GifSource {
    /// A single file on the device's storage card.
    File,
    /// Every file in a folder on the storage card.
    Folder,
    /// A URL the device downloads itself.
    Net,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TextDirection {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TextAlign {
    #[default]
    Left,
    Middle,
    Right,
}

/// Scrolling text drawn on top of the current animation.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    /// Slot of this text area, 0..20. Sending the same id again replaces it.
    pub id: u8,
    pub x: i32,
    pub y: i32,
    pub direction: TextDirection,
    /// Font id, see [`crate::util::discovery::Discovery::font_list`].
    pub font: u32,
    /// Width of the text area in pixels, 16..=64.
    pub width: u8,
    pub text: String,
    /// Scroll step time in milliseconds.
    pub speed: u32,
    pub color: Srgb<u8>,
    pub align: TextAlign,
}

impl TextOverlay {
    pub fn new(id: u8, text: &str) -> Self {
        TextOverlay {
            id,
            x: 0,
            y: 0,
            direction: TextDirection::Left,
            font: 0,
            width: 64,
            text: text.to_string(),
            speed: 10,
            color: Srgb::new(255, 255, 255),
            align: TextAlign::Left,
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_range("text id", self.id, 0..=19)?;
        ensure_range("text width", self.width, 16..=64)?;
        if self.text.len() >= 512 {
            return Err(Error::validation(
                "text",
                format!("{} bytes, the device takes fewer than 512", self.text.len()),
            ));
        }
        Ok(())
    }

    fn hex_color(&self) -> String {
        format!(
            "#{:02X}{:02X}{:02X}",
            self.color.red, self.color.green, self.color.blue
        )
    }
}

#[derive(Deserialize)]
struct PicIdResponse {
    #[serde(rename = "PicId")]
    pic_id: u32,
}

impl<T: Transport> ControlInterface<T> {
    pub fn send_text(&self, overlay: &TextOverlay) -> Result<()> {
        overlay.validate()?;
        self.execute_status(&Command::SendText {
            text_id: overlay.id,
            x: overlay.x,
            y: overlay.y,
            dir: match overlay.direction {
                TextDirection::Left => 0,
                TextDirection::Right => 1,
            },
            font: overlay.font,
            text_width: overlay.width,
            speed: overlay.speed,
            text: overlay.text.clone(),
            color: overlay.hex_color(),
            align: match overlay.align {
                TextAlign::Left => 1,
                TextAlign::Middle => 2,
                TextAlign::Right => 3,
            },
        })
    }

    /// Removes every text area.
    pub fn clear_text(&self) -> Result<()> {
        self.execute_status(&Command::ClearText)
    }

    /// Plays a GIF the device fetches itself, from its storage card or a URL.
    pub fn play_stored_gif(&self, source: GifSource, name: &str) -> Result<()> {
        let file_type = match source {
            GifSource::File => 0,
            GifSource::Folder => 1,
            GifSource::Net => 2,
        };
        self.execute_status(&Command::PlayGif {
            file_type,
            file_name: name.to_string(),
        })
    }

    /// Resets the device-side counter that numbers animation uploads.
    pub fn reset_animation_pic_id(&self) -> Result<()> {
        self.execute_status(&Command::ResetGifId)
    }

    pub fn animation_pic_id(&self) -> Result<u32> {
        let response: PicIdResponse = self.execute(&Command::GetGifId)?;
        Ok(response.pic_id)
    }

    /// Uploads a GIF: frames are cropped to the centred square of the first
    /// frame, resampled to the largest size that fits and sent with their
    /// own delays.
    pub fn send_animation_gif(&self, pic_id: u32, gif: &GifAnimation) -> Result<()> {
        let (_, frames) = gif.to_device_frames()?;
        self.send_animation_images(pic_id, gif.delays(), &frames)
    }

    /// Uploads equally sized square images of side 16, 32 or 64.
    pub fn send_animation_images(
        &self,
        pic_id: u32,
        delays: &[Duration],
        images: &[DynamicImage],
    ) -> Result<()> {
        let first = images
            .first()
            .ok_or_else(|| Error::validation("animation", "at least one image is required"))?;
        let (width, height) = first.dimensions();
        if width != height {
            return Err(Error::validation(
                "frame size",
                format!("{}x{} is not square", width, height),
            ));
        }
        let size = FrameSize::for_side(width)?;
        if let Some(odd) = images.iter().find(|image| image.dimensions() != (width, height)) {
            return Err(Error::validation(
                "frame size",
                format!(
                    "{}x{} differs from the first frame ({})",
                    odd.width(),
                    odd.height(),
                    size
                ),
            ));
        }

        let frames = images
            .iter()
            .map(FrameBuffer::from_image)
            .collect::<Result<Vec<_>>>()?;
        self.send_animation(size, pic_id, delays, &frames)
    }

    /// Uploads `frames` one request at a time.
    ///
    /// Stops at the first failure. Frames already sent stay on the device.
    pub fn send_animation(
        &self,
        size: FrameSize,
        pic_id: u32,
        delays: &[Duration],
        frames: &[FrameBuffer],
    ) -> Result<()> {
        if frames.is_empty() || frames.len() > MAX_ANIMATION_FRAMES {
            return Err(Error::validation(
                "animation",
                format!(
                    "{} frames given, expected 1..={}",
                    frames.len(),
                    MAX_ANIMATION_FRAMES
                ),
            ));
        }
        if delays.len() != frames.len() {
            return Err(Error::validation(
                "delays",
                format!("{} delays for {} frames", delays.len(), frames.len()),
            ));
        }
        if let Some(frame) = frames.iter().find(|frame| frame.size() != size) {
            return Err(Error::validation(
                "frame size",
                format!("{} frame in a {} animation", frame.size(), size),
            ));
        }

        for (offset, (frame, delay)) in frames.iter().zip(delays).enumerate() {
            debug!(
                "Sending frame {}/{} of animation {}",
                offset + 1,
                frames.len(),
                pic_id
            );
            self.execute_status(&Command::SendGifFrame {
                pic_num: frames.len(),
                pic_width: size.side(),
                pic_offset: offset,
                pic_id,
                pic_speed: delay.as_millis() as u64,
                pic_data: frame.to_base64(),
            })?;
        }
        Ok(())
    }
}
