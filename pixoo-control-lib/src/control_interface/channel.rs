use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::control_interface::{Command, ControlInterface};
use crate::error::{ensure_range, Error, Result};
use crate::util::transport::Transport;

/// Top-level display mode of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
pub enum Channel {
    Faces,
    Cloud,
    Visualizer,
    Custom,
}

impl Channel {
    pub fn index(self) -> u8 {
        match self {
            Channel::Faces => 0,
            Channel::Cloud => 1,
            Channel::Visualizer => 2,
            Channel::Custom => 3,
        }
    }
}

impl TryFrom<i64> for Channel {
    type Error = i64;

    fn try_from(index: i64) -> std::result::Result<Self, i64> {
        match index {
            0 => Ok(Channel::Faces),
            1 => Ok(Channel::Cloud),
            2 => Ok(Channel::Visualizer),
            3 => Ok(Channel::Custom),
            other => Err(other),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Channel::Faces => "faces",
            Channel::Cloud => "cloud",
            Channel::Visualizer => "visualizer",
            Channel::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

/// Gallery shown by the cloud channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CloudChannel {
    RecommendGallery,
    Favourite,
    SubscribeArtist,
}

impl CloudChannel {
    pub fn index(self) -> u8 {
        match self {
            CloudChannel::RecommendGallery => 0,
            CloudChannel::Favourite => 1,
            CloudChannel::SubscribeArtist => 2,
        }
    }
}

/// One of the three user-defined pages of the custom channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CustomPage {
    #[value(name = "0")]
    Page0,
    #[value(name = "1")]
    Page1,
    #[value(name = "2")]
    Page2,
}

impl CustomPage {
    pub fn index(self) -> u8 {
        match self {
            CustomPage::Page0 => 0,
            CustomPage::Page1 => 1,
            CustomPage::Page2 => 2,
        }
    }
}

/// The clock face currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FaceInfo {
    #[serde(rename = "ClockId")]
    pub clock_id: u32,
    #[serde(rename = "Brightness")]
    pub brightness: u8,
}

/// Snapshot of the device configuration.
///
/// Firmware revisions differ in which keys they report, so every field is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DeviceSettings {
    pub brightness: Option<u8>,
    pub rotation_flag: Option<u8>,
    pub clock_time: Option<u32>,
    pub gallery_time: Option<u32>,
    pub single_galley_time: Option<u32>,
    pub power_on_channel_id: Option<u8>,
    pub gallery_show_time_flag: Option<u8>,
    pub cur_clock_id: Option<u32>,
    pub time24_flag: Option<u8>,
    pub temperature_mode: Option<u8>,
    pub gyrate_angle: Option<u8>,
    pub mirror_flag: Option<u8>,
    pub light_switch: Option<u8>,
}

#[derive(Deserialize)]
struct SelectIndexResponse {
    #[serde(rename = "SelectIndex")]
    select_index: i64,
}

impl<T: Transport> ControlInterface<T> {
    pub fn select_channel(&self, channel: Channel) -> Result<()> {
        self.execute_status(&Command::SetChannel {
            select_index: channel.index(),
        })
    }

    pub fn current_channel(&self) -> Result<Channel> {
        let response: SelectIndexResponse = self.execute(&Command::GetChannel)?;
        Channel::try_from(response.select_index).map_err(|index| Error::Decode {
            operation: Command::GetChannel.name().to_string(),
            source: serde::de::Error::custom(format!("unknown channel index {}", index)),
        })
    }

    /// Switches to the faces channel and shows clock face `clock_id`.
    pub fn select_face(&self, clock_id: u32) -> Result<()> {
        self.select_channel(Channel::Faces)?;
        self.execute_status(&Command::SetClock { clock_id })
    }

    pub fn selected_face(&self) -> Result<FaceInfo> {
        self.execute(&Command::GetClockInfo)
    }

    /// Switches to the cloud channel and picks one of its galleries.
    pub fn select_cloud_channel(&self, gallery: CloudChannel) -> Result<()> {
        self.select_channel(Channel::Cloud)?;
        self.execute_status(&Command::SetCloudIndex {
            index: gallery.index(),
        })
    }

    /// Switches to the visualizer channel and picks the equalizer at
    /// `eq_position`.
    pub fn select_visualizer(&self, eq_position: u32) -> Result<()> {
        self.select_channel(Channel::Visualizer)?;
        self.execute_status(&Command::SetEqPosition { eq_position })
    }

    pub fn select_custom_page(&self, page: CustomPage) -> Result<()> {
        self.execute_status(&Command::SetCustomPage {
            custom_page_index: page.index(),
        })
    }

    /// Sets the screen brightness.
    ///
    /// # Arguments
    /// - `brightness`: Range is 0..=100.
    pub fn set_brightness(&self, brightness: i32) -> Result<()> {
        ensure_range("brightness", brightness, 0..=100)?;
        self.execute_status(&Command::SetBrightness {
            brightness: brightness as u8,
        })
    }

    pub fn set_screen(&self, on: bool) -> Result<()> {
        self.execute_status(&Command::SetScreen { on_off: on as u8 })
    }

    pub fn settings(&self) -> Result<DeviceSettings> {
        self.execute(&Command::GetAllConf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::transport::mock::MockTransport;
    use crate::util::transport::ClientConfig;
    use serde_json::json;

    fn device(mock: &MockTransport) -> ControlInterface<&MockTransport> {
        ControlInterface::with_transport("192.168.1.20", &ClientConfig::default(), mock)
    }

    #[test]
    fn test_brightness_out_of_range_never_hits_the_network() {
        let mock = MockTransport::new();
        for brightness in [-100, -1, 101, 255, i32::MAX, i32::MIN] {
            let err = device(&mock).set_brightness(brightness).unwrap_err();
            assert!(err.is_validation(), "{} accepted", brightness);
        }
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_set_brightness() {
        let mock = MockTransport::new();
        device(&mock).set_brightness(100).unwrap();
        assert_eq!(
            mock.bodies(),
            vec![json!({ "Command": "Channel/SetBrightness", "Brightness": 100 })]
        );
    }

    #[test]
    fn test_error_code_becomes_protocol_error() {
        let mock = MockTransport::new().respond(json!({ "error_code": 5 }));
        let err = device(&mock).set_screen(true).unwrap_err();
        assert_eq!(err.code(), Some(5));
    }

    #[test]
    fn test_rejected_request_with_text_or_float_code() {
        let mock = MockTransport::new()
            .respond(json!({ "error_code": "Request data illegal json" }))
            .respond(json!({ "error_code": 5.0 }));
        let device = device(&mock);

        let err = device.set_brightness(50).unwrap_err();
        assert!(matches!(err, Error::Protocol { .. }));
        assert!(err.to_string().contains("Request data illegal json"));

        assert_eq!(device.set_brightness(50).unwrap_err().code(), Some(5));
    }

    #[test]
    fn test_select_face_switches_channel_first() {
        let mock = MockTransport::new();
        device(&mock).select_face(182).unwrap();
        assert_eq!(
            mock.bodies(),
            vec![
                json!({ "Command": "Channel/SetIndex", "SelectIndex": 0 }),
                json!({ "Command": "Channel/SetClockSelectId", "ClockId": 182 }),
            ]
        );
    }

    #[test]
    fn test_select_face_stops_when_channel_switch_fails() {
        let mock = MockTransport::new().respond(json!({ "error_code": 1 }));
        assert!(device(&mock).select_face(182).is_err());
        assert_eq!(mock.commands(), vec!["Channel/SetIndex"]);
    }

    #[test]
    fn test_select_cloud_and_visualizer() {
        let mock = MockTransport::new();
        let device = device(&mock);
        device
            .select_cloud_channel(CloudChannel::SubscribeArtist)
            .unwrap();
        device.select_visualizer(4).unwrap();
        assert_eq!(
            mock.bodies(),
            vec![
                json!({ "Command": "Channel/SetIndex", "SelectIndex": 1 }),
                json!({ "Command": "Channel/CloudIndex", "Index": 2 }),
                json!({ "Command": "Channel/SetIndex", "SelectIndex": 2 }),
                json!({ "Command": "Channel/SetEqPosition", "EqPosition": 4 }),
            ]
        );
    }

    #[test]
    fn test_current_channel() {
        let mock = MockTransport::new()
            .respond(json!({ "error_code": 0, "SelectIndex": 3 }))
            .respond(json!({ "SelectIndex": 9 }));
        let device = device(&mock);
        assert_eq!(device.current_channel().unwrap(), Channel::Custom);
        assert!(matches!(
            device.current_channel().unwrap_err(),
            Error::Decode { .. }
        ));
    }

    #[test]
    fn test_selected_face_and_settings() {
        let mock = MockTransport::new()
            .respond(json!({ "error_code": 0, "ClockId": 12, "Brightness": 80 }))
            .respond(json!({
                "error_code": 0,
                "Brightness": 90,
                "RotationFlag": 1,
                "CurClockId": 12,
                "Time24Flag": 1,
                "MirrorFlag": 0
            }));
        let device = device(&mock);
        assert_eq!(
            device.selected_face().unwrap(),
            FaceInfo {
                clock_id: 12,
                brightness: 80
            }
        );

        let settings = device.settings().unwrap();
        assert_eq!(settings.brightness, Some(90));
        assert_eq!(settings.cur_clock_id, Some(12));
        assert_eq!(settings.time24_flag, Some(1));
        assert_eq!(settings.light_switch, None);
    }

    #[test]
    fn test_custom_page() {
        let mock = MockTransport::new();
        device(&mock).select_custom_page(CustomPage::Page2).unwrap();
        assert_eq!(
            mock.bodies(),
            vec![json!({ "Command": "Channel/SetCustomPageIndex", "CustomPageIndex": 2 })]
        );
    }
}
