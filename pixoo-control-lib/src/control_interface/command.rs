use serde::Serialize;

/// Every command the device understands, serialised as
/// `{"Command": "<Namespace/Action>", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Command")]
pub enum Command {
    #[serde(rename = "Channel/SetIndex")]
    SetChannel {
        #[serde(rename = "SelectIndex")]
        select_index: u8,
    },
    #[serde(rename = "Channel/GetIndex")]
    GetChannel,
    #[serde(rename = "Channel/SetClockSelectId")]
    SetClock {
        #[serde(rename = "ClockId")]
        clock_id: u32,
    },
    #[serde(rename = "Channel/GetClockInfo")]
    GetClockInfo,
    #[serde(rename = "Channel/CloudIndex")]
    SetCloudIndex {
        #[serde(rename = "Index")]
        index: u8,
    },
    #[serde(rename = "Channel/SetEqPosition")]
    SetEqPosition {
        #[serde(rename = "EqPosition")]
        eq_position: u32,
    },
    #[serde(rename = "Channel/SetCustomPageIndex")]
    SetCustomPage {
        #[serde(rename = "CustomPageIndex")]
        custom_page_index: u8,
    },
    #[serde(rename = "Channel/SetBrightness")]
    SetBrightness {
        #[serde(rename = "Brightness")]
        brightness: u8,
    },
    #[serde(rename = "Channel/OnOffScreen")]
    SetScreen {
        #[serde(rename = "OnOff")]
        on_off: u8,
    },
    #[serde(rename = "Channel/GetAllConf")]
    GetAllConf,

    #[serde(rename = "Sys/TimeZone")]
    SetTimeZone {
        #[serde(rename = "TimeZoneValue")]
        time_zone: String,
    },
    #[serde(rename = "Sys/LogAndLat")]
    SetLongitudeLatitude {
        #[serde(rename = "Longitude")]
        longitude: String,
        #[serde(rename = "Latitude")]
        latitude: String,
    },

    #[serde(rename = "Device/SetUTC")]
    SetUtc {
        #[serde(rename = "Utc")]
        utc: i64,
    },
    #[serde(rename = "Device/GetDeviceTime")]
    GetDeviceTime,
    #[serde(rename = "Device/SetDisTempMode")]
    SetTemperatureMode {
        #[serde(rename = "Mode")]
        mode: u8,
    },
    #[serde(rename = "Device/SetScreenRotationAngle")]
    SetRotationAngle {
        #[serde(rename = "Mode")]
        mode: u8,
    },
    #[serde(rename = "Device/SetMirrorMode")]
    SetMirrorMode {
        #[serde(rename = "Mode")]
        mode: u8,
    },
    #[serde(rename = "Device/SetTime24Flag")]
    SetHourMode {
        #[serde(rename = "Mode")]
        mode: u8,
    },
    #[serde(rename = "Device/SetHighLightMode")]
    SetHighLightMode {
        #[serde(rename = "Mode")]
        mode: u8,
    },
    #[serde(rename = "Device/SetWhiteBalance")]
    SetWhiteBalance {
        #[serde(rename = "RValue")]
        red: u8,
        #[serde(rename = "GValue")]
        green: u8,
        #[serde(rename = "BValue")]
        blue: u8,
    },
    #[serde(rename = "Device/PlayTFGif")]
    PlayGif {
        #[serde(rename = "FileType")]
        file_type: u8,
        #[serde(rename = "FileName")]
        file_name: String,
    },

    #[serde(rename = "Tools/SetTimer")]
    SetCountdown {
        #[serde(rename = "Minute")]
        minute: u32,
        #[serde(rename = "Second")]
        second: u32,
        #[serde(rename = "Status")]
        status: u8,
    },
    #[serde(rename = "Tools/SetStopWatch")]
    SetStopwatch {
        #[serde(rename = "Status")]
        status: u8,
    },
    #[serde(rename = "Tools/SetScoreBoard")]
    SetScoreboard {
        #[serde(rename = "BlueScore")]
        blue_score: u16,
        #[serde(rename = "RedScore")]
        red_score: u16,
    },
    #[serde(rename = "Tools/SetNoiseStatus")]
    SetNoiseStatus {
        #[serde(rename = "NoiseStatus")]
        noise_status: u8,
    },

    #[serde(rename = "Draw/SendHttpGif")]
    SendGifFrame {
        #[serde(rename = "PicNum")]
        pic_num: usize,
        #[serde(rename = "PicWidth")]
        pic_width: u32,
        #[serde(rename = "PicOffset")]
        pic_offset: usize,
        #[serde(rename = "PicID")]
        pic_id: u32,
        /// Display time of this frame in milliseconds.
        #[serde(rename = "PicSpeed")]
        pic_speed: u64,
        /// Base64 RGB24 pixels.
        #[serde(rename = "PicData")]
        pic_data: String,
    },
    #[serde(rename = "Draw/GetHttpGifId")]
    GetGifId,
    #[serde(rename = "Draw/ResetHttpGifId")]
    ResetGifId,
    #[serde(rename = "Draw/SendHttpText")]
    SendText {
        #[serde(rename = "TextId")]
        text_id: u8,
        x: i32,
        y: i32,
        dir: u8,
        font: u32,
        #[serde(rename = "TextWidth")]
        text_width: u8,
        speed: u32,
        #[serde(rename = "TextString")]
        text: String,
        color: String,
        align: u8,
    },
    #[serde(rename = "Draw/ClearHttpText")]
    ClearText,
}

impl Command {
    /// The wire name sent in the `Command` field.
    pub fn name(&self) -> &'static str {
        match self {
            Command::SetChannel { .. } => "Channel/SetIndex",
            Command::GetChannel => "Channel/GetIndex",
            Command::SetClock { .. } => "Channel/SetClockSelectId",
            Command::GetClockInfo => "Channel/GetClockInfo",
            Command::SetCloudIndex { .. } => "Channel/CloudIndex",
            Command::SetEqPosition { .. } => "Channel/SetEqPosition",
            Command::SetCustomPage { .. } => "Channel/SetCustomPageIndex",
            Command::SetBrightness { .. } => "Channel/SetBrightness",
            Command::SetScreen { .. } => "Channel/OnOffScreen",
            Command::GetAllConf => "Channel/GetAllConf",
            Command::SetTimeZone { .. } => "Sys/TimeZone",
            Command::SetLongitudeLatitude { .. } => "Sys/LogAndLat",
            Command::SetUtc { .. } => "Device/SetUTC",
            Command::GetDeviceTime => "Device/GetDeviceTime",
            Command::SetTemperatureMode { .. } => "Device/SetDisTempMode",
            Command::SetRotationAngle { .. } => "Device/SetScreenRotationAngle",
            Command::SetMirrorMode { .. } => "Device/SetMirrorMode",
            Command::SetHourMode { .. } => "Device/SetTime24Flag",
            Command::SetHighLightMode { .. } => "Device/SetHighLightMode",
            Command::SetWhiteBalance { .. } => "Device/SetWhiteBalance",
            Command::PlayGif { .. } => "Device/PlayTFGif",
            Command::SetCountdown { .. } => "Tools/SetTimer",
            Command::SetStopwatch { .. } => "Tools/SetStopWatch",
            Command::SetScoreboard { .. } => "Tools/SetScoreBoard",
            Command::SetNoiseStatus { .. } => "Tools/SetNoiseStatus",
            Command::SendGifFrame { .. } => "Draw/SendHttpGif",
            Command::GetGifId => "Draw/GetHttpGifId",
            Command::ResetGifId => "Draw/ResetHttpGifId",
            Command::SendText { .. } => "Draw/SendHttpText",
            Command::ClearText => "Draw/ClearHttpText",
        }
    }
}
