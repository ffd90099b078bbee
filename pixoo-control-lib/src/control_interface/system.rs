use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::control_interface::{Command, ControlInterface};
use crate::error::{ensure_range, Error, Result};
use crate::util::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemperatureMode {
    Celsius,
    Fahrenheit,
}

/// Clockwise screen rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RotationAngle {
    #[value(name = "0")]
    Deg0,
    #[value(name = "90")]
    Deg90,
    #[value(name = "180")]
    Deg180,
    #[value(name = "270")]
    Deg270,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HourMode {
    #[value(name = "12")]
    Hour12,
    #[value(name = "24")]
    Hour24,
}

/// Clock of the device as it reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceTime {
    #[serde(rename = "UTCTime", with = "chrono::serde::ts_seconds")]
    pub utc_time: DateTime<Utc>,
    /// Wall clock in the device's configured time zone, e.g. `2024-05-01 18:42:10`.
    #[serde(rename = "LocalTime")]
    pub local_time: String,
}

impl<T: Transport> ControlInterface<T> {
    /// Sets the time zone by name, e.g. `GMT-5`.
    pub fn set_time_zone(&self, time_zone: &str) -> Result<()> {
        if time_zone.trim().is_empty() {
            return Err(Error::validation("time zone", "must not be empty"));
        }
        self.execute_status(&Command::SetTimeZone {
            time_zone: time_zone.to_string(),
        })
    }

    /// Location used by the device for its weather display.
    pub fn set_weather_area(&self, longitude: f64, latitude: f64) -> Result<()> {
        ensure_range("longitude", longitude, -180.0..=180.0)?;
        ensure_range("latitude", latitude, -90.0..=90.0)?;
        self.execute_status(&Command::SetLongitudeLatitude {
            longitude: longitude.to_string(),
            latitude: latitude.to_string(),
        })
    }

    pub fn set_system_time(&self, time: DateTime<Utc>) -> Result<()> {
        self.execute_status(&Command::SetUtc {
            utc: time.timestamp(),
        })
    }

    pub fn device_time(&self) -> Result<DeviceTime> {
        self.execute(&Command::GetDeviceTime)
    }

    pub fn set_temperature_mode(&self, mode: TemperatureMode) -> Result<()> {
        let mode = match mode {
            TemperatureMode::Celsius => 0,
            TemperatureMode::Fahrenheit => 1,
        };
        self.execute_status(&Command::SetTemperatureMode { mode })
    }

    pub fn set_rotation(&self, angle: RotationAngle) -> Result<()> {
        let mode = match angle {
            RotationAngle::Deg0 => 0,
            RotationAngle::Deg90 => 1,
            RotationAngle::Deg180 => 2,
            RotationAngle::Deg270 => 3,
        };
        self.execute_status(&Command::SetRotationAngle { mode })
    }

    pub fn set_mirror_mode(&self, enabled: bool) -> Result<()> {
        self.execute_status(&Command::SetMirrorMode {
            mode: enabled as u8,
        })
    }

    pub fn set_hour_mode(&self, hour_mode: HourMode) -> Result<()> {
        let mode = match hour_mode {
            HourMode::Hour12 => 0,
            HourMode::Hour24 => 1,
        };
        self.execute_status(&Command::SetHourMode { mode })
    }

    pub fn set_high_light_mode(&self, enabled: bool) -> Result<()> {
        self.execute_status(&Command::SetHighLightMode {
            mode: enabled as u8,
        })
    }

    /// Adjusts the white balance; each channel is a percentage in 0..=100.
    pub fn set_white_balance(&self, red: i32, green: i32, blue: i32) -> Result<()> {
        ensure_range("white balance red", red, 0..=100)?;
        ensure_range("white balance green", green, 0..=100)?;
        ensure_range("white balance blue", blue, 0..=100)?;
        self.execute_status(&Command::SetWhiteBalance {
            red: red as u8,
            green: green as u8,
            blue: blue as u8,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::transport::mock::MockTransport;
    use crate::util::transport::ClientConfig;
    use chrono::TimeZone;
    use serde_json::json;

    fn device(mock: &MockTransport) -> ControlInterface<&MockTransport> {
        ControlInterface::with_transport("192.168.1.20", &ClientConfig::default(), mock)
    }

    #[test]
    fn test_white_balance_rejects_any_bad_channel() {
        let mock = MockTransport::new();
        let device = device(&mock);
        for (r, g, b) in [(101, 0, 0), (0, -1, 0), (0, 0, 200), (-5, 150, 100)] {
            let err = device.set_white_balance(r, g, b).unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(mock.request_count(), 0);

        device.set_white_balance(100, 0, 50).unwrap();
        assert_eq!(
            mock.bodies(),
            vec![json!({ "Command": "Device/SetWhiteBalance", "RValue": 100, "GValue": 0, "BValue": 50 })]
        );
    }

    #[test]
    fn test_modes() {
        let mock = MockTransport::new();
        let device = device(&mock);
        device.set_rotation(RotationAngle::Deg270).unwrap();
        device.set_hour_mode(HourMode::Hour24).unwrap();
        device
            .set_temperature_mode(TemperatureMode::Fahrenheit)
            .unwrap();
        device.set_mirror_mode(false).unwrap();
        assert_eq!(
            mock.bodies(),
            vec![
                json!({ "Command": "Device/SetScreenRotationAngle", "Mode": 3 }),
                json!({ "Command": "Device/SetTime24Flag", "Mode": 1 }),
                json!({ "Command": "Device/SetDisTempMode", "Mode": 1 }),
                json!({ "Command": "Device/SetMirrorMode", "Mode": 0 }),
            ]
        );
    }

    #[test]
    fn test_time() {
        let mock = MockTransport::new().respond(json!({}))
            .respond(json!({ "error_code": 0, "UTCTime": 1647200428, "LocalTime": "2022-03-14 03:40:28" }));
        let device = device(&mock);

        let time = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        device.set_system_time(time).unwrap();
        assert_eq!(
            mock.bodies()[0],
            json!({ "Command": "Device/SetUTC", "Utc": time.timestamp() })
        );

        let device_time = device.device_time().unwrap();
        assert_eq!(device_time.utc_time.timestamp(), 1647200428);
        assert_eq!(device_time.local_time, "2022-03-14 03:40:28");
    }

    #[test]
    fn test_weather_area_and_time_zone() {
        let mock = MockTransport::new();
        let device = device(&mock);
        assert!(device.set_weather_area(181.0, 0.0).unwrap_err().is_validation());
        assert!(device.set_time_zone("  ").unwrap_err().is_validation());
        assert_eq!(mock.request_count(), 0);

        device.set_weather_area(30.29, 20.58).unwrap();
        device.set_time_zone("GMT-5").unwrap();
        assert_eq!(
            mock.bodies(),
            vec![
                json!({ "Command": "Sys/LogAndLat", "Longitude": "30.29", "Latitude": "20.58" }),
                json!({ "Command": "Sys/TimeZone", "TimeZoneValue": "GMT-5" }),
            ]
        );
    }
}
