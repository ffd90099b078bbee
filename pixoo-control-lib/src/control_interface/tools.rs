use std::time::Duration;

use clap::ValueEnum;

use crate::control_interface::{Command, ControlInterface};
use crate::error::{ensure_range, Error, Result};
use crate::util::transport::Transport;

/// Longest countdown the timer tool can show.
pub const MAX_COUNTDOWN_MINUTES: u64 = 99;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StopwatchStatus {
    Stop,
    Start,
    Reset,
}

impl<T: Transport> ControlInterface<T> {
    /// Configures the countdown tool and starts or stops it.
    ///
    /// Sub-second precision is dropped.
    pub fn set_countdown(&self, duration: Duration, start: bool) -> Result<()> {
        let total = duration.as_secs();
        let minute = total / 60;
        if minute > MAX_COUNTDOWN_MINUTES {
            return Err(Error::validation(
                "countdown",
                format!("{} minutes exceeds {}", minute, MAX_COUNTDOWN_MINUTES),
            ));
        }
        self.execute_status(&Command::SetCountdown {
            minute: minute as u32,
            second: (total % 60) as u32,
            status: start as u8,
        })
    }

    pub fn set_stopwatch(&self, status: StopwatchStatus) -> Result<()> {
        let status = match status {
            StopwatchStatus::Stop => 0,
            StopwatchStatus::Start => 1,
            StopwatchStatus::Reset => 2,
        };
        self.execute_status(&Command::SetStopwatch { status })
    }

    /// Shows the scoreboard tool; both scores must be in 0..=999.
    pub fn set_scoreboard(&self, red: i32, blue: i32) -> Result<()> {
        ensure_range("red score", red, 0..=999)?;
        ensure_range("blue score", blue, 0..=999)?;
        self.execute_status(&Command::SetScoreboard {
            blue_score: blue as u16,
            red_score: red as u16,
        })
    }

    pub fn set_noise_meter(&self, on: bool) -> Result<()> {
        self.execute_status(&Command::SetNoiseStatus {
            noise_status: on as u8,
        })
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
    fn test_countdown_splits_minutes_and_seconds() {
        let mock = MockTransport::new();
        device(&mock)
            .set_countdown(Duration::from_secs(5 * 60 + 30), true)
            .unwrap();
        assert_eq!(
            mock.bodies(),
            vec![json!({ "Command": "Tools/SetTimer", "Minute": 5, "Second": 30, "Status": 1 })]
        );
    }

    #[test]
    fn test_countdown_too_long() {
        let mock = MockTransport::new();
        let err = device(&mock)
            .set_countdown(Duration::from_secs(100 * 60), false)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_scoreboard_range() {
        let mock = MockTransport::new();
        let device = device(&mock);
        assert!(device.set_scoreboard(1000, 0).unwrap_err().is_validation());
        assert!(device.set_scoreboard(0, -1).unwrap_err().is_validation());
        assert_eq!(mock.request_count(), 0);

        device.set_scoreboard(999, 0).unwrap();
        assert_eq!(
            mock.bodies(),
            vec![json!({ "Command": "Tools/SetScoreBoard", "BlueScore": 0, "RedScore": 999 })]
        );
    }

    #[test]
    fn test_stopwatch_and_noise() {
        let mock = MockTransport::new()
            .respond(json!({ "error_code": 0 }))
            .respond(json!({ "error_code": 5 }));
        let device = device(&mock);
        device.set_stopwatch(StopwatchStatus::Reset).unwrap();
        assert_eq!(device.set_noise_meter(true).unwrap_err().code(), Some(5));
        assert_eq!(
            mock.bodies(),
            vec![
                json!({ "Command": "Tools/SetStopWatch", "Status": 2 }),
                json!({ "Command": "Tools/SetNoiseStatus", "NoiseStatus": 1 }),
            ]
        );
    }
}
