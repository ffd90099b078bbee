use log::debug;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::util::discovery::DeviceIdentifier;
use crate::util::traits::ResponseStatus;
use crate::util::transport::{ClientConfig, HttpTransport, Transport};

pub mod channel;
pub mod command;
pub mod draw;
pub mod system;
pub mod tools;

pub use channel::{Channel, CloudChannel, CustomPage, DeviceSettings, FaceInfo};
pub use command::Command;
pub use draw::{GifSource, TextAlign, TextDirection, TextOverlay};
pub use system::{DeviceTime, HourMode, RotationAngle, TemperatureMode};
pub use tools::StopwatchStatus;

/// A client bound to one device.
///
/// Holds nothing but the device address and a transport; every method is a
/// single blocking round trip (or, for composite operations, a short fixed
/// sequence of them).
#[derive(Debug, Clone)]
pub struct ControlInterface<T = HttpTransport> {
    host: String,
    url: String,
    transport: T,
}

impl ControlInterface<HttpTransport> {
    pub fn new(host: &str, config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(ControlInterface::with_transport(host, config, transport))
    }

    /**
    Creates a [ControlInterface] by a [DeviceIdentifier].
    */
    pub fn from_device_identifier(
        device_identifier: &DeviceIdentifier,
        config: &ClientConfig,
    ) -> Result<Self> {
        ControlInterface::new(&device_identifier.ip_address.to_string(), config)
    }
}

impl<T: Transport> ControlInterface<T> {
    pub fn with_transport(host: &str, config: &ClientConfig, transport: T) -> Self {
        ControlInterface {
            host: host.to_string(),
            url: config.device_url(host),
            transport,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The command endpoint every request is posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Posts `command` and returns the decoded response as is, without
    /// looking at its status code.
    pub fn send(&self, command: &Command) -> Result<serde_json::Value> {
        let operation = command.name();
        let body = serde_json::to_string(command).map_err(|source| Error::Decode {
            operation: operation.to_string(),
            source,
        })?;
        debug!("Sending {} to {}", operation, self.host);
        let text = self.transport.post(&self.url, body)?;
        serde_json::from_str(&text).map_err(|source| Error::Decode {
            operation: operation.to_string(),
            source,
        })
    }

    /// Sends `command`, fails on a non-zero `error_code` and decodes the
    /// rest of the response into `R`.
    pub fn execute<R: DeserializeOwned>(&self, command: &Command) -> Result<R> {
        let operation = command.name();
        let response = self.send(command)?.check(operation)?;
        serde_json::from_value(response).map_err(|source| Error::Decode {
            operation: operation.to_string(),
            source,
        })
    }

    /// [`Self::execute`] for commands whose reply carries nothing but a status.
    pub(crate) fn execute_status(&self, command: &Command) -> Result<()> {
        self.execute::<serde::de::IgnoredAny>(command).map(|_| ())
    }
}
