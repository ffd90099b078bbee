use std::cmp::max;
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

use derivative::Derivative;
use log::info;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

use crate::error::{Error, Result};
use crate::util::traits::ResponseStatus;
use crate::util::transport::{HttpTransport, Transport};

/// Base URL of the vendor's cloud directory.
pub const CLOUD_BASE_URL: &str = "https://app.divoom-gz.com";

/// A device reported by the cloud as living on the caller's LAN.
///
/// Two identifiers are equal when they point at the same device on the same
/// address; the name is only a label and is ignored.
#[derive(Derivative)]
#[derivative(Hash, PartialEq, Eq)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceIdentifier {
    #[serde(rename = "DeviceName")]
    #[derivative(Hash = "ignore", PartialEq = "ignore")]
    pub device_name: String,
    #[serde(rename = "DeviceId")]
    pub device_id: u64,
    #[serde(rename = "DevicePrivateIP")]
    pub ip_address: Ipv4Addr,
}

impl DeviceIdentifier {
    pub fn new(device_name: String, device_id: u64, ip_address: Ipv4Addr) -> Self {
        DeviceIdentifier {
            device_name,
            device_id,
            ip_address,
        }
    }
}

impl Display for DeviceIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (id {}) at {}",
            self.device_name, self.device_id, self.ip_address
        )
    }
}

/// A font the device can render text with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub id: u32,
    pub name: String,
    pub width: String,
    #[serde(rename = "high")]
    pub height: String,
    pub charset: String,
    #[serde(rename = "type")]
    pub font_type: u32,
}

/// A clock face available from the cloud gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dial {
    #[serde(rename = "ClockId")]
    pub clock_id: u32,
    #[serde(rename = "Name")]
    pub name: String,
}

/// One page of a dial listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialPage {
    /// Number of dials of this type across all pages.
    pub total: u32,
    pub dials: Vec<Dial>,
}

#[derive(Deserialize, Debug)]
struct CloudEnvelope<T> {
    #[serde(rename = "ReturnCode", default)]
    return_code: i64,
    #[serde(rename = "ReturnMessage", default)]
    return_message: Option<String>,
    #[serde(flatten)]
    body: T,
}

impl<T> ResponseStatus for CloudEnvelope<T> {
    fn status_code(&self) -> i64 {
        self.return_code
    }

    fn status_message(&self) -> Option<&str> {
        self.return_message.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Deserialize, Debug, Default)]
struct DeviceListBody {
    #[serde(rename = "DeviceList", default, deserialize_with = "null_as_empty")]
    devices: Vec<DeviceIdentifier>,
}

#[derive(Deserialize, Debug, Default)]
struct FontListBody {
    #[serde(rename = "FontList", default, deserialize_with = "null_as_empty")]
    fonts: Vec<Font>,
}

#[derive(Deserialize, Debug, Default)]
struct DialTypeBody {
    #[serde(rename = "DialTypeList", default, deserialize_with = "null_as_empty")]
    dial_types: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
struct DialListBody {
    #[serde(
        rename = "TotalNum",
        default,
        deserialize_with = "deserialize_total_num"
    )]
    total: u32,
    #[serde(rename = "DialList", default, deserialize_with = "null_as_empty")]
    dials: Vec<Dial>,
}

/// Lists come back as `null` rather than `[]` when there is nothing to report.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The cloud reports `TotalNum` as a number on some endpoints and as a
/// numeric string on others.
fn deserialize_total_num<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u32),
        String(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s.trim().parse::<u32>().map_err(serde::de::Error::custom),
    }
}

/// Read-only queries against the vendor cloud.
pub struct Discovery<T = HttpTransport> {
    transport: T,
    base_url: String,
}

impl Discovery<HttpTransport> {
    /// A directory client talking to the public cloud endpoint.
    pub fn new() -> Result<Self> {
        Ok(Discovery::with_transport(
            HttpTransport::new(None)?,
            CLOUD_BASE_URL,
        ))
    }

    /// Shorthand for `Discovery::new()?.find_devices()`.
    pub fn find_lan_devices() -> Result<Vec<DeviceIdentifier>> {
        Discovery::new()?.find_devices()
    }

    /// Prints `devices` as an aligned table.
    pub fn pretty_print_devices(devices: &[DeviceIdentifier]) {
        let max_ip_width = devices
            .iter()
            .map(|d| d.ip_address.to_string().len())
            .max()
            .unwrap_or(0)
            .max("IP Address".len());
        let max_device_id_width = devices
            .iter()
            .map(|d| d.device_id.to_string().len())
            .max()
            .unwrap_or(0)
            .max("Device ID".len());
        let max_device_name_width = devices
            .iter()
            .map(|d| max(d.device_name.len(), 20))
            .max()
            .unwrap_or(20);

        println!(
            "{:<ip_width$} {:<device_id_width$} {:<device_name_width$}",
            "IP Address",
            "Device ID",
            "Device Name",
            ip_width = max_ip_width + 2,
            device_id_width = max_device_id_width + 2,
            device_name_width = max_device_name_width + 2,
        );

        println!(
            "{:<ip_width$} {:<device_id_width$} {:<device_name_width$}",
            "-".repeat(max_ip_width),
            "-".repeat(max_device_id_width),
            "-".repeat(max_device_name_width),
            ip_width = max_ip_width + 2,
            device_id_width = max_device_id_width + 2,
            device_name_width = max_device_name_width + 2,
        );

        for device in devices {
            println!(
                "{:<ip_width$} {:<device_id_width$} {:<device_name_width$}",
                device.ip_address,
                device.device_id,
                device.device_name,
                ip_width = max_ip_width + 2,
                device_id_width = max_device_id_width + 2,
                device_name_width = max_device_name_width + 2,
            );
        }
    }
}

impl<T: Transport> Discovery<T> {
    pub fn with_transport(transport: T, base_url: &str) -> Self {
        Discovery {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lists the devices the cloud believes share the caller's LAN.
    ///
    /// An empty list is not an error; callers decide what "no device" means.
    pub fn find_devices(&self) -> Result<Vec<DeviceIdentifier>> {
        let body: DeviceListBody = self.query("find devices", "Device/ReturnSameLANDevice", None)?;
        for device in &body.devices {
            info!("Found device: {}", device);
        }
        Ok(body.devices)
    }

    /// Fonts usable with text overlays.
    pub fn font_list(&self) -> Result<Vec<Font>> {
        let body: FontListBody = self.query("get font list", "Device/GetTimeDialFontList", None)?;
        Ok(body.fonts)
    }

    /// Categories of clock faces.
    pub fn dial_types(&self) -> Result<Vec<String>> {
        let body: DialTypeBody = self.query("get dial type", "Channel/GetDialType", None)?;
        Ok(body.dial_types)
    }

    /// One page (1-based) of the clock faces of `dial_type`.
    pub fn dial_list(&self, dial_type: &str, page: u32) -> Result<DialPage> {
        if page == 0 {
            return Err(Error::validation("page", "pages are numbered from 1"));
        }
        let request = json!({ "DialType": dial_type, "Page": page });
        let body: DialListBody = self.query("get dial list", "Channel/GetDialList", Some(request))?;
        Ok(DialPage {
            total: body.total,
            dials: body.dials,
        })
    }

    fn query<B>(&self, operation: &str, path: &str, request: Option<serde_json::Value>) -> Result<B>
    where
        B: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, path);
        let body = request.map(|r| r.to_string()).unwrap_or_default();
        let text = self.transport.post(&url, body)?;
        let envelope: CloudEnvelope<B> =
            serde_json::from_str(&text).map_err(|source| Error::Decode {
                operation: operation.to_string(),
                source,
            })?;
        Ok(envelope.check(operation)?.body)
    }
}
