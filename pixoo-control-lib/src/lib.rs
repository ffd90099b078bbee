//! # Pixoo Control Library
//!
//! `pixoo-control-lib` is a Rust library for controlling LAN-connected pixel
//! display devices (Divoom Pixoo 16/32/64 and compatible clocks). It finds
//! devices through the vendor's cloud directory and drives them through their
//! local HTTP/JSON command endpoint.
//!
//! ## Features
//!
//! - Device discovery and cloud metadata (fonts, clock face catalogue)
//! - Channel selection: clock faces, cloud gallery, visualizer, custom pages
//! - Animation upload from images or GIFs, with automatic crop and resize
//! - Text overlays, system settings and the built-in tools
//!
//! Every call is a blocking round trip; there is no background work and no
//! retry logic.
//!
//! ## Example
//!
//! ```no_run
//! use pixoo_control_lib::control_interface::ControlInterface;
//! use pixoo_control_lib::util::discovery::Discovery;
//! use pixoo_control_lib::util::transport::ClientConfig;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let devices = Discovery::find_lan_devices()?;
//!     let Some(device) = devices.first() else {
//!         println!("No device found");
//!         return Ok(());
//!     };
//!
//!     let control = ControlInterface::from_device_identifier(device, &ClientConfig::default())?;
//!     control.set_brightness(60)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Disclaimer
//!
//! This project is not affiliated with, authorized by, endorsed by, or in any way officially connected
//! with Divoom or its affiliates.
//!
//! ## License
//!
//! This project is dual-licensed under the MIT License and the Apache License, Version 2.0.
//! You may choose to use either license, depending on your project needs.

// The `control_interface` module provides the client bound to one device.
// It includes the typed command set and one method per device feature.
//
// Example usage:
//
// ```
// use pixoo_control_lib::control_interface::{Channel, ControlInterface};
// use pixoo_control_lib::util::transport::ClientConfig;
//
// let control = ControlInterface::new("192.168.1.100", &ClientConfig::default()).unwrap();
// control.select_channel(Channel::Visualizer).unwrap();
// ```
pub mod control_interface;

pub mod error;

// The `frame` module turns images and GIFs into square RGB24 frames of the
// sizes the device accepts.
pub mod frame;

// The `util` module holds the transport seam, the cloud directory and the
// shared response status handling.
pub mod util;

pub use error::{Error, Result};
