use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use palette::Srgb;
use serde::Serialize;

use pixoo_control_lib::control_interface::{
    Channel, CloudChannel, ControlInterface, CustomPage, GifSource, HourMode, RotationAngle,
    StopwatchStatus, TemperatureMode, TextAlign, TextDirection, TextOverlay,
};
use pixoo_control_lib::frame::{fit_to_frame, FrameSize, GifAnimation};
use pixoo_control_lib::util::discovery::{Discovery, CLOUD_BASE_URL};
use pixoo_control_lib::util::transport::{ClientConfig, HttpTransport, Scheme};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    handle_cli(cli)
}

/// This struct defines the command line interface of the application
#[derive(Parser)]
#[clap(
    name = "pixoo_control",
    about = "Controls LAN-connected pixel display devices",
    version
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

/// Supported output formats for listing commands.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    /// Plain text format.
    Plaintext,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl From<Switch> for bool {
    fn from(switch: Switch) -> Self {
        switch == Switch::On
    }
}

/// Subcommands available for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Subcommand for operations that require device communication
    #[clap(name = "device-call")]
    DeviceCall {
        /// Sets the IP address of the device
        #[clap(long)]
        ip: String,

        /// URL scheme of the device endpoint
        #[clap(long, value_enum, default_value_t = Scheme::Https)]
        scheme: Scheme,

        /// Port of the device endpoint
        #[clap(long, default_value_t = 80)]
        port: u16,

        /// Request timeout in milliseconds
        #[clap(short = 't', long = "timeout", value_parser = parse_duration)]
        timeout: Option<Duration>,

        #[clap(subcommand)]
        action: DeviceAction,
    },
    /// Lists the devices the cloud reports on this LAN
    #[clap(name = "discover")]
    Discover {
        /// Output format (plaintext, json, yaml)
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Plaintext)]
        output: OutputFormat,

        /// Base URL of the cloud directory
        #[clap(long, default_value = CLOUD_BASE_URL)]
        cloud_url: String,
    },
    /// Read-only queries against the cloud catalogue
    #[clap(name = "cloud")]
    Cloud {
        /// Output format (plaintext, json, yaml)
        #[clap(short, long, value_enum, default_value_t = OutputFormat::Plaintext)]
        output: OutputFormat,

        /// Base URL of the cloud directory
        #[clap(long, default_value = CLOUD_BASE_URL)]
        cloud_url: String,

        #[clap(subcommand)]
        query: CloudQuery,
    },
}

#[derive(Subcommand)]
pub enum CloudQuery {
    /// Lists the clock face categories.
    #[clap(name = "dial-types")]
    DialTypes,
    /// Lists one page of clock faces of a category.
    #[clap(name = "dial-list")]
    DialList {
        /// Category, as printed by `dial-types`
        #[clap(long)]
        dial_type: String,

        /// 1-based page number
        #[clap(long, default_value_t = 1)]
        page: u32,
    },
    /// Lists the fonts available for text overlays.
    #[clap(name = "fonts")]
    Fonts,
}

fn parse_duration(s: &str) -> Result<Duration, &'static str> {
    let millis = s
        .parse::<u64>()
        .map_err(|_| "could not parse duration in milliseconds")?;
    Ok(Duration::from_millis(millis))
}

fn parse_color(s: &str) -> Result<Srgb<u8>, String> {
    Srgb::from_str(s).map_err(|e| format!("could not parse color {:?}: {}", s, e))
}

/// Actions available under the `device-call` subcommand
#[derive(Subcommand)]
pub enum DeviceAction {
    /// Gets the current channel.
    #[clap(name = "get-channel")]
    GetChannel,
    /// Switches the channel.
    #[clap(name = "set-channel")]
    SetChannel {
        #[clap(value_enum)]
        channel: Channel,
    },
    /// Shows a clock face by id.
    #[clap(name = "select-face")]
    SelectFace { clock_id: u32 },
    /// Gets the clock face on screen.
    #[clap(name = "get-face")]
    GetFace,
    /// Shows one of the cloud galleries.
    #[clap(name = "cloud-channel")]
    CloudChannel {
        #[clap(value_enum)]
        gallery: CloudChannel,
    },
    /// Shows an equalizer of the visualizer channel.
    #[clap(name = "visualizer")]
    Visualizer { eq_position: u32 },
    /// Shows a page of the custom channel.
    #[clap(name = "custom-page")]
    CustomPage {
        #[clap(value_enum)]
        page: CustomPage,
    },
    /// Sets the brightness (0-100).
    #[clap(name = "brightness", allow_negative_numbers = true)]
    Brightness { value: i32 },
    /// Turns the screen on or off.
    #[clap(name = "screen")]
    Screen {
        #[clap(value_enum)]
        switch: Switch,
    },
    /// Prints the device configuration.
    #[clap(name = "get-settings")]
    GetSettings,
    /// Sets the time zone, e.g. GMT-5.
    #[clap(name = "set-time-zone")]
    SetTimeZone { time_zone: String },
    /// Sets the device clock; defaults to the current time.
    #[clap(name = "set-time")]
    SetTime {
        /// RFC 3339 timestamp
        #[clap(long)]
        utc: Option<DateTime<Utc>>,
    },
    /// Prints the device clock.
    #[clap(name = "get-time")]
    GetTime,
    /// Sets the location used for weather.
    #[clap(name = "weather-area", allow_negative_numbers = true)]
    WeatherArea {
        #[clap(long)]
        longitude: f64,
        #[clap(long)]
        latitude: f64,
    },
    #[clap(name = "temperature-mode")]
    TemperatureMode {
        #[clap(value_enum)]
        mode: TemperatureMode,
    },
    #[clap(name = "rotation")]
    Rotation {
        #[clap(value_enum)]
        angle: RotationAngle,
    },
    #[clap(name = "mirror")]
    Mirror {
        #[clap(value_enum)]
        switch: Switch,
    },
    #[clap(name = "hour-mode")]
    HourMode {
        #[clap(value_enum)]
        mode: HourMode,
    },
    #[clap(name = "high-light")]
    HighLight {
        #[clap(value_enum)]
        switch: Switch,
    },
    /// Sets the white balance, each channel 0-100.
    #[clap(name = "white-balance", allow_negative_numbers = true)]
    WhiteBalance { red: i32, green: i32, blue: i32 },
    /// Sets and starts (or stops) the countdown tool.
    #[clap(name = "countdown")]
    Countdown {
        /// Countdown length in seconds
        #[clap(long)]
        seconds: u64,

        /// Configure without starting
        #[clap(long)]
        stopped: bool,
    },
    #[clap(name = "stopwatch")]
    Stopwatch {
        #[clap(value_enum)]
        status: StopwatchStatus,
    },
    /// Shows the scoreboard tool.
    #[clap(name = "scoreboard", allow_negative_numbers = true)]
    Scoreboard {
        #[clap(long)]
        red: i32,
        #[clap(long)]
        blue: i32,
    },
    /// Turns the noise meter tool on or off.
    #[clap(name = "noise")]
    Noise {
        #[clap(value_enum)]
        switch: Switch,
    },
    /// Draws scrolling text over the current animation.
    #[clap(name = "text")]
    Text {
        text: String,

        /// Text area slot (0-19)
        #[clap(long, default_value_t = 0)]
        id: u8,

        #[clap(short, long, default_value_t = 0, allow_negative_numbers = true)]
        x: i32,

        #[clap(short, long, default_value_t = 0, allow_negative_numbers = true)]
        y: i32,

        #[clap(long, value_enum, default_value_t = TextDirection::Left)]
        direction: TextDirection,

        #[clap(long, default_value_t = 0)]
        font: u32,

        /// Text area width in pixels (16-64)
        #[clap(long, default_value_t = 64)]
        width: u8,

        /// Scroll step time in milliseconds
        #[clap(long, default_value_t = 10)]
        speed: u32,

        /// Hex color, e.g. #FFA000
        #[clap(long, value_parser = parse_color, default_value = "#FFFFFF")]
        color: Srgb<u8>,

        #[clap(long, value_enum, default_value_t = TextAlign::Left)]
        align: TextAlign,
    },
    /// Removes all text areas.
    #[clap(name = "clear-text")]
    ClearText,
    /// Plays a GIF from the device storage card or a URL.
    #[clap(name = "play-gif")]
    PlayGif {
        #[clap(value_enum)]
        source: GifSource,
        name: String,
    },
    /// Uploads a GIF file as an animation.
    #[clap(name = "send-gif")]
    SendGif {
        path: PathBuf,

        #[clap(long, default_value_t = 1)]
        pic_id: u32,

        /// Reset the device animation counter first
        #[clap(long)]
        reset: bool,
    },
    /// Uploads still images as the frames of one animation.
    #[clap(name = "send-images")]
    SendImages {
        #[clap(required = true)]
        paths: Vec<PathBuf>,

        /// Frame side (16, 32 or 64)
        #[clap(long, default_value_t = 64)]
        size: u32,

        /// Display time of each frame in milliseconds
        #[clap(long, value_parser = parse_duration, default_value = "1000")]
        delay: Duration,

        #[clap(long, default_value_t = 1)]
        pic_id: u32,

        /// Reset the device animation counter first
        #[clap(long)]
        reset: bool,
    },
    /// Resets the device animation counter.
    #[clap(name = "reset-pic-id")]
    ResetPicId,
    /// Prints the device animation counter.
    #[clap(name = "get-pic-id")]
    GetPicId,
}

fn print_formatted<T: Serialize>(
    value: &T,
    output: OutputFormat,
    plaintext: impl FnOnce(&T),
) -> Result<()> {
    match output {
        OutputFormat::Plaintext => plaintext(value),
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(value)?),
    }
    Ok(())
}

fn handle_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Discover { output, cloud_url } => {
            let discovery = Discovery::with_transport(HttpTransport::new(None)?, &cloud_url);
            let devices = discovery.find_devices().context("Failed to find devices")?;
            if devices.is_empty() && output == OutputFormat::Plaintext {
                println!("No device found on this network.");
                return Ok(());
            }
            print_formatted(&devices, output, |devices| {
                Discovery::<HttpTransport>::pretty_print_devices(devices)
            })?;
        }
        Commands::Cloud {
            output,
            cloud_url,
            query,
        } => {
            let discovery = Discovery::with_transport(HttpTransport::new(None)?, &cloud_url);
            handle_cloud_query(&discovery, query, output)?;
        }
        Commands::DeviceCall {
            ip,
            scheme,
            port,
            timeout,
            action,
        } => {
            let config = ClientConfig {
                scheme,
                port,
                timeout,
            };
            let control = ControlInterface::new(&ip, &config)?;
            info!("Talking to {}", control.url());
            handle_device_action(&control, action)?;
        }
    }

    Ok(())
}

fn handle_cloud_query(
    discovery: &Discovery<HttpTransport>,
    query: CloudQuery,
    output: OutputFormat,
) -> Result<()> {
    match query {
        CloudQuery::DialTypes => {
            let dial_types = discovery.dial_types()?;
            print_formatted(&dial_types, output, |dial_types| {
                for dial_type in dial_types {
                    println!("{}", dial_type);
                }
            })
        }
        CloudQuery::DialList { dial_type, page } => {
            let dial_page = discovery.dial_list(&dial_type, page)?;
            print_formatted(&dial_page, output, |dial_page| {
                println!("{} ({} in total):", dial_type, dial_page.total);
                for dial in &dial_page.dials {
                    println!("{:>6}  {}", dial.clock_id, dial.name);
                }
            })
        }
        CloudQuery::Fonts => {
            let fonts = discovery.font_list()?;
            print_formatted(&fonts, output, |fonts| {
                for font in fonts {
                    println!(
                        "{:>4}  {} ({}x{}) {}",
                        font.id, font.name, font.width, font.height, font.charset
                    );
                }
            })
        }
    }
}

fn handle_device_action(control: &ControlInterface, action: DeviceAction) -> Result<()> {
    match action {
        DeviceAction::GetChannel => {
            println!("Current channel: {}", control.current_channel()?);
        }
        DeviceAction::SetChannel { channel } => {
            control.select_channel(channel)?;
            println!("Channel set to {}", channel);
        }
        DeviceAction::SelectFace { clock_id } => {
            control.select_face(clock_id)?;
            println!("Clock face {} selected", clock_id);
        }
        DeviceAction::GetFace => {
            let face = control.selected_face()?;
            println!("Clock id: {}", face.clock_id);
            println!("Brightness: {}", face.brightness);
        }
        DeviceAction::CloudChannel { gallery } => {
            control.select_cloud_channel(gallery)?;
            println!("Cloud gallery {:?} selected", gallery);
        }
        DeviceAction::Visualizer { eq_position } => {
            control.select_visualizer(eq_position)?;
            println!("Visualizer {} selected", eq_position);
        }
        DeviceAction::CustomPage { page } => {
            control.select_custom_page(page)?;
            println!("Custom page {} selected", page.index());
        }
        DeviceAction::Brightness { value } => {
            control.set_brightness(value)?;
            println!("Brightness set to {}", value);
        }
        DeviceAction::Screen { switch } => {
            control.set_screen(switch.into())?;
        }
        DeviceAction::GetSettings => {
            let settings = control.settings()?;
            println!("The device configuration:\n{:#?}", settings);
        }
        DeviceAction::SetTimeZone { time_zone } => {
            control.set_time_zone(&time_zone)?;
            println!("Time zone set to {}", time_zone);
        }
        DeviceAction::SetTime { utc } => {
            let time = utc.unwrap_or_else(Utc::now);
            control.set_system_time(time)?;
            println!("Device clock set to {}", time.to_rfc3339());
        }
        DeviceAction::GetTime => {
            let time = control.device_time()?;
            println!("UTC: {}", time.utc_time.to_rfc3339());
            println!("Local: {}", time.local_time);
        }
        DeviceAction::WeatherArea {
            longitude,
            latitude,
        } => {
            control.set_weather_area(longitude, latitude)?;
        }
        DeviceAction::TemperatureMode { mode } => control.set_temperature_mode(mode)?,
        DeviceAction::Rotation { angle } => control.set_rotation(angle)?,
        DeviceAction::Mirror { switch } => control.set_mirror_mode(switch.into())?,
        DeviceAction::HourMode { mode } => control.set_hour_mode(mode)?,
        DeviceAction::HighLight { switch } => control.set_high_light_mode(switch.into())?,
        DeviceAction::WhiteBalance { red, green, blue } => {
            control.set_white_balance(red, green, blue)?;
        }
        DeviceAction::Countdown { seconds, stopped } => {
            control.set_countdown(Duration::from_secs(seconds), !stopped)?;
        }
        DeviceAction::Stopwatch { status } => control.set_stopwatch(status)?,
        DeviceAction::Scoreboard { red, blue } => control.set_scoreboard(red, blue)?,
        DeviceAction::Noise { switch } => control.set_noise_meter(switch.into())?,
        DeviceAction::Text {
            text,
            id,
            x,
            y,
            direction,
            font,
            width,
            speed,
            color,
            align,
        } => {
            let overlay = TextOverlay {
                id,
                x,
                y,
                direction,
                font,
                width,
                text,
                speed,
                color,
                align,
            };
            control.send_text(&overlay)?;
        }
        DeviceAction::ClearText => control.clear_text()?,
        DeviceAction::PlayGif { source, name } => control.play_stored_gif(source, &name)?,
        DeviceAction::SendGif {
            path,
            pic_id,
            reset,
        } => {
            let gif = GifAnimation::open(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            if reset {
                control.reset_animation_pic_id()?;
            }
            control.send_animation_gif(pic_id, &gif)?;
            println!("Uploaded {} frames from {}", gif.len(), path.display());
        }
        DeviceAction::SendImages {
            paths,
            size,
            delay,
            pic_id,
            reset,
        } => {
            let size = FrameSize::for_side(size)?;
            let images = paths
                .iter()
                .map(|path| {
                    image::open(path)
                        .map(|image| fit_to_frame(&image, size))
                        .with_context(|| format!("Failed to read {}", path.display()))
                })
                .collect::<Result<Vec<_>>>()?;
            if images.is_empty() {
                return Err(anyhow!("At least one image must be specified"));
            }
            if reset {
                control.reset_animation_pic_id()?;
            }
            let delays = vec![delay; images.len()];
            control.send_animation_images(pic_id, &delays, &images)?;
            println!("Uploaded {} frames", images.len());
        }
        DeviceAction::ResetPicId => control.reset_animation_pic_id()?,
        DeviceAction::GetPicId => {
            println!("Animation pic id: {}", control.animation_pic_id()?);
        }
    }

    Ok(())
}
