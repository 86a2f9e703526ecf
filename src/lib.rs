#![no_std]

pub mod color;
pub mod config;
pub mod display;
pub mod frame_scheduler;
pub mod geometry;
pub mod host;
pub mod lights;
pub mod registry;
pub mod scene;
pub mod snow;
pub mod status;

pub use color::{ColorScheme, Hsv, LightColors, Rgb};
pub use config::{SETTINGS_FORM, StoredConfig, TreeDisplayConfig};
pub use display::{Error, MODULE_ID, NoBacklight, SetupError, TickOutcome, TreeDisplay};
pub use frame_scheduler::{RedrawScheduler, animation_interval};
pub use geometry::{TreeLayout, layout};
pub use host::{Host, HostModule, PinConflict, StatusSummary};
pub use lights::LightSet;
pub use registry::ModuleRegistry;
pub use scene::{DisplayMode, Scene};
pub use snow::SnowField;
pub use status::{StatusMirror, StatusSnapshot};

pub use embassy_time::{Duration, Instant};
