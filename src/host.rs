//! Contract between the display module and the host firmware.
//!
//! [`Host`] is what the module reads from the firmware; [`HostModule`] is the
//! lifecycle the firmware drives.

use core::fmt;

use embassy_time::Instant;
use heapless::Vec;

use crate::config::StoredConfig;
use crate::scene::DisplayMode;
use crate::status::StatusSnapshot;

const SUMMARY_KEY_STATE: &str = "Christmas Tree";
const SUMMARY_KEY_MODE: &str = "Tree Mode";
const SUMMARY_ENABLED: &str = "enabled";
const SUMMARY_DISABLED: &str = "disabled";

/// Error returned when a pin is already owned by someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinConflict(pub u8);

impl fmt::Display for PinConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pin {} is already allocated", self.0)
    }
}

/// Firmware state and services consumed by the display
pub trait Host {
    /// Check if the network is up
    fn is_connected(&self) -> bool;

    /// Current values of the mirrored status fields
    ///
    /// In access-point mode this reports the AP name and address.
    fn status(&self) -> StatusSnapshot;

    /// Primary color of the active segment (0xWWRRGGBB)
    fn primary_color(&self) -> u32;

    /// Current signal strength in dBm
    fn rssi(&self) -> i32;

    /// Map a signal strength to a quality percentage (0-100)
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn signal_quality(&self, rssi: i32) -> u8 {
        (2 * (rssi.clamp(-100, -50) + 100)) as u8
    }

    /// Display name of an effect
    fn effect_name(&self, mode: u8) -> &str;

    /// Current month (1-12), `None` if the clock is not set
    fn month(&self) -> Option<u8>;

    /// Claim the given pins for the display
    fn allocate_pins(&mut self, pins: &[u8]) -> Result<(), PinConflict>;
}

/// Two-entry summary shown on the host's info page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub enabled: bool,
    /// Active mode, reported only when enabled
    pub mode: Option<DisplayMode>,
}

impl StatusSummary {
    pub fn new(enabled: bool, mode: DisplayMode) -> Self {
        Self {
            enabled,
            mode: enabled.then_some(mode),
        }
    }

    /// Key/value pairs in display order
    pub fn entries(&self) -> Vec<(&'static str, &'static str), 2> {
        let mut entries = Vec::new();
        let state = if self.enabled {
            SUMMARY_ENABLED
        } else {
            SUMMARY_DISABLED
        };
        let _ = entries.push((SUMMARY_KEY_STATE, state));
        if let Some(mode) = self.mode {
            let _ = entries.push((SUMMARY_KEY_MODE, mode.as_str()));
        }
        entries
    }
}

/// Lifecycle the host drives for a registered module
pub trait HostModule<H: Host> {
    /// Acquire hardware and draw the first screen
    fn setup(&mut self, host: &mut H);

    /// Do bounded work for the current time and return
    fn tick(&mut self, host: &H, now: Instant);

    /// Settings to persist
    fn serialize_config(&self) -> StoredConfig;

    /// Apply persisted settings, `None` when the host has no section
    ///
    /// Returns `false` if any field was missing.
    fn deserialize_config(&mut self, stored: Option<&StoredConfig>) -> bool;

    fn describe_status(&self) -> StatusSummary;

    /// Unique module id
    fn id(&self) -> u16;
}
