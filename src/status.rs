//! Mirror of the host status shown on screen.
//!
//! The mirror only exists for change detection: a repaint is needed whenever
//! the host state differs from what was last drawn.

use core::net::Ipv4Addr;

use heapless::String;

/// Longest network name a station can advertise.
pub const SSID_CAPACITY: usize = 32;

/// Host status fields that trigger a repaint when they change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub ssid: String<SSID_CAPACITY>,
    pub ip: Ipv4Addr,
    /// Device brightness (0-255)
    pub brightness: u8,
    /// Active effect id
    pub mode: u8,
    pub palette: u8,
    pub effect_speed: u8,
    pub effect_intensity: u8,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            ssid: String::new(),
            ip: Ipv4Addr::UNSPECIFIED,
            brightness: 0,
            mode: 0,
            palette: 0,
            effect_speed: 0,
            effect_intensity: 0,
        }
    }
}

impl StatusSnapshot {
    /// Set the network name, dropping characters that do not fit
    #[must_use]
    pub fn with_ssid(mut self, ssid: &str) -> Self {
        self.ssid.clear();
        for ch in ssid.chars() {
            if self.ssid.push(ch).is_err() {
                break;
            }
        }
        self
    }

    #[must_use]
    pub fn with_ip(mut self, ip: Ipv4Addr) -> Self {
        self.ip = ip;
        self
    }

    #[must_use]
    pub fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    /// Set the active effect, palette, speed and intensity of the main segment
    #[must_use]
    pub fn with_effect(mut self, mode: u8, palette: u8, speed: u8, intensity: u8) -> Self {
        self.mode = mode;
        self.palette = palette;
        self.effect_speed = speed;
        self.effect_intensity = intensity;
        self
    }
}

/// Last snapshot that made it to the screen
#[derive(Debug, Clone, Default)]
pub struct StatusMirror {
    known: StatusSnapshot,
}

impl StatusMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the host state differs from the last drawn one
    pub fn has_changed(&self, current: &StatusSnapshot) -> bool {
        self.known != *current
    }

    /// Record the state that is about to be drawn
    pub fn update(&mut self, current: StatusSnapshot) {
        self.known = current;
    }

    pub fn known(&self) -> &StatusSnapshot {
        &self.known
    }
}
