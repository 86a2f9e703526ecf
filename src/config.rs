//! Display settings and their persisted form.
//!
//! [`TreeDisplayConfig`] is always valid. [`StoredConfig`] is what the host
//! writes to and reads from its settings file; every field is optional so
//! that missing or malformed keys fall back independently.

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::ColorScheme;
use crate::scene::DisplayMode;

/// Name of the settings section owned by this module.
pub const CONFIG_SECTION: &str = "ChristmasTree";

pub const MIN_ANIMATION_SPEED: u8 = 1;
pub const MAX_ANIMATION_SPEED: u8 = 10;
pub const DEFAULT_ANIMATION_SPEED: u8 = 5;

/// Longest backlight timeout in seconds.
pub const MAX_BACKLIGHT_TIMEOUT: u16 = 3600;
pub const DEFAULT_BACKLIGHT_TIMEOUT: u16 = 300;

/// Display control pins, recorded for diagnostics only
///
/// A line that is not wired is recorded as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    pub cs: i8,
    pub dc: i8,
    pub rst: i8,
    pub backlight: i8,
}

impl PinMap {
    /// Pins of the LilyGO T-Display S3 setup
    pub const T_DISPLAY_S3: Self = Self {
        cs: 5,
        dc: 4,
        rst: 5,
        backlight: 38,
    };

    pub const fn to_array(self) -> [i8; 4] {
        [self.cs, self.dc, self.rst, self.backlight]
    }

    pub const fn from_array(pins: [i8; 4]) -> Self {
        Self {
            cs: pins[0],
            dc: pins[1],
            rst: pins[2],
            backlight: pins[3],
        }
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self::T_DISPLAY_S3
    }
}

/// Validated display settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDisplayConfig {
    pub enabled: bool,
    pub display_mode: DisplayMode,
    pub color_scheme: ColorScheme,
    pub show_in_december_only: bool,
    pub pins: PinMap,
    animation_speed: u8,
    backlight_timeout: u16,
}

impl Default for TreeDisplayConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            display_mode: DisplayMode::Hybrid,
            color_scheme: ColorScheme::Classic,
            show_in_december_only: false,
            pins: PinMap::default(),
            animation_speed: DEFAULT_ANIMATION_SPEED,
            backlight_timeout: DEFAULT_BACKLIGHT_TIMEOUT,
        }
    }
}

impl TreeDisplayConfig {
    /// Animation speed (1-10)
    pub const fn animation_speed(&self) -> u8 {
        self.animation_speed
    }

    /// Set the animation speed, clamped to 1-10
    pub fn set_animation_speed(&mut self, speed: u8) {
        self.animation_speed = speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
    }

    /// Backlight timeout in seconds, 0 means never
    pub const fn backlight_timeout_secs(&self) -> u16 {
        self.backlight_timeout
    }

    /// Set the backlight timeout in seconds, clamped to one hour
    pub fn set_backlight_timeout_secs(&mut self, seconds: u16) {
        self.backlight_timeout = seconds.min(MAX_BACKLIGHT_TIMEOUT);
    }

    /// Idle time before the backlight goes off, `None` if it never does
    pub fn backlight_timeout(&self) -> Option<Duration> {
        (self.backlight_timeout > 0).then(|| Duration::from_secs(u64::from(self.backlight_timeout)))
    }

    /// Persisted form of these settings
    pub fn to_stored(&self) -> StoredConfig {
        StoredConfig {
            enabled: Some(self.enabled),
            display_mode: Some(i32::from(self.display_mode.as_raw())),
            animation_speed: Some(i32::from(self.animation_speed)),
            color_scheme: Some(i32::from(self.color_scheme.as_raw())),
            show_in_december_only: Some(self.show_in_december_only),
            backlight_timeout: Some(i32::from(self.backlight_timeout)),
            pin: Some(self.pins.to_array()),
        }
    }

    /// Apply persisted settings
    ///
    /// Missing fields keep their current value, out-of-range values are
    /// clamped. Returns `false` if any field was missing.
    pub fn load(&mut self, stored: &StoredConfig) -> bool {
        let mut complete = true;

        match stored.enabled {
            Some(enabled) => self.enabled = enabled,
            None => complete = false,
        }
        match stored.display_mode {
            Some(raw) => self.display_mode = clamp_display_mode(raw),
            None => complete = false,
        }
        match stored.animation_speed {
            Some(raw) => self.animation_speed = clamp_animation_speed(raw),
            None => complete = false,
        }
        match stored.color_scheme {
            Some(raw) => self.color_scheme = clamp_color_scheme(raw),
            None => complete = false,
        }
        match stored.show_in_december_only {
            Some(december_only) => self.show_in_december_only = december_only,
            None => complete = false,
        }
        match stored.backlight_timeout {
            Some(raw) => self.backlight_timeout = clamp_backlight_timeout(raw),
            None => complete = false,
        }
        if let Some(pins) = stored.pin {
            self.pins = PinMap::from_array(pins);
        }

        #[cfg(feature = "esp32-log")]
        if !complete {
            println!("[TreeDisplayConfig.load] incomplete config, defaults used for missing keys");
        }

        complete
    }
}

fn clamp_display_mode(raw: i32) -> DisplayMode {
    u8::try_from(raw)
        .ok()
        .and_then(DisplayMode::from_raw)
        .unwrap_or(DisplayMode::Hybrid)
}

fn clamp_color_scheme(raw: i32) -> ColorScheme {
    u8::try_from(raw)
        .ok()
        .and_then(ColorScheme::from_raw)
        .unwrap_or(ColorScheme::Classic)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_animation_speed(raw: i32) -> u8 {
    raw.clamp(i32::from(MIN_ANIMATION_SPEED), i32::from(MAX_ANIMATION_SPEED)) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_backlight_timeout(raw: i32) -> u16 {
    raw.clamp(0, i32::from(MAX_BACKLIGHT_TIMEOUT)) as u16
}

/// Settings as persisted by the host
///
/// Numbers are kept wide so that out-of-range values survive parsing and can
/// be clamped instead of rejecting the whole section. A key holding a value
/// of the wrong type reads as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredConfig {
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::flag"
    )]
    pub enabled: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::number"
    )]
    pub display_mode: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::number"
    )]
    pub animation_speed: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::number"
    )]
    pub color_scheme: Option<i32>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::flag"
    )]
    pub show_in_december_only: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::number"
    )]
    pub backlight_timeout: Option<i32>,
    /// CS, DC, RST, BL
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::pins"
    )]
    pub pin: Option<[i8; 4]>,
}

/// Per-field readers that never fail on a well-formed document
mod lenient {
    use core::fmt;

    use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

    /// Any value, reduced to what a setting can use
    enum Loose {
        Flag(bool),
        Number(i64),
        Pins([i8; 4]),
        Other,
    }

    impl<'de> Deserialize<'de> for Loose {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_any(LooseVisitor)
        }
    }

    struct LooseVisitor;

    impl<'de> Visitor<'de> for LooseVisitor {
        type Value = Loose;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("any value")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Loose, E> {
            Ok(Loose::Flag(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Loose, E> {
            Ok(Loose::Number(value))
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Loose, E> {
            Ok(Loose::Number(i64::try_from(value).unwrap_or(i64::MAX)))
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Loose, E> {
            Ok(Loose::Other)
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Loose, E> {
            Ok(Loose::Other)
        }

        fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<Loose, E> {
            Ok(Loose::Other)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Loose, E> {
            Ok(Loose::Other)
        }

        fn visit_none<E: de::Error>(self) -> Result<Loose, E> {
            Ok(Loose::Other)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Loose, D::Error> {
            Loose::deserialize(deserializer)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Loose, A::Error> {
            let mut pins = [0i8; 4];
            let mut count = 0;
            let mut valid = true;
            while let Some(item) = seq.next_element::<Loose>()? {
                match (item, pins.get_mut(count)) {
                    (Loose::Number(raw), Some(slot)) => match i8::try_from(raw) {
                        Ok(pin) => *slot = pin,
                        Err(_) => valid = false,
                    },
                    _ => valid = false,
                }
                count += 1;
            }
            Ok(if valid && count == pins.len() {
                Loose::Pins(pins)
            } else {
                Loose::Other
            })
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Loose, A::Error> {
            while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
            Ok(Loose::Other)
        }
    }

    pub(super) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(match Loose::deserialize(deserializer)? {
            Loose::Flag(value) => Some(value),
            _ => None,
        })
    }

    /// Integers saturate to the `i32` range so that clamping still applies
    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
        Ok(match Loose::deserialize(deserializer)? {
            Loose::Number(value) => Some(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32),
            _ => None,
        })
    }

    pub(super) fn pins<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<[i8; 4]>, D::Error> {
        Ok(match Loose::deserialize(deserializer)? {
            Loose::Pins(pins) => Some(pins),
            _ => None,
        })
    }
}

/// One input on the host's settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Dropdown {
        key: &'static str,
        label: &'static str,
        options: &'static [(&'static str, u8)],
    },
    Slider {
        key: &'static str,
        label: &'static str,
        min: u16,
        max: u16,
        default: u16,
    },
    Checkbox {
        key: &'static str,
        label: &'static str,
        default: bool,
    },
    Number {
        key: &'static str,
        label: &'static str,
        min: u16,
        max: u16,
        default: u16,
    },
    /// Read-only entry of the `pin` array
    PinInfo { index: u8, label: &'static str },
}

impl FormField {
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Dropdown { key, .. }
            | Self::Slider { key, .. }
            | Self::Checkbox { key, .. }
            | Self::Number { key, .. } => *key,
            Self::PinInfo { .. } => "pin",
        }
    }
}

/// Settings page layout, in display order
pub const SETTINGS_FORM: &[FormField] = &[
    FormField::Dropdown {
        key: "displayMode",
        label: "Display mode",
        options: &[("Full Tree", 0), ("Hybrid", 1), ("Info", 2)],
    },
    FormField::Slider {
        key: "animationSpeed",
        label: "Animation speed",
        min: MIN_ANIMATION_SPEED as u16,
        max: MAX_ANIMATION_SPEED as u16,
        default: DEFAULT_ANIMATION_SPEED as u16,
    },
    FormField::Dropdown {
        key: "colorScheme",
        label: "Color scheme",
        options: &[("Classic", 0), ("Rainbow", 1), ("WLED Sync", 2)],
    },
    FormField::Checkbox {
        key: "showInDecemberOnly",
        label: "Only show in December",
        default: false,
    },
    FormField::Number {
        key: "backlightTimeout",
        label: "Backlight timeout (seconds, 0=never)",
        min: 0,
        max: MAX_BACKLIGHT_TIMEOUT,
        default: DEFAULT_BACKLIGHT_TIMEOUT,
    },
    FormField::PinInfo {
        index: 0,
        label: "SPI CS",
    },
    FormField::PinInfo {
        index: 1,
        label: "SPI DC",
    },
    FormField::PinInfo {
        index: 2,
        label: "SPI RST",
    },
    FormField::PinInfo {
        index: 3,
        label: "SPI BL",
    },
];
