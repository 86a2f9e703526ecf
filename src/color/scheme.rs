//! Light color schemes
//!
//! Maps a light's color class to a concrete color. The mapping is pure:
//! everything it depends on (rotating hue, host color) is passed in.

use super::{Hsv, Rgb, hsv2rgb, palette, rgb_from_u32};

const SCHEME_NAME_CLASSIC: &str = "Classic";
const SCHEME_NAME_RAINBOW: &str = "Rainbow";
const SCHEME_NAME_WLED_SYNC: &str = "WLED Sync";

const SCHEME_ID_CLASSIC: u8 = 0;
const SCHEME_ID_RAINBOW: u8 = 1;
const SCHEME_ID_WLED_SYNC: u8 = 2;

/// Hue distance between neighbouring color classes
const CLASS_HUE_OFFSET: u8 = 30;
const RAINBOW_SATURATION: u8 = 200;
const RAINBOW_VALUE: u8 = 200;

/// Policy for turning a light's color class into a color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorScheme {
    /// Alternating red and green
    #[default]
    Classic = SCHEME_ID_CLASSIC,
    /// Hue rotating with the animation
    Rainbow = SCHEME_ID_RAINBOW,
    /// Primary color of the host's active segment
    WledSync = SCHEME_ID_WLED_SYNC,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 3] = [Self::Classic, Self::Rainbow, Self::WledSync];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            SCHEME_ID_CLASSIC => Self::Classic,
            SCHEME_ID_RAINBOW => Self::Rainbow,
            SCHEME_ID_WLED_SYNC => Self::WledSync,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classic => SCHEME_NAME_CLASSIC,
            Self::Rainbow => SCHEME_NAME_RAINBOW,
            Self::WledSync => SCHEME_NAME_WLED_SYNC,
        }
    }
}

/// Everything a scheme may read when resolving a color, captured per repaint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightColors {
    pub scheme: ColorScheme,
    /// Rotating hue counter (0-255)
    pub hue: u8,
    /// Host primary color, 0xWWRRGGBB
    pub live_color: u32,
}

impl LightColors {
    pub fn resolve(&self, color_index: u8) -> Rgb {
        resolve(color_index, self.scheme, self.hue, self.live_color)
    }
}

/// Resolve the color of a light in the given color class
pub fn resolve(color_index: u8, scheme: ColorScheme, hue: u8, live_color: u32) -> Rgb {
    match scheme {
        ColorScheme::Classic => {
            if color_index % 2 == 0 {
                palette::RED
            } else {
                palette::GREEN
            }
        }
        ColorScheme::Rainbow => hsv2rgb(Hsv {
            hue: hue.wrapping_add(color_index.wrapping_mul(CLASS_HUE_OFFSET)),
            sat: RAINBOW_SATURATION,
            val: RAINBOW_VALUE,
        }),
        ColorScheme::WledSync => rgb_from_u32(live_color),
    }
}

/// Resolve against a raw scheme id, falling back to classic red when the id
/// is unknown.
pub fn resolve_raw(color_index: u8, scheme: u8, hue: u8, live_color: u32) -> Rgb {
    ColorScheme::from_raw(scheme)
        .map_or(palette::RED, |scheme| resolve(color_index, scheme, hue, live_color))
}
