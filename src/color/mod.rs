mod scheme;
mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use scheme::{ColorScheme, LightColors, resolve, resolve_raw};
pub use utils::{hsv2rgb, rgb_from_u32, to_rgb565};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Fixed palette shared by the scene layers.
pub mod palette {
    use super::Rgb;

    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    pub const DARK_GREEN: Rgb = Rgb { r: 0, g: 128, b: 0 };
    pub const BROWN: Rgb = Rgb {
        r: 150,
        g: 75,
        b: 0,
    };
    pub const CYAN: Rgb = Rgb {
        r: 0,
        g: 255,
        b: 255,
    };
    pub const YELLOW: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 0,
    };
    pub const ORANGE: Rgb = Rgb {
        r: 255,
        g: 180,
        b: 0,
    };
}
