pub use smart_leds::hsv::hsv2rgb;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888};

use crate::color::Rgb;

/// Create an RGB color from a u32 value (0xWWRRGGBB format, white ignored)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack a 24-bit color into the panel's 16-bit format
#[inline]
pub fn to_rgb565(color: Rgb) -> Rgb565 {
    Rgb565::from(Rgb888::new(color.r, color.g, color.b))
}
