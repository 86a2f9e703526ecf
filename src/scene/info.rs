use core::fmt::Write;
use core::net::Ipv4Addr;

use embedded_graphics::{
    Drawable,
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Point},
    text::{Baseline, Text},
};
use heapless::String;

use crate::color::{Rgb, palette, to_rgb565};

const LINE_PITCH: i32 = 12;
const SIGNAL_X: i32 = 100;
const MESSAGE_ORIGIN: Point = Point::new(45, 150);

const SSID_MAX_CHARS: usize = 25;
const SSID_KEPT_CHARS: usize = SSID_MAX_CHARS - ELLIPSIS.len();
const EFFECT_NAME_MAX_CHARS: usize = 18;
const ELLIPSIS: &str = "...";

const SIGNAL_POOR: u8 = 10;
const SIGNAL_FAIR: u8 = 25;

/// Host status shown in the info panel
#[derive(Debug, Clone, Copy)]
pub struct InfoPanel<'a> {
    pub ssid: &'a str,
    pub ip: Ipv4Addr,
    /// Device brightness (0-255)
    pub brightness: u8,
    /// Signal quality (0-100)
    pub signal_quality: u8,
    pub effect_name: &'a str,
}

/// Longest prefix of `text` holding at most `max_chars` characters
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Color coding of the signal readout
pub const fn signal_color(quality: u8) -> Rgb {
    if quality < SIGNAL_POOR {
        palette::RED
    } else if quality < SIGNAL_FAIR {
        palette::ORANGE
    } else {
        palette::GREEN
    }
}

fn small_text(color: Rgb) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(&FONT_6X10, to_rgb565(color))
}

/// Draw the status lines starting at `top`
pub fn draw_info_panel<D>(target: &mut D, top: i32, info: &InfoPanel<'_>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut ssid: String<40> = String::new();
    if info.ssid.chars().count() > SSID_MAX_CHARS {
        let _ = ssid.push_str(truncate_chars(info.ssid, SSID_KEPT_CHARS));
        let _ = ssid.push_str(ELLIPSIS);
    } else {
        let _ = ssid.push_str(info.ssid);
    }
    Text::with_baseline(&ssid, Point::new(0, top), small_text(palette::GREEN), Baseline::Top)
        .draw(target)?;

    let mut line: String<24> = String::new();
    let _ = write!(line, "IP: {}", info.ip);
    Text::with_baseline(
        &line,
        Point::new(0, top + LINE_PITCH),
        small_text(palette::WHITE),
        Baseline::Top,
    )
    .draw(target)?;

    let row = top + 2 * LINE_PITCH;
    line.clear();
    let _ = write!(line, "Bri: {}%", u16::from(info.brightness) * 100 / 255);
    Text::with_baseline(&line, Point::new(0, row), small_text(palette::CYAN), Baseline::Top)
        .draw(target)?;

    let next = Text::with_baseline(
        "Sig: ",
        Point::new(SIGNAL_X, row),
        small_text(palette::CYAN),
        Baseline::Top,
    )
    .draw(target)?;
    line.clear();
    let _ = write!(line, "{}%", info.signal_quality);
    Text::with_baseline(
        &line,
        next,
        small_text(signal_color(info.signal_quality)),
        Baseline::Top,
    )
    .draw(target)?;

    Text::with_baseline(
        truncate_chars(info.effect_name, EFFECT_NAME_MAX_CHARS),
        Point::new(0, top + 3 * LINE_PITCH),
        small_text(palette::YELLOW),
        Baseline::Top,
    )
    .draw(target)?;

    Ok(())
}

/// Draw a single large status line
pub fn draw_message<D>(target: &mut D, text: &str) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = MonoTextStyle::new(&FONT_10X20, to_rgb565(palette::WHITE));
    Text::with_baseline(text, MESSAGE_ORIGIN, style, Baseline::Top).draw(target)?;
    Ok(())
}
