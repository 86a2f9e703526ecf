#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::net::Ipv4Addr;
use std::rc::Rc;

use christmas_tree_display::{
    Host, Instant, PinConflict, StatusSnapshot, TreeDisplay, TreeDisplayConfig,
};
use embedded_graphics::{
    Pixel,
    pixelcolor::Rgb565,
    prelude::{DrawTarget, OriginDimensions, Point, RgbColor, Size},
};
use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};
use rand::{SeedableRng, rngs::StdRng};

pub const WIDTH: u32 = 170;
pub const HEIGHT: u32 = 320;

/// Frame buffer that counts every draw request
pub struct RecordingDisplay {
    size: Size,
    pixels: Vec<Rgb565>,
    pub draw_calls: usize,
    pub clears: usize,
}

impl RecordingDisplay {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb565::BLACK; (size.width * size.height) as usize],
            draw_calls: 0,
            clears: 0,
        }
    }

    pub fn t_display_s3() -> Self {
        Self::new(Size::new(WIDTH, HEIGHT))
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.index(Point::new(x, y)).map(|i| self.pixels[i])
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (w, h) = (self.size.width as i32, self.size.height as i32);
        if point.x < 0 || point.y < 0 || point.x >= w || point.y >= h {
            return None;
        }
        Some((point.y * w + point.x) as usize)
    }
}

impl OriginDimensions for RecordingDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for RecordingDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.draw_calls += 1;
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.draw_calls += 1;
        self.clears += 1;
        self.pixels.fill(color);
        Ok(())
    }
}

/// Backlight pin that remembers every level it was driven to
#[derive(Clone, Default)]
pub struct RecordingPin {
    history: Rc<RefCell<Vec<bool>>>,
}

impl RecordingPin {
    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }

    pub fn level(&self) -> Option<bool> {
        self.history.borrow().last().copied()
    }
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.history.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.history.borrow_mut().push(true);
        Ok(())
    }
}

/// Error reported by [`FailingPin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinFailure;

impl digital::Error for PinFailure {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// Backlight pin that rejects the selected levels
#[derive(Clone, Copy, Default)]
pub struct FailingPin {
    pub fail_high: bool,
    pub fail_low: bool,
}

impl ErrorType for FailingPin {
    type Error = PinFailure;
}

impl OutputPin for FailingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        if self.fail_low { Err(PinFailure) } else { Ok(()) }
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if self.fail_high { Err(PinFailure) } else { Ok(()) }
    }
}

/// Scriptable firmware state
pub struct FakeHost {
    pub connected: bool,
    pub status: StatusSnapshot,
    pub primary_color: u32,
    pub rssi: i32,
    pub month: Option<u8>,
    pub taken_pins: Vec<u8>,
    pub allocated_pins: Vec<u8>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            connected: true,
            status: StatusSnapshot::default()
                .with_ssid("HomeNet")
                .with_ip(Ipv4Addr::new(192, 168, 1, 20))
                .with_brightness(128)
                .with_effect(0, 0, 128, 128),
            primary_color: 0x00FF_8800,
            rssi: -60,
            month: Some(12),
            taken_pins: Vec::new(),
            allocated_pins: Vec::new(),
        }
    }
}

impl Host for FakeHost {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn status(&self) -> StatusSnapshot {
        self.status.clone()
    }

    fn primary_color(&self) -> u32 {
        self.primary_color
    }

    fn rssi(&self) -> i32 {
        self.rssi
    }

    fn effect_name(&self, mode: u8) -> &str {
        match mode {
            0 => "Solid",
            1 => "Blink",
            2 => "Twinkling Christmas Candle Glow",
            _ => "RSVD",
        }
    }

    fn month(&self) -> Option<u8> {
        self.month
    }

    fn allocate_pins(&mut self, pins: &[u8]) -> Result<(), PinConflict> {
        if let Some(pin) = pins.iter().find(|pin| self.taken_pins.contains(pin)) {
            return Err(PinConflict(*pin));
        }
        self.allocated_pins.extend_from_slice(pins);
        Ok(())
    }
}

pub type TestDisplay = TreeDisplay<RecordingDisplay, RecordingPin, StdRng>;

pub fn enabled_config() -> TreeDisplayConfig {
    let mut config = TreeDisplayConfig::default();
    config.enabled = true;
    config
}

/// Build a display module and the handle to its backlight pin
pub fn build(config: TreeDisplayConfig) -> (TestDisplay, RecordingPin) {
    let pin = RecordingPin::default();
    let display = TreeDisplay::new(
        RecordingDisplay::t_display_s3(),
        Some(pin.clone()),
        StdRng::seed_from_u64(7),
        config,
    );
    (display, pin)
}

/// Build a display module whose backlight pin fails as configured
pub fn build_with_pin(
    config: TreeDisplayConfig,
    pin: FailingPin,
) -> TreeDisplay<RecordingDisplay, FailingPin, StdRng> {
    TreeDisplay::new(
        RecordingDisplay::t_display_s3(),
        Some(pin),
        StdRng::seed_from_u64(7),
        config,
    )
}

pub fn ms(millis: u64) -> Instant {
    Instant::from_millis(millis)
}
