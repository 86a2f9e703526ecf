//! Twinkling tree lights
//!
//! Lights sit at fixed sockets computed by the geometry generator. Every
//! animation step each light independently flips with a probability derived
//! from the configured speed.

use embedded_graphics::{
    Drawable,
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Point, Primitive},
    primitives::{Circle, PrimitiveStyle},
};
use heapless::Vec;
use rand::{Rng, RngCore};

use crate::color::{LightColors, palette, to_rgb565};
use crate::geometry::LightSocket;

const LIT_RADIUS: u32 = 3;
const GLOW_RADIUS: u32 = 4;
const DIM_RADIUS: u32 = 2;

/// A light on the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLight {
    pub position: Point,
    pub on: bool,
    /// Color class, see [`crate::color::resolve`]
    pub color_index: u8,
}

/// Chance in percent that a light flips during one animation step
pub const fn toggle_percent(speed: u8) -> u8 {
    let percent = speed.saturating_mul(2);
    if percent > 100 { 100 } else { percent }
}

fn circle(center: Point, radius: u32) -> Circle {
    Circle::with_center(center, 2 * radius + 1)
}

/// Fixed-capacity set of tree lights
#[derive(Debug, Clone, Default)]
pub struct LightSet<const N: usize> {
    lights: Vec<TreeLight, N>,
}

impl<const N: usize> LightSet<N> {
    pub const fn new() -> Self {
        Self { lights: Vec::new() }
    }

    /// Place a light in every socket with a random initial state
    ///
    /// Sockets beyond the capacity are ignored.
    pub fn initialize<R: RngCore>(&mut self, sockets: &[LightSocket], rng: &mut R) {
        self.lights.clear();
        for socket in sockets {
            let light = TreeLight {
                position: socket.position,
                on: rng.gen_bool(0.5),
                color_index: socket.color_index,
            };
            if self.lights.push(light).is_err() {
                break;
            }
        }
    }

    /// Randomly flip lights, faster churn for higher speed settings
    pub fn tick<R: RngCore>(&mut self, speed: u8, rng: &mut R) {
        let threshold = toggle_percent(speed);
        for light in &mut self.lights {
            if rng.gen_range(0..100u8) < threshold {
                light.on = !light.on;
            }
        }
    }

    /// Draw lit lights with a glow ring and unlit ones as dim markers
    pub fn draw<D>(&self, target: &mut D, colors: &LightColors) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let dim = PrimitiveStyle::with_fill(to_rgb565(palette::DARK_GREEN));
        for light in &self.lights {
            if light.on {
                let color = to_rgb565(colors.resolve(light.color_index));
                circle(light.position, LIT_RADIUS)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(target)?;
                circle(light.position, GLOW_RADIUS)
                    .into_styled(PrimitiveStyle::with_stroke(color, 1))
                    .draw(target)?;
            } else {
                circle(light.position, DIM_RADIUS)
                    .into_styled(dim)
                    .draw(target)?;
            }
        }
        Ok(())
    }

    pub fn lights(&self) -> &[TreeLight] {
        &self.lights
    }

    pub fn lit_count(&self) -> usize {
        self.lights.iter().filter(|light| light.on).count()
    }
}
