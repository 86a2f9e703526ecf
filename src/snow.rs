//! Falling snow particles
//!
//! Fixed-capacity particle field. The display is not double buffered, so each
//! step erases the old footprint of every flake before drawing the new one.

use embedded_graphics::{
    Drawable,
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{Circle, PrimitiveStyle, Rectangle},
};
use rand::{Rng, RngCore};

use crate::color::{palette, to_rgb565};

/// Number of flakes in the default field.
pub const MAX_SNOWFLAKES: usize = 30;
/// Y a flake restarts from after leaving the bottom edge.
pub const RESPAWN_Y: i32 = -5;

const MIN_SPEED: i32 = 1;
const MAX_SPEED: i32 = 4;
const MIN_SIZE: i32 = 1;
const MAX_SIZE: i32 = 3;

/// A single snow particle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Snowflake {
    pub x: i32,
    pub y: i32,
    /// Pixels per step
    pub speed: i32,
    /// Radius in pixels
    pub size: i32,
}

impl Snowflake {
    #[allow(clippy::cast_sign_loss)]
    fn footprint(&self) -> Rectangle {
        let side = self.size.max(0) as u32;
        Rectangle::new(Point::new(self.x, self.y), Size::new(side, side))
    }

    #[allow(clippy::cast_sign_loss)]
    fn shape(&self) -> Circle {
        let diameter = 2 * self.size.max(0) as u32 + 1;
        Circle::with_center(Point::new(self.x, self.y), diameter)
    }
}

/// Snow particles over the whole display
#[derive(Debug, Clone)]
pub struct SnowField<const N: usize> {
    flakes: [Snowflake; N],
    width: i32,
    height: i32,
}

impl<const N: usize> SnowField<N> {
    /// Create an unseeded field for a display of the given size
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(size: Size) -> Self {
        Self {
            flakes: [Snowflake::default(); N],
            width: (size.width as i32).max(1),
            height: size.height as i32,
        }
    }

    /// Scatter every flake at a random position with random speed and size
    pub fn seed<R: RngCore>(&mut self, rng: &mut R) {
        let (width, height) = (self.width, self.height.max(1));
        for flake in &mut self.flakes {
            *flake = Snowflake {
                x: rng.gen_range(0..width),
                y: rng.gen_range(0..height),
                speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
                size: rng.gen_range(MIN_SIZE..MAX_SIZE),
            };
        }
    }

    /// Move every flake one step down with a little sideways jitter
    pub fn advance<R: RngCore>(&mut self, rng: &mut R) {
        for flake in &mut self.flakes {
            flake.y += flake.speed;
            flake.x += rng.gen_range(-1..=1);

            if flake.y > self.height {
                flake.y = RESPAWN_Y;
                flake.x = rng.gen_range(0..self.width);
            }
            if flake.x < 0 {
                flake.x = self.width - 1;
            }
            if flake.x >= self.width {
                flake.x = 0;
            }
        }
    }

    /// Paint the current footprint of every flake with the background
    pub fn erase<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let background = to_rgb565(palette::BLACK);
        for flake in &self.flakes {
            target.fill_solid(&flake.footprint(), background)?;
        }
        Ok(())
    }

    /// Draw every flake at its current position
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let style = PrimitiveStyle::with_fill(to_rgb565(palette::WHITE));
        for flake in &self.flakes {
            flake.shape().into_styled(style).draw(target)?;
        }
        Ok(())
    }

    /// Erase, advance and redraw the field
    pub fn step<D, R>(&mut self, target: &mut D, rng: &mut R) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        R: RngCore,
    {
        self.erase(target)?;
        self.advance(rng);
        self.draw(target)
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    pub const fn width(&self) -> i32 {
        self.width
    }
}
