//! Scene composition
//!
//! Combines the tree, lights, star, snow and info panel into one of the
//! display modes. Every render starts from a cleared screen.

mod info;
mod tree;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Size},
};
use rand::RngCore;

pub use info::{InfoPanel, draw_info_panel, draw_message, signal_color, truncate_chars};
pub use tree::{draw_star, draw_tree, draw_tree_icon, star_pulse};

use crate::color::{LightColors, palette, to_rgb565};
use crate::geometry::{MAX_LIGHTS, TreeLayout, layout};
use crate::lights::LightSet;
use crate::snow::{MAX_SNOWFLAKES, SnowField};

const MODE_NAME_FULL_TREE: &str = "Full";
const MODE_NAME_HYBRID: &str = "Hybrid";
const MODE_NAME_INFO: &str = "Info";

const MODE_ID_FULL_TREE: u8 = 0;
const MODE_ID_HYBRID: u8 = 1;
const MODE_ID_INFO: u8 = 2;

/// Text shown while the display is being brought up.
pub const LOADING_TEXT: &str = "Loading...";
/// Text shown when the tree is suppressed by the date gate.
pub const READY_TEXT: &str = "WLED Ready";

/// Which elements are drawn together
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayMode {
    /// Tree, lights, star and snow
    FullTree = MODE_ID_FULL_TREE,
    /// Full tree with the info panel below it
    #[default]
    Hybrid = MODE_ID_HYBRID,
    /// Info panel and a small tree icon, no animation
    Info = MODE_ID_INFO,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [Self::FullTree, Self::Hybrid, Self::Info];

    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_FULL_TREE => Self::FullTree,
            MODE_ID_HYBRID => Self::Hybrid,
            MODE_ID_INFO => Self::Info,
            _ => return None,
        })
    }

    pub const fn as_raw(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullTree => MODE_NAME_FULL_TREE,
            Self::Hybrid => MODE_NAME_HYBRID,
            Self::Info => MODE_NAME_INFO,
        }
    }

    /// Check if the mode draws the animated tree
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::FullTree | Self::Hybrid)
    }

    /// Check if the mode draws the info panel
    pub const fn shows_info(self) -> bool {
        matches!(self, Self::Hybrid | Self::Info)
    }
}

/// Per-repaint animation inputs
#[derive(Debug, Clone, Copy)]
pub struct FrameState {
    /// Animation frame counter
    pub frame: u8,
    pub colors: LightColors,
}

/// Scene composer - owns the layout, lights and snow
#[derive(Debug, Clone)]
pub struct Scene<const LIGHTS: usize = MAX_LIGHTS, const FLAKES: usize = MAX_SNOWFLAKES> {
    layout: TreeLayout,
    lights: LightSet<LIGHTS>,
    snow: SnowField<FLAKES>,
}

impl<const LIGHTS: usize, const FLAKES: usize> Scene<LIGHTS, FLAKES> {
    /// Create an unseeded scene for a display of the given size
    pub fn new(size: Size) -> Self {
        Self {
            layout: layout(size),
            lights: LightSet::new(),
            snow: SnowField::new(size),
        }
    }

    /// Give lights and snow their random initial state
    pub fn seed<R: RngCore>(&mut self, rng: &mut R) {
        self.lights.initialize(&self.layout.sockets, rng);
        self.snow.seed(rng);
    }

    /// Advance the light animation by one step
    pub fn animate<R: RngCore>(&mut self, speed: u8, rng: &mut R) {
        self.lights.tick(speed, rng);
    }

    /// Clear the screen and draw the given mode
    ///
    /// Snow only moves when a mode that shows it is drawn.
    pub fn render<D, R>(
        &mut self,
        target: &mut D,
        mode: DisplayMode,
        state: &FrameState,
        info: &InfoPanel<'_>,
        rng: &mut R,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
        R: RngCore,
    {
        target.clear(to_rgb565(palette::BLACK))?;

        if mode.is_animated() {
            draw_tree(target, &self.layout)?;
            self.lights.draw(target, &state.colors)?;
            draw_star(target, self.layout.star, state.frame)?;
            self.snow.step(target, rng)?;
        }
        if mode.shows_info() {
            draw_info_panel(target, self.layout.info_top, info)?;
        }
        if mode == DisplayMode::Info {
            draw_tree_icon(target, self.layout.icon)?;
        }
        Ok(())
    }

    pub fn layout(&self) -> &TreeLayout {
        &self.layout
    }

    pub fn lights(&self) -> &LightSet<LIGHTS> {
        &self.lights
    }

    pub fn snow(&self) -> &SnowField<FLAKES> {
        &self.snow
    }
}
