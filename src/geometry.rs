//! Tree silhouette and light socket placement.
//!
//! The layout is a pure function of the display size and is computed once.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

/// Number of triangular tiers in the silhouette.
pub const TIER_COUNT: usize = 4;
/// Height of every tier in pixels.
pub const TIER_HEIGHT: i32 = 25;
/// Y coordinate of the apex of the top tier.
pub const TREE_TOP_Y: i32 = 30;
/// Capacity of the light set.
pub const MAX_LIGHTS: usize = 50;

const TIER_BASE_WIDTH: i32 = 30;
const TIER_WIDTH_STEP: i32 = 30;
const TRUNK_SIZE: u32 = 20;
const STAR_OFFSET_Y: i32 = -5;
const INFO_PANEL_HEIGHT: i32 = 80;
const ICON_MARGIN_X: i32 = 20;
const ICON_TOP_Y: i32 = 5;

/// Horizontal row of light sockets inside one tier.
#[derive(Debug, Clone, Copy)]
struct LightBand {
    count: u8,
    /// Offset of the first socket from the tree center
    x_offset: i32,
    spacing: i32,
    /// Offset of the band from the tree top
    y_offset: i32,
}

const LIGHT_BANDS: [LightBand; TIER_COUNT] = [
    LightBand {
        count: 8,
        x_offset: -20,
        spacing: 5,
        y_offset: 15,
    },
    LightBand {
        count: 12,
        x_offset: -35,
        spacing: 6,
        y_offset: 35,
    },
    LightBand {
        count: 16,
        x_offset: -50,
        spacing: 6,
        y_offset: 55,
    },
    LightBand {
        count: 14,
        x_offset: -45,
        spacing: 6,
        y_offset: 75,
    },
];

/// One triangular tier of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSpec {
    /// Y of the first row
    pub top: i32,
    /// Width of the last (widest) row
    pub base_width: i32,
    pub height: i32,
}

impl TierSpec {
    /// Width of the given row, growing linearly towards the base
    pub const fn row_width(&self, row: i32) -> i32 {
        self.base_width * (row + 1) / self.height
    }
}

/// Fixed position of a light and its color class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightSocket {
    pub position: Point,
    pub color_index: u8,
}

/// Static geometry of the scene.
#[derive(Debug, Clone)]
pub struct TreeLayout {
    pub size: Size,
    pub center_x: i32,
    pub tiers: [TierSpec; TIER_COUNT],
    pub trunk: Rectangle,
    /// Center of the star on the apex
    pub star: Point,
    /// Top of the info panel
    pub info_top: i32,
    /// Apex of the small tree icon drawn in info mode
    pub icon: Point,
    pub sockets: Vec<LightSocket, MAX_LIGHTS>,
}

impl TreeLayout {
    /// Horizontal span `(left, width)` of a tier row
    pub const fn row_span(&self, tier: &TierSpec, row: i32) -> (i32, i32) {
        let width = tier.row_width(row);
        (self.center_x - width / 2, width)
    }
}

/// Compute the tree layout for a display of the given size
#[allow(clippy::cast_possible_wrap)]
pub fn layout(size: Size) -> TreeLayout {
    let center_x = size.width as i32 / 2;

    let mut tiers = [TierSpec {
        top: 0,
        base_width: 0,
        height: TIER_HEIGHT,
    }; TIER_COUNT];
    for (i, tier) in (0i32..).zip(tiers.iter_mut()) {
        tier.top = TREE_TOP_Y + i * TIER_HEIGHT;
        tier.base_width = TIER_BASE_WIDTH + i * TIER_WIDTH_STEP;
    }

    let trunk_top = TREE_TOP_Y + TIER_COUNT as i32 * TIER_HEIGHT;
    let trunk = Rectangle::new(
        Point::new(center_x - TRUNK_SIZE as i32 / 2, trunk_top),
        Size::new(TRUNK_SIZE, TRUNK_SIZE),
    );

    let mut sockets = Vec::new();
    for band in &LIGHT_BANDS {
        for i in 0..band.count {
            let socket = LightSocket {
                position: Point::new(
                    center_x + band.x_offset + i32::from(i) * band.spacing,
                    TREE_TOP_Y + band.y_offset,
                ),
                color_index: i % 2,
            };
            // Bands sum to exactly MAX_LIGHTS
            let _ = sockets.push(socket);
        }
    }

    TreeLayout {
        size,
        center_x,
        tiers,
        trunk,
        star: Point::new(center_x, TREE_TOP_Y + STAR_OFFSET_Y),
        info_top: size.height as i32 - INFO_PANEL_HEIGHT,
        icon: Point::new(size.width as i32 - ICON_MARGIN_X, ICON_TOP_Y),
        sockets,
    }
}
