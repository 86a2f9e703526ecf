use embedded_graphics::{
    Drawable,
    pixelcolor::Rgb565,
    prelude::{DrawTarget, Point, Primitive, Size},
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle},
};

use crate::color::{Rgb, palette, to_rgb565};
use crate::geometry::TreeLayout;

/// Phase advance of the star pulse per animation frame
const STAR_PULSE_RATE: f32 = 0.1;

/// Star brightness (0-254) for the given animation frame
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn star_pulse(frame: u8) -> u8 {
    let wave = libm::sinf(f32::from(frame) * STAR_PULSE_RATE);
    ((wave + 1.0) * 127.0) as u8
}

/// Draw the trunk and the four tiers
pub fn draw_tree<D>(target: &mut D, layout: &TreeLayout) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.fill_solid(&layout.trunk, to_rgb565(palette::BROWN))?;

    // Tiers are filled one horizontal line per row
    let style = PrimitiveStyle::with_stroke(to_rgb565(palette::GREEN), 1);
    for tier in &layout.tiers {
        for row in 0..tier.height {
            let (left, width) = layout.row_span(tier, row);
            let y = tier.top + row;
            Line::new(Point::new(left, y), Point::new(left + width, y))
                .into_styled(style)
                .draw(target)?;
        }
    }
    Ok(())
}

/// Draw the six-pointed star, pulsing with the animation frame
pub fn draw_star<D>(target: &mut D, center: Point, frame: u8) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let color = to_rgb565(Rgb {
        r: 255,
        g: 255,
        b: star_pulse(frame),
    });
    let style = PrimitiveStyle::with_fill(color);

    Triangle::new(
        center + Point::new(0, -8),
        center + Point::new(-6, 4),
        center + Point::new(6, 4),
    )
    .into_styled(style)
    .draw(target)?;
    Triangle::new(
        center + Point::new(0, 4),
        center + Point::new(-6, -2),
        center + Point::new(6, -2),
    )
    .into_styled(style)
    .draw(target)
}

/// Draw the small static tree shown in info mode
pub fn draw_tree_icon<D>(target: &mut D, apex: Point) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let green = PrimitiveStyle::with_fill(to_rgb565(palette::GREEN));

    Triangle::new(
        apex,
        apex + Point::new(-8, 15),
        apex + Point::new(8, 15),
    )
    .into_styled(green)
    .draw(target)?;
    Triangle::new(
        apex + Point::new(0, 10),
        apex + Point::new(-6, 22),
        apex + Point::new(6, 22),
    )
    .into_styled(green)
    .draw(target)?;

    let trunk = Rectangle::new(apex + Point::new(-2, 22), Size::new(4, 4));
    target.fill_solid(&trunk, to_rgb565(palette::BROWN))?;

    Circle::with_center(apex + Point::new(0, -2), 5)
        .into_styled(PrimitiveStyle::with_fill(to_rgb565(palette::YELLOW)))
        .draw(target)
}
