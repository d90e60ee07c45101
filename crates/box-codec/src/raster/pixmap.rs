//! [`Raster`] and [`Canvas`] for tiny-skia pixmaps.

use super::{Blend, Canvas, ColorStop, Raster, Region};
use crate::color::Rgb;
use tiny_skia::{
    BlendMode, Color, GradientStop, LinearGradient, Paint, Pixmap, Point, Rect, SpreadMode,
    Transform,
};

impl Raster for Pixmap {
    fn width(&self) -> u32 {
        Pixmap::width(self)
    }

    fn height(&self) -> u32 {
        Pixmap::height(self)
    }

    fn read_pixel(&self, x: u32, y: u32) -> Rgb {
        self.pixel(x, y)
            .map(|p| {
                let c = p.demultiply();
                Rgb::new(c.red(), c.green(), c.blue())
            })
            .unwrap_or(Rgb::BLACK)
    }
}

impl Canvas for Pixmap {
    fn blank(width: u32, height: u32) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(Color::BLACK);
        Some(pixmap)
    }

    fn fill_region(&mut self, region: Region, color: Rgb, blend: Blend) {
        let Some(rect) = to_rect(region) else {
            return;
        };
        let mut paint = base_paint(blend);
        paint.set_color_rgba8(color.r, color.g, color.b, 255);
        self.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn linear_gradient_fill(
        &mut self,
        region: Region,
        from: ColorStop,
        to: ColorStop,
        blend: Blend,
    ) {
        let Some(rect) = to_rect(region) else {
            return;
        };
        if from.x == to.x && from.y == to.y {
            self.fill_region(region, from.color, blend);
            return;
        }
        let shader = LinearGradient::new(
            Point::from_xy(from.x, from.y),
            Point::from_xy(to.x, to.y),
            vec![
                GradientStop::new(0.0, opaque(from.color)),
                GradientStop::new(1.0, opaque(to.color)),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        );
        let Some(shader) = shader else {
            self.fill_region(region, from.color, blend);
            return;
        };
        let mut paint = base_paint(blend);
        paint.shader = shader;
        self.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

fn to_rect(region: Region) -> Option<Rect> {
    Rect::from_xywh(
        region.x as f32,
        region.y as f32,
        region.width as f32,
        region.height as f32,
    )
}

fn base_paint(blend: Blend) -> Paint<'static> {
    Paint {
        anti_alias: false,
        blend_mode: match blend {
            Blend::Replace => BlendMode::Source,
            Blend::Lighten => BlendMode::Lighten,
        },
        ..Default::default()
    }
}

fn opaque(color: Rgb) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, 255)
}
