//! Cairo image surface implementing [`Surface`].

use super::color::Color;
use super::export::ExportError;
use super::render::Surface;
use crate::util::Point;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// In-memory ARGB32 raster backed by cairo.
///
/// A fresh cairo context is created per primitive so the pixel buffer stays
/// uniquely owned and can be read back by [`Surface::sample`].
pub struct CairoSurface {
    surface: cairo::ImageSurface,
}

impl CairoSurface {
    pub fn new(width: i32, height: i32) -> Result<Self, ExportError> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width.max(1), height.max(1))?;
        Ok(Self { surface })
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn image(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    fn with_context(&self, color: Color, draw: impl FnOnce(&cairo::Context)) {
        match cairo::Context::new(&self.surface) {
            Ok(ctx) => {
                ctx.set_antialias(cairo::Antialias::Best);
                ctx.set_source_rgba(color.r, color.g, color.b, color.a);
                draw(&ctx);
            }
            Err(err) => log::warn!("Failed to create cairo context: {err}"),
        }
    }
}

impl Surface for CairoSurface {
    fn fill_background(&mut self, color: Color) {
        self.with_context(color, |ctx| {
            ctx.set_operator(cairo::Operator::Source);
            let _ = ctx.paint(); // a failed paint just leaves the old pixels
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.with_context(color, |ctx| {
            ctx.move_to(first.x, first.y);
            for point in rest {
                ctx.line_to(point.x, point.y);
            }
            ctx.close_path();
            let _ = ctx.fill();
        });
    }

    fn fill_rounded_rect(
        &mut self,
        center: Point,
        width: f64,
        height: f64,
        corner_radius: f64,
        rotation: f64,
        color: Color,
    ) {
        self.with_context(color, |ctx| {
            ctx.translate(center.x, center.y);
            ctx.rotate(rotation);
            let x = -width / 2.0;
            let y = -height / 2.0;
            let r = corner_radius.min(width / 2.0).min(height / 2.0).max(0.0);
            ctx.new_sub_path();
            ctx.arc(x + width - r, y + r, r, -FRAC_PI_2, 0.0);
            ctx.arc(x + width - r, y + height - r, r, 0.0, FRAC_PI_2);
            ctx.arc(x + r, y + height - r, r, FRAC_PI_2, PI);
            ctx.arc(x + r, y + r, r, PI, PI + FRAC_PI_2);
            ctx.close_path();
            let _ = ctx.fill();
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.with_context(color, |ctx| {
            ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
            let _ = ctx.fill();
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f64, color: Color) {
        self.with_context(color, |ctx| {
            ctx.set_line_width(width);
            ctx.set_line_cap(cairo::LineCap::Round);
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            let _ = ctx.stroke();
        });
    }

    fn fill_arc(&mut self, center: Point, radius: f64, start: f64, stop: f64, color: Color) {
        self.with_context(color, |ctx| {
            ctx.move_to(center.x, center.y);
            ctx.arc(center.x, center.y, radius.max(0.0), start, stop);
            ctx.close_path();
            let _ = ctx.fill();
        });
    }

    fn sample(&mut self, x: f64, y: f64) -> Option<Color> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        let (px, py) = (x.floor() as i64, y.floor() as i64);
        if px < 0 || py < 0 || px >= self.surface.width() as i64 || py >= self.surface.height() as i64 {
            return None;
        }

        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = py as usize * stride + px as usize * 4;
        let bytes: [u8; 4] = data.get(offset..offset + 4)?.try_into().ok()?;
        let pixel = u32::from_ne_bytes(bytes);

        // ARGB32 is premultiplied
        let alpha = ((pixel >> 24) & 0xff) as f64;
        if alpha == 0.0 {
            return Some(Color::new(0.0, 0.0, 0.0, 0.0));
        }
        let channel = |shift: u32| (((pixel >> shift) & 0xff) as f64 / alpha).min(1.0);
        Some(Color::new(channel(16), channel(8), channel(0), alpha / 255.0))
    }
}
