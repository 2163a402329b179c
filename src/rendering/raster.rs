//! tiny-skia raster backend

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use super::fonts::FontBook;
use super::layout::Point;
use super::paint::{Canvas, DisplayList};
use super::style::{Font, Rgba};
use super::Screenshot;
use crate::{Error, Result};

/// A [`Canvas`] backed by a tiny-skia pixmap.
///
/// Lines are drawn aliased and snapped to pixel centers so a 1px rule at
/// integer `y` lands on exactly one pixel row. Circles and glyphs are
/// anti-aliased.
pub struct PixmapCanvas {
    pixmap: Pixmap,
    fonts: FontBook,
}

impl std::fmt::Debug for PixmapCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapCanvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("fonts", &self.fonts.len())
            .finish()
    }
}

fn solid(color: Rgba, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = anti_alias;
    paint
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32, fonts: FontBook) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            Error::CanvasError(format!("Failed to create pixmap {}x{}", width, height))
        })?;
        Ok(Self { pixmap, fonts })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn into_screenshot(self) -> Result<Screenshot> {
        let png_data = self
            .pixmap
            .encode_png()
            .map_err(|e| Error::EncodeError(e.to_string()))?;
        Ok(Screenshot {
            width: self.pixmap.width(),
            height: self.pixmap.height(),
            png_data,
        })
    }
}

impl Canvas for PixmapCanvas {
    fn fill(&mut self, color: Rgba) {
        self.pixmap.fill(Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba, width: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x + 0.5, from.y + 0.5);
        pb.line_to(to.x + 0.5, to.y + 0.5);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &solid(color, false),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn draw_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &solid(color, true),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: &Font) {
        let Some(face) = self.fonts.resolve(&font.family) else {
            log::debug!("no font loaded for family '{}'; skipping text run", font.family);
            return;
        };
        if let Some(path) = face.text_path(text, x, y, font.size) {
            self.pixmap.fill_path(
                &path,
                &solid(font.color, true),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

/// Replay a recorded display list onto a fresh pixmap of the list's size.
pub fn rasterize(list: &DisplayList, fonts: FontBook) -> Result<PixmapCanvas> {
    let mut canvas = PixmapCanvas::new(list.width, list.height, fonts)?;
    list.replay(&mut canvas);
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let err = PixmapCanvas::new(0, 10, FontBook::new()).unwrap_err();
        assert!(matches!(err, Error::CanvasError(_)));
    }

    #[test]
    fn fill_and_line_pixels() {
        let mut c = PixmapCanvas::new(20, 10, FontBook::new()).unwrap();
        c.fill(Rgba::WHITE);
        c.draw_line(Point::new(0.0, 4.0), Point::new(20.0, 4.0), Rgba::rgb(255, 0, 0), 1.0);
        assert_eq!(c.pixel(10, 4), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(c.pixel(10, 3), Some(Rgba::WHITE));
        assert_eq!(c.pixel(10, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn circle_center_is_solid() {
        let mut c = PixmapCanvas::new(20, 20, FontBook::new()).unwrap();
        c.fill(Rgba::WHITE);
        c.draw_circle(Point::new(10.0, 10.0), 3.0, Rgba::rgb(0, 0, 255));
        assert_eq!(c.pixel(9, 9), Some(Rgba::rgb(0, 0, 255)));
        assert_eq!(c.pixel(2, 2), Some(Rgba::WHITE));
    }

    #[test]
    fn text_without_fonts_is_skipped() {
        let mut c = PixmapCanvas::new(8, 8, FontBook::new()).unwrap();
        c.fill(Rgba::WHITE);
        let font = Font {
            family: "serif".into(),
            size: 12.0,
            weight: 400,
            color: Rgba::BLACK,
        };
        c.draw_text("hello", 0.0, 6.0, &font);
        assert_eq!(c.pixel(1, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn screenshot_is_png() {
        let list = {
            let mut l = DisplayList::new(4, 3);
            l.fill(Rgba::WHITE);
            l
        };
        let shot = rasterize(&list, FontBook::new()).unwrap().into_screenshot().unwrap();
        assert_eq!((shot.width, shot.height), (4, 3));
        assert_eq!(&shot.png_data[0..8], b"\x89PNG\r\n\x1a\n");
    }
}
