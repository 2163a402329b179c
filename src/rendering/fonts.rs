//! Font faces available to the raster backend
//!
//! Faces are keyed by their family name. Lookup is case-insensitive and falls
//! back to the first loaded face, so a page always renders with *something*
//! once at least one font is registered.

use std::path::Path;
use std::sync::Arc;

use tiny_skia::PathBuilder;
use ttf_parser::{name_id, Face, GlyphId, OutlineBuilder};

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct FontFace {
    family: String,
    data: Arc<Vec<u8>>,
    index: u32,
}

impl FontFace {
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Outline of `text` at `size` px with its baseline starting at (`x`, `y`).
    ///
    /// Characters missing from the face use the `.notdef` glyph. Returns `None`
    /// when nothing in the run has an outline (e.g. only spaces).
    pub fn text_path(&self, text: &str, x: f32, y: f32, size: f32) -> Option<tiny_skia::Path> {
        let face = Face::parse(&self.data, self.index).ok()?;
        let scale = size / face.units_per_em() as f32;

        let mut pen = GlyphPen {
            builder: PathBuilder::new(),
            scale,
            x,
            y,
        };
        for ch in text.chars() {
            let gid = face.glyph_index(ch).unwrap_or(GlyphId(0));
            face.outline_glyph(gid, &mut pen);
            pen.x += face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
        }
        pen.builder.finish()
    }
}

struct GlyphPen {
    builder: PathBuilder,
    scale: f32,
    x: f32,
    y: f32,
}

impl GlyphPen {
    fn map(&self, px: f32, py: f32) -> (f32, f32) {
        (self.x + px * self.scale, self.y - py * self.scale)
    }
}

impl OutlineBuilder for GlyphPen {
    fn move_to(&mut self, px: f32, py: f32) {
        let (x, y) = self.map(px, py);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, px: f32, py: f32) {
        let (x, y) = self.map(px, py);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, px: f32, py: f32) {
        let (cx, cy) = self.map(x1, y1);
        let (x, y) = self.map(px, py);
        self.builder.quad_to(cx, cy, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, px: f32, py: f32) {
        let (c1x, c1y) = self.map(x1, y1);
        let (c2x, c2y) = self.map(x2, y2);
        let (x, y) = self.map(px, py);
        self.builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[derive(Debug, Clone, Default)]
pub struct FontBook {
    faces: Vec<FontFace>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a face under the family name stored in the font itself.
    pub fn add(&mut self, data: Vec<u8>) -> Result<String> {
        let family = {
            let face = Face::parse(&data, 0).map_err(|e| Error::FontError(e.to_string()))?;
            face.names()
                .into_iter()
                .filter(|n| n.name_id == name_id::FAMILY)
                .find_map(|n| n.to_string())
                .ok_or_else(|| Error::FontError("font has no readable family name".into()))?
        };
        self.add_with_family(family.clone(), data)?;
        Ok(family)
    }

    /// Register a face under an explicit family name.
    pub fn add_with_family(&mut self, family: impl Into<String>, data: Vec<u8>) -> Result<()> {
        Face::parse(&data, 0).map_err(|e| Error::FontError(e.to_string()))?;
        let family = family.into();
        log::debug!("registered font family '{}' ({} bytes)", family, data.len());
        self.faces.push(FontFace {
            family,
            data: Arc::new(data),
            index: 0,
        });
        Ok(())
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<String> {
        let data = std::fs::read(path.as_ref())?;
        self.add(data)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn resolve(&self, family: &str) -> Option<&FontFace> {
        self.faces
            .iter()
            .find(|f| f.family.eq_ignore_ascii_case(family))
            .or_else(|| self.faces.first())
    }
}
