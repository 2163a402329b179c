//! Rendering: layout tree in, pixels and clickable areas out

pub mod fonts;
pub mod hit;
pub mod layout;
pub mod paint;
pub mod raster;
pub mod renderer;
pub mod style;

pub use fonts::FontBook;
pub use hit::{hit_test, Action, ClickableArea};
pub use layout::{LayoutBox, LayoutNode, LayoutTree, NodeId, NodeKind, Point, Rect, SourceElement};
pub use paint::{Canvas, DisplayList, PaintCommand};
pub use raster::PixmapCanvas;
pub use renderer::{RenderOutput, Renderer};
pub use style::{ComputedStyle, Font, FontDescriptor, LineHeight, Rgba, TextDecoration};

use sha2::{Digest, Sha256};

/// An encoded page image.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    pub fn empty(width: u32, height: u32) -> Self {
        Self { width, height, png_data: Vec::new() }
    }

    /// Hex SHA-256 of the PNG bytes, used for golden comparisons.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.png_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_of_empty_screenshot() {
        let s = Screenshot::empty(1, 1);
        assert_eq!(
            s.digest(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
