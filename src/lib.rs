//! RFox page painter
//!
//! Paints an already laid-out page (a [`LayoutTree`]) into a raster image and
//! collects the clickable link regions a viewer needs to map pointer input back
//! to actions.
//!
//! # Example
//!
//! ```
//! use rfpaint::{LayoutBox, LayoutTree, Rect, RenderConfig, Renderer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let page = LayoutBox::element("body")
//!     .at(0.0, 0.0, 200.0, 40.0)
//!     .with_child(
//!         LayoutBox::element("a")
//!             .with_attr("href", "https://example.com")
//!             .at(8.0, 8.0, 60.0, 16.0)
//!             .with_hit_box(Rect::new(8.0, 8.0, 60.0, 16.0))
//!             .with_child(LayoutBox::text("Example").at(0.0, 0.0, 60.0, 16.0)),
//!     );
//! let tree = LayoutTree::new(page)?;
//!
//! let renderer = Renderer::new(RenderConfig::default())?;
//! let out = renderer.render(&tree)?;
//! assert_eq!(out.canvas.width(), 200);
//! assert_eq!(out.areas[0].href(), Some("https://example.com"));
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod rendering;
pub use rendering::{
    hit_test, Action, Canvas, ClickableArea, ComputedStyle, DisplayList, Font, FontBook, LayoutBox,
    LayoutTree, PixmapCanvas, Point, Rect, RenderOutput, Renderer, Rgba, Screenshot,
};

/// Configuration for the renderer
///
/// Defaults paint on a white page with no fonts loaded (text runs are then
/// skipped by the raster backend but still reach recording canvases).
///
/// # Examples
///
/// ```
/// let cfg = rfpaint::RenderConfig::default();
/// assert_eq!(cfg.background, rfpaint::Rgba::WHITE);
/// assert!(cfg.font_paths.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Color the canvas is filled with before anything is drawn
    pub background: Rgba,
    /// Font files to register with the raster backend
    pub font_paths: Vec<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            font_paths: Vec::new(),
        }
    }
}

impl RenderConfig {
    /// Load a JSON config file; missing keys keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
