//! The paint pass
//!
//! One depth-first walk over a validated [`LayoutTree`]. The walk carries the
//! absolute origin of the current node's parent; a node's absolute origin is
//! that offset plus its local position, and becomes the offset for its
//! children. Per node, in order:
//!
//! 1. links (`<a href>`) emit one [`ClickableArea`] per hit-box and fall through
//! 2. rules (`<hr>`) draw a single line and stop
//! 3. list items (`<li>`) draw a bullet and fall through
//! 4. text leaves draw an optional underline plus the text and stop
//! 5. anything else descends into its children
//!
//! The walk uses an explicit stack, so deep trees cannot exhaust the call
//! stack.

use super::fonts::FontBook;
use super::hit::ClickableArea;
use super::layout::{LayoutTree, NodeId, NodeKind, Point, Rect};
use super::paint::{Canvas, DisplayList};
use super::raster::PixmapCanvas;
use super::style::TextDecoration;
use crate::{RenderConfig, Result};

/// Stroke width of rules and underlines
pub const LINE_WIDTH: f32 = 1.0;
/// Radius of the `<li>` bullet
pub const LIST_MARKER_RADIUS: f32 = 3.0;
/// Distance from an `<li>` box's left edge back to its bullet center
pub const LIST_MARKER_INDENT: f32 = 16.0;
/// How far the underline sits above `box bottom - baseline offset`
pub const UNDERLINE_GAP: f32 = 2.0;

/// Everything one render pass produced.
#[derive(Debug)]
pub struct RenderOutput<C> {
    pub canvas: C,
    /// Link regions in document order
    pub areas: Vec<ClickableArea>,
}

/// Paints layout trees. Holds only immutable state; every render call gets its
/// own canvas and area list.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
    fonts: FontBook,
}

impl Renderer {
    /// Create a renderer, loading every font listed in `config.font_paths`.
    pub fn new(config: RenderConfig) -> Result<Self> {
        let mut fonts = FontBook::new();
        for path in &config.font_paths {
            let family = fonts.load_file(path)?;
            log::debug!("loaded font '{}' from {}", family, path.display());
        }
        Ok(Self { config, fonts })
    }

    pub fn with_fonts(mut self, fonts: FontBook) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    /// Render onto a tiny-skia pixmap.
    pub fn render(&self, tree: &LayoutTree) -> Result<RenderOutput<PixmapCanvas>> {
        let fonts = self.fonts.clone();
        self.render_with(tree, move |w, h| PixmapCanvas::new(w, h, fonts))
    }

    /// Render into a recording display list.
    pub fn render_display_list(&self, tree: &LayoutTree) -> Result<RenderOutput<DisplayList>> {
        self.render_with(tree, |w, h| Ok(DisplayList::new(w, h)))
    }

    /// Render onto a canvas obtained from `allocate(width, height)`.
    ///
    /// The tree is validated first; if any node lacks resolved geometry this
    /// fails with [`crate::Error::LayoutIncomplete`] and `allocate` is never
    /// called.
    pub fn render_with<C, F>(&self, tree: &LayoutTree, allocate: F) -> Result<RenderOutput<C>>
    where
        C: Canvas,
        F: FnOnce(u32, u32) -> Result<C>,
    {
        let rects = tree.resolved_geometry()?;
        let root = rects[tree.root().index()];
        let (width, height) = (root.width.ceil() as u32, root.height.ceil() as u32);
        log::debug!("rendering {} layout nodes onto {}x{} canvas", tree.len(), width, height);

        let mut canvas = allocate(width, height)?;
        canvas.fill(self.config.background);

        let mut areas = Vec::new();
        // The root is seeded with its own local position as the parent offset,
        // so a root placed at (x, y) paints at (2x, 2y).
        paint_tree(tree, &rects, root.origin(), &mut canvas, &mut areas);

        log::debug!("render finished with {} clickable areas", areas.len());
        Ok(RenderOutput { canvas, areas })
    }
}

fn paint_tree<C: Canvas>(
    tree: &LayoutTree,
    rects: &[Rect],
    seed: Point,
    canvas: &mut C,
    areas: &mut Vec<ClickableArea>,
) {
    let mut stack: Vec<(NodeId, Point)> = vec![(tree.root(), seed)];

    while let Some((id, offset)) = stack.pop() {
        let node = tree.node(id);
        let rect = rects[id.index()];
        let x = offset.x + rect.x;
        let y = offset.y + rect.y;
        log::trace!("paint node {} {:?} at ({}, {})", id.index(), node.kind(), x, y);

        if let Some(href) = node.link() {
            for hb in &node.hit_boxes {
                areas.push(ClickableArea::open_link(hb.translate(offset), href));
            }
        }

        let list_marker = match node.kind() {
            NodeKind::HorizontalRule => {
                let mid = y + rect.height / 2.0;
                canvas.draw_line(
                    Point::new(x, mid),
                    Point::new(x + rect.width, mid),
                    node.style.color,
                    LINE_WIDTH,
                );
                continue;
            }
            kind => kind.has_list_marker(),
        };

        if list_marker {
            let center = Point::new(x - LIST_MARKER_INDENT, y + node.style.line_height_px() / 2.0);
            canvas.draw_circle(center, LIST_MARKER_RADIUS, node.style.color);
        }

        match node.kind() {
            NodeKind::TextLeaf { font, .. } => {
                // Both the underline and the glyphs use the font inherited
                // from the parent, not this node's own color.
                if node.style.text_decoration == TextDecoration::Underline {
                    let uy = y + rect.height - node.vertical_offset - UNDERLINE_GAP;
                    canvas.draw_line(
                        Point::new(x, uy),
                        Point::new(x + rect.width, uy),
                        font.color,
                        LINE_WIDTH,
                    );
                }
                let text = node.text.as_deref().unwrap_or_default();
                canvas.draw_text(text, x, y + node.vertical_offset, font);
            }
            NodeKind::Container { .. } => {
                let origin = Point::new(x, y);
                for &child in node.children().iter().rev() {
                    stack.push((child, origin));
                }
            }
            NodeKind::HorizontalRule => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::layout::LayoutBox;
    use crate::rendering::paint::PaintCommand;
    use crate::Error;

    fn renderer() -> Renderer {
        Renderer::new(RenderConfig::default()).unwrap()
    }

    #[test]
    fn incomplete_layout_never_allocates() {
        let root = LayoutBox::element("body").with_child(LayoutBox::element("p"));
        let tree = LayoutTree::new(root).unwrap();
        let mut allocated = false;
        let res = renderer().render_with(&tree, |w, h| {
            allocated = true;
            Ok(DisplayList::new(w, h))
        });
        assert!(matches!(res, Err(Error::LayoutIncomplete { node: 0 })));
        assert!(!allocated);
    }

    #[test]
    fn background_fill_comes_first() {
        let tree = LayoutTree::new(LayoutBox::element("body").at(0.0, 0.0, 10.5, 4.0)).unwrap();
        let out = renderer().render_display_list(&tree).unwrap();
        assert_eq!((out.canvas.width, out.canvas.height), (11, 4));
        assert_eq!(out.canvas.commands, vec![PaintCommand::Fill { color: crate::Rgba::WHITE }]);
    }

    #[test]
    fn deep_trees_do_not_overflow() {
        let mut nested = LayoutBox::element("a")
            .with_attr("href", "deep")
            .at(1.0, 0.0, 1.0, 1.0)
            .with_hit_box(Rect::new(0.0, 0.0, 1.0, 1.0));
        for _ in 0..50_000 {
            nested = LayoutBox::element("div").at(0.0, 1.0, 1.0, 1.0).with_child(nested);
        }
        let root = LayoutBox::element("body").at(0.0, 0.0, 10.0, 10.0).with_child(nested);
        let tree = LayoutTree::new(root).unwrap();
        let out = renderer().render_display_list(&tree).unwrap();
        assert_eq!(out.areas.len(), 1);
        assert_eq!(out.areas[0].rect, Rect::new(0.0, 50_000.0, 1.0, 1.0));
    }
}
