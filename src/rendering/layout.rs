//! Resolved layout tree consumed by the painter
//!
//! The layout stage hands over a nested [`LayoutBox`] description. It is
//! flattened into an index-addressed [`LayoutTree`] arena: children are stored as
//! [`NodeId`]s, parent lookup goes through a separate table, and each node's
//! paint role ([`NodeKind`]) and inherited text font are resolved once here so
//! the paint pass never has to walk upwards or compare tag strings.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::style::{ComputedStyle, Font};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The same rect moved by `by`.
    pub fn translate(&self, by: Point) -> Rect {
        Rect::new(self.x + by.x, self.y + by.y, self.width, self.height)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Finite position and a non-negative finite size.
    pub fn is_resolved(&self) -> bool {
        [self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// The source element a layout node was generated for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceElement {
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl SourceElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// Nested layout description as produced by the layout stage.
///
/// `rect` stays `None` until layout has resolved the node's geometry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutBox {
    pub rect: Option<Rect>,
    pub style: ComputedStyle,
    pub text: Option<String>,
    pub element: Option<SourceElement>,
    pub hit_boxes: Vec<Rect>,
    /// Distance from the top of the box to the text baseline
    pub vertical_offset: f32,
    pub children: Vec<LayoutBox>,
}

impl LayoutBox {
    /// An anonymous box with no source element.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            element: Some(SourceElement::new(tag)),
            ..Self::default()
        }
    }

    /// An anonymous text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.rect = Some(Rect::new(x, y, width, height));
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.element
            .get_or_insert_with(SourceElement::default)
            .attributes
            .insert(name.into(), value.into());
        self
    }

    pub fn with_style(mut self, style: ComputedStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_hit_box(mut self, rect: Rect) -> Self {
        self.hit_boxes.push(rect);
        self
    }

    pub fn with_vertical_offset(mut self, offset: f32) -> Self {
        self.vertical_offset = offset;
        self
    }

    pub fn with_child(mut self, child: LayoutBox) -> Self {
        self.children.push(child);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How the painter treats a node, resolved once at tree construction.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// `<hr>`: one rule line, subtree never painted
    HorizontalRule,
    /// Non-blank text: painted with the inherited font, children never painted
    TextLeaf { font: Font, list_marker: bool },
    /// Everything else: children painted in document order
    Container { list_marker: bool },
}

impl NodeKind {
    /// `<li>` nodes get a bullet before their content.
    pub fn has_list_marker(&self) -> bool {
        match self {
            NodeKind::HorizontalRule => false,
            NodeKind::TextLeaf { list_marker, .. } | NodeKind::Container { list_marker } => {
                *list_marker
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub rect: Option<Rect>,
    pub style: ComputedStyle,
    pub text: Option<String>,
    pub element: Option<SourceElement>,
    pub hit_boxes: Vec<Rect>,
    pub vertical_offset: f32,
    children: Vec<NodeId>,
    kind: NodeKind,
    link: Option<String>,
}

impl LayoutNode {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// `href` of an `<a>` element, if present.
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

fn has_visible_text(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.trim().is_empty())
}

/// Index-addressed layout tree. The root is always the first node; nodes are
/// stored in document (pre-)order.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
    parents: Vec<Option<NodeId>>,
}

impl LayoutTree {
    /// Flatten a nested layout description into an arena.
    ///
    /// Fails with [`Error::InvalidTree`] when a text leaf has no parent to
    /// inherit its font from. This is checked before geometry, so a text root
    /// without a rect is reported as `InvalidTree`, never `LayoutIncomplete`.
    pub fn new(root: LayoutBox) -> Result<Self> {
        let mut nodes: Vec<LayoutNode> = Vec::new();
        let mut parents: Vec<Option<NodeId>> = Vec::new();
        let mut stack: Vec<(LayoutBox, Option<NodeId>, Option<Font>)> = vec![(root, None, None)];

        while let Some((lb, parent, parent_font)) = stack.pop() {
            let id = NodeId(nodes.len());
            let LayoutBox {
                rect,
                style,
                text,
                element,
                hit_boxes,
                vertical_offset,
                children,
            } = lb;

            let is_tag = |tag: &str| element.as_ref().is_some_and(|e| e.is(tag));
            let list_marker = is_tag("li");
            let link = element
                .as_ref()
                .filter(|e| e.is("a"))
                .and_then(|e| e.attr("href"))
                .map(str::to_owned);

            let kind = if is_tag("hr") {
                NodeKind::HorizontalRule
            } else if has_visible_text(text.as_deref()) {
                let font = parent_font.ok_or_else(|| {
                    Error::InvalidTree(format!("text node {} has no parent font to inherit", id.0))
                })?;
                NodeKind::TextLeaf { font, list_marker }
            } else {
                NodeKind::Container { list_marker }
            };

            let own_font = style.resolved_font();
            for child in children.into_iter().rev() {
                stack.push((child, Some(id), Some(own_font.clone())));
            }

            if let Some(p) = parent {
                nodes[p.0].children.push(id);
            }
            parents.push(parent);
            nodes.push(LayoutNode {
                rect,
                style,
                text,
                element,
                hit_boxes,
                vertical_offset,
                children: Vec::new(),
                kind,
                link,
            });
        }

        Ok(Self { nodes, parents })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let root: LayoutBox = serde_json::from_str(json)?;
        Self::new(root)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Resolved geometry of every node, indexed by [`NodeId::index`].
    ///
    /// Fails with [`Error::LayoutIncomplete`] naming the first node (in
    /// document order) whose geometry is missing or non-finite.
    pub fn resolved_geometry(&self) -> Result<Vec<Rect>> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| match n.rect {
                Some(r) if r.is_resolved() => Ok(r),
                _ => Err(Error::LayoutIncomplete { node: i }),
            })
            .collect()
    }

    /// Whether every node, transitively, has resolved geometry.
    pub fn is_fully_laid_out(&self) -> bool {
        self.nodes.iter().all(|n| n.rect.is_some_and(|r| r.is_resolved()))
    }
}
