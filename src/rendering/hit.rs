//! Clickable regions extracted during painting
//!
//! A viewer keeps the list returned by the renderer and maps pointer positions
//! back to actions with [`hit_test`]. Areas are in document order and the first
//! match wins where they overlap.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::layout::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "open-link")]
    OpenLink,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::OpenLink => "open-link",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickableArea {
    /// Absolute page coordinates
    pub rect: Rect,
    pub action: Action,
    pub params: BTreeMap<String, String>,
}

impl ClickableArea {
    pub fn open_link(rect: Rect, href: &str) -> Self {
        let mut params = BTreeMap::new();
        params.insert("href".to_string(), href.to_string());
        Self {
            rect,
            action: Action::OpenLink,
            params,
        }
    }

    pub fn href(&self) -> Option<&str> {
        self.params.get("href").map(String::as_str)
    }
}

/// First area (in document order) containing `point`.
pub fn hit_test(areas: &[ClickableArea], point: Point) -> Option<&ClickableArea> {
    areas.iter().find(|a| a.rect.contains(point))
}
