//! Draw list emission.
//!
//! Walks the laid-out tree in paint order (parents before children, children
//! in layout order) and emits renderer directives. Hit regions are collected
//! alongside as data so hosts can map pointer positions back to nodes.
//!
//! Scroll containers clip their children: a child entirely outside the
//! container is culled with its subtree, and the scrollbar thumb is emitted
//! after the children so it overlays them.

use crate::config::EngineConfig;
use crate::engine::{Content, NodeTree, PropValue, Props};
use crate::layout::resolve_prop;
use crate::state::ScrollController;
use crate::types::{Attr, Geometry, NodeKind, Rgba, Style, ViewportClass};

// =============================================================================
// Types
// =============================================================================

/// One renderer directive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A node's box.
    Rect {
        node: usize,
        geometry: Geometry,
        style: Style,
        clip: Option<Geometry>,
    },
    /// Text inside a node's box.
    Text {
        node: usize,
        geometry: Geometry,
        text: String,
        style: Style,
        clip: Option<Geometry>,
    },
    /// Opaque renderer content (images, icons).
    Image {
        node: usize,
        geometry: Geometry,
        handle: u64,
        clip: Option<Geometry>,
    },
    /// Scrollbar thumb of a scroll container.
    ScrollbarThumb { node: usize, geometry: Geometry },
}

impl DrawCommand {
    /// Index of the node that emitted this directive.
    pub fn node(&self) -> usize {
        match self {
            Self::Rect { node, .. }
            | Self::Text { node, .. }
            | Self::Image { node, .. }
            | Self::ScrollbarThumb { node, .. } => *node,
        }
    }

    pub fn geometry(&self) -> Geometry {
        match self {
            Self::Rect { geometry, .. }
            | Self::Text { geometry, .. }
            | Self::Image { geometry, .. }
            | Self::ScrollbarThumb { geometry, .. } => *geometry,
        }
    }
}

/// A hit region for pointer hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRegion {
    /// Visible part of the node (clipped by scroll viewports).
    pub geometry: Geometry,
    pub node: usize,
}

/// Ordered directives of one committed frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    /// Sequence number of the committed frame.
    pub frame: u64,
    pub commands: Vec<DrawCommand>,
    /// Hit regions in paint order (later = on top).
    pub hit_regions: Vec<HitRegion>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Text directives as `(node, text)` pairs.
    pub fn texts(&self) -> impl Iterator<Item = (usize, &str)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { node, text, .. } => Some((*node, text.as_str())),
            _ => None,
        })
    }

    /// Topmost node whose visible region contains the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.hit_regions
            .iter()
            .rev()
            .find(|region| region.geometry.contains(x, y))
            .map(|region| region.node)
    }
}

// =============================================================================
// Style
// =============================================================================

/// Visual style from a node's effective properties.
///
/// Unknown colors are ignored; boolean attributes accept `true`/`false` and
/// bare attributes.
pub fn style_of(props: &Props, class: &ViewportClass) -> Style {
    let value = |key: &str| resolve_prop(props, key, class).map(PropValue::resolved);
    let color = |key: &str| value(key).and_then(|v| Rgba::parse(&v.to_display()));
    let flag = |key: &str| value(key).and_then(|v| v.as_bool()).unwrap_or(false);

    let mut attrs = Attr::NONE;
    for (key, attr) in [
        ("bold", Attr::BOLD),
        ("dim", Attr::DIM),
        ("italic", Attr::ITALIC),
        ("underline", Attr::UNDERLINE),
        ("strikethrough", Attr::STRIKETHROUGH),
    ] {
        if flag(key) {
            attrs |= attr;
        }
    }

    Style {
        fg: color("color"),
        bg: color("background"),
        attrs,
    }
}

// =============================================================================
// Emission
// =============================================================================

/// Build the draw list of a laid-out tree.
///
/// `viewport`, when given, clips the root the same way scroll containers
/// clip their children.
pub fn build_draw_list(
    tree: &NodeTree,
    scroll: &ScrollController,
    class: &ViewportClass,
    config: &EngineConfig,
    viewport: Option<Geometry>,
) -> DrawList {
    let mut list = DrawList::default();
    if let Some(root) = tree.root() {
        let mut emitter = Emitter {
            tree,
            scroll,
            class,
            config,
            list: &mut list,
        };
        emitter.run(root, viewport);
    }
    list
}

struct Emitter<'a> {
    tree: &'a NodeTree,
    scroll: &'a ScrollController,
    class: &'a ViewportClass,
    config: &'a EngineConfig,
    list: &'a mut DrawList,
}

/// Pending work of the paint walk.
enum Visit {
    /// Emit a node, then its children, under the given clip.
    Node(usize, Option<Geometry>),
    /// Emit a scroll container's thumb once its children are done.
    Thumb(usize),
}

impl Emitter<'_> {
    fn run(&mut self, root: usize, clip: Option<Geometry>) {
        let mut stack = vec![Visit::Node(root, clip)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Node(index, clip) => self.emit_node(index, clip, &mut stack),
                Visit::Thumb(index) => self.emit_thumb(index),
            }
        }
    }

    fn emit_node(&mut self, index: usize, clip: Option<Geometry>, stack: &mut Vec<Visit>) {
        let Some(node) = self.tree.get(index) else {
            return;
        };

        let geometry = node.geometry();
        if geometry.w <= 0.0 || geometry.h <= 0.0 {
            return;
        }

        let visible = match clip {
            Some(clip) => match geometry.intersection(&clip) {
                Some(visible) => visible,
                None => return, // Completely clipped
            },
            None => geometry,
        };

        let style = style_of(node.props(), self.class);
        self.list.commands.push(DrawCommand::Rect {
            node: index,
            geometry,
            style,
            clip,
        });
        self.list.hit_regions.push(HitRegion {
            geometry: visible,
            node: index,
        });

        match (node.kind(), node.content()) {
            (NodeKind::Image, Some(Content::Handle(handle))) => {
                self.list.commands.push(DrawCommand::Image {
                    node: index,
                    geometry,
                    handle: *handle,
                    clip,
                });
            }
            (NodeKind::Text | NodeKind::Button | NodeKind::Input, content) => {
                let mut text_style = style;
                let mut text = content.and_then(Content::as_text).unwrap_or_default().to_string();
                if text.is_empty() && node.kind() == NodeKind::Input {
                    text = node.prop("placeholder").map(PropValue::to_display).unwrap_or_default();
                    text_style.attrs |= Attr::DIM;
                }
                if !text.is_empty() {
                    self.list.commands.push(DrawCommand::Text {
                        node: index,
                        geometry,
                        text,
                        style: text_style,
                        clip,
                    });
                }
            }
            _ => {}
        }

        // Scroll containers clip their children to their own box
        let scrolls = node.layout_context().scroll.is_some() && self.scroll.get(index).is_some();
        let child_clip = if scrolls { Some(visible) } else { clip };

        if scrolls {
            stack.push(Visit::Thumb(index));
        }
        for &child in node.children().iter().rev() {
            stack.push(Visit::Node(child, child_clip));
        }
    }

    fn emit_thumb(&mut self, index: usize) {
        let (Some(node), Some(state)) = (self.tree.get(index), self.scroll.get(index)) else {
            return;
        };
        if let Some(thumb) = state.thumb(
            node.geometry(),
            self.config.scrollbar_thickness,
            self.config.min_thumb_length,
        ) {
            self.list.commands.push(DrawCommand::ScrollbarThumb {
                node: index,
                geometry: thumb,
            });
        }
    }
}
