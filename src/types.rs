//! Core types for spark-scene.
//!
//! These types define the foundation that everything builds on.
//! They flow through layout and the draw pipeline and define what the
//! external renderer understands.

use std::fmt;

use taffy::geometry::{Point, Size};

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Transparent color.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Parse a color attribute value.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` and the standard color names.
    /// Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        match value.to_ascii_lowercase().as_str() {
            "transparent" => Some(Self::TRANSPARENT),
            "black" => Some(Self::BLACK),
            "white" => Some(Self::WHITE),
            "red" => Some(Self::RED),
            "green" => Some(Self::GREEN),
            "blue" => Some(Self::BLUE),
            "yellow" => Some(Self::YELLOW),
            "cyan" => Some(Self::CYAN),
            "magenta" => Some(Self::MAGENTA),
            "gray" | "grey" => Some(Self::GRAY),
            _ => None,
        }
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(hex.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 16 + v;
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 => Some(Self::rgb(
                channel(hex.get(0..2)?)?,
                channel(hex.get(2..4)?)?,
                channel(hex.get(4..6)?)?,
            )),
            8 => Some(Self::new(
                channel(hex.get(0..2)?)?,
                channel(hex.get(2..4)?)?,
                channel(hex.get(4..6)?)?,
                channel(hex.get(6..8)?)?,
            )),
            _ => None,
        }
    }
}

// =============================================================================
// Text Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const STRIKETHROUGH = 1 << 4;
    }
}

// =============================================================================
// Style - attached to draw directives
// =============================================================================

/// Visual style carried by every draw directive.
///
/// `None` colors mean "renderer default".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground (text) color.
    pub fg: Option<Rgba>,
    /// Background fill color.
    pub bg: Option<Rgba>,
    /// Text attributes.
    pub attrs: Attr,
}

// =============================================================================
// Geometry
// =============================================================================

/// Computed rectangle of a node, in logical units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Geometry {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point<f32> {
        Point { x: self.x, y: self.y }
    }

    pub fn size(&self) -> Size<f32> {
        Size {
            width: self.w,
            height: self.h,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Check if a point is inside this rect (right/bottom edges exclusive).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether two rects overlap with a non-empty area.
    pub fn intersects(&self, other: &Geometry) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Overlapping area of two rects, `None` if they do not overlap.
    pub fn intersection(&self, other: &Geometry) -> Option<Geometry> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Geometry::new(
            x,
            y,
            self.right().min(other.right()) - x,
            self.bottom().min(other.bottom()) - y,
        ))
    }
}

// =============================================================================
// Node Kinds
// =============================================================================

/// Kind of a scene node, derived from its markup tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Any element that lays out children (`app`, `div`, `row`, ...).
    #[default]
    Container,
    /// Static or bound text.
    Text,
    /// Single-line text input.
    Input,
    /// Clickable button with a label.
    Button,
    /// Opaque content handle drawn by the renderer.
    Image,
}

impl NodeKind {
    /// Map a markup tag to a node kind. Unknown tags are containers.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "text" | "label" | "p" | "span" | "h1" | "h2" | "h3" => Self::Text,
            "input" | "textfield" => Self::Input,
            "button" => Self::Button,
            "image" | "img" => Self::Image,
            _ => Self::Container,
        }
    }

    /// Leaves are sized by the renderer's measure callback.
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Container)
    }
}

// =============================================================================
// Layout Enums
// =============================================================================

/// Layout mode of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutMode {
    /// No `layout` property: children stacked at the content origin.
    #[default]
    Block,
    /// Children advance along x.
    Row,
    /// Children advance along y.
    Column,
}

impl LayoutMode {
    /// Parse a `layout` attribute value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "row" | "horizontal" => Some(Self::Row),
            "column" | "col" | "vertical" => Some(Self::Column),
            "block" | "none" => Some(Self::Block),
            _ => None,
        }
    }
}

/// Scroll axis of a scrollable container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollAxis {
    Vertical,
    Horizontal,
}

impl ScrollAxis {
    /// Parse a `scroll` attribute value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vertical" | "y" => Some(Self::Vertical),
            "horizontal" | "x" => Some(Self::Horizontal),
            _ => None,
        }
    }

    /// Pick this axis' component out of a 2D delta.
    #[inline]
    pub fn component(&self, dx: f32, dy: f32) -> f32 {
        match self {
            Self::Vertical => dy,
            Self::Horizontal => dx,
        }
    }
}

// =============================================================================
// Viewport Classification
// =============================================================================

/// Active responsive breakpoint (`mobile`, `default`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewportClass(String);

impl ViewportClass {
    pub const DEFAULT: &'static str = "default";
    pub const MOBILE: &'static str = "mobile";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn mobile() -> Self {
        Self::new(Self::MOBILE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ViewportClass {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Dirty Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Why a node needs work before the next committed frame.
    ///
    /// `LAYOUT` propagates to every ancestor. `POSITION` (scroll offset
    /// changes) only re-places the node's descendants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirtyFlags: u8 {
        const NONE = 0;
        /// Size may have changed; re-run sizing for this node.
        const LAYOUT = 1 << 0;
        /// Children must be re-positioned (size unchanged).
        const POSITION = 1 << 1;
        /// Content or style changed.
        const PAINT = 1 << 2;
    }
}
