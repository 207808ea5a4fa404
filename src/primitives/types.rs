//! Primitive types - Elements and callbacks.
//!
//! An [`Element`] is the pre-built tree a markup parser hands over: a tag,
//! typed properties (binding attributes still unresolved name strings),
//! optional leaf content, children and callbacks.

use std::fmt;
use std::rc::Rc;

use crate::engine::{Content, PropValue, Props};
use crate::types::ScrollAxis;

// =============================================================================
// Callback Types
// =============================================================================

/// Event passed to click handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Node the click was dispatched to.
    pub target: String,
    /// Node whose handler is running (differs from `target` while bubbling).
    pub current: String,
}

/// Click callback type (Rc for shared ownership in closures).
pub type ClickHandler = Rc<dyn Fn(&ClickEvent)>;

/// Input value change callback.
pub type ChangeHandler = Rc<dyn Fn(&str)>;

// =============================================================================
// Element
// =============================================================================

/// One node of a parsed scene description.
#[derive(Clone, Default)]
pub struct Element {
    /// Markup tag (`app`, `column`, `text`, `input`, ...).
    pub tag: String,
    /// Optional id. Generated when missing.
    pub id: Option<String>,
    /// Properties in declaration order.
    pub props: Props,
    /// Leaf content.
    pub content: Option<Content>,
    pub children: Vec<Element>,
    pub on_click: Option<ClickHandler>,
    pub on_change: Option<ChangeHandler>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("id", &self.id)
            .field("props", &self.props)
            .field("content", &self.content)
            .field("children", &self.children)
            .field("on_click", &self.on_click.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl Element {
    /// Create an element with a tag and nothing else.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set any property.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Set a responsive override: `key:class`.
    pub fn responsive(self, key: &str, class: &str, value: impl Into<PropValue>) -> Self {
        self.prop(format!("{key}:{class}"), value)
    }

    pub fn layout(self, mode: &str) -> Self {
        self.prop("layout", mode)
    }

    pub fn padding(self, padding: f32) -> Self {
        self.prop("padding", padding)
    }

    pub fn spacing(self, spacing: f32) -> Self {
        self.prop("spacing", spacing)
    }

    pub fn width(self, width: f32) -> Self {
        self.prop("width", width)
    }

    pub fn height(self, height: f32) -> Self {
        self.prop("height", height)
    }

    pub fn scroll(self, axis: ScrollAxis) -> Self {
        let value = match axis {
            ScrollAxis::Vertical => "vertical",
            ScrollAxis::Horizontal => "horizontal",
        };
        self.prop("scroll", value)
    }

    // =========================================================================
    // Binding attributes (resolved at mount)
    // =========================================================================

    /// `bind="name"`: one-way state → content.
    pub fn bind(self, name: &str) -> Self {
        self.prop("bind", name)
    }

    /// `model="name"`: two-way state ↔ content.
    pub fn model(self, name: &str) -> Self {
        self.prop("model", name)
    }

    /// `sync="name"`: content → state only.
    pub fn sync(self, name: &str) -> Self {
        self.prop("sync", name)
    }

    /// `bind:prop="name"`: one-way state → property.
    pub fn bind_prop(self, prop: &str, name: &str) -> Self {
        self.prop(format!("bind:{prop}"), name)
    }

    /// `model:prop="name"`: two-way state ↔ property.
    pub fn model_prop(self, prop: &str, name: &str) -> Self {
        self.prop(format!("model:{prop}"), name)
    }

    /// `sync:prop="name"`: property → state only.
    pub fn sync_prop(self, prop: &str, name: &str) -> Self {
        self.prop(format!("sync:{prop}"), name)
    }

    // =========================================================================
    // Tree + callbacks
    // =========================================================================

    pub fn content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&ClickEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn on_change(mut self, handler: impl Fn(&str) + 'static) -> Self {
        self.on_change = Some(Rc::new(handler));
        self
    }
}
