//! Host input events.
//!
//! The host polls devices and translates them into node-addressed events;
//! the scene dispatches them. Pointer positions become node ids through
//! [`Scene::node_at`](super::Scene::node_at).

/// An input event addressed to a node id.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary click. Bubbles to the nearest ancestor with a handler.
    Click(String),
    /// The text of an input changed to the given value.
    TextChanged(String, String),
    /// Wheel or trackpad delta `(dx, dy)`. Chains to scrollable ancestors.
    ScrollDelta(String, f32, f32),
}

impl InputEvent {
    pub fn click(node_id: impl Into<String>) -> Self {
        Self::Click(node_id.into())
    }

    pub fn text_changed(node_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self::TextChanged(node_id.into(), value.into())
    }

    pub fn scroll(node_id: impl Into<String>, dx: f32, dy: f32) -> Self {
        Self::ScrollDelta(node_id.into(), dx, dy)
    }

    /// Target node id.
    pub fn node_id(&self) -> &str {
        match self {
            Self::Click(id) | Self::TextChanged(id, _) | Self::ScrollDelta(id, _, _) => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        assert_eq!(InputEvent::click("ok").node_id(), "ok");
        assert_eq!(InputEvent::text_changed("input1", "Alice").node_id(), "input1");
        assert_eq!(InputEvent::scroll("list", 0.0, 3.0).node_id(), "list");
    }
}
