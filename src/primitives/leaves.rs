//! Leaf elements, sized by the renderer's measure callback.

use crate::engine::Content;

use super::types::Element;

/// Static text. Bind with `.bind("name")` to drive it from state.
pub fn text(content: impl Into<String>) -> Element {
    Element::new("text").content(Content::Text(content.into()))
}

/// Single-line text input. Starts empty.
pub fn input() -> Element {
    Element::new("input")
}

/// Button with a label.
pub fn button(label: impl Into<String>) -> Element {
    Element::new("button").content(Content::Text(label.into()))
}

/// Image referenced by an opaque renderer handle.
pub fn image(handle: u64) -> Element {
    Element::new("image").content(Content::Handle(handle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_content() {
        assert_eq!(text("hi").content, Some(Content::Text("hi".into())));
        assert_eq!(button("OK").content, Some(Content::Text("OK".into())));
        assert_eq!(image(9).content, Some(Content::Handle(9)));
        assert!(input().content.is_none());
    }

    #[test]
    fn test_input_with_placeholder_and_handler() {
        let el = input().prop("placeholder", "Name").on_change(|_| {});
        assert!(el.on_change.is_some());
        assert_eq!(el.tag, "input");
    }
}
