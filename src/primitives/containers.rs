//! Container elements.
//!
//! Containers lay out their children. The layout mode comes from the
//! `layout` property; `block` leaves it unset so children stack at the
//! content origin.
//!
//! # Example
//!
//! ```ignore
//! use spark_scene::primitives::{app, column, text};
//!
//! let root = app().child(
//!     column()
//!         .padding(16.0)
//!         .spacing(12.0)
//!         .child(text("Hello"))
//!         .child(text("World")),
//! );
//! ```

use super::types::Element;

/// The scene root.
pub fn app() -> Element {
    Element::new("app")
}

/// Children advance along y.
pub fn column() -> Element {
    Element::new("column").layout("column")
}

/// Children advance along x.
pub fn row() -> Element {
    Element::new("row").layout("row")
}

/// Children stack at the content origin.
pub fn block() -> Element {
    Element::new("block")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PropValue;
    use crate::types::{NodeKind, ScrollAxis};

    #[test]
    fn test_container_layout_props() {
        assert_eq!(column().props.get("layout"), Some(&PropValue::from("column")));
        assert_eq!(row().props.get("layout"), Some(&PropValue::from("row")));
        assert!(block().props.get("layout").is_none());
        assert_eq!(NodeKind::from_tag(&app().tag), NodeKind::Container);
    }

    #[test]
    fn test_scroll_prop() {
        let el = column().scroll(ScrollAxis::Vertical).height(200.0);
        assert_eq!(el.props.get("scroll"), Some(&PropValue::from("vertical")));
        assert_eq!(el.props.get("height"), Some(&PropValue::from(200.0f32)));
    }
}
