//! Responsive property resolution.
//!
//! `attr:<class>` replaces `attr` while `<class>` is the active viewport
//! classification. Applies to every attribute, not only layout ones.

use crate::engine::{PropValue, Props};
use crate::error::LayoutDiagnostic;
use crate::types::{LayoutMode, ScrollAxis, ViewportClass};

use super::types::LayoutContext;

/// Effective value of `key` under `class`.
pub fn resolve_prop<'a>(props: &'a Props, key: &str, class: &ViewportClass) -> Option<&'a PropValue> {
    props
        .get(format!("{key}:{}", class.as_str()).as_str())
        .or_else(|| props.get(key))
}

/// Build the layout context of a node.
///
/// Malformed or negative numbers are clamped to 0 and reported.
pub fn resolve_context(
    node_id: &str,
    props: &Props,
    class: &ViewportClass,
    diagnostics: &mut Vec<LayoutDiagnostic>,
) -> LayoutContext {
    let mut number = |key: &str| -> Option<f32> {
        let value = resolve_prop(props, key, class)?;
        if value.as_str().is_some_and(|s| s.trim().eq_ignore_ascii_case("auto")) {
            return None;
        }
        match value.as_number() {
            Some(n) if n.is_finite() && n >= 0.0 => Some(n as f32),
            _ => {
                diagnostics.push(LayoutDiagnostic::InvalidLayoutProperty {
                    node_id: node_id.to_string(),
                    property: key.to_string(),
                    raw: value.to_display(),
                    clamped_to: 0.0,
                });
                Some(0.0)
            }
        }
    };

    let padding = number("padding").unwrap_or(0.0);
    let spacing = number("spacing").unwrap_or(0.0);
    let width = number("width");
    let height = number("height");

    let mode = resolve_prop(props, "layout", class)
        .map(PropValue::to_display)
        .and_then(|raw| LayoutMode::parse(&raw))
        .unwrap_or_default();
    let scroll = resolve_prop(props, "scroll", class)
        .map(PropValue::to_display)
        .and_then(|raw| ScrollAxis::parse(&raw));

    LayoutContext {
        mode,
        padding,
        spacing,
        scroll,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, PropValue)]) -> Props {
        pairs.iter().cloned().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_override_wins_for_active_class() {
        let p = props(&[
            ("layout", PropValue::from("row")),
            ("layout:mobile", PropValue::from("column")),
        ]);
        let mut diags = Vec::new();

        let mobile = resolve_context("n", &p, &ViewportClass::mobile(), &mut diags);
        let default = resolve_context("n", &p, &ViewportClass::default(), &mut diags);

        assert_eq!(mobile.mode, LayoutMode::Column);
        assert_eq!(default.mode, LayoutMode::Row);
        assert!(diags.is_empty());
    }

    #[test]
    fn test_override_applies_to_any_attribute() {
        let p = props(&[
            ("padding", PropValue::from(16)),
            ("padding:mobile", PropValue::from(4)),
            ("color", PropValue::from("red")),
            ("color:mobile", PropValue::from("blue")),
        ]);

        let mobile = ViewportClass::mobile();
        assert_eq!(resolve_prop(&p, "color", &mobile), Some(&PropValue::from("blue")));
        assert_eq!(resolve_prop(&p, "padding", &mobile), Some(&PropValue::from(4)));

        let default = ViewportClass::default();
        assert_eq!(resolve_prop(&p, "color", &default), Some(&PropValue::from("red")));
        assert_eq!(resolve_prop(&p, "missing", &default), None);
    }

    #[test]
    fn test_missing_layout_is_block() {
        let mut diags = Vec::new();
        let ctx = resolve_context("n", &Props::new(), &ViewportClass::default(), &mut diags);
        assert_eq!(ctx, LayoutContext::default());
        assert_eq!(ctx.mode, LayoutMode::Block);
    }

    #[test]
    fn test_negative_and_malformed_numbers_clamp() {
        let p = props(&[
            ("padding", PropValue::from(-8)),
            ("spacing", PropValue::from("lots")),
            ("width", PropValue::from("auto")),
            ("height", PropValue::from("40px")),
        ]);
        let mut diags = Vec::new();

        let ctx = resolve_context("box", &p, &ViewportClass::default(), &mut diags);

        assert_eq!(ctx.padding, 0.0);
        assert_eq!(ctx.spacing, 0.0);
        assert_eq!(ctx.width, None);
        assert_eq!(ctx.height, Some(40.0));
        assert_eq!(diags.len(), 2);
        assert_eq!(
            diags[0],
            LayoutDiagnostic::InvalidLayoutProperty {
                node_id: "box".into(),
                property: "padding".into(),
                raw: "-8".into(),
                clamped_to: 0.0,
            }
        );
    }

    #[test]
    fn test_scroll_axis() {
        let p = props(&[("scroll", PropValue::from("horizontal"))]);
        let mut diags = Vec::new();
        let ctx = resolve_context("s", &p, &ViewportClass::default(), &mut diags);
        assert_eq!(ctx.scroll, Some(ScrollAxis::Horizontal));
    }
}
