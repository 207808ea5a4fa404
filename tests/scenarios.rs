//! End-to-end scenarios through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use spark_scene::{
    app, column, input, mount, mount_with_config, row, signal, text, Breakpoint, EngineConfig, Geometry,
    InputEvent, LayoutMode, MeasureError, Node, Phase, PropValue, ScrollAxis, SceneError, StateNamespace,
};
use taffy::geometry::Size;

fn leaf_100x20(_: &Node) -> Result<Size<f32>, MeasureError> {
    Ok(Size {
        width: 100.0,
        height: 20.0,
    })
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_column_padding_spacing_geometry() {
    let root = column()
        .id("list")
        .padding(16.0)
        .spacing(12.0)
        .child(text("one").id("a"))
        .child(text("two").id("b"))
        .child(text("three").id("c"));

    let mut scene = mount(root, &StateNamespace::new(), leaf_100x20).unwrap();
    scene.tick().unwrap();

    assert_eq!(scene.geometry("a"), Some(Geometry::new(16.0, 16.0, 100.0, 20.0)));
    assert_eq!(scene.geometry("b"), Some(Geometry::new(16.0, 48.0, 100.0, 20.0)));
    assert_eq!(scene.geometry("c"), Some(Geometry::new(16.0, 80.0, 100.0, 20.0)));

    let list = scene.geometry("list").unwrap();
    assert_eq!(list.w, 132.0);
    assert_eq!(list.h, 116.0);
}

#[test]
fn test_responsive_row_becomes_column_on_mobile() {
    let build = || {
        app().id("app").child(
            row()
                .id("toolbar")
                .responsive("layout", "mobile", "column")
                .child(text("a").id("a"))
                .child(text("b").id("b")),
        )
    };

    let mut desktop = mount(build(), &StateNamespace::new(), leaf_100x20).unwrap();
    desktop.set_viewport(1280.0, 800.0);
    desktop.tick();
    assert_eq!(desktop.node("toolbar").unwrap().layout_context().mode, LayoutMode::Row);
    assert_eq!(desktop.geometry("b").unwrap().x, 100.0);

    let mut phone = mount(build(), &StateNamespace::new(), leaf_100x20).unwrap();
    phone.set_viewport(390.0, 844.0);
    phone.tick();
    assert_eq!(phone.node("toolbar").unwrap().layout_context().mode, LayoutMode::Column);
    assert_eq!(phone.geometry("b").unwrap().y, 20.0);
}

#[test]
fn test_custom_breakpoints() {
    let config = EngineConfig::default().with_breakpoints(vec![Breakpoint::new("narrow", 300.0)]);
    let root = app().id("app").child(text("x").id("t").padding(0.0).responsive("width", "narrow", 50));

    let mut scene = mount_with_config(root, &StateNamespace::new(), leaf_100x20, config).unwrap();
    scene.set_viewport(250.0, 400.0);
    scene.tick();
    assert_eq!(scene.class().as_str(), "narrow");
    assert_eq!(scene.geometry("t").unwrap().w, 50.0);
}

#[test]
fn test_layout_idempotent_across_ticks() {
    let root = column()
        .id("list")
        .padding(4.0)
        .spacing(2.0)
        .children((0..4).map(|i| text("x").id(format!("i{i}"))));
    let mut scene = mount(root, &StateNamespace::new(), leaf_100x20).unwrap();
    scene.tick();
    let before: Vec<Geometry> = scene.tree().iter().map(|(_, n)| n.geometry()).collect();

    // Resize within the same class: repaint only
    assert!(!scene.set_viewport(1000.0, 1000.0));
    scene.tick().unwrap();
    assert_eq!(scene.last_stats().nodes_sized, 0);
    let after: Vec<Geometry> = scene.tree().iter().map(|(_, n)| n.geometry()).collect();
    assert_eq!(before, after);
    assert!(scene.tick().is_none());
}

// =============================================================================
// Bindings
// =============================================================================

#[test]
fn test_sync_input_updates_state_without_write_back() {
    let mut state = StateNamespace::new();
    let username = state.signal("username", "");
    let root = app().id("app").child(input().id("input1").sync("username"));

    let mut scene = mount(root, &state, leaf_100x20).unwrap();
    scene.tick();

    scene.dispatch(&InputEvent::text_changed("input1", "Alice")).unwrap();
    assert_eq!(username.get(), PropValue::from("Alice"));

    scene.tick().unwrap();
    assert_eq!(scene.node("input1").unwrap().text(), Some("Alice"));
    assert_eq!(scene.last_stats().writes_applied, 0);
    assert_eq!(scene.last_stats().writes_suppressed, 0);

    // State changes never flow back into a sync input
    username.set(PropValue::from("Bob"));
    assert!(scene.tick().is_none());
    assert_eq!(scene.node("input1").unwrap().text(), Some("Alice"));
}

#[test]
fn test_model_binding_does_not_oscillate() {
    let mut state = StateNamespace::new();
    let name = state.signal("name", "start");
    let notifications = Rc::new(RefCell::new(0));
    let counter = notifications.clone();
    name.subscribe(move |_| *counter.borrow_mut() += 1);

    let root = app().id("app").child(input().id("field").model("name"));
    let mut scene = mount(root, &state, leaf_100x20).unwrap();
    scene.tick();
    assert_eq!(scene.node("field").unwrap().text(), Some("start"));

    scene.dispatch(&InputEvent::text_changed("field", "typed")).unwrap();
    assert_eq!(name.get(), PropValue::from("typed"));
    assert_eq!(*notifications.borrow(), 1);

    scene.tick().unwrap();
    let stats = scene.last_stats();
    assert_eq!(stats.writes_applied, 0);
    assert_eq!(stats.writes_suppressed, 1);
    assert!(scene.tick().is_none());
    assert_eq!(*notifications.borrow(), 1);

    // State → input still works
    name.set(PropValue::from("from state"));
    scene.tick().unwrap();
    assert_eq!(scene.node("field").unwrap().text(), Some("from state"));
}

#[test]
fn test_every_change_reflected_once_per_frame() {
    let mut state = StateNamespace::new();
    let a = state.signal("a", 0);
    let b = state.signal("b", 0);
    let root = column()
        .id("app")
        .child(text("").id("ta").bind("a"))
        .child(text("").id("tb").bind("b"));
    let mut scene = mount(root, &state, leaf_100x20).unwrap();
    scene.tick();

    a.set(PropValue::from(1));
    b.set(PropValue::from(1));
    a.set(PropValue::from(2));
    assert_eq!(scene.phase(), Phase::Collecting);

    scene.tick().unwrap();
    let stats = scene.last_stats();
    assert_eq!(stats.writes_applied, 3);
    // ta, tb and app
    assert_eq!(stats.nodes_sized, 3);
    assert_eq!(scene.node("ta").unwrap().text(), Some("2"));
    assert_eq!(scene.node("tb").unwrap().text(), Some("1"));
    assert_eq!(scene.phase(), Phase::Idle);
}

#[test]
fn test_unknown_binding_target_reports_node() {
    let root = app().child(text("").id("greeting").bind("salutation"));
    let err = mount(root, &StateNamespace::new(), leaf_100x20).err().unwrap();
    assert_eq!(
        err,
        SceneError::UnknownBindingTarget {
            node_id: "greeting".into(),
            name: "salutation".into()
        }
    );
}

#[test]
fn test_signal_valued_width_relayouts() {
    let width = signal(PropValue::from(40));
    let root = row().id("bar").child(text("x").id("t").prop("width", width.clone()));
    let mut scene = mount(root, &StateNamespace::new(), leaf_100x20).unwrap();
    scene.tick();
    assert_eq!(scene.geometry("bar").unwrap().w, 40.0);

    width.set(PropValue::from(75));
    scene.tick().unwrap();
    assert_eq!(scene.geometry("bar").unwrap().w, 75.0);
}

// =============================================================================
// Scrolling
// =============================================================================

#[test]
fn test_scroll_delta_clamps_to_content() {
    let root = row()
        .id("strip")
        .width(200.0)
        .scroll(ScrollAxis::Horizontal)
        .children((0..5).map(|i| text("cell").id(format!("c{i}"))));
    let mut scene = mount(root, &StateNamespace::new(), leaf_100x20).unwrap();
    scene.tick();

    let state = scene.scroll_state("strip").unwrap();
    assert_eq!(state.content, 500.0);
    assert_eq!(state.viewport, 200.0);

    assert!(scene.dispatch(&InputEvent::scroll("strip", 1000.0, 0.0)).unwrap());
    assert_eq!(scene.scroll_state("strip").unwrap().offset, 300.0);

    scene.tick().unwrap();
    assert_eq!(scene.geometry("c3").unwrap().x, 0.0);
    assert_eq!(scene.last_stats().nodes_sized, 0);
}

#[test]
fn test_scroll_chains_from_leaf_to_container() {
    let root = column()
        .id("list")
        .height(40.0)
        .scroll(ScrollAxis::Vertical)
        .children((0..6).map(|i| text("row").id(format!("r{i}"))));
    let mut scene = mount(root, &StateNamespace::new(), leaf_100x20).unwrap();
    scene.tick();

    assert!(scene.dispatch(&InputEvent::scroll("r0", 0.0, 30.0)).unwrap());
    assert_eq!(scene.scroll_state("list").unwrap().offset, 30.0);

    // Horizontal delta on a vertical list does nothing
    assert!(!scene.dispatch(&InputEvent::scroll("r0", 30.0, 0.0)).unwrap());
}

#[test]
fn test_nested_scroll_applies_alongside_unrelated_change() {
    let mut state = StateNamespace::new();
    let count = state.signal("count", 0);
    let root = column()
        .id("app")
        .child(text("").id("label").bind("count"))
        .child(
            column().id("wrapper").child(
                column()
                    .id("list")
                    .height(40.0)
                    .scroll(ScrollAxis::Vertical)
                    .children((0..6).map(|i| text("row").id(format!("r{i}")))),
            ),
        );
    let mut scene = mount(root, &state, leaf_100x20).unwrap();
    scene.tick().unwrap();
    let y0 = scene.geometry("r0").unwrap().y;

    // Bound text changes in the same frame as the scroll
    count.set(PropValue::from(1));
    assert!(scene.dispatch(&InputEvent::scroll("list", 0.0, 20.0)).unwrap());
    scene.tick().unwrap();
    assert_eq!(scene.scroll_state("list").unwrap().offset, 20.0);
    assert_eq!(scene.geometry("r0").unwrap().y, y0 - 20.0);

    // Same-class resize in the same frame as the scroll
    scene.set_viewport(1280.0, 800.0);
    scene.tick().unwrap();
    assert!(!scene.set_viewport(1100.0, 800.0));
    assert!(scene.dispatch(&InputEvent::scroll("list", 0.0, 20.0)).unwrap());
    scene.tick().unwrap();
    assert_eq!(scene.geometry("r0").unwrap().y, y0 - 40.0);
    assert!(scene.tick().is_none());
}

#[test]
fn test_content_shrink_reclamps_offset() {
    let mut state = StateNamespace::new();
    let rows = state.signal("rows", 200);
    let root = column()
        .id("list")
        .height(50.0)
        .scroll(ScrollAxis::Vertical)
        .child(block_with_height("rows"));
    let mut scene = mount(root, &state, leaf_100x20).unwrap();
    scene.tick();

    scene.scroll_to_end("list").unwrap();
    assert_eq!(scene.scroll_state("list").unwrap().offset, 150.0);

    rows.set(PropValue::from(80));
    scene.tick().unwrap();
    assert_eq!(scene.scroll_state("list").unwrap().offset, 30.0);
}

fn block_with_height(name: &str) -> spark_scene::Element {
    spark_scene::block().id("content").width(10.0).bind_prop("height", name)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_subscribers_called_in_order_with_value(
        subscribers in 1usize..8,
        values in proptest::collection::vec(-1000i32..1000, 1..10),
    ) {
        let cell = signal(0i32);
        let log = Rc::new(RefCell::new(Vec::new()));
        for id in 0..subscribers {
            let log = log.clone();
            cell.subscribe(move |v| log.borrow_mut().push((id, *v)));
        }

        for &value in &values {
            cell.set(value);
        }

        let expected: Vec<(usize, i32)> = values
            .iter()
            .flat_map(|&v| (0..subscribers).map(move |id| (id, v)))
            .collect();
        prop_assert_eq!(&*log.borrow(), &expected);
        prop_assert_eq!(cell.get(), *values.last().unwrap());
    }

    #[test]
    fn prop_scroll_offset_stays_in_range(
        items in 0usize..20,
        viewport in 1.0f32..300.0,
        deltas in proptest::collection::vec(-500.0f32..500.0, 1..10),
    ) {
        let root = column()
            .id("list")
            .height(viewport)
            .scroll(ScrollAxis::Vertical)
            .children((0..items).map(|i| text("row").id(format!("r{i}"))));
        let mut scene = mount(root, &StateNamespace::new(), leaf_100x20).unwrap();
        scene.tick();

        for delta in deltas {
            scene.dispatch(&InputEvent::scroll("list", 0.0, delta)).unwrap();
            scene.tick();
            let s = scene.scroll_state("list").unwrap();
            prop_assert!(s.offset >= 0.0);
            prop_assert!(s.offset <= (s.content - s.viewport).max(0.0));
        }
    }
}

#[test]
fn test_unknown_event_target() {
    let mut scene = mount(app().id("app"), &StateNamespace::new(), leaf_100x20).unwrap();
    assert_eq!(
        scene.dispatch(&InputEvent::text_changed("ghost", "x")),
        Err(SceneError::UnknownNode("ghost".into()))
    );
}
