//! Scrolling Example - Scroll containers, clamping and chaining
//!
//! Demonstrates:
//! - A vertical list with a fixed viewport
//! - Wheel deltas clamped to the content extent
//! - Scrollbar thumb directives and culling
//!
//! Run with: cargo run --example scrolling

use spark_scene::{
    app, column, mount, text, DrawCommand, InputEvent, MonospaceMeasure, ScrollAxis, StateNamespace,
};
use tracing_subscriber::EnvFilter;

fn main() -> spark_scene::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-scene Scrolling Example ===\n");

    let items = (1..=30).map(|i| text(format!("Item {i:02}")).id(format!("item{i}")));
    let root = app().id("app").child(
        column()
            .id("list")
            .height(10.0)
            .scroll(ScrollAxis::Vertical)
            .children(items),
    );

    let state = StateNamespace::new();
    let mut scene = mount(root, &state, MonospaceMeasure::default())?;
    scene.set_viewport(80.0, 24.0);
    scene.tick();

    for delta in [3.0, 12.0, 100.0, -5.0] {
        // Wheel events usually land on a leaf; they chain up to the list
        let target = scene.node_at(1.0, 1.0).unwrap_or("list").to_string();
        scene.dispatch(&InputEvent::scroll(target, 0.0, delta))?;

        let Some(frame) = scene.tick() else {
            continue;
        };
        let scroll = scene.scroll_state("list");
        let visible: Vec<String> = frame.texts().map(|(_, t)| t.to_string()).collect();
        let thumb = frame.iter().find_map(|cmd| match cmd {
            DrawCommand::ScrollbarThumb { geometry, .. } => Some(*geometry),
            _ => None,
        });

        println!("delta {delta:>6}: offset={:?}", scroll.map(|s| s.offset));
        println!("   visible: {}", visible.join(", "));
        println!("   thumb:   {thumb:?}");
    }

    Ok(())
}
