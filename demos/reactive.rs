//! Reactive Example - Bindings and automatic updates
//!
//! This example demonstrates the three binding modes:
//! - `bind`: state drives a text node
//! - `model`: an input and state stay in sync both ways
//! - `sync`: an input feeds state without being written back
//!
//! Run with: cargo run --example reactive

use spark_scene::{
    app, button, column, input, mount, text, InputEvent, MonospaceMeasure, PropValue, StateNamespace,
};
use tracing_subscriber::EnvFilter;

fn main() -> spark_scene::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-scene Reactive Example ===\n");

    let mut state = StateNamespace::new();
    let count = state.signal("count", 0);
    let name = state.signal("name", "world");
    let username = state.signal("username", "");

    let counter = count.clone();
    let root = app().id("app").child(
        column()
            .id("form")
            .padding(1.0)
            .spacing(1.0)
            .child(text("").id("count_label").bind("count"))
            .child(button("+1").id("inc").on_click(move |_| {
                counter.update(|v| PropValue::from(v.as_number().unwrap_or(0.0) + 1.0));
            }))
            .child(input().id("name_input").model("name"))
            .child(input().id("input1").sync("username").prop("placeholder", "username")),
    );

    let mut scene = mount(root, &state, MonospaceMeasure::default())?;
    scene.tick();
    print_texts(&scene, "initial");

    // Click: handler sets state, bound text follows on the next tick
    scene.dispatch(&InputEvent::click("inc"))?;
    scene.dispatch(&InputEvent::click("inc"))?;
    scene.tick();
    print_texts(&scene, "after two clicks");

    // Two-way: state → input
    name.set(PropValue::from("scene"));
    scene.tick();
    print_texts(&scene, "after name.set");

    // Two-way: input → state, the echo is suppressed
    scene.dispatch(&InputEvent::text_changed("name_input", "typed"))?;
    scene.tick();
    println!("name signal = {:?}", name.get());
    println!("stats = {:?}", scene.last_stats());

    // Reverse: input → state only
    scene.dispatch(&InputEvent::text_changed("input1", "Alice"))?;
    scene.tick();
    println!("username signal = {:?}", username.get());
    println!("count signal = {:?}", count.get());

    Ok(())
}

fn print_texts(scene: &spark_scene::Scene, label: &str) {
    println!("-- {label}");
    for id in ["count_label", "name_input", "input1"] {
        let text = scene.node(id).and_then(|n| n.text()).unwrap_or_default();
        println!("   {id:<12} {text:?}");
    }
}
