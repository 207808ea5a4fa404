//! Basic Example - Mount a tree and print its layout
//!
//! Shows the simplest usage of spark-scene:
//! - Building an element tree
//! - Mounting it with a measure callback
//! - Ticking one frame and reading the draw list
//!
//! Run with: cargo run --example basic

use spark_scene::{app, column, mount, row, text, DrawCommand, MonospaceMeasure, StateNamespace};
use tracing_subscriber::EnvFilter;

fn main() -> spark_scene::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== spark-scene Basic Example ===\n");

    let root = app().id("app").padding(1.0).child(
        column()
            .id("card")
            .padding(2.0)
            .spacing(1.0)
            .prop("background", "#202030")
            .child(text("Hello, scene!").id("title").prop("bold", true))
            .child(
                row()
                    .id("tags")
                    .spacing(2.0)
                    .child(text("layout").id("tag1"))
                    .child(text("signals").id("tag2"))
                    .child(text("scroll").id("tag3")),
            ),
    );

    let state = StateNamespace::new();
    let mut scene = mount(root, &state, MonospaceMeasure::default())?;
    let Some(frame) = scene.tick() else {
        return Ok(());
    };

    println!("Geometry:");
    for (_, node) in scene.tree().iter() {
        let g = node.geometry();
        println!("  {:<6} x={:<3} y={:<3} w={:<3} h={}", node.id(), g.x, g.y, g.w, g.h);
    }

    println!("\nDraw list (frame {}):", frame.frame);
    for command in frame.iter() {
        match command {
            DrawCommand::Rect { geometry, style, .. } => {
                println!("  Rect  {:?} bg={:?}", geometry, style.bg);
            }
            DrawCommand::Text { geometry, text, .. } => {
                println!("  Text  {:?} {text:?}", geometry);
            }
            other => println!("  {other:?}"),
        }
    }

    Ok(())
}
