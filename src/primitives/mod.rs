//! Scene Primitives - element builders.
//!
//! This module provides the pre-built tree a markup parser hands over:
//! - [`Element`] - tag, typed properties, content, children, callbacks
//! - containers: [`app`], [`column`], [`row`], [`block`]
//! - leaves: [`text`], [`input`], [`button`], [`image`]
//!
//! # Reactivity
//!
//! Binding attributes stay plain strings until mount:
//!
//! ```ignore
//! let name = input().id("input1").sync("username");
//! let greeting = text("").bind("greeting");
//! ```
//!
//! A property can also hold a signal directly, which binds that property:
//!
//! ```ignore
//! let width = signal(PropValue::from(40));
//! let bar = block().prop("width", width.clone());
//! ```

mod containers;
mod leaves;
mod types;

pub use containers::{app, block, column, row};
pub use leaves::{button, image, input, text};
pub use types::*;
