// src/output/mod.rs
//! Rendering and delivery of traversal results.
//!
//! Rendering is pure: a page list becomes a string. Delivery is the only
//! place that touches stdout or the filesystem.

mod render;
mod types;
mod writer;

pub use render::render_pages;
pub use types::{DeliveryTarget, OutputFormat, OutputReport};
pub use writer::deliver;
