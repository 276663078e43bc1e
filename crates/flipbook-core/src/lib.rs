//! Core of the flip-book: page navigation, themes and the per-motif
//! particle field. Nothing in here touches the browser; the wasm crate
//! supplies the clock, the drawing surface and the input events.

pub mod catalog;
pub mod color;
pub mod config;
pub mod engine;
pub mod input;
pub mod math;
pub mod motif;
pub mod navigation;
pub mod overlay;
pub mod particle;
pub mod surface;
pub mod theme;
pub mod view;

pub use catalog::{Catalog, CatalogError, Track};
pub use engine::{Follow, LoopToken, ParticleEngine};
pub use motif::Motif;
pub use navigation::{Direction, Navigator, Transition};
