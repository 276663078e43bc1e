//! wasm-bindgen front end for the flip-book core.

mod book;
mod canvas;
mod instance;
mod logger;

pub use book::Book;
pub use logger::init_logging;
