pub mod cell;
pub mod html;
pub mod processor;

pub use cell::Grid;
pub use html::{CellColor, HtmlRenderer, Layout};
pub use processor::GridProcessor;
