pub mod circuit;
pub mod panel;
pub mod phase;

pub use circuit::*;
pub use panel::*;
pub use phase::*;
